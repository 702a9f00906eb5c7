//! Terminal host for the waterctl chat plugin.
//!
//! Plays the part of the chat-bot runtime: loads configuration, sets up
//! logging, builds the command registry and delivers command lines to it,
//! printing each reply as it arrives.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use waterctl_config::LoggingConfig;
use waterctl_config::validation::is_known_log_level;

mod commands;

#[derive(Parser)]
#[command(name = "waterctl-host")]
#[command(about = "Send waterctl chat commands to a Bluetooth water controller bridge")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Bridge base URL; overrides config files and WATERCTL_BRIDGE_URL
    #[arg(long, global = true, value_name = "URL")]
    bridge_url: Option<String>,

    /// Directory holding the local waterctl.json (defaults to current dir)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Skip the startup health check against the bridge
    #[arg(long, global = true)]
    skip_health_check: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deliver one chat command, e.g. `exec waterctl connect AA:BB:CC:DD:EE:FF`
    Exec {
        /// Command words; `waterctl` is prepended when the first word is not a command
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Read chat commands from stdin, one per line
    Repl,

    /// List the registered chat commands
    Commands,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let bridge_url = cli.bridge_url.as_deref();

    let chat = match cli.command {
        Commands::Config { command } => {
            init_tracing(cli.verbose, None);
            return commands::config::execute(command, &dir, bridge_url);
        }
        Commands::Exec { words } => ChatAction::Exec(words),
        Commands::Repl => ChatAction::Repl,
        Commands::Commands => ChatAction::List,
    };

    let loaded = commands::config::effective(&dir, bridge_url)?;
    init_tracing(cli.verbose, Some(&loaded.config.logging));
    commands::config::print_warnings(&loaded.warnings);

    let session = commands::chat::Session::start(&loaded.config, !cli.skip_health_check).await;
    match chat {
        ChatAction::Exec(words) => session.exec(&words).await,
        ChatAction::Repl => session.repl().await,
        ChatAction::List => {
            session.list_commands();
            Ok(())
        }
    }
}

enum ChatAction {
    Exec(Vec<String>),
    Repl,
    List,
}

/// Logs go to stderr so replies on stdout stay clean. `RUST_LOG` wins over
/// both `-v` and the configured level.
fn init_tracing(verbose: u8, logging: Option<&LoggingConfig>) {
    let level = filter_level(verbose, logging);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.is_some_and(|l| l.json) {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Default filter when `RUST_LOG` is unset. An unrecognized configured level
/// falls back to `info` instead of being read as a target directive.
fn filter_level(verbose: u8, logging: Option<&LoggingConfig>) -> String {
    match verbose {
        0 => match logging {
            Some(l) if is_known_log_level(&l.level) => l.level.to_lowercase(),
            Some(_) => "info".into(),
            None => "warn".into(),
        },
        1 => "info".into(),
        2 => "debug".into(),
        _ => "trace".into(),
    }
}
