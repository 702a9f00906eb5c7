//! Configuration management commands.
//!
//! Provides init and show subcommands for waterctl.json files, plus the
//! loading helpers the chat commands share.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use waterctl_bridge::config::normalize_base_url;
use waterctl_config::{
    LoadedConfig, WaterctlConfig,
    loader::{ConfigPaths, global_config_path, load_merged, local_config_path},
    validation::{self, AdvisoryWarning},
    writer::write_config,
};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default waterctl.json
    Init {
        /// Create the global config instead of the local one
        #[arg(long)]
        global: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Output as compact JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn execute(cmd: ConfigCommands, dir: &Path, bridge_url: Option<&str>) -> Result<()> {
    match cmd {
        ConfigCommands::Init { global, force } => cmd_init(dir, global, force),
        ConfigCommands::Show { json } => cmd_show(dir, bridge_url, json),
    }
}

/// Loads config for `dir` and applies the `--bridge-url` override on top.
pub fn effective(dir: &Path, bridge_url: Option<&str>) -> Result<LoadedConfig> {
    let mut loaded = load_merged(dir)?;
    if let Some(url) = bridge_url {
        loaded.config.bridge_url = normalize_base_url(url);
        loaded.warnings = validation::validate(&loaded.config);
    }
    Ok(loaded)
}

pub fn print_warnings(warnings: &[AdvisoryWarning]) {
    for warning in warnings {
        eprintln!("{} {}", "WARN".yellow(), warning);
    }
}

/// Lists the files `config show` merged, on stderr so stdout stays JSON.
fn print_sources(paths: &ConfigPaths) {
    let global = paths.global.as_deref();
    for (label, path) in [("global", global), ("local", Some(paths.local.as_path()))] {
        match path {
            Some(p) if p.exists() => eprintln!("{label}: {}", p.display()),
            Some(p) => eprintln!("{label}: {} {}", p.display(), "(not found)".dimmed()),
            None => eprintln!("{label}: {}", "(no config dir)".dimmed()),
        }
    }
}

fn cmd_init(dir: &Path, global: bool, force: bool) -> Result<()> {
    let path = if global {
        global_config_path()?
    } else {
        local_config_path(dir)
    };

    write_config(&path, &WaterctlConfig::default(), force)?;

    println!(
        "{} Created {}",
        "OK".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

fn cmd_show(dir: &Path, bridge_url: Option<&str>, compact: bool) -> Result<()> {
    let loaded = effective(dir, bridge_url)?;
    print_sources(&loaded.paths);
    print_warnings(&loaded.warnings);

    let out = if compact {
        serde_json::to_string(&loaded.config)
    } else {
        serde_json::to_string_pretty(&loaded.config)
    }
    .context("Failed to serialize config")?;

    println!("{out}");
    Ok(())
}
