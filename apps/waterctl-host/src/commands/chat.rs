//! Chat command delivery: one-shot `exec` and line-based `repl`.

use std::io::{IsTerminal, Write};

use anyhow::Result;
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use waterctl_config::WaterctlConfig;
use waterctl_plugin::registry::command_name;
use waterctl_plugin::{COMMAND_NAME, CommandRegistry, WaterctlPlugin};

/// A loaded plugin and its registry.
pub struct Session {
    registry: CommandRegistry,
}

impl Session {
    pub async fn start(config: &WaterctlConfig, health_check: bool) -> Self {
        let plugin = WaterctlPlugin::new(config.bridge_config());
        if health_check {
            // Outcome is logged by the plugin; startup continues either way.
            let _ = plugin.initialize().await;
        }
        Self::from_plugin(&plugin)
    }

    fn from_plugin<B: waterctl_bridge::Bridge + 'static>(plugin: &WaterctlPlugin<B>) -> Self {
        Self {
            registry: plugin.registry(),
        }
    }

    pub async fn exec(&self, words: &[String]) -> Result<()> {
        let message = compose(&self.registry, words);
        let mut out = std::io::stdout().lock();
        deliver(&self.registry, &message, &mut out).await?;
        Ok(())
    }

    pub async fn repl(&self) -> Result<()> {
        let interactive = std::io::stdin().is_terminal();
        let input = BufReader::new(tokio::io::stdin());
        run_repl(&self.registry, input, std::io::stdout(), interactive).await
    }

    pub fn list_commands(&self) {
        for name in self.registry.list_names() {
            if let Some(handler) = self.registry.get(name) {
                println!("/{name} - {}", handler.description());
            }
        }
    }
}

/// Joins argv words into a chat message, prefixing `waterctl` when the first
/// word is not a registered command.
fn compose(registry: &CommandRegistry, words: &[String]) -> String {
    let line = words.join(" ");
    match command_name(&line) {
        Some(name) if registry.contains(&name) => line,
        _ => format!("{COMMAND_NAME} {line}"),
    }
}

/// Dispatches each line of `input` until `quit`, `exit` or EOF. Lines that
/// are not UTF-8 are skipped.
async fn run_repl<R, W>(
    registry: &CommandRegistry,
    input: R,
    mut out: W,
    interactive: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.split(b'\n');

    loop {
        if interactive {
            eprint!("> ");
        }
        let Some(raw) = lines.next_segment().await? else {
            break;
        };
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e.utf8_error(), "skipping input line that is not valid UTF-8");
                continue;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        if !deliver(registry, line, &mut out).await? {
            let name = command_name(line).unwrap_or_default();
            writeln!(out, "Unknown command: {name}")?;
            writeln!(out, "Available: {}\n", registry.list_names().join(", "))?;
        }
    }
    Ok(())
}

/// Writes every reply for `message`, each followed by a blank line.
/// Returns false when no command matched.
async fn deliver<W: Write>(registry: &CommandRegistry, message: &str, out: &mut W) -> Result<bool> {
    let Some(mut replies) = registry.dispatch(message) else {
        debug!(message, "no command registered for message");
        return Ok(false);
    };

    while let Some(reply) = replies.next().await {
        writeln!(out, "{reply}\n")?;
        out.flush()?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use waterctl_bridge::{BridgeClient, BridgeConfig, DEPENDENCY_MISSING};

    fn offline_session() -> Session {
        let bridge = BridgeClient::unavailable(BridgeConfig::new());
        Session::from_plugin(&WaterctlPlugin::with_bridge(Arc::new(bridge)))
    }

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn compose_prefixes_bare_subcommands() {
        let session = offline_session();
        assert_eq!(compose(&session.registry, &words("scan")), "waterctl scan");
        assert_eq!(
            compose(&session.registry, &words("/waterctl status")),
            "/waterctl status"
        );
        assert_eq!(compose(&session.registry, &words("WATERCTL on")), "WATERCTL on");
    }

    #[tokio::test]
    async fn deliver_writes_each_reply() {
        let session = offline_session();
        let mut out = Vec::new();

        let matched = deliver(&session.registry, "/waterctl status", &mut out)
            .await
            .unwrap();
        assert!(matched);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(DEPENDENCY_MISSING));
        assert!(text.ends_with("\n\n"));
    }

    #[tokio::test]
    async fn repl_skips_invalid_utf8_and_keeps_reading() {
        let session = offline_session();
        let input: &[u8] = b"/weather\n\xff\xfe broken\n/waterctl status\nquit\n/waterctl\n";
        let mut out = Vec::new();

        run_repl(&session.registry, input, &mut out, false)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Unknown command: weather"));
        assert!(text.contains("Available: waterctl"));
        assert_eq!(text.matches(DEPENDENCY_MISSING).count(), 1, "{text}");
    }

    #[tokio::test]
    async fn repl_stops_at_eof_without_trailing_newline() {
        let session = offline_session();
        let input: &[u8] = b"  \n/waterctl on";
        let mut out = Vec::new();

        run_repl(&session.registry, input, &mut out, false)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(DEPENDENCY_MISSING));
    }

    #[tokio::test]
    async fn deliver_reports_unmatched_commands() {
        let session = offline_session();
        let mut out = Vec::new();

        let matched = deliver(&session.registry, "/weather", &mut out).await.unwrap();
        assert!(!matched);
        assert!(out.is_empty());
    }
}
