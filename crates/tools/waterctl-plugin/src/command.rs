use std::sync::Arc;

use futures::StreamExt;
use futures::future;
use futures::stream;
use tracing::{debug, info, warn};
use waterctl_bridge::Bridge;

use crate::format;
use crate::parse::{COMMAND_NAME, parse};
use crate::registry::{CommandHandler, ReplyStream};

/// The `waterctl` chat command.
///
/// Every invocation makes at most one bridge request. Failures of any kind
/// end up as reply text; nothing is returned to the host as an error.
pub struct WaterctlCommand<B> {
    bridge: Arc<B>,
}

impl<B> WaterctlCommand<B> {
    pub const fn new(bridge: Arc<B>) -> Self {
        Self { bridge }
    }
}

impl<B: Bridge + 'static> WaterctlCommand<B> {
    /// Replies for one message, in order.
    pub fn replies(&self, message: &str) -> ReplyStream {
        if !self.bridge.is_available() {
            warn!("waterctl invoked without an HTTP client");
            return single(format::dependency_missing());
        }

        let subcommand = match parse(message) {
            Ok(subcommand) => subcommand,
            Err(err) => {
                debug!(%err, "waterctl command rejected before reaching the bridge");
                return single(format::parse_error(&err, self.bridge.base_url()));
            }
        };

        info!(subcommand = subcommand.name(), "handling waterctl command");
        let progress = format::progress(&subcommand).map(str::to_string);
        let bridge = Arc::clone(&self.bridge);
        let result = stream::once(async move {
            let payload = bridge
                .call(subcommand.endpoint(), subcommand.body())
                .await;
            format::reply(&subcommand, &payload, bridge.base_url())
        });

        stream::iter(progress).chain(result).boxed()
    }
}

impl<B: Bridge + 'static> CommandHandler for WaterctlCommand<B> {
    fn name(&self) -> &'static str {
        COMMAND_NAME
    }

    fn description(&self) -> &'static str {
        "Control a Bluetooth water controller (scan, connect, on, off, status)"
    }

    fn handle(&self, message: &str) -> ReplyStream {
        self.replies(message)
    }
}

fn single(reply: String) -> ReplyStream {
    stream::once(future::ready(reply)).boxed()
}
