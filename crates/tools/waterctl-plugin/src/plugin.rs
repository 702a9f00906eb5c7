use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use waterctl_bridge::{Bridge, BridgeClient, BridgeConfig, BridgeError};

use crate::command::WaterctlCommand;
use crate::registry::CommandRegistry;

/// The plugin as the host sees it: one bridge, one registry.
pub struct WaterctlPlugin<B = BridgeClient> {
    bridge: Arc<B>,
}

impl WaterctlPlugin<BridgeClient> {
    /// Builds the plugin around a real HTTP bridge client.
    pub fn new(config: BridgeConfig) -> Self {
        info!(bridge_url = config.base_url(), "waterctl bridge address");
        Self::with_bridge(Arc::new(BridgeClient::new(config)))
    }

    /// Startup check against `GET /health`.
    ///
    /// Only logs: an unreachable bridge does not stop the plugin from
    /// loading, since it may come up later. The probe result is returned for
    /// callers that want to show it.
    pub async fn initialize(&self) -> Result<Value, BridgeError> {
        if !self.bridge.is_available() {
            error!("HTTP client unavailable; waterctl plugin cannot reach the bridge");
            return Err(BridgeError::Unavailable);
        }
        info!("waterctl plugin initialized");

        let result = self.bridge.health().await;
        match &result {
            Ok(data) => info!(%data, "bridge reachable"),
            Err(BridgeError::Status { status }) => {
                warn!(status, "bridge health check returned an unexpected status");
            }
            Err(e) => warn!(error = %e, "cannot reach bridge; make sure the bridge program is running"),
        }
        result
    }
}

impl<B: Bridge + 'static> WaterctlPlugin<B> {
    pub const fn with_bridge(bridge: Arc<B>) -> Self {
        Self { bridge }
    }

    /// Registry holding the `waterctl` command bound to this plugin's bridge.
    pub fn registry(&self) -> CommandRegistry {
        CommandRegistry::builder()
            .register(WaterctlCommand::new(Arc::clone(&self.bridge)))
            .finish()
    }
}
