//! Configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use waterctl_bridge::{BridgeConfig, DEFAULT_BRIDGE_URL};

/// Root configuration, loaded from `waterctl.json` files.
///
/// All fields use `#[serde(default)]` so partial configs work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterctlConfig {
    /// Base URL of the bridge program. Trailing `/` is stripped on load.
    pub bridge_url: String,

    /// Timeout for scan/connect/control/status requests, in seconds.
    pub request_timeout_secs: u64,

    /// Timeout for the startup health check, in seconds.
    pub health_timeout_secs: u64,

    pub logging: LoggingConfig,
}

impl Default for WaterctlConfig {
    fn default() -> Self {
        Self {
            bridge_url: DEFAULT_BRIDGE_URL.into(),
            request_timeout_secs: 10,
            health_timeout_secs: 3,
            logging: LoggingConfig::default(),
        }
    }
}

impl WaterctlConfig {
    /// Client configuration derived from these settings.
    #[must_use]
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::new()
            .with_base_url(self.bridge_url.as_str())
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_health_timeout(Duration::from_secs(self.health_timeout_secs))
    }
}

/// Logging and diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Whether to enable JSON-formatted logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}
