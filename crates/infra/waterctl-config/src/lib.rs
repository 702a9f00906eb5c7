//! Configuration for the waterctl chat plugin.
//!
//! This crate provides:
//! - [`WaterctlConfig`]: bridge address, timeouts and logging settings
//! - [`load_merged`]: two-layer config loading (global + local) with env overrides
//! - [`validation`]: advisory validation that produces warnings
//! - [`writer`]: atomic creation of config files
//!
//! # Configuration Precedence (lowest to highest)
//! 1. Default values
//! 2. Global config (`~/.config/waterctl/waterctl.json`)
//! 3. Local config (`./waterctl.json`)
//! 4. Environment variables
//!
//! # Example
//! ```no_run
//! use waterctl_config::load_merged;
//! use std::path::Path;
//!
//! let loaded = load_merged(Path::new(".")).unwrap();
//! println!("Bridge: {}", loaded.config.bridge_url);
//!
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```
//!
//! # Environment Variables
//! - `WATERCTL_BRIDGE_URL`: Override the bridge base URL
//! - `WATERCTL_REQUEST_TIMEOUT_SECS`: Override the per-request timeout
//! - `WATERCTL_HEALTH_TIMEOUT_SECS`: Override the startup health check timeout
//! - `WATERCTL_LOG_LEVEL`: Override log level
//! - `WATERCTL_LOG_JSON`: Enable JSON logging ("true" or "1")

pub mod loader;
pub mod types;
pub mod validation;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use loader::{LoadedConfig, load_merged};
pub use types::{LoggingConfig, WaterctlConfig};
