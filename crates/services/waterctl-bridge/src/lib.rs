//! # `waterctl-bridge`
//!
//! HTTP client for the waterctl bridge: the external service that owns the
//! Bluetooth side of a water controller and exposes it as a small JSON API.
//!
//! ## Quick Start
//!
//! ```no_run
//! use waterctl_bridge::{Bridge, BridgeClient, BridgeConfig, Endpoint};
//!
//! # async fn example() {
//! let client = BridgeClient::new(BridgeConfig::new().with_base_url("http://localhost:5000/"));
//!
//! let status = client.call(Endpoint::Status, None).await;
//! if let Some(err) = status.get("error") {
//!     eprintln!("bridge unreachable: {err}");
//! }
//! # }
//! ```
//!
//! ## Error payloads
//!
//! [`Bridge::request`] never fails. Transport and decoding problems are folded
//! into an `{"error": "..."}` object so callers format every outcome the same
//! way. Use [`BridgeClient::try_request`] when the typed [`BridgeError`] is
//! wanted instead.

/// HTTP client and the [`Bridge`] seam
pub mod client;
/// Base URL and timeout configuration
pub mod config;
/// Fixed bridge endpoints
pub mod endpoint;
/// Error types
pub mod error;

pub use crate::client::{Bridge, BridgeClient};
pub use crate::config::{BridgeConfig, DEFAULT_BRIDGE_URL};
pub use crate::endpoint::Endpoint;
pub use crate::error::{BridgeError, DEPENDENCY_MISSING};
