use std::error::Error as _;

use serde_json::{Value, json};
use thiserror::Error;

/// Message returned for every call when no HTTP client could be built.
pub const DEPENDENCY_MISSING: &str = "dependency not installed";

const BODY_PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{}", DEPENDENCY_MISSING)]
    Unavailable,

    /// Connection refused, DNS failure, timeout or a broken body stream.
    #[error("cannot connect to bridge: {0}")]
    Transport(String),

    #[error("bridge returned HTTP {status}")]
    Status { status: u16 },

    #[error("invalid JSON from bridge: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Folds the error into the `{"error": "..."}` shape callers format.
    #[must_use]
    pub fn into_payload(self) -> Value {
        json!({ "error": self.to_string() })
    }

    pub(crate) fn decode(err: &serde_json::Error, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let preview: String = text.chars().take(BODY_PREVIEW_LIMIT).collect();
        Self::Decode(format!("{err}: {preview}"))
    }

    /// Whether the failure happened on the wire rather than in this process.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::Other(describe(&err));
        }
        Self::Transport(describe(&err))
    }
}

/// reqwest's top-level message omits the cause ("error sending request for
/// url"); append the source chain so the user sees e.g. "connection refused".
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
