use futures::future::BoxFuture;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::{config::BridgeConfig, endpoint::Endpoint, error::BridgeError};

/// Anything that can answer bridge requests.
///
/// Implemented by [`BridgeClient`]; command handlers depend on this trait so
/// they can be driven by an in-memory bridge in tests.
pub trait Bridge: Send + Sync {
    /// Sends one request and returns the JSON body, or `{"error": "..."}` on
    /// any failure. Never panics and never returns an `Err`.
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
    ) -> BoxFuture<'a, Value>;

    /// Base URL the bridge is reached at, without a trailing slash.
    fn base_url(&self) -> &str;

    /// False when no HTTP client is available; every request then
    /// short-circuits to the dependency-missing payload.
    fn is_available(&self) -> bool;

    /// Sends a request to one of the fixed [`Endpoint`]s.
    fn call(&self, endpoint: Endpoint, body: Option<Value>) -> BoxFuture<'_, Value> {
        self.request(endpoint.method(), endpoint.path(), body)
    }
}

/// HTTP client for the bridge service.
///
/// Holds an optional `reqwest` client: when it is absent the client is in the
/// "dependency not installed" state and performs no network I/O.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: Option<reqwest::Client>,
    config: BridgeConfig,
}

impl Default for BridgeClient {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl BridgeClient {
    /// Creates a client for the given configuration.
    ///
    /// If the underlying HTTP client cannot be built (for instance the TLS
    /// backend fails to initialize) the failure is logged and the client is
    /// returned in the unavailable state.
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        match reqwest::Client::builder()
            .connect_timeout(config.request_timeout())
            .build()
        {
            Ok(http) => Self {
                http: Some(http),
                config,
            },
            Err(e) => {
                error!(error = %e, "failed to build HTTP client; bridge requests are disabled");
                Self::unavailable(config)
            }
        }
    }

    /// Creates a client with no HTTP capability.
    #[must_use]
    pub const fn unavailable(config: BridgeConfig) -> Self {
        Self { http: None, config }
    }

    /// Sends one request with the normal timeout, keeping the typed error.
    ///
    /// The body is decoded as JSON whatever the status code: the bridge
    /// reports its own failures as `{"error": ...}` bodies.
    pub async fn try_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, BridgeError> {
        let http = self.http.as_ref().ok_or(BridgeError::Unavailable)?;
        let url = self.config.url(path);
        debug!(%method, %url, "sending bridge request");

        let mut builder = http
            .request(method, &url)
            .timeout(self.config.request_timeout());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "bridge responded");

        serde_json::from_slice(&bytes).map_err(|e| BridgeError::decode(&e, &bytes))
    }

    /// Probes `GET /health` with the short health timeout.
    ///
    /// Unlike [`Bridge::request`], a non-200 status is an error here.
    pub async fn health(&self) -> Result<Value, BridgeError> {
        let http = self.http.as_ref().ok_or(BridgeError::Unavailable)?;
        let url = self.config.url(Endpoint::Health.path());
        let timeout = self.config.health_timeout();
        debug!(%url, ?timeout, "probing bridge health");

        let response = http.get(&url).timeout(timeout).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(BridgeError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| BridgeError::decode(&e, &bytes))
    }
}

impl Bridge for BridgeClient {
    fn request<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<Value>,
    ) -> BoxFuture<'a, Value> {
        Box::pin(async move {
            match self.try_request(method, path, body.as_ref()).await {
                Ok(value) => value,
                Err(BridgeError::Unavailable) => BridgeError::Unavailable.into_payload(),
                Err(e) if e.is_transport() => {
                    warn!(error = %e, path, "bridge request failed");
                    e.into_payload()
                }
                Err(e) => {
                    error!(error = %e, path, "bridge request error");
                    e.into_payload()
                }
            }
        })
    }

    fn base_url(&self) -> &str {
        self.config.base_url()
    }

    fn is_available(&self) -> bool {
        self.http.is_some()
    }
}
