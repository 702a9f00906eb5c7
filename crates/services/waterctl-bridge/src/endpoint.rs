use std::fmt;

use reqwest::Method;

/// The fixed set of paths the bridge serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /health`, probed once at startup.
    Health,
    /// `GET /scan`, lists nearby devices.
    Scan,
    /// `POST /connect` with `{"address": ...}`.
    Connect,
    /// `POST /control/on`
    ControlOn,
    /// `POST /control/off`
    ControlOff,
    /// `GET /status`
    Status,
}

impl Endpoint {
    pub const ALL: [Self; 6] = [
        Self::Health,
        Self::Scan,
        Self::Connect,
        Self::ControlOn,
        Self::ControlOff,
        Self::Status,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Scan => "/scan",
            Self::Connect => "/connect",
            Self::ControlOn => "/control/on",
            Self::ControlOff => "/control/off",
            Self::Status => "/status",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Health | Self::Scan | Self::Status => Method::GET,
            Self::Connect | Self::ControlOn | Self::ControlOff => Method::POST,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_get_and_actions_are_post() {
        assert_eq!(Endpoint::Scan.method(), Method::GET);
        assert_eq!(Endpoint::Status.method(), Method::GET);
        assert_eq!(Endpoint::Connect.method(), Method::POST);
        assert_eq!(Endpoint::ControlOff.method(), Method::POST);
    }

    #[test]
    fn paths_are_rooted() {
        for endpoint in Endpoint::ALL {
            assert!(endpoint.path().starts_with('/'), "{endpoint}");
        }
        assert_eq!(Endpoint::ControlOn.to_string(), "POST /control/on");
    }
}
