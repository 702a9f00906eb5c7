//! Command line parsing for `waterctl`.

use serde_json::{Value, json};
use thiserror::Error;
use waterctl_bridge::Endpoint;

/// Name the command is registered under.
pub const COMMAND_NAME: &str = "waterctl";

/// One of the five operations the bridge supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcommand {
    Scan,
    /// Address is upper-cased during parsing.
    Connect {
        address: String,
    },
    On,
    Off,
    Status,
}

impl Subcommand {
    pub const NAMES: [&'static str; 5] = ["scan", "connect", "on", "off", "status"];

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Connect { .. } => "connect",
            Self::On => "on",
            Self::Off => "off",
            Self::Status => "status",
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        match self {
            Self::Scan => Endpoint::Scan,
            Self::Connect { .. } => Endpoint::Connect,
            Self::On => Endpoint::ControlOn,
            Self::Off => Endpoint::ControlOff,
            Self::Status => Endpoint::Status,
        }
    }

    /// Request body sent with the call, if any.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Connect { address } => Some(json!({ "address": address })),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no subcommand given")]
    MissingSubcommand,

    #[error("connect requires a device address")]
    MissingAddress,

    #[error("unknown subcommand: {0}")]
    Unknown(String),
}

/// Parses a full command line such as `/waterctl connect aa:bb:cc:dd:ee:ff`.
///
/// The first token is the command name and is not inspected. The subcommand
/// is matched case-insensitively; extra trailing tokens are ignored.
pub fn parse(message: &str) -> Result<Subcommand, ParseError> {
    let mut tokens = message.split_whitespace().skip(1);
    let subcommand = tokens
        .next()
        .ok_or(ParseError::MissingSubcommand)?
        .to_lowercase();

    match subcommand.as_str() {
        "scan" => Ok(Subcommand::Scan),
        "connect" => tokens
            .next()
            .map(|address| Subcommand::Connect {
                address: address.to_uppercase(),
            })
            .ok_or(ParseError::MissingAddress),
        "on" => Ok(Subcommand::On),
        "off" => Ok(Subcommand::Off),
        "status" => Ok(Subcommand::Status),
        _ => Err(ParseError::Unknown(subcommand)),
    }
}
