//! Reply text for every `waterctl` outcome.
//!
//! Formatters take the raw JSON the bridge returned. An `error` key always
//! wins; otherwise each subcommand reads its own fields and falls back to
//! defaults for anything missing or `null`.

use serde_json::Value;
use waterctl_bridge::DEPENDENCY_MISSING;

use crate::parse::{ParseError, Subcommand};

pub const SCANNING: &str = "🔍 Scanning for nearby Bluetooth devices...";
pub const NO_DEVICES: &str = "❌ No Bluetooth devices found";
pub const ADDRESS_REQUIRED: &str =
    "❌ Please provide a device address, e.g. /waterctl connect AA:BB:CC:DD:EE:FF";

/// Usage text listing every subcommand and the bridge being used.
#[must_use]
pub fn help(bridge_url: &str) -> String {
    format!(
        "📖 Usage:\n\
         \x20 /waterctl scan - scan for nearby Bluetooth water controllers\n\
         \x20 /waterctl connect <address> - connect to the given device\n\
         \x20 /waterctl on - turn the water controller on\n\
         \x20 /waterctl off - turn the water controller off\n\
         \x20 /waterctl status - show device status\n\
         \n\
         🌐 Bridge address: {bridge_url}"
    )
}

#[must_use]
pub fn dependency_missing() -> String {
    format!("❌ Error: HTTP client {DEPENDENCY_MISSING}, the bridge cannot be reached")
}

#[must_use]
pub fn unknown_subcommand(token: &str) -> String {
    format!("❌ Unknown command: {token}\nSend /waterctl for help")
}

/// Reply for a command line that never reached the bridge.
#[must_use]
pub fn parse_error(err: &ParseError, bridge_url: &str) -> String {
    match err {
        ParseError::MissingSubcommand => help(bridge_url),
        ParseError::MissingAddress => ADDRESS_REQUIRED.to_string(),
        ParseError::Unknown(token) => unknown_subcommand(token),
    }
}

/// Message sent before the request starts, if the subcommand has one.
#[must_use]
pub const fn progress(subcommand: &Subcommand) -> Option<&'static str> {
    match subcommand {
        Subcommand::Scan => Some(SCANNING),
        _ => None,
    }
}

/// Final reply for a subcommand given the bridge's answer.
#[must_use]
pub fn reply(subcommand: &Subcommand, result: &Value, bridge_url: &str) -> String {
    match subcommand {
        Subcommand::Scan => scan(result),
        Subcommand::Connect { .. } => action(result, "Connection failed", "Connected to device"),
        Subcommand::On => action(result, "Operation failed", "Water controller turned on"),
        Subcommand::Off => action(result, "Operation failed", "Water controller turned off"),
        Subcommand::Status => status(result, bridge_url),
    }
}

#[must_use]
pub fn scan(result: &Value) -> String {
    if let Some(err) = result.get("error") {
        return failure("Scan failed", err);
    }

    match result.get("devices") {
        Some(devices) if !truthy(devices) => NO_DEVICES.to_string(),
        Some(Value::Array(devices)) => {
            let mut out = String::from("📱 Bluetooth devices found:\n");
            for (i, device) in devices.iter().enumerate() {
                out.push_str(&format!(
                    "\n{}. {}\n   Address: {}\n   RSSI: {} dBm\n",
                    i + 1,
                    field(device, "name", "unknown"),
                    field(device, "address", "N/A"),
                    field(device, "rssi", "N/A"),
                ));
            }
            out.trim_end().to_string()
        }
        _ => unknown_response(result),
    }
}

/// Shared by `connect`, `on` and `off`: all answer `{success, message?}`.
#[must_use]
pub fn action(result: &Value, failure_label: &str, success_default: &str) -> String {
    if let Some(err) = result.get("error") {
        return failure(failure_label, err);
    }

    if result.get("success").is_some_and(truthy) {
        format!("✅ {}", field(result, "message", success_default))
    } else {
        format!("❌ {failure_label}: {result}")
    }
}

#[must_use]
pub fn status(result: &Value, bridge_url: &str) -> String {
    if let Some(err) = result.get("error") {
        return failure("Failed to get status", err);
    }

    let address = field(result, "device_address", "not set");
    let (icon, text) = if result.get("connected").is_some_and(truthy) {
        ("✅", "connected")
    } else {
        ("❌", "disconnected")
    };

    format!("{icon} Device status: {text}\nDevice address: {address}\nBridge: {bridge_url}")
}

#[must_use]
pub fn unknown_response(result: &Value) -> String {
    format!("❌ Unknown response: {result}")
}

/// Loose truthiness for bridge flags: `null`, `false`, zero, and empty
/// strings, lists or objects are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn failure(label: &str, err: &Value) -> String {
    format!("❌ {label}: {}", text(err))
}

fn field(value: &Value, key: &str, default: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(v) => text(v),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
