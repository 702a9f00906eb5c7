//! Configuration loader with two-layer merge and env overrides.
//!
//! The loading process:
//! 1. Read global config from `~/.config/waterctl/waterctl.json`
//! 2. Read local config from `./waterctl.json`
//! 3. Deep merge at JSON Value level (local wins, `null` removes a key)
//! 4. Deserialize once into typed [`WaterctlConfig`]
//! 5. Apply env var overrides (highest precedence)
//! 6. Normalize the bridge URL and run advisory validation

use crate::{types::WaterctlConfig, validation::AdvisoryWarning};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use waterctl_bridge::config::normalize_base_url;

/// Filename for local config.
pub const LOCAL_FILE: &str = "waterctl.json";

/// Directory name under config_dir for global config.
pub const GLOBAL_DIR: &str = "waterctl";

/// Filename for global config.
pub const GLOBAL_FILE: &str = "waterctl.json";

/// Resolved paths for config files.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub local: PathBuf,

    /// `None` when the platform has no config directory.
    pub global: Option<PathBuf>,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: WaterctlConfig,
    pub warnings: Vec<AdvisoryWarning>,
    pub paths: ConfigPaths,
}

/// Get the global config file path.
pub fn global_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config dir")?;
    Ok(base.join(GLOBAL_DIR).join(GLOBAL_FILE))
}

/// Get the local config file path for a given directory.
pub fn local_config_path(local_dir: &Path) -> PathBuf {
    local_dir.join(LOCAL_FILE)
}

/// Load and merge configuration from the global file and `local_dir`.
pub fn load_merged(local_dir: &Path) -> Result<LoadedConfig> {
    let global = global_config_path().ok();
    load_from(global.as_deref(), local_dir)
}

/// Same as [`load_merged`] with an explicit global file (or none).
pub fn load_from(global_path: Option<&Path>, local_dir: &Path) -> Result<LoadedConfig> {
    let local_path = local_config_path(local_dir);

    let global_v = match global_path {
        Some(path) => read_json_object_or_empty(path)?,
        None => Map::new(),
    };
    let local_v = read_json_object_or_empty(&local_path)?;

    let merged = Value::Object(merge(global_v, local_v));
    let mut cfg: WaterctlConfig = serde_json::from_value(merged)
        .context("Failed to deserialize merged waterctl config")?;

    apply_env_overrides(&mut cfg);
    cfg.bridge_url = normalize_base_url(&cfg.bridge_url);

    let warnings = crate::validation::validate(&cfg);

    Ok(LoadedConfig {
        config: cfg,
        warnings,
        paths: ConfigPaths {
            local: local_path,
            global: global_path.map(Path::to_path_buf),
        },
    })
}

/// Objects merge key by key, `null` in `patch` removes the key, anything else
/// in `patch` replaces the value in `base`.
fn merge(mut base: Map<String, Value>, patch: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in patch {
        match value {
            Value::Null => {
                base.remove(&key);
            }
            Value::Object(nested) => {
                let existing = match base.remove(&key) {
                    Some(Value::Object(m)) => m,
                    _ => Map::new(),
                };
                base.insert(key, Value::Object(merge(existing, nested)));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
    base
}

fn apply_env_overrides(cfg: &mut WaterctlConfig) {
    if let Some(v) = env_trimmed("WATERCTL_BRIDGE_URL") {
        cfg.bridge_url = v;
    }
    if let Some(secs) = env_secs("WATERCTL_REQUEST_TIMEOUT_SECS") {
        cfg.request_timeout_secs = secs;
    }
    if let Some(secs) = env_secs("WATERCTL_HEALTH_TIMEOUT_SECS") {
        cfg.health_timeout_secs = secs;
    }
    if let Some(v) = env_trimmed("WATERCTL_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = env_trimmed("WATERCTL_LOG_JSON") {
        cfg.logging.json = v.eq_ignore_ascii_case("true") || v == "1";
    }
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_secs(name: &str) -> Option<u64> {
    let raw = env_trimmed(name)?;
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!(var = name, value = %raw, error = %e, "ignoring non-numeric timeout override");
            None
        }
    }
}

/// Read a JSON file as an object, returning an empty one if the file doesn't exist.
fn read_json_object_or_empty(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let v: Value = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    match v {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("Config root must be a JSON object: {}", path.display()),
    }
}
