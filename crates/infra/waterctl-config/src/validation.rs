//! Advisory validation for [`WaterctlConfig`].
//!
//! Validation only produces warnings. The plugin still starts with an odd
//! config; the host decides whether to show them.

use crate::types::WaterctlConfig;

/// An advisory warning about a configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryWarning {
    /// Machine-readable warning code.
    pub code: &'static str,

    /// Human-readable warning message.
    pub message: String,

    /// JSON path to the problematic config field.
    pub path: &'static str,
}

impl std::fmt::Display for AdvisoryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Whether `level` names a log level, ignoring case.
pub fn is_known_log_level(level: &str) -> bool {
    LOG_LEVELS.contains(&level.to_lowercase().as_str())
}

/// Validate a configuration and return advisory warnings.
pub fn validate(cfg: &WaterctlConfig) -> Vec<AdvisoryWarning> {
    let mut warnings = vec![];

    let url = cfg.bridge_url.trim();
    if url.is_empty() {
        warnings.push(AdvisoryWarning {
            code: "bridge_url.empty",
            path: "bridge_url",
            message: "Bridge URL cannot be empty".into(),
        });
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        warnings.push(AdvisoryWarning {
            code: "bridge_url.invalid",
            path: "bridge_url",
            message: format!("Expected an http(s) URL, got: '{url}'"),
        });
    }

    check_timeout(
        cfg.request_timeout_secs,
        "request_timeout_secs",
        &mut warnings,
    );
    check_timeout(cfg.health_timeout_secs, "health_timeout_secs", &mut warnings);

    if !is_known_log_level(&cfg.logging.level) {
        warnings.push(AdvisoryWarning {
            code: "logging.level.invalid",
            path: "logging.level",
            message: format!(
                "Unknown log level '{}'. Expected one of: {}",
                cfg.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    warnings
}

fn check_timeout(secs: u64, path: &'static str, warnings: &mut Vec<AdvisoryWarning>) {
    if secs == 0 {
        warnings.push(AdvisoryWarning {
            code: "timeout.zero",
            path,
            message: "A zero timeout makes every request fail immediately".into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_warnings() {
        let warnings = validate(&WaterctlConfig::default());
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn non_http_url_warns() {
        let cfg = WaterctlConfig {
            bridge_url: "ftp://bridge".into(),
            ..WaterctlConfig::default()
        };
        let warnings = validate(&cfg);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "bridge_url.invalid");
        assert!(warnings[0].to_string().starts_with("[bridge_url.invalid] bridge_url:"));
    }

    #[test]
    fn empty_url_warns_once() {
        let cfg = WaterctlConfig {
            bridge_url: "   ".into(),
            ..WaterctlConfig::default()
        };
        let codes: Vec<_> = validate(&cfg).into_iter().map(|w| w.code).collect();
        assert_eq!(codes, vec!["bridge_url.empty"]);
    }

    #[test]
    fn zero_timeouts_warn() {
        let cfg = WaterctlConfig {
            request_timeout_secs: 0,
            health_timeout_secs: 0,
            ..WaterctlConfig::default()
        };
        let paths: Vec<_> = validate(&cfg).into_iter().map(|w| w.path).collect();
        assert_eq!(paths, vec!["request_timeout_secs", "health_timeout_secs"]);
    }

    #[test]
    fn unknown_log_level_warns() {
        let mut cfg = WaterctlConfig::default();
        cfg.logging.level = "loud".into();
        assert!(
            validate(&cfg)
                .iter()
                .any(|w| w.code == "logging.level.invalid")
        );

        cfg.logging.level = "DEBUG".into();
        assert!(validate(&cfg).is_empty());
        assert!(is_known_log_level("Warn"));
        assert!(!is_known_log_level("waterctl=debug"));
    }
}
