//! Atomic creation of config files.
//!
//! Files are written to a temporary location and renamed into place, so a
//! config is never left half-written.

use crate::types::WaterctlConfig;
use anyhow::{Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile, DisallowOverwrite};
use std::io::Write;
use std::path::Path;

/// Write `config` as pretty JSON to `path`, creating parent directories.
///
/// With `overwrite == false` an existing file is left untouched and an error
/// mentioning "already exists" is returned.
pub fn write_config(path: &Path, config: &WaterctlConfig, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        anyhow::bail!(
            "Config file already exists: {}\nUse --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut json =
        serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
    json.push('\n');

    let write = |f: &mut std::fs::File| f.write_all(json.as_bytes());
    let result = if overwrite {
        AtomicFile::new(path, AllowOverwrite).write(write)
    } else {
        AtomicFile::new(path, DisallowOverwrite).write(write)
    };
    result.with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}
