//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use crate::error::{ExporterError, Result};

pub use schema::{ExporterConfig, ServerSection};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| ExporterError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<ExporterConfig> {
    match load_from_file(path) {
        Err(ExporterError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(%path, "config file not found, using defaults");
            Ok(ExporterConfig::default())
        }
        other => other,
    }
}
