use serde::Deserialize;

use crate::error::{ExporterError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()
    }
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self { version: 1, server: ServerSection::default() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen(), metrics_path: default_metrics_path() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ExporterError::Config(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        if !self.metrics_path.starts_with('/') || self.metrics_path.len() < 2 {
            return Err(ExporterError::Config(
                "server.metrics_path must start with '/' and not be the root".into(),
            ));
        }
        if self.metrics_path.contains([':', '*', '{', '}']) {
            return Err(ExporterError::Config(format!(
                "server.metrics_path must be a literal path without route parameters, got {:?}",
                self.metrics_path
            )));
        }
        if self.metrics_path == crate::router::HEALTHZ_PATH {
            return Err(ExporterError::Config(format!(
                "server.metrics_path must not shadow {}",
                crate::router::HEALTHZ_PATH
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:9100".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
