//! Exporter error type.

use thiserror::Error;

use promkit_core::MetricsError;

pub type Result<T> = std::result::Result<T, ExporterError>;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl ExporterError {
    /// Short stable code for logs and tests.
    pub fn code(&self) -> &'static str {
        match self {
            ExporterError::Config(_) => "CONFIG",
            ExporterError::Io(_) => "IO",
            ExporterError::Metrics(e) => e.kind().as_str(),
        }
    }
}
