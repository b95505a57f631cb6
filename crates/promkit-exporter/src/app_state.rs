//! Shared application state for the exporter.

use std::sync::Arc;

use promkit_core::Registry;

use crate::config::ExporterConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    registry: Arc<Registry>,
}

impl AppState {
    /// The registry is injected so tests and embedders can serve their own
    /// instead of [`Registry::global`].
    pub fn new(cfg: ExporterConfig, registry: Arc<Registry>) -> Self {
        Self { inner: Arc::new(AppStateInner { cfg, registry }) }
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}
