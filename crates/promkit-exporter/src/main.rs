//! promkit exporter binary.
//!
//! Serves the process-wide registry. Config path comes from
//! `PROMKIT_CONFIG` (default `promkit.yaml`); a missing file means defaults.

use std::net::SocketAddr;

use promkit_core::Registry;
use tracing_subscriber::{fmt, EnvFilter};

use promkit_exporter::{app_state::AppState, config, serve_with_shutdown, ExporterError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("PROMKIT_CONFIG").unwrap_or_else(|_| "promkit.yaml".into());
    let cfg = config::load_or_default(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| ExporterError::Config(format!("server.listen: {e}")))?;

    let registry = Registry::global();
    let build = registry.info("promkit_exporter_build", "Exporter build metadata", &[])?;
    build.unlabeled()?.set(&[("version", env!("CARGO_PKG_VERSION"))])?;

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!(%listen, path = %cfg.server.metrics_path, "promkit-exporter starting");

    let state = AppState::new(cfg, registry);
    serve_with_shutdown(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
    })
    .await
}
