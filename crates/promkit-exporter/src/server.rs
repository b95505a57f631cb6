//! HTTP server bootstrap.
//!
//! Scrapes are handled concurrently by axum; each one only reads the
//! registry, so an aborted request cannot leave it in a bad state.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use promkit_core::Registry;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::app_state::AppState;
use crate::config::{ExporterConfig, ServerSection};
use crate::error::{ExporterError, Result};
use crate::router::build_router;

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Bind `addr`, serve `registry` on `/metrics` in a background task and
/// return the bound address (useful with port 0).
pub async fn start_http_server(
    addr: SocketAddr,
    registry: Arc<Registry>,
) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
    let cfg = ExporterConfig {
        server: ServerSection { listen: addr.to_string(), ..ServerSection::default() },
        ..ExporterConfig::default()
    };
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(listen = %local, path = %cfg.server.metrics_path, "metrics exporter starting");

    let state = AppState::new(cfg, registry);
    let handle = tokio::spawn(async move {
        let app = build_router(state);
        axum::serve(listener, app).await?;
        Ok::<(), ExporterError>(())
    });
    Ok((local, handle))
}
