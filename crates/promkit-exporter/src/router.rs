//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub const HEALTHZ_PATH: &str = "/healthz";

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().server.metrics_path.clone();
    Router::new()
        .route(&metrics_path, get(ops::metrics))
        .route(HEALTHZ_PATH, get(ops::healthz))
        .with_state(state)
}
