//! Operational HTTP endpoints.
//!
//! - `/healthz`         : liveness
//! - `<metrics_path>`   : Prometheus text format, optionally narrowed with
//!                        repeated `name[]=<metric>` query parameters

use std::collections::HashSet;

use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use promkit_core::{encode, encode_filtered, CONTENT_TYPE};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Collect `name[]` values from a raw query string.
pub fn requested_names(query: &str) -> HashSet<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k == "name[]")
        .map(|(_, v)| v.into_owned())
        .collect()
}

pub async fn metrics(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let names = query.as_deref().map(requested_names).unwrap_or_default();
    let body = if names.is_empty() {
        encode(state.registry())
    } else {
        encode_filtered(state.registry(), &names)
    };
    tracing::debug!(bytes = body.len(), filtered = !names.is_empty(), "served scrape");

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
