//! promkit exporter library entry.
//!
//! Serves a [`promkit_core::Registry`] over HTTP in the Prometheus text
//! format. It is consumed by the binary (`main.rs`), by embedders that want
//! a scrape endpoint next to their own service, and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod ops;
pub mod router;
pub mod server;

pub use error::{ExporterError, Result};
pub use server::{serve_with_shutdown, start_http_server};
