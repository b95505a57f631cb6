//! promkit core: metric primitives, families, registry, timing and the text
//! exposition encoder.
//!
//! This crate carries no transport or runtime dependencies; the HTTP side
//! lives in `promkit-exporter`.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad input surfaces as `MetricsError` and never takes the process down.
//!
//! ```no_run
//! use promkit_core::{encode, Registry, DEFAULT_BUCKETS};
//!
//! # fn main() -> promkit_core::Result<()> {
//! let registry = Registry::new();
//! let requests = registry.counter("requests_total", "Total requests", &["method"])?;
//! let latency = registry.histogram("request_seconds", "Request latency", &[], &DEFAULT_BUCKETS)?;
//!
//! let hist = latency.unlabeled()?;
//! let _t = hist.start_timer();
//! requests.labels(&["get"])?.inc();
//!
//! print!("{}", encode(&registry));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod atomic;
pub mod error;
pub mod exposition;
pub mod family;
pub mod metrics;
pub mod naming;
pub mod registry;
pub mod timer;

pub use error::{ErrorKind, MetricsError, Result};
pub use exposition::{encode, encode_filtered, CONTENT_TYPE};
pub use family::{Collect, Desc, Family, Series};
pub use metrics::{
    Counter, Gauge, Histogram, HistogramSnapshot, InProgress, Info, Metric, MetricType, Stateset,
    Summary, Value, DEFAULT_BUCKETS,
};
pub use registry::Registry;
pub use timer::{start_timer, time, time_future, Observe, Timer};
