//! Metric primitives.
//!
//! Every primitive owns its own synchronization (atomics, or one lock per
//! child for Info) so updates on one series never block another. The
//! encoder reads them through [`Metric::value`], which returns a closed
//! [`Value`] snapshot tagged by metric type.

use std::sync::Arc;

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod info;
pub mod stateset;
pub mod summary;

pub use counter::Counter;
pub use gauge::{Gauge, InProgress};
pub use histogram::{Histogram, HistogramSnapshot, DEFAULT_BUCKETS};
pub use info::Info;
pub use stateset::Stateset;
pub use summary::Summary;

/// Closed set of family types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Summary,
    Info,
    Stateset,
}

impl MetricType {
    /// Keyword written on the `# TYPE` line (text format 0.0.4 has no
    /// dedicated info/stateset keywords; both are gauges there).
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge | MetricType::Info | MetricType::Stateset => "gauge",
            MetricType::Histogram => "histogram",
            MetricType::Summary => "summary",
        }
    }

    fn suffixes(self) -> &'static [&'static str] {
        match self {
            MetricType::Histogram => &["_bucket", "_sum", "_count"],
            MetricType::Summary => &["_sum", "_count"],
            _ => &[],
        }
    }

    /// Every sample name a family of this type claims in a registry.
    pub fn sample_names(self, name: &str) -> Vec<String> {
        std::iter::once(name.to_string())
            .chain(self.suffixes().iter().map(|s| format!("{name}{s}")))
            .collect()
    }

    /// Label names the encoder synthesizes for this type.
    pub(crate) fn reserved_label(self, family: &str) -> Option<String> {
        match self {
            MetricType::Histogram => Some("le".into()),
            MetricType::Summary => Some("quantile".into()),
            MetricType::Stateset => Some(family.to_string()),
            _ => None,
        }
    }
}

/// Point-in-time value of one child.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Counter(f64),
    Gauge(f64),
    Histogram(HistogramSnapshot),
    Summary { sum: f64, count: u64 },
    Info(Arc<Vec<(String, String)>>),
    Stateset { states: Arc<[String]>, active: usize },
}

/// A child type that can live inside a [`crate::Family`].
pub trait Metric: Send + Sync + 'static {
    /// Construction parameters shared by every child of a family
    /// (bucket bounds, declared states, ...).
    type Options: Send + Sync + 'static;

    const TYPE: MetricType;

    fn build(opts: &Self::Options) -> Self;

    fn value(&self) -> Value;
}
