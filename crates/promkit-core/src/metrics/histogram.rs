//! Fixed-bucket histogram.
//!
//! Each observation bumps exactly one per-bucket slot (the first bound that
//! is >= the value); cumulative counts are derived at snapshot time. This
//! keeps the exposed buckets non-decreasing even while observations race
//! with a scrape.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::atomic::AtomicF64;
use crate::error::{MetricsError, Result};

use super::{Metric, MetricType, Value};

/// Upper bounds used when a caller has no better idea (seconds scale).
/// `+Inf` is appended on validation.
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Validate bucket bounds and append the `+Inf` sentinel when missing.
pub(crate) fn validate_buckets(bounds: &[f64]) -> Result<Arc<[f64]>> {
    if bounds.is_empty() {
        return Err(MetricsError::InvalidArgument("histogram needs at least one bucket".into()));
    }
    if bounds.iter().any(|b| b.is_nan()) {
        return Err(MetricsError::InvalidArgument("bucket bound must not be NaN".into()));
    }
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(MetricsError::InvalidArgument(
            "bucket bounds must be strictly ascending".into(),
        ));
    }
    let mut out = bounds.to_vec();
    if out.last() != Some(&f64::INFINITY) {
        out.push(f64::INFINITY);
    }
    Ok(out.into())
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper_bound, cumulative_count)`, last bound is `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

#[derive(Debug)]
pub struct Histogram {
    bounds: Arc<[f64]>,
    counts: Box<[AtomicU64]>,
    sum: AtomicF64,
}

impl Histogram {
    /// Record one observation. NaN and infinite values are rejected.
    pub fn observe(&self, v: f64) -> Result<()> {
        if !v.is_finite() {
            return Err(MetricsError::InvalidArgument(format!(
                "histogram observation must be finite, got {v}"
            )));
        }
        // The +Inf sentinel guarantees a slot for every finite value.
        let idx = self.bounds.partition_point(|b| *b < v);
        if let Some(slot) = self.counts.get(idx) {
            slot.fetch_add(1, Ordering::AcqRel);
        }
        self.sum.add(v);
        Ok(())
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let mut acc = 0u64;
        let buckets = self
            .bounds
            .iter()
            .zip(self.counts.iter())
            .map(|(b, c)| {
                acc += c.load(Ordering::Acquire);
                (*b, acc)
            })
            .collect();
        HistogramSnapshot { buckets, sum: self.sum.get(), count: acc }
    }
}

impl Metric for Histogram {
    type Options = Arc<[f64]>;
    const TYPE: MetricType = MetricType::Histogram;

    fn build(bounds: &Arc<[f64]>) -> Self {
        Self {
            counts: bounds.iter().map(|_| AtomicU64::new(0)).collect(),
            bounds: Arc::clone(bounds),
            sum: AtomicF64::default(),
        }
    }

    fn value(&self) -> Value {
        Value::Histogram(self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn hist(bounds: &[f64]) -> Histogram {
        Histogram::build(&validate_buckets(bounds).unwrap())
    }

    #[test]
    fn observations_land_in_every_bucket_above() {
        let h = hist(&[0.1, 0.5, 1.0]);
        for v in [0.05, 0.3, 2.0] {
            h.observe(v).unwrap();
        }
        let s = h.snapshot();
        let counts: Vec<u64> = s.buckets.iter().map(|(_, c)| *c).collect();
        assert_eq!(counts, vec![1, 2, 2, 3]);
        assert_eq!(s.count, 3);
        assert!((s.sum - 2.35).abs() < 1e-9);
    }

    #[test]
    fn value_on_bound_is_inclusive() {
        let h = hist(&[1.0, 2.0]);
        h.observe(1.0).unwrap();
        let s = h.snapshot();
        assert_eq!(s.buckets[0], (1.0, 1));
    }

    #[test]
    fn nan_is_rejected_and_state_untouched() {
        let h = hist(&[1.0]);
        let err = h.observe(f64::NAN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(h.snapshot().count, 0);
        assert_eq!(h.snapshot().sum, 0.0);
    }

    #[test]
    fn bucket_validation() {
        assert_eq!(validate_buckets(&[1.0, 2.0]).unwrap().len(), 3);
        assert_eq!(validate_buckets(&[1.0, f64::INFINITY]).unwrap().len(), 2);
        assert!(validate_buckets(&[]).is_err());
        assert!(validate_buckets(&[2.0, 1.0]).is_err());
        assert!(validate_buckets(&[1.0, 1.0]).is_err());
        assert!(validate_buckets(&[f64::NAN]).is_err());
    }

    #[test]
    fn cumulative_counts_never_decrease() {
        let h = hist(&DEFAULT_BUCKETS);
        for i in 0..500 {
            h.observe((i as f64) * 0.037).unwrap();
        }
        let s = h.snapshot();
        assert!(s.buckets.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(s.buckets.last().map(|b| b.1), Some(500));
    }
}
