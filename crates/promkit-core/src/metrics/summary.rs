use std::sync::atomic::{AtomicU64, Ordering};

use crate::atomic::AtomicF64;
use crate::error::{MetricsError, Result};

use super::{Metric, MetricType, Value};

/// Running sum and count of observations (no quantiles).
#[derive(Debug, Default)]
pub struct Summary {
    sum: AtomicF64,
    count: AtomicU64,
}

impl Summary {
    pub fn observe(&self, v: f64) -> Result<()> {
        if !v.is_finite() {
            return Err(MetricsError::InvalidArgument(format!(
                "summary observation must be finite, got {v}"
            )));
        }
        self.count.fetch_add(1, Ordering::AcqRel);
        self.sum.add(v);
        Ok(())
    }

    pub fn sum(&self) -> f64 {
        self.sum.get()
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }
}

impl Metric for Summary {
    type Options = ();
    const TYPE: MetricType = MetricType::Summary;

    fn build(_: &()) -> Self {
        Self::default()
    }

    fn value(&self) -> Value {
        Value::Summary { sum: self.sum(), count: self.count() }
    }
}
