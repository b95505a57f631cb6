use crate::atomic::AtomicF64;
use crate::error::{MetricsError, Result};

use super::{Metric, MetricType, Value};

/// Monotonically non-decreasing value.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicF64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.value.add(1.0);
    }

    /// Increment by `delta`. Negative, NaN and infinite deltas are rejected
    /// and leave the value untouched.
    pub fn inc_by(&self, delta: f64) -> Result<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(MetricsError::InvalidArgument(format!(
                "counter delta must be a finite non-negative number, got {delta}"
            )));
        }
        self.value.add(delta);
        Ok(())
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Run `f`, counting one event if it returns `Err`. The result is handed
    /// back untouched.
    pub fn count_errors<T, E>(&self, f: impl FnOnce() -> std::result::Result<T, E>) -> std::result::Result<T, E> {
        let res = f();
        if res.is_err() {
            self.inc();
        }
        res
    }
}

impl Metric for Counter {
    type Options = ();
    const TYPE: MetricType = MetricType::Counter;

    fn build(_: &()) -> Self {
        Self::default()
    }

    fn value(&self) -> Value {
        Value::Counter(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn increments_accumulate() {
        let c = Counter::default();
        c.inc();
        c.inc_by(2.5).unwrap();
        assert_eq!(c.get(), 3.5);
    }

    #[test]
    fn rejects_bad_deltas_without_side_effects() {
        let c = Counter::default();
        c.inc_by(4.0).unwrap();
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = c.inc_by(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(c.get(), 4.0);
    }

    #[test]
    fn count_errors_only_counts_failures() {
        let c = Counter::default();
        let ok: std::result::Result<u8, &str> = c.count_errors(|| Ok(1));
        assert_eq!(ok, Ok(1));
        let err: std::result::Result<u8, &str> = c.count_errors(|| Err("boom"));
        assert_eq!(err, Err("boom"));
        assert_eq!(c.get(), 1.0);
    }
}
