use std::time::{SystemTime, UNIX_EPOCH};

use crate::atomic::AtomicF64;

use super::{Metric, MetricType, Value};

/// Arbitrary value that can go up and down. Last write wins.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicF64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.value.set(v);
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.value.add(1.0);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.value.add(-1.0);
    }

    /// Add an arbitrary signed delta.
    pub fn inc_by(&self, delta: f64) {
        self.value.add(delta);
    }

    /// Subtract an arbitrary signed delta.
    pub fn dec_by(&self, delta: f64) {
        self.value.add(-delta);
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Set to the current Unix time in seconds.
    pub fn set_to_current_time(&self) {
        // A clock before the epoch reads as 0.
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        self.set(now);
    }

    /// Increment now and decrement when the returned guard drops.
    pub fn track_inprogress(&self) -> InProgress<'_> {
        self.inc();
        InProgress { gauge: self }
    }
}

/// Guard returned by [`Gauge::track_inprogress`].
#[must_use = "the gauge is decremented as soon as the guard is dropped"]
pub struct InProgress<'a> {
    gauge: &'a Gauge,
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

impl Metric for Gauge {
    type Options = ();
    const TYPE: MetricType = MetricType::Gauge;

    fn build(_: &()) -> Self {
        Self::default()
    }

    fn value(&self) -> Value {
        Value::Gauge(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_add_sub() {
        let g = Gauge::default();
        g.set(10.0);
        g.inc_by(-3.0);
        g.dec_by(2.0);
        g.inc();
        g.dec();
        assert_eq!(g.get(), 5.0);
        g.set(-1.5);
        assert_eq!(g.get(), -1.5);
    }

    #[test]
    fn inprogress_guard_restores_value() {
        let g = Gauge::default();
        {
            let _a = g.track_inprogress();
            let _b = g.track_inprogress();
            assert_eq!(g.get(), 2.0);
        }
        assert_eq!(g.get(), 0.0);
    }

    #[test]
    fn current_time_is_after_2020() {
        let g = Gauge::default();
        g.set_to_current_time();
        assert!(g.get() > 1_577_836_800.0);
    }
}
