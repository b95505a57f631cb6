use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{MetricsError, Result};

use super::{Metric, MetricType, Value};

/// Exactly one active state out of a fixed set. The active state is a
/// single index, so readers never see zero or several active states.
#[derive(Debug)]
pub struct Stateset {
    states: Arc<[String]>,
    active: AtomicUsize,
}

impl Stateset {
    pub fn set_state(&self, state: &str) -> Result<()> {
        let idx = self
            .states
            .iter()
            .position(|s| s == state)
            .ok_or_else(|| MetricsError::UnknownState(state.to_string()))?;
        self.active.store(idx, Ordering::Release);
        Ok(())
    }

    /// Currently active state.
    pub fn state(&self) -> &str {
        let idx = self.active.load(Ordering::Acquire);
        self.states.get(idx).map(String::as_str).unwrap_or_default()
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }
}

impl Metric for Stateset {
    type Options = Arc<[String]>;
    const TYPE: MetricType = MetricType::Stateset;

    /// The first declared state starts active.
    fn build(states: &Arc<[String]>) -> Self {
        Self { states: Arc::clone(states), active: AtomicUsize::new(0) }
    }

    fn value(&self) -> Value {
        Value::Stateset {
            states: Arc::clone(&self.states),
            active: self.active.load(Ordering::Acquire),
        }
    }
}
