//! Scoped timing into one or more observer metrics.
//!
//! A [`Timer`] records elapsed seconds into every observer when it is
//! dropped, so the duration is captured on success, on `Err`, on an
//! unwinding panic, and when a timed future is dropped mid-flight.

use std::future::Future;
use std::time::Instant;

use crate::error::Result;
use crate::metrics::{Histogram, Summary};

/// A metric that accepts observations.
pub trait Observe: Send + Sync {
    fn observe(&self, v: f64) -> Result<()>;
}

impl Observe for Histogram {
    fn observe(&self, v: f64) -> Result<()> {
        Histogram::observe(self, v)
    }
}

impl Observe for Summary {
    fn observe(&self, v: f64) -> Result<()> {
        Summary::observe(self, v)
    }
}

/// Running timer; see [`start_timer`].
#[must_use = "a timer records its duration when dropped"]
pub struct Timer<'a> {
    observers: Vec<&'a dyn Observe>,
    start: Instant,
    recorded: bool,
}

impl Timer<'_> {
    /// Stop now and return the elapsed seconds that were recorded.
    pub fn observe_duration(mut self) -> f64 {
        self.record()
    }

    fn record(&mut self) -> f64 {
        let secs = self.start.elapsed().as_secs_f64();
        self.recorded = true;
        for o in &self.observers {
            if let Err(e) = o.observe(secs) {
                tracing::warn!(error = %e, "timer observation rejected");
            }
        }
        secs
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        if !self.recorded {
            self.record();
        }
    }
}

pub fn start_timer<'a>(observers: &[&'a dyn Observe]) -> Timer<'a> {
    Timer { observers: observers.to_vec(), start: Instant::now(), recorded: false }
}

/// Run `f` and record its duration into every observer, whatever `f` returns.
pub fn time<T>(observers: &[&dyn Observe], f: impl FnOnce() -> T) -> T {
    let _timer = start_timer(observers);
    f()
}

/// Await `fut` and record its duration into every observer.
pub async fn time_future<F: Future>(observers: &[&dyn Observe], fut: F) -> F::Output {
    let _timer = start_timer(observers);
    fut.await
}

impl Histogram {
    /// Timer feeding only this histogram.
    pub fn start_timer(&self) -> Timer<'_> {
        start_timer(&[self])
    }
}

impl Summary {
    /// Timer feeding only this summary.
    pub fn start_timer(&self) -> Timer<'_> {
        start_timer(&[self])
    }
}
