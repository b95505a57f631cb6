//! Registry of metric families.
//!
//! Registration is append-only. Name bookkeeping and the family list live
//! under one lock, so two racing registrations of the same name can never
//! both succeed. Scrapes take a cheap snapshot (`Arc` clones) of the family
//! list and never hold the lock while encoding.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::error::{MetricsError, Result};
use crate::exposition;
use crate::family::{Collect, Desc, Family};
use crate::metrics::{
    histogram::validate_buckets, Counter, Gauge, Histogram, Info, Metric, Stateset, Summary,
};
use crate::naming::validate_family;

#[derive(Default)]
struct RegistryInner {
    families: Vec<Arc<dyn Collect>>,
    claimed: HashSet<String>,
}

#[derive(Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide default registry, created on first use.
    pub fn global() -> Arc<Registry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Registry::new())))
    }

    /// Register a collector. Fails with `DuplicateName` when its name, or any
    /// sample name it emits, is already claimed.
    pub fn register(&self, collector: Arc<dyn Collect>) -> Result<()> {
        let desc = collector.desc();
        let labels: Vec<&str> = desc.label_names.iter().map(String::as_str).collect();
        validate_family(&desc.name, desc.kind, &labels)?;
        let names = desc.kind.sample_names(&desc.name);

        let mut inner = self.inner.write();
        if let Some(taken) = names.iter().find(|n| inner.claimed.contains(*n)) {
            return Err(MetricsError::DuplicateName(taken.clone()));
        }
        inner.claimed.extend(names);
        inner.families.push(Arc::clone(&collector));
        drop(inner);

        tracing::debug!(name = %desc.name, kind = desc.kind.as_str(), "registered metric family");
        Ok(())
    }

    /// Snapshot of registered families in registration order. Each call
    /// starts a fresh sequence.
    pub fn families(&self) -> Vec<Arc<dyn Collect>> {
        self.inner.read().families.clone()
    }

    fn family<M: Metric>(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
        opts: M::Options,
    ) -> Result<Family<M>> {
        let label_names = validate_family(name, M::TYPE, labels)?;
        let family = Family::<M>::new(
            Desc { name: name.to_string(), help: help.to_string(), kind: M::TYPE, label_names },
            opts,
        );
        self.register(family.collector())?;
        Ok(family)
    }

    pub fn counter(&self, name: &str, help: &str, labels: &[&str]) -> Result<Family<Counter>> {
        self.family(name, help, labels, ())
    }

    pub fn gauge(&self, name: &str, help: &str, labels: &[&str]) -> Result<Family<Gauge>> {
        self.family(name, help, labels, ())
    }

    /// `buckets` must be strictly ascending; `+Inf` is appended when absent.
    /// Pass [`crate::DEFAULT_BUCKETS`] for the stock latency layout.
    pub fn histogram(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
        buckets: &[f64],
    ) -> Result<Family<Histogram>> {
        let bounds = validate_buckets(buckets)?;
        self.family(name, help, labels, bounds)
    }

    pub fn summary(&self, name: &str, help: &str, labels: &[&str]) -> Result<Family<Summary>> {
        self.family(name, help, labels, ())
    }

    pub fn info(&self, name: &str, help: &str, labels: &[&str]) -> Result<Family<Info>> {
        let declared: Arc<[String]> = labels.iter().map(|l| l.to_string()).collect();
        self.family(name, help, labels, declared)
    }

    /// The first state in `states` is active for every new child.
    pub fn stateset(
        &self,
        name: &str,
        help: &str,
        labels: &[&str],
        states: &[&str],
    ) -> Result<Family<Stateset>> {
        if states.is_empty() {
            return Err(MetricsError::InvalidArgument("stateset needs at least one state".into()));
        }
        let mut seen = HashSet::with_capacity(states.len());
        if let Some(dup) = states.iter().find(|s| !seen.insert(**s)) {
            return Err(MetricsError::InvalidArgument(format!("duplicate state: {dup}")));
        }
        let states: Arc<[String]> = states.iter().map(|s| s.to_string()).collect();
        self.family(name, help, labels, states)
    }

    /// Value of one exposed sample, e.g. `("latency_bucket", [("le", "0.5")])`.
    /// Label order does not matter. Intended for tests.
    pub fn sample_value(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        let mut want: Vec<(&str, &str)> = labels.to_vec();
        want.sort_unstable();
        self.families().iter().find_map(|f| {
            exposition::samples(f.desc(), &f.collect()).into_iter().find_map(|s| {
                if s.name != name {
                    return None;
                }
                let mut have: Vec<(&str, &str)> =
                    s.labels.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                have.sort_unstable();
                (have == want).then_some(s.value)
            })
        })
    }
}
