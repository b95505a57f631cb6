//! Metric families and their label-keyed children.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{MetricsError, Result};
use crate::metrics::{Metric, MetricType, Value};

/// Immutable family metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desc {
    pub name: String,
    pub help: String,
    pub kind: MetricType,
    pub label_names: Vec<String>,
}

/// One series of a family as seen by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label_values: Vec<String>,
    pub value: Value,
}

/// Anything the registry can enumerate at scrape time.
pub trait Collect: Send + Sync {
    fn desc(&self) -> &Desc;

    /// Sample every child. Implementations return series ordered by label
    /// values so output is stable between scrapes.
    fn collect(&self) -> Vec<Series>;
}

struct FamilyCore<M: Metric> {
    desc: Desc,
    opts: M::Options,
    children: DashMap<Vec<String>, Arc<M>>,
}

impl<M: Metric> Collect for FamilyCore<M> {
    fn desc(&self) -> &Desc {
        &self.desc
    }

    fn collect(&self) -> Vec<Series> {
        // Sample first, sort afterwards, so shard locks are held only for
        // the atomic loads.
        let mut out: Vec<Series> = self
            .children
            .iter()
            .map(|r| Series { label_values: r.key().clone(), value: r.value().value() })
            .collect();
        out.sort_by(|a, b| a.label_values.cmp(&b.label_values));
        out
    }
}

/// A named, typed group of children sharing help text and label schema.
/// Cloning is cheap and every clone refers to the same children.
pub struct Family<M: Metric> {
    core: Arc<FamilyCore<M>>,
}

impl<M: Metric> Clone for Family<M> {
    fn clone(&self) -> Self {
        Self { core: Arc::clone(&self.core) }
    }
}

impl<M: Metric> Family<M> {
    pub(crate) fn new(desc: Desc, opts: M::Options) -> Self {
        let children = DashMap::new();
        // Unlabeled families expose a zero sample before their first update.
        if desc.label_names.is_empty() {
            children.insert(Vec::new(), Arc::new(M::build(&opts)));
        }
        Self { core: Arc::new(FamilyCore { desc, opts, children }) }
    }

    pub fn desc(&self) -> &Desc {
        &self.core.desc
    }

    /// Get or create the child for `values`. Concurrent first use of the
    /// same tuple yields one shared child.
    pub fn labels(&self, values: &[&str]) -> Result<Arc<M>> {
        let expected = self.core.desc.label_names.len();
        if values.len() != expected {
            return Err(MetricsError::LabelArityMismatch { expected, got: values.len() });
        }
        let key: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        if let Some(child) = self.core.children.get(&key) {
            return Ok(Arc::clone(child.value()));
        }
        let child = self
            .core
            .children
            .entry(key)
            .or_insert_with(|| {
                tracing::trace!(family = %self.core.desc.name, ?values, "creating child series");
                Arc::new(M::build(&self.core.opts))
            })
            .value()
            .clone();
        Ok(child)
    }

    /// Shorthand for `labels(&[])`.
    pub fn unlabeled(&self) -> Result<Arc<M>> {
        self.labels(&[])
    }

    pub(crate) fn collector(&self) -> Arc<dyn Collect> {
        self.core.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::metrics::Counter;

    fn counter_family(labels: &[&str]) -> Family<Counter> {
        Family::new(
            Desc {
                name: "hits_total".into(),
                help: "Hits".into(),
                kind: MetricType::Counter,
                label_names: labels.iter().map(|s| s.to_string()).collect(),
            },
            (),
        )
    }

    #[test]
    fn arity_is_enforced() {
        let f = counter_family(&["foo"]);
        for bad in [&[][..], &["a", "b"][..]] {
            let err = f.labels(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::LabelArityMismatch);
        }
        assert!(f.labels(&["a"]).is_ok());
    }

    #[test]
    fn same_tuple_returns_same_child() {
        let f = counter_family(&["method"]);
        let a = f.labels(&["get"]).unwrap();
        let b = f.labels(&["get"]).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        a.inc();
        assert_eq!(b.get(), 1.0);
    }

    #[test]
    fn unlabeled_family_has_eager_child() {
        let f = counter_family(&[]);
        let series = f.collector().collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, Value::Counter(0.0));
    }

    #[test]
    fn concurrent_first_use_creates_one_child() {
        let f = counter_family(&["k"]);
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let f = f.clone();
                std::thread::spawn(move || f.labels(&["same"]).unwrap().inc())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let series = f.collector().collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, Value::Counter(16.0));
    }

    #[test]
    fn series_are_sorted_by_label_values() {
        let f = counter_family(&["k"]);
        for v in ["c", "a", "b"] {
            f.labels(&[v]).unwrap();
        }
        let keys: Vec<String> =
            f.collector().collect().into_iter().map(|s| s.label_values[0].clone()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
