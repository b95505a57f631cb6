use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{MetricsError, Result};
use crate::naming::is_valid_label_name;

use super::{Metric, MetricType, Value};

/// Key/value mapping exposed as a constant `1` sample. Replaced wholesale
/// on every [`Info::set`].
#[derive(Debug)]
pub struct Info {
    /// Family label names; info keys may not shadow them.
    declared: Arc<[String]>,
    pairs: RwLock<Arc<Vec<(String, String)>>>,
}

impl Info {
    /// Replace the whole mapping. Validation runs before the swap, so a
    /// rejected call leaves the previous mapping in place.
    pub fn set(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut seen = HashSet::with_capacity(pairs.len());
        for (k, _) in pairs {
            if !seen.insert(*k) {
                return Err(MetricsError::InvalidArgument(format!("duplicate info key: {k}")));
            }
            if !is_valid_label_name(k) {
                return Err(MetricsError::InvalidArgument(format!("invalid info key: {k}")));
            }
            if self.declared.iter().any(|d| d == k) {
                return Err(MetricsError::InvalidArgument(format!(
                    "info key overlaps a family label: {k}"
                )));
            }
        }
        let next: Vec<(String, String)> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        *self.pairs.write() = Arc::new(next);
        Ok(())
    }

    pub fn get(&self) -> Arc<Vec<(String, String)>> {
        Arc::clone(&self.pairs.read())
    }
}

impl Metric for Info {
    type Options = Arc<[String]>;
    const TYPE: MetricType = MetricType::Info;

    fn build(declared: &Arc<[String]>) -> Self {
        Self {
            declared: Arc::clone(declared),
            pairs: RwLock::new(Arc::new(Vec::new())),
        }
    }

    fn value(&self) -> Value {
        Value::Info(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn info(declared: &[&str]) -> Info {
        let declared: Arc<[String]> = declared.iter().map(|s| s.to_string()).collect();
        Info::build(&declared)
    }

    #[test]
    fn set_replaces_wholesale() {
        let i = info(&[]);
        i.set(&[("version", "1.2"), ("commit", "abc")]).unwrap();
        i.set(&[("version", "1.3")]).unwrap();
        assert_eq!(*i.get(), vec![("version".to_string(), "1.3".to_string())]);
    }

    #[test]
    fn duplicate_key_keeps_previous_mapping() {
        let i = info(&[]);
        i.set(&[("a", "1")]).unwrap();
        let err = i.set(&[("b", "2"), ("b", "3")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(*i.get(), vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn keys_cannot_shadow_family_labels() {
        let i = info(&["instance"]);
        assert!(i.set(&[("instance", "x")]).is_err());
        assert!(i.set(&[("bad-key", "x")]).is_err());
    }
}
