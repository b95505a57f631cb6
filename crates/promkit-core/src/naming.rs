//! Metric and label name rules.

use std::collections::HashSet;

use crate::error::{MetricsError, Result};
use crate::metrics::MetricType;

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, with the `__` prefix reserved for internal use.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check a family declaration and return owned label names.
pub(crate) fn validate_family(name: &str, kind: MetricType, labels: &[&str]) -> Result<Vec<String>> {
    if !is_valid_metric_name(name) {
        return Err(MetricsError::InvalidArgument(format!("invalid metric name: {name:?}")));
    }
    // Statesets carry their state in a label named after the family.
    if kind == MetricType::Stateset && !is_valid_label_name(name) {
        return Err(MetricsError::InvalidArgument(format!(
            "stateset name must also be a valid label name: {name:?}"
        )));
    }
    let reserved = kind.reserved_label(name);
    let mut seen = HashSet::with_capacity(labels.len());
    for l in labels {
        if !is_valid_label_name(l) {
            return Err(MetricsError::InvalidArgument(format!("invalid label name: {l:?}")));
        }
        if reserved.as_deref() == Some(*l) {
            return Err(MetricsError::InvalidArgument(format!(
                "label {l:?} is reserved for {} {name}",
                kind.as_str()
            )));
        }
        if !seen.insert(*l) {
            return Err(MetricsError::InvalidArgument(format!("duplicate label name: {l:?}")));
        }
    }
    Ok(labels.iter().map(|l| l.to_string()).collect())
}
