//! Prometheus text exposition format (version 0.0.4).
//!
//! Per family: `# HELP`, `# TYPE`, then one line per sample. Each family is
//! sampled in one pass over its children; there is no cross-family
//! atomicity.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use crate::family::{Collect, Desc, Series};
use crate::metrics::Value;
use crate::registry::Registry;

/// Content type served with [`encode`] output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// One rendered line before formatting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sample {
    pub(crate) name: String,
    pub(crate) labels: Vec<(String, String)>,
    pub(crate) value: f64,
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

/// Expand a family's series into flat samples, dispatching on the value tag.
pub(crate) fn samples(desc: &Desc, series: &[Series]) -> Vec<Sample> {
    let name = desc.name.as_str();
    let mut out = Vec::new();
    for s in series {
        let base: Vec<(String, String)> = desc
            .label_names
            .iter()
            .cloned()
            .zip(s.label_values.iter().cloned())
            .collect();
        let with = |extra: (String, String)| {
            let mut l = base.clone();
            l.push(extra);
            l
        };
        match &s.value {
            Value::Counter(v) | Value::Gauge(v) => {
                out.push(Sample { name: name.to_string(), labels: base.clone(), value: *v });
            }
            Value::Histogram(h) => {
                for (le, count) in &h.buckets {
                    out.push(Sample {
                        name: format!("{name}_bucket"),
                        labels: with(("le".into(), fmt_float(*le))),
                        value: *count as f64,
                    });
                }
                out.push(Sample { name: format!("{name}_sum"), labels: base.clone(), value: h.sum });
                out.push(Sample {
                    name: format!("{name}_count"),
                    labels: base.clone(),
                    value: h.count as f64,
                });
            }
            Value::Summary { sum, count } => {
                out.push(Sample { name: format!("{name}_sum"), labels: base.clone(), value: *sum });
                out.push(Sample {
                    name: format!("{name}_count"),
                    labels: base.clone(),
                    value: *count as f64,
                });
            }
            Value::Info(pairs) => {
                let mut labels = base.clone();
                labels.extend(pairs.iter().cloned());
                out.push(Sample { name: name.to_string(), labels, value: 1.0 });
            }
            Value::Stateset { states, active } => {
                for (i, state) in states.iter().enumerate() {
                    out.push(Sample {
                        name: name.to_string(),
                        labels: with((name.to_string(), state.clone())),
                        value: if i == *active { 1.0 } else { 0.0 },
                    });
                }
            }
        }
    }
    out
}

fn write_sample(out: &mut String, s: &Sample) {
    let _ = write!(out, "{}", s.name);
    if !s.labels.is_empty() {
        let label_str = s
            .labels
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",");
        let _ = write!(out, "{{{}}}", label_str);
    }
    let _ = writeln!(out, " {}", fmt_float(s.value));
}

/// Render one family into `out`.
pub fn encode_family(family: &dyn Collect, out: &mut String) {
    let desc = family.desc();
    let series = family.collect();
    let _ = writeln!(out, "# HELP {} {}", desc.name, escape_help(&desc.help));
    let _ = writeln!(out, "# TYPE {} {}", desc.name, desc.kind.as_str());
    for s in samples(desc, &series) {
        write_sample(out, &s);
    }
}

/// Render every family of `registry`.
pub fn encode(registry: &Registry) -> String {
    encode_families(&registry.families())
}

pub fn encode_families(families: &[Arc<dyn Collect>]) -> String {
    let mut out = String::new();
    for f in families {
        encode_family(f.as_ref(), &mut out);
    }
    out
}

/// Render only families that emit at least one of `names` (family or
/// sample name, e.g. `latency` or `latency_count`).
pub fn encode_filtered(registry: &Registry, names: &HashSet<String>) -> String {
    let selected: Vec<Arc<dyn Collect>> = registry
        .families()
        .into_iter()
        .filter(|f| {
            let d = f.desc();
            d.kind.sample_names(&d.name).iter().any(|n| names.contains(n))
        })
        .collect();
    encode_families(&selected)
}
