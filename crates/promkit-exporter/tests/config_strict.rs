#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promkit_exporter::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:9100"
  metric_path: "/m" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:9100");
    assert_eq!(cfg.server.metrics_path, "/metrics");
}

#[test]
fn custom_path_and_listen() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:8000"
  metrics_path: "/prom"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen, "127.0.0.1:8000");
    assert_eq!(cfg.server.metrics_path, "/prom");
}

#[test]
fn rejects_bad_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nserver:\n  listen: \"not-an-addr\"\n",
        "version: 1\nserver:\n  metrics_path: \"metrics\"\n",
        "version: 1\nserver:\n  metrics_path: \"/\"\n",
        "version: 1\nserver:\n  metrics_path: \"/healthz\"\n",
        "version: 1\nserver:\n  metrics_path: \"/*\"\n",
        "version: 1\nserver:\n  metrics_path: \"/:name\"\n",
        "version: 1\nserver:\n  metrics_path: \"/{name}\"\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.code(), "CONFIG", "input={bad}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("/nonexistent/promkit.yaml").expect("defaults");
    assert_eq!(cfg.server.metrics_path, "/metrics");
    let err = config::load_from_file("/nonexistent/promkit.yaml").expect_err("io error");
    assert_eq!(err.code(), "IO");
}
