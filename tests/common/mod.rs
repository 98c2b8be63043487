//! Shared helpers for the integration tests

#![allow(dead_code)]

use std::sync::Once;

use regex_lite::Regex;
use tacitsvg::ExactDecimal;

static INIT: Once = Once::new();

/// Install a test subscriber; filter with `RUST_LOG`
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn d(literal: &str) -> ExactDecimal {
    ExactDecimal::create(literal).unwrap()
}

/// Replace the numeric suffix of generated marker ids (`DOT-17` becomes `DOT-N`)
pub fn strip_marker_ids(svg: &str) -> String {
    let ids = Regex::new(r"\b([A-Z_]+)-\d+\b").unwrap();
    ids.replace_all(svg, "$1-N").into_owned()
}

/// Assert that `value` starts with the digits in `prefix`
pub fn assert_digits(value: ExactDecimal, prefix: &str) {
    let printed = value.to_string();
    assert!(
        printed.starts_with(prefix),
        "expected {printed} to start with {prefix}"
    );
}
