use crate::error::FlattenError;
use crate::{Options, Signals};

// Shared test helpers

fn flat(input: &str) -> (String, Signals) {
    let mut out = Vec::new();
    let signals =
        crate::flatten_str(input, &mut out, &Options::default()).expect("flatten should succeed");
    (String::from_utf8(out).expect("output is UTF-8"), signals)
}

fn flat_colored(input: &str) -> (String, Signals) {
    let mut out = Vec::new();
    let opts = Options {
        colorize: true,
        ..Options::default()
    };
    let signals = crate::flatten_str(input, &mut out, &opts).expect("flatten should succeed");
    (String::from_utf8(out).expect("output is UTF-8"), signals)
}

fn flat_err(input: &str) -> (String, FlattenError) {
    let mut out = Vec::new();
    let err =
        crate::flatten_str(input, &mut out, &Options::default()).expect_err("flatten should fail");
    (String::from_utf8(out).expect("output is UTF-8"), err)
}

fn leaf_count(v: &serde_json::Value) -> usize {
    match v {
        serde_json::Value::Array(items) => items.iter().map(leaf_count).sum(),
        serde_json::Value::Object(map) => map.values().map(leaf_count).sum(),
        _ => 1,
    }
}

// Submodules (topic-based)
mod cmd_exec;
mod colorize;
