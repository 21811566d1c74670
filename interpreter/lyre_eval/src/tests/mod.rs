//! Source-driven test suites for the evaluator.
//!
//! Inline test modules cover single types; the suites here exercise whole
//! pipelines (parse → read → eval → render) and live in their own files
//! once they outgrow their home module.

mod eval_tests;

use crate::{eval, read, Env, Value};

/// Evaluate each top-level expression of `source` against `env`, in
/// order, returning every result.
fn eval_statements(env: &Env, source: &str) -> Vec<Value> {
    let tree = lyre_parse::parse(source).expect("test source must parse");
    tree.children
        .iter()
        .map(|child| eval(env, read(child)))
        .collect()
}

/// Evaluate `source` in a fresh root environment and return the last
/// result.
fn eval_last(source: &str) -> Value {
    let env = Env::root();
    eval_statements(&env, source)
        .pop()
        .expect("at least one expression")
}

/// Evaluate `source` in a fresh root environment and render the last
/// result.
fn render_last(source: &str) -> String {
    eval_last(source).to_string()
}
