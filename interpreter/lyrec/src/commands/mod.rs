//! Command handlers for the Lyre CLI.
//!
//! Each submodule implements one command; the evaluation helpers shared
//! between the REPL and the file runner live here in the module root.

use lyre_eval::{eval, read, Env, Value};
use lyre_parse::ParseError;

mod repl;
mod run;

pub use repl::repl;
pub use run::{parse_file, run_file};

/// Evaluate one REPL line: the whole line is a single evaluable list, so
/// `+ 1 2` applies `+` the way `(+ 1 2)` does.
pub fn eval_line(env: &Env, line: &str) -> Result<Value, ParseError> {
    let tree = lyre_parse::parse(line)?;
    Ok(eval(env, read(&tree)))
}

/// Evaluate every top-level expression of `source` in order, as a file
/// runner does. Error *values* are ordinary results and do not stop the
/// run; only a parse failure does.
pub fn eval_statements(env: &Env, source: &str) -> Result<Vec<Value>, ParseError> {
    let tree = lyre_parse::parse(source)?;
    Ok(tree
        .children
        .iter()
        .map(|child| eval(env, read(child)))
        .collect())
}
