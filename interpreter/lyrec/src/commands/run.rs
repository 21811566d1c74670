//! Non-interactive commands: run a source file, dump its parse tree.

use std::fs;
use std::process;

use lyre_eval::Env;

use super::eval_statements;

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {path}: {error}");
            process::exit(1);
        }
    }
}

/// Evaluate every top-level expression of `path` against a fresh root,
/// rendering each result on its own line. Error values render and the
/// run continues; a parse failure stops it.
pub fn run_file(path: &str) {
    let source = read_source(path);
    let env = Env::root();
    match eval_statements(&env, &source) {
        Ok(results) => {
            tracing::debug!(path, statements = results.len(), "ran file");
            for value in results {
                println!("{value}");
            }
        }
        Err(error) => {
            eprintln!("error: {path}: {error}");
            process::exit(1);
        }
    }
}

/// Dump the parse tree of `path`, one node per line.
pub fn parse_file(path: &str) {
    let source = read_source(path);
    match lyre_parse::parse(&source) {
        Ok(tree) => print!("{}", tree.dump()),
        Err(error) => {
            eprintln!("error: {path}: {error}");
            process::exit(1);
        }
    }
}
