//! Lyre CLI entry point.

use lyrec::commands::{parse_file, repl, run_file};

fn main() {
    lyrec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None => repl(),
        Some("run") => match args.get(2) {
            Some(path) => run_file(path),
            None => {
                eprintln!("Usage: lyre run <file.lyre>");
                std::process::exit(1);
            }
        },
        Some("parse") => match args.get(2) {
            Some(path) => parse_file(path),
            None => {
                eprintln!("Usage: lyre parse <file.lyre>");
                std::process::exit(1);
            }
        },
        Some("help" | "--help" | "-h") => print_usage(),
        Some(other) => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: lyre [COMMAND]");
    println!();
    println!("Commands:");
    println!("  (none)            Start the interactive REPL");
    println!("  run <file.lyre>   Evaluate a file, printing each result");
    println!("  parse <file.lyre> Dump a file's parse tree");
    println!("  help              Show this help message");
    println!();
    println!("Environment variables:");
    println!("  RUST_LOG          Enable evaluator tracing, e.g. RUST_LOG=debug");
}
