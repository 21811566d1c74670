//! The interactive read-eval-print loop.

use lyre_eval::Env;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::eval_line;

/// Run the REPL until end of input.
///
/// Every result, error values included, is rendered to stdout; Ctrl-C
/// abandons the current line and Ctrl-D ends the session. Definitions
/// accumulate in one root environment for the whole session.
pub fn repl() {
    println!("Lyre {}", env!("CARGO_PKG_VERSION"));
    println!("Press Ctrl+C or Ctrl+D to exit\n");

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("error: cannot start line editor: {error}");
            return;
        }
    };

    let env = Env::root();

    loop {
        match editor.readline("lyre> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                match eval_line(&env, &line) {
                    Ok(value) => println!("{value}"),
                    Err(error) => eprintln!("error: {error}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => {
                eprintln!("error: {error}");
                break;
            }
        }
    }
}
