use crate::runtime::interpreter::Interpreter;
use std::io::{self, BufRead, Write};

/// Maximum accepted input line length; lines over this length are rejected rather than silently
/// truncated.
pub const LINE_CAPACITY: usize = 256;

/// Run the interactive REPL until end-of-input: prompt `> `, interpret the line, then print the
/// stack unless the line performed a file inclusion. No flags, no environment variables, clean
/// exit on EOF.
pub fn run() {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) | None => break,
        };

        if line.len() > LINE_CAPACITY {
            println!("Error: Line too long");
            continue;
        }

        let included = interpreter.interpret_line(&line);

        if !included {
            println!("{}", interpreter.format_stack());
        }
    }
}
