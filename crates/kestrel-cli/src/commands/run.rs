//! Run command - execute Kestrel scripts

use anyhow::{Context, Result};
use colored::Colorize;
use kestrel_runtime::{Error, Kestrel, Value};
use std::fs;
use std::process;

/// Execute a Kestrel source file
///
/// Print output goes to stdout while the program runs. If the script ends
/// in an expression statement, its value is echoed (unless nil). On
/// failure the error is reported to stderr and the process exits with the
/// code for the failing stage.
pub fn run(file_path: &str) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    let kestrel = Kestrel::new();
    match kestrel.eval(&source) {
        Ok(value) => {
            if value != Value::Nil {
                println!("{}", value);
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            process::exit(exit_code(&error));
        }
    }
}

/// Exit codes follow sysexits.h: 65 for malformed input, 70 for a fault
/// while the program ran.
fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Syntax(_) | Error::Build(_) => 65,
        Error::Runtime(_) => 70,
        Error::Io { .. } => 66,
    }
}
