//! AST dump command - build and print the AST

use anyhow::{Context, Result};
use colored::Colorize;
use kestrel_runtime::Program;
use std::fs;
use std::process;

use super::Format;

/// Print the AST of a source file
///
/// Runs the front-end and the tree-builder, then dumps the result. Sugar
/// is already expanded and operators bound, so this shows exactly what the
/// evaluator would walk. No code is executed. Syntax and build errors exit
/// with code 65.
pub fn run(file_path: &str, format: Format) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    let program = match build_program(&source) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            process::exit(65);
        }
    };

    match format {
        Format::Tree => print!("{}", program.pretty()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }

    Ok(())
}

fn build_program(source: &str) -> Result<Program, kestrel_runtime::Error> {
    let tree = kestrel_syntax::parse(source)?;
    Ok(kestrel_runtime::build(&tree)?)
}
