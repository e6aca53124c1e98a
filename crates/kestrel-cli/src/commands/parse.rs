//! Parse command - dump the rule-named parse tree

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process;

use super::Format;

/// Print the parse tree of a source file
///
/// Stops after the front-end: no building, no execution. Syntax errors
/// exit with code 65.
pub fn run(file_path: &str, format: Format) -> Result<()> {
    let source = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))?;

    let tree = match kestrel_syntax::parse(&source) {
        Ok(tree) => tree,
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error);
            process::exit(65);
        }
    };

    match format {
        Format::Tree => print!("{}", tree.pretty()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
    }

    Ok(())
}
