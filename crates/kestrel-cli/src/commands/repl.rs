//! REPL command implementation

use anyhow::Result;
use colored::Colorize;
use kestrel_runtime::ReplCore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL
///
/// Uses rustyline line-editor mode with history persistence.
/// If `no_history` is true, history is neither loaded nor saved.
pub fn run(no_history: bool, config: &crate::config::Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::new();

    // Load history from file (unless disabled)
    let history_path = config.get_history_path();
    if !no_history {
        if let Some(ref path) = history_path {
            let _ = rl.load_history(path); // Ignore errors if file doesn't exist
        }
    }

    // Display welcome message
    println!("Kestrel v{} REPL", kestrel_runtime::VERSION);
    println!("Type statements or expressions, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :help");
    println!();

    loop {
        // Read a line
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                // Handle REPL commands
                if trimmed == ":quit" || trimmed == ":q" {
                    println!("Goodbye!");
                    break;
                }

                if trimmed == ":reset" {
                    repl.reset();
                    println!("REPL state reset");
                    continue;
                }

                if trimmed == ":help" || trimmed == ":h" {
                    print_help();
                    continue;
                }

                // Skip empty lines
                if trimmed.is_empty() {
                    continue;
                }

                // Add to history
                let _ = rl.add_history_entry(&line);

                // Evaluate the input
                let result = repl.eval_line(&line);

                // Captured print output comes first: it happened before
                // the final value or the error
                if !result.output.is_empty() {
                    print!("{}", result.output);
                }

                if let Some(error) = result.error {
                    eprintln!("{} {}", "error:".red().bold(), error);
                } else if let Some(value) = result.value {
                    println!("{}", value);
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("^D");
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history to file (unless disabled)
    if !no_history {
        if let Some(path) = history_path {
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(&path); // Ignore errors
        }
    }

    Ok(())
}

/// Print help information
fn print_help() {
    println!("Kestrel REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Clear all variables, functions and classes");
    println!("  :help, :h         Show this help message");
    println!();
    println!("Type any Kestrel statement or expression to evaluate it.");
    println!("Examples:");
    println!("  >> var x = 42;");
    println!("  >> fun double(n) {{ return n * 2; }}");
    println!("  >> double(x);");
    println!("  >> print \"hello\";");
}
