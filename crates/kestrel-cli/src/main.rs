use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

mod commands;
mod config;

use commands::Format;

/// Kestrel scripting language interpreter.
///
/// Kestrel is a small dynamically-typed scripting language with first-class
/// functions, closures, and single-inheritance classes. This CLI runs
/// scripts, dumps the front-end trees for tooling, and hosts an interactive
/// REPL.
///
/// EXAMPLES:
///     kestrel run main.kes         Run a Kestrel script
///     kestrel parse main.kes       Dump the parse tree
///     kestrel ast main.kes         Dump the built AST
///     kestrel repl                 Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     KESTREL_NO_HISTORY  Set to '1' to disable REPL history
///     NO_COLOR            Set to disable colored output
#[derive(Parser)]
#[command(name = "kestrel")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Kestrel script
    ///
    /// Parses, builds and executes the file. Print output goes to stdout
    /// as the program runs; if the script ends in an expression statement
    /// its value is echoed. Exits with code 65 on syntax or build errors
    /// and 70 on runtime errors.
    ///
    /// EXAMPLES:
    ///     kestrel run main.kes            Run a script
    ///     kestrel r main.kes              Same, using the alias
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Kestrel source file
        file: String,
    },

    /// Dump the parse tree
    ///
    /// Parses the source file and prints the rule-named parse tree without
    /// building or executing anything. This is the tree exactly as the
    /// grammar produced it, before desugaring.
    ///
    /// EXAMPLES:
    ///     kestrel parse main.kes                  Indented tree
    ///     kestrel parse main.kes --format json    JSON for tooling
    Parse {
        /// Path to the Kestrel source file
        file: String,
        /// Output format
        #[arg(long, value_enum, default_value = "tree")]
        format: Format,
    },

    /// Dump the AST
    ///
    /// Parses and builds the source file, then prints the AST with
    /// operators bound and sugar expanded. No code is executed.
    ///
    /// EXAMPLES:
    ///     kestrel ast main.kes                    Indented tree
    ///     kestrel ast main.kes --format json      JSON for tooling
    Ast {
        /// Path to the Kestrel source file
        file: String,
        /// Output format
        #[arg(long, value_enum, default_value = "tree")]
        format: Format,
    },

    /// Start an interactive REPL
    ///
    /// Opens a read-eval-print loop with persistent global state. Values
    /// of expression statements are echoed back; print output appears as
    /// it happens. Errors are reported and the session continues.
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Clear all definitions
    ///
    /// EXAMPLES:
    ///     kestrel repl                  Start the REPL
    ///     kestrel repl --no-history     Disable history persistence
    Repl {
        /// Disable history persistence (for privacy)
        #[arg(long, env = "KESTREL_NO_HISTORY")]
        no_history: bool,
    },

    /// Generate shell completions
    ///
    /// Outputs shell completion scripts for bash, zsh, fish, or powershell.
    /// Redirect to a file and source it in your shell configuration.
    ///
    /// EXAMPLES:
    ///     kestrel completions bash > ~/.bash_completions/kestrel.bash
    ///     kestrel completions zsh > ~/.zfunc/_kestrel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env();

    if config.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run { file } => {
            commands::run::run(&file)?;
        }
        Commands::Parse { file, format } => {
            commands::parse::run(&file, format)?;
        }
        Commands::Ast { file, format } => {
            commands::ast::run(&file, format)?;
        }
        Commands::Repl { no_history } => {
            // Command-line flag overrides environment variable
            let disable_history = no_history || config.no_history;
            commands::repl::run(disable_history, &config)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
