pub mod ast;
pub mod parse;
pub mod repl;
pub mod run;

/// Output format for the tree dump commands
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Indented dump, one node per line
    Tree,
    /// Pretty-printed JSON
    Json,
}
