//! Kestrel Syntax - Lexer and parser for Kestrel source code
//!
//! This crate turns source text into the generic parse tree defined by
//! `kestrel-cst`. It deliberately stops there: no desugaring, no literal
//! folding, no semantic checks. Those belong to the tree-builder on the
//! runtime side, which consumes the tree purely by rule name.
//!
//! Also hosts the string interpolation pass (`interpolate`), which operates
//! on raw string text independently of the grammar.

pub mod error;
pub mod interpolate;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::SyntaxError;
pub use interpolate::{interpolate, InterpolateError};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Token, TokenKind};

use kestrel_cst::ParseTree;

/// Parse Kestrel source into a parse tree
///
/// Runs the full front-end: tokenize, then parse. The returned tree's root
/// rule is always `program`.
///
/// # Examples
///
/// ```
/// let tree = kestrel_syntax::parse("print 1 + 2;").unwrap();
/// assert_eq!(tree.rule, "program");
/// ```
pub fn parse(source: &str) -> Result<ParseTree, SyntaxError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse()
}
