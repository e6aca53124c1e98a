//! Kestrel CST - Generic parse tree shared by the front-end and the runtime
//!
//! The parser produces a tree of rule-named nodes with token leaves; the
//! tree-builder in `kestrel-runtime` consumes it by rule name. Neither side
//! links against the other, so the tree (and its serde form) is the whole
//! contract between them.

pub mod span;
pub mod tree;

pub use span::Span;
pub use tree::{Node, ParseTree, Token};
