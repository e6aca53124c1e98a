//! Kestrel runtime
//!
//! The core of the Kestrel scripting language: value model, operator
//! table, tree-builder, environment chain and the tree-walking evaluator,
//! plus the [`Kestrel`] facade and a UI-agnostic REPL core.
//!
//! The pipeline runs in three stages:
//!
//! 1. `kestrel-syntax` parses source text into a rule-named parse tree
//! 2. [`builder`] folds that tree into an AST, binding operator semantics
//!    into the nodes
//! 3. [`Interpreter`] walks the AST against an environment chain
//!
//! # Examples
//!
//! ```
//! use kestrel_runtime::{Kestrel, Printer};
//!
//! let kestrel = Kestrel::with_printer(Printer::buffer());
//! kestrel.eval("var n = 3; print n * 7;").unwrap();
//! assert_eq!(kestrel.printer().output(), "21\n");
//! ```

pub mod ast;
pub mod builder;
pub mod coerce;
pub mod env;
pub mod interpreter;
pub mod ops;
pub mod printer;
pub mod repl;
pub mod runtime;
pub mod value;
pub mod walk;

pub use ast::{Expr, FunctionDef, Literal, Param, Program, Stmt};
pub use builder::{build, BuildError};
pub use env::Env;
pub use interpreter::{Exec, Interpreter};
pub use printer::Printer;
pub use repl::{ReplCore, ReplResult};
pub use runtime::{Error, Kestrel, RunResult};
pub use value::{RuntimeError, Value};

/// Crate version, for tooling banners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
