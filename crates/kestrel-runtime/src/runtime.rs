//! Embedding API
//!
//! [`Kestrel`] ties the pipeline together: parse, build, evaluate. Errors
//! from every stage unify into [`Error`] so embedders handle one type.

use std::fs;
use std::path::Path;

use kestrel_syntax::SyntaxError;

use crate::builder::{self, BuildError};
use crate::interpreter::Interpreter;
use crate::printer::Printer;
use crate::value::{RuntimeError, Value};

/// Any error the pipeline can produce.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type RunResult<T> = Result<T, Error>;

/// An embedded interpreter instance with persistent global state.
///
/// # Examples
///
/// ```
/// use kestrel_runtime::{Kestrel, Value};
///
/// let kestrel = Kestrel::new();
/// let value = kestrel.eval("1 + 2;").unwrap();
/// assert_eq!(value, Value::Number(3.0));
/// ```
pub struct Kestrel {
    interpreter: Interpreter,
}

impl Kestrel {
    pub fn new() -> Self {
        Kestrel {
            interpreter: Interpreter::new(),
        }
    }

    /// Use a custom print destination (capture or discard).
    pub fn with_printer(printer: Printer) -> Self {
        Kestrel {
            interpreter: Interpreter::with_printer(printer),
        }
    }

    /// Parse, build and evaluate a source string. Global bindings persist
    /// into the next call; the result is the last expression value.
    pub fn eval(&self, source: &str) -> RunResult<Value> {
        let tree = kestrel_syntax::parse(source)?;
        let program = builder::build(&tree)?;
        Ok(self.interpreter.run(&program)?)
    }

    /// Evaluate a script file.
    pub fn eval_file(&self, path: impl AsRef<Path>) -> RunResult<Value> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.eval(&source)
    }

    pub fn printer(&self) -> &Printer {
        self.interpreter.printer()
    }
}

impl Default for Kestrel {
    fn default() -> Self {
        Kestrel::new()
    }
}

// === Tests ===
