//! AST evaluation
//!
//! A tree-walking evaluator: statements execute against an environment
//! chain, expressions reduce to values. Function calls re-enter the walk
//! with the callee's captured environment, and `return` travels back as an
//! [`Exec`] signal rather than an error.

mod expr;
mod stmt;

use crate::ast::{Program, Stmt};
use crate::env::Env;
use crate::printer::Printer;
use crate::value::{RuntimeError, Value};

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Exec {
    /// The statement ran to completion
    Normal,
    /// A `return` is unwinding to the nearest call boundary
    Return(Value),
}

/// The evaluator. Owns the global scope and the print destination; every
/// other piece of state lives in the environment chain.
pub struct Interpreter {
    globals: Env,
    printer: Printer,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_printer(Printer::Stdout)
    }

    pub fn with_printer(printer: Printer) -> Self {
        Interpreter {
            globals: Env::new(),
            printer,
        }
    }

    /// The global scope. Bindings persist across [`Interpreter::run`] calls.
    pub fn globals(&self) -> &Env {
        &self.globals
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// Execute a program. The result is the value of the last top-level
    /// expression statement (nil when there was none), which is what a
    /// REPL echoes back. A top-level `return` ends the program early with
    /// its value.
    pub fn run(&self, program: &Program) -> Result<Value, RuntimeError> {
        let mut last = Value::Nil;
        for stmt in &program.stmts {
            match stmt {
                Stmt::Expr(expr) => last = self.eval_expr(expr, &self.globals)?,
                _ => match self.exec_stmt(stmt, &self.globals)? {
                    Exec::Normal => {}
                    Exec::Return(value) => return Ok(value),
                },
            }
        }
        Ok(last)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

// === Tests ===
