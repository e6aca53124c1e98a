//! REPL core logic
//!
//! Drives the read-eval-print loop without any terminal handling, so the
//! CLI and tests can share it. Global bindings and captured output persist
//! from line to line.

use crate::printer::Printer;
use crate::runtime::{Error, Kestrel};
use crate::value::Value;

/// Result of evaluating one line of REPL input.
#[derive(Debug)]
pub struct ReplResult {
    /// Value to echo back, when the line ended in an expression that
    /// produced something other than nil
    pub value: Option<Value>,
    /// Print output captured while the line ran
    pub output: String,
    /// Error from any stage; earlier effects of the line still happened
    pub error: Option<Error>,
}

/// UI-agnostic REPL state machine.
pub struct ReplCore {
    runtime: Kestrel,
}

impl ReplCore {
    pub fn new() -> Self {
        ReplCore {
            runtime: Kestrel::with_printer(Printer::buffer()),
        }
    }

    /// Evaluate one line (or pasted chunk) of input.
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let result = self.runtime.eval(input);
        let output = self.runtime.printer().output();
        self.runtime.printer().clear();
        match result {
            Ok(value) => ReplResult {
                value: (value != Value::Nil).then_some(value),
                output,
                error: None,
            },
            Err(error) => ReplResult {
                value: None,
                output,
                error: Some(error),
            },
        }
    }

    /// Discard all global state and start fresh.
    pub fn reset(&mut self) {
        self.runtime = Kestrel::with_printer(Printer::buffer());
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        ReplCore::new()
    }
}

// === Tests ===
