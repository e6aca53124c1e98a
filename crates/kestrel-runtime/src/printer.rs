//! Print output routing
//!
//! The interpreter writes `print` output through a [`Printer`] so embedders
//! and tests can capture it instead of claiming stdout.

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for `print` statements.
#[derive(Clone, Default)]
pub enum Printer {
    /// Write lines to standard output
    #[default]
    Stdout,
    /// Capture lines in a shared buffer
    Buffer(Rc<RefCell<String>>),
    /// Discard everything
    Silent,
}

impl Printer {
    /// A printer that captures output for later inspection via [`Printer::output`].
    pub fn buffer() -> Self {
        Printer::Buffer(Rc::new(RefCell::new(String::new())))
    }

    /// Write one line.
    pub fn println(&self, line: &str) {
        match self {
            Printer::Stdout => println!("{line}"),
            Printer::Buffer(buf) => {
                let mut buf = buf.borrow_mut();
                buf.push_str(line);
                buf.push('\n');
            }
            Printer::Silent => {}
        }
    }

    /// Captured output so far. Empty for non-buffering printers.
    pub fn output(&self) -> String {
        match self {
            Printer::Buffer(buf) => buf.borrow().clone(),
            _ => String::new(),
        }
    }

    /// Drop any captured output.
    pub fn clear(&self) {
        if let Printer::Buffer(buf) = self {
            buf.borrow_mut().clear();
        }
    }
}

// === Tests ===
