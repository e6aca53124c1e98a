//! Environment chain
//!
//! Lexically scoped name bindings. Each scope maps names to values and
//! links to its parent; [`Env`] is a cheap clonable handle so closures and
//! the interpreter share scopes, with mutations visible to every holder.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::{RuntimeError, Value};

#[derive(Default)]
struct Scope {
    bindings: HashMap<String, Value>,
    parent: Option<Env>,
}

/// Handle to a scope in the environment chain.
#[derive(Clone, Default)]
pub struct Env(Rc<RefCell<Scope>>);

impl Env {
    /// Create a root scope with no parent.
    pub fn new() -> Self {
        Env::default()
    }

    /// Create a child scope whose parent is this one.
    pub fn child(&self) -> Env {
        Env(Rc::new(RefCell::new(Scope {
            bindings: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    /// Bind a name in this scope, shadowing any binding of the same name
    /// in an enclosing scope. Re-declaring in the same scope overwrites.
    pub fn declare(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Read a name, walking from this scope outwards.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Overwrite the nearest existing binding of `name`, walking from this
    /// scope outwards. Assigning a name that was never declared is an error.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let mut scope = self.0.borrow_mut();
        if let Some(slot) = scope.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &scope.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(RuntimeError::NameError {
                name: name.to_string(),
            }),
        }
    }

    /// Whether two handles refer to the same scope.
    pub fn ptr_eq(&self, other: &Env) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.bindings.keys().collect();
        names.sort();
        f.debug_struct("Env")
            .field("names", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

// === Tests ===
