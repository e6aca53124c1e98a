//! Runtime value representation
//!
//! Kestrel is dynamically typed: every expression evaluates to a [`Value`].
//! Numbers, booleans and nil are immediate; strings, functions, classes and
//! instances are reference-counted. Cloning a `Value` is always cheap.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::ast::FunctionDef;
use crate::env::Env;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Numeric value (double-precision float)
    Number(f64),
    /// Immutable string
    Str(Rc<str>),
    /// Absence of a value
    Nil,
    /// Callable function with its captured environment
    Function(Rc<Closure>),
    /// Class declaration
    Class(Rc<ClassValue>),
    /// Instance of a class
    Instance(Rc<InstanceValue>),
}

/// A function value: shared definition plus the environment it closed over.
///
/// The environment handle is the scope that was current when the function
/// declaration executed, so free variables resolve against the bindings
/// that existed there, including later mutations.
pub struct Closure {
    pub def: Rc<FunctionDef>,
    pub env: Env,
}

/// A class value: name, optional superclass and the method table.
///
/// Methods are stored as closures whose environment already contains the
/// `super` binding when the class has a superclass.
pub struct ClassValue {
    pub name: String,
    pub superclass: Option<Rc<ClassValue>>,
    pub methods: HashMap<String, Rc<Closure>>,
}

impl ClassValue {
    /// Resolve a method by name, checking this class first and then the
    /// superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Rc<Closure>> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }
        self.superclass.as_ref().and_then(|s| s.find_method(name))
    }
}

/// An object: a reference to its class and a mutable field map.
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub fields: RefCell<HashMap<String, Value>>,
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::from(s.into()))
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Nil => "nil",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    /// Equality contract: primitives compare by content, reference kinds by
    /// identity, and values of different kinds are never equal. In
    /// particular `true != 1` and `nil != false`.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{n:.0}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Nil => write!(f, "nil"),
            Value::Function(c) => write!(f, "<fn {}>", c.def.name),
            Value::Class(c) => write!(f, "<class {}>", c.name),
            Value::Instance(i) => write!(f, "<{} instance>", i.class.name),
        }
    }
}

// Shallow by hand: closures hold environments that can refer back to the
// values that contain them, so a derived Debug would never terminate.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Nil => write!(f, "Nil"),
            Value::Function(c) => write!(f, "Function(<fn {}>)", c.def.name),
            Value::Class(c) => write!(f, "Class(<class {}>)", c.name),
            Value::Instance(i) => write!(f, "Instance(<{} instance>)", i.class.name),
        }
    }
}

/// Errors surfaced while evaluating a program.
///
/// Evaluation is fail-fast: the first error aborts the walk and propagates
/// to the embedder as a value, never as a panic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// A name was read or assigned without a declaration in scope
    #[error("Name error: '{name}' is not defined")]
    NameError { name: String },

    /// Attribute access on a value that does not have it
    #[error("Attribute error: '{type_name}' object has no attribute '{name}'")]
    AttributeError { type_name: String, name: String },

    /// An operation was applied to values of unsupported types
    #[error("Type error: {msg}")]
    TypeError { msg: String },

    /// A call supplied the wrong number of arguments
    #[error("Arity error: {name}() takes {expected} argument(s) but {received} were given")]
    ArityError {
        name: String,
        expected: usize,
        received: usize,
    },

    /// Division with a zero divisor
    #[error("Division by zero")]
    DivisionByZero,
}

// === Tests ===
