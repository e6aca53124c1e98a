//! Shared helpers for runtime integration tests

use kestrel_runtime::{Error, Kestrel, Printer, RuntimeError, Value};

/// Evaluate source and return the last expression value.
pub fn eval(source: &str) -> Value {
    let kestrel = Kestrel::with_printer(Printer::Silent);
    match kestrel.eval(source) {
        Ok(value) => value,
        Err(err) => panic!("evaluation failed for {source:?}: {err}"),
    }
}

/// Evaluate source and return the error it produces.
pub fn eval_err(source: &str) -> Error {
    let kestrel = Kestrel::with_printer(Printer::Silent);
    match kestrel.eval(source) {
        Ok(value) => panic!("expected an error for {source:?}, got {value:?}"),
        Err(err) => err,
    }
}

/// Evaluate source expecting a runtime-stage error.
pub fn runtime_err(source: &str) -> RuntimeError {
    match eval_err(source) {
        Error::Runtime(err) => err,
        other => panic!("expected a runtime error for {source:?}, got {other:?}"),
    }
}

/// Run source and return everything it printed.
pub fn run_capture(source: &str) -> String {
    let kestrel = Kestrel::with_printer(Printer::buffer());
    if let Err(err) = kestrel.eval(source) {
        panic!("evaluation failed for {source:?}: {err}");
    }
    kestrel.printer().output()
}

pub fn assert_eval_number(source: &str, expected: f64) {
    match eval(source) {
        Value::Number(n) => assert_eq!(n, expected, "wrong number for: {source}"),
        other => panic!("expected Number({expected}), got {other:?} for: {source}"),
    }
}

pub fn assert_eval_bool(source: &str, expected: bool) {
    match eval(source) {
        Value::Bool(b) => assert_eq!(b, expected, "wrong bool for: {source}"),
        other => panic!("expected Bool({expected}), got {other:?} for: {source}"),
    }
}

pub fn assert_eval_string(source: &str, expected: &str) {
    match eval(source) {
        Value::Str(s) => assert_eq!(s.as_ref(), expected, "wrong string for: {source}"),
        other => panic!("expected Str({expected:?}), got {other:?} for: {source}"),
    }
}

pub fn assert_eval_nil(source: &str) {
    match eval(source) {
        Value::Nil => {}
        other => panic!("expected Nil, got {other:?} for: {source}"),
    }
}
