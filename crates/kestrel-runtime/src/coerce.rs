//! Integral coercion for `i`..`n` names
//!
//! A compatibility quirk inherited from Fortran's implicit typing rules:
//! any binding target whose name starts with a lowercase letter from `i`
//! through `n` receives an integral version of the assigned value whenever
//! one can be produced. It applies to variable declarations, assignments,
//! attribute writes and parameter binding. Values with no sensible integral
//! form are stored unchanged; the coercion never raises an error.

use crate::value::Value;

/// Whether `name` selects integral coercion. Only the lowercase letters
/// `i`, `j`, `k`, `l`, `m`, `n` count; `I` does not.
pub fn is_integral_name(name: &str) -> bool {
    matches!(name.as_bytes().first(), Some(b'i'..=b'n'))
}

/// Apply the coercion rule for a binding of `value` to `name`.
pub fn coerce(name: &str, value: Value) -> Value {
    if !is_integral_name(name) {
        return value;
    }
    to_integral(&value).unwrap_or(value)
}

/// The integral form of a value, when one exists:
///
/// - finite numbers truncate towards zero; NaN and infinities have none
/// - booleans become `1` or `0`
/// - strings that parse as an integer (after trimming whitespace) become
///   that number, a change of kind
/// - everything else has none
fn to_integral(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.is_finite().then(|| Value::Number(n.trunc())),
        Value::Bool(b) => Some(Value::Number(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .map(|i| Value::Number(i as f64)),
        _ => None,
    }
}

// === Tests ===
