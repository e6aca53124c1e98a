//! Operator semantics
//!
//! Every operator is a pure function over values. The tree-builder resolves
//! a rule name to a `&'static` descriptor exactly once, so evaluation never
//! dispatches on a name: a binary node simply calls the function pointer it
//! was built with.

use serde::{Serialize, Serializer};

use crate::value::{RuntimeError, Value};

pub type BinaryFn = fn(&Value, &Value) -> Result<Value, RuntimeError>;
pub type UnaryFn = fn(&Value) -> Result<Value, RuntimeError>;

/// A binary operator: display symbol plus its semantics.
pub struct BinaryOp {
    pub symbol: &'static str,
    pub apply: BinaryFn,
}

/// A unary operator: display symbol plus its semantics.
pub struct UnaryOp {
    pub symbol: &'static str,
    pub apply: UnaryFn,
}

pub static ADD: BinaryOp = BinaryOp {
    symbol: "+",
    apply: add,
};
pub static SUB: BinaryOp = BinaryOp {
    symbol: "-",
    apply: sub,
};
pub static MUL: BinaryOp = BinaryOp {
    symbol: "*",
    apply: mul,
};
pub static DIV: BinaryOp = BinaryOp {
    symbol: "/",
    apply: div,
};
pub static GT: BinaryOp = BinaryOp {
    symbol: ">",
    apply: gt,
};
pub static GE: BinaryOp = BinaryOp {
    symbol: ">=",
    apply: ge,
};
pub static LT: BinaryOp = BinaryOp {
    symbol: "<",
    apply: lt,
};
pub static LE: BinaryOp = BinaryOp {
    symbol: "<=",
    apply: le,
};
pub static EQ: BinaryOp = BinaryOp {
    symbol: "==",
    apply: eq,
};
pub static NE: BinaryOp = BinaryOp {
    symbol: "!=",
    apply: ne,
};

pub static NEG: UnaryOp = UnaryOp {
    symbol: "-",
    apply: neg,
};
pub static NOT: UnaryOp = UnaryOp {
    symbol: "!",
    apply: not,
};

impl BinaryOp {
    /// Look up the descriptor for a parse-tree rule name.
    pub fn for_rule(rule: &str) -> Option<&'static BinaryOp> {
        match rule {
            "add" => Some(&ADD),
            "sub" => Some(&SUB),
            "mul" => Some(&MUL),
            "div" => Some(&DIV),
            "gt" => Some(&GT),
            "ge" => Some(&GE),
            "lt" => Some(&LT),
            "le" => Some(&LE),
            "eq" => Some(&EQ),
            "ne" => Some(&NE),
            _ => None,
        }
    }
}

impl UnaryOp {
    /// Look up the descriptor for a parse-tree rule name.
    pub fn for_rule(rule: &str) -> Option<&'static UnaryOp> {
        match rule {
            "neg" => Some(&NEG),
            "not_" => Some(&NOT),
            _ => None,
        }
    }
}

impl PartialEq for BinaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl PartialEq for UnaryOp {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl std::fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryOp({})", self.symbol)
    }
}

impl std::fmt::Debug for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UnaryOp({})", self.symbol)
    }
}

// Serialized as the bare symbol so AST dumps stay readable.
impl Serialize for BinaryOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol)
    }
}

impl Serialize for UnaryOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol)
    }
}

/// Truthiness: `false` and `nil` are falsy, everything else is truthy.
/// Zero and the empty string are truthy.
pub fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Bool(false) | Value::Nil)
}

fn numeric_operands(
    symbol: &str,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::TypeError {
            msg: format!(
                "unsupported operand types for '{symbol}': '{}' and '{}'",
                left.type_name(),
                right.type_name()
            ),
        }),
    }
}

/// `+` adds numbers and concatenates strings. Mixed operands are an error;
/// nothing is implicitly stringified.
pub fn add(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        _ => Err(RuntimeError::TypeError {
            msg: format!(
                "unsupported operand types for '+': '{}' and '{}'",
                left.type_name(),
                right.type_name()
            ),
        }),
    }
}

pub fn sub(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands("-", left, right)?;
    Ok(Value::Number(a - b))
}

pub fn mul(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands("*", left, right)?;
    Ok(Value::Number(a * b))
}

/// `/` divides numbers. A zero divisor is reported as [`RuntimeError::DivisionByZero`]
/// rather than producing an infinity.
pub fn div(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands("/", left, right)?;
    if b == 0.0 {
        return Err(RuntimeError::DivisionByZero);
    }
    Ok(Value::Number(a / b))
}

pub fn gt(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands(">", left, right)?;
    Ok(Value::Bool(a > b))
}

pub fn ge(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands(">=", left, right)?;
    Ok(Value::Bool(a >= b))
}

pub fn lt(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands("<", left, right)?;
    Ok(Value::Bool(a < b))
}

pub fn le(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    let (a, b) = numeric_operands("<=", left, right)?;
    Ok(Value::Bool(a <= b))
}

/// `==` never errors; see the equality contract on [`Value`].
pub fn eq(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(left == right))
}

pub fn ne(left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(left != right))
}

pub fn neg(operand: &Value) -> Result<Value, RuntimeError> {
    match operand {
        Value::Number(n) => Ok(Value::Number(-n)),
        _ => Err(RuntimeError::TypeError {
            msg: format!("bad operand type for unary '-': '{}'", operand.type_name()),
        }),
    }
}

/// `!` never errors: it negates truthiness of any value.
pub fn not(operand: &Value) -> Result<Value, RuntimeError> {
    Ok(Value::Bool(!truthy(operand)))
}

// === Tests ===
