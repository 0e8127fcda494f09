// <FILE>src/value.rs</FILE> - <DESC>Typed element kinds and values carried by every signal</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added ElemKind, Value, and the numeric-kind promotion rule</CLOG>

//! The four element kinds a [`crate::signal::Signal`] can carry, and the
//! typed [`Value`]s that flow through signal algebra and semantics.

use crate::error::ArgusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The element kind a signal or AST leaf carries.
///
/// `Int`/`UInt` are preserved through the numeric algebra; comparisons and
/// arithmetic that mix kinds promote to `Float` (§3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElemKind {
    Bool,
    Int,
    UInt,
    Float,
}

impl ElemKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ElemKind::Int | ElemKind::UInt | ElemKind::Float)
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElemKind::Bool => "Bool",
            ElemKind::Int => "Int",
            ElemKind::UInt => "UInt",
            ElemKind::Float => "Float",
        };
        write!(f, "{name}")
    }
}

/// Promote two numeric kinds per §3.1: either side `Float` promotes to
/// `Float`; mixed `Int`/`UInt` promotes to `Int`; otherwise the shared kind
/// is preserved.
pub fn promote(a: ElemKind, b: ElemKind) -> ElemKind {
    use ElemKind::*;
    match (a, b) {
        (Float, _) | (_, Float) => Float,
        (Int, UInt) | (UInt, Int) => Int,
        (x, y) if x == y => x,
        _ => Float,
    }
}

/// A single typed value carried by a signal sample or an evaluation result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> ElemKind {
        match self {
            Value::Bool(_) => ElemKind::Bool,
            Value::Int(_) => ElemKind::Int,
            Value::UInt(_) => ElemKind::UInt,
            Value::Float(_) => ElemKind::Float,
        }
    }

    /// Widen a numeric value to `f64`. Panics (a programmer error, not a
    /// recoverable one) if called on a `Bool`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(i) => *i as f64,
            Value::UInt(u) => *u as f64,
            Value::Float(f) => *f,
            Value::Bool(_) => unreachable!("as_f64 called on a Bool value"),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            _ => unreachable!("as_bool called on a non-Bool value"),
        }
    }

    /// Cast this value to `kind`, promoting numerics. Used when two operands
    /// of differing numeric kinds must be compared or combined.
    fn cast_to(&self, kind: ElemKind) -> Value {
        match (self, kind) {
            (Value::Int(i), ElemKind::Float) => Value::Float(*i as f64),
            (Value::UInt(u), ElemKind::Float) => Value::Float(*u as f64),
            (Value::Int(i), ElemKind::Int) => Value::Int(*i),
            (Value::UInt(u), ElemKind::Int) => Value::Int(*u as i64),
            (v, k) if v.kind() == k => *v,
            (v, k) => unreachable!("cannot cast {:?} to {:?}", v, k),
        }
    }

    fn binary_numeric(
        a: Value,
        b: Value,
        int_op: impl Fn(i64, i64) -> Option<i64>,
        uint_op: impl Fn(u64, u64) -> Option<u64>,
        float_op: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, ArgusError> {
        let kind = promote(a.kind(), b.kind());
        let a = a.cast_to(kind);
        let b = b.cast_to(kind);
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => int_op(x, y)
                .map(Value::Int)
                .ok_or_else(|| ArgusError::Arithmetic(format!("integer overflow: {x} and {y}"))),
            (Value::UInt(x), Value::UInt(y)) => uint_op(x, y)
                .map(Value::UInt)
                .ok_or_else(|| ArgusError::Arithmetic(format!("integer overflow: {x} and {y}"))),
            (Value::Float(x), Value::Float(y)) => Ok(Value::Float(float_op(x, y))),
            _ => unreachable!("binary_numeric called with mismatched promoted kinds"),
        }
    }

    pub fn add(a: Value, b: Value) -> Result<Value, ArgusError> {
        Value::binary_numeric(a, b, i64::checked_add, u64::checked_add, |x, y| x + y)
    }

    pub fn sub(a: Value, b: Value) -> Result<Value, ArgusError> {
        Value::binary_numeric(a, b, i64::checked_sub, u64::checked_sub, |x, y| x - y)
    }

    pub fn mul(a: Value, b: Value) -> Result<Value, ArgusError> {
        Value::binary_numeric(a, b, i64::checked_mul, u64::checked_mul, |x, y| x * y)
    }

    pub fn div(a: Value, b: Value) -> Result<Value, ArgusError> {
        let kind = promote(a.kind(), b.kind());
        let a = a.cast_to(kind);
        let b = b.cast_to(kind);
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => {
                if y == 0 {
                    Err(ArgusError::Arithmetic("integer division by zero".into()))
                } else {
                    x.checked_div(y).map(Value::Int).ok_or_else(|| {
                        ArgusError::Arithmetic(format!("integer overflow: {x} / {y}"))
                    })
                }
            }
            (Value::UInt(x), Value::UInt(y)) => {
                if y == 0 {
                    Err(ArgusError::Arithmetic("integer division by zero".into()))
                } else {
                    Ok(Value::UInt(x / y))
                }
            }
            (Value::Float(x), Value::Float(y)) => Ok(Value::Float(x / y)),
            _ => unreachable!("div called with mismatched promoted kinds"),
        }
    }

    pub fn neg(a: Value) -> Result<Value, ArgusError> {
        match a {
            Value::Int(x) => x
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| ArgusError::Arithmetic(format!("integer overflow negating {x}"))),
            Value::UInt(x) => {
                if x == 0 {
                    Ok(Value::UInt(0))
                } else {
                    Err(ArgusError::Arithmetic(
                        "cannot negate a nonzero unsigned value".into(),
                    ))
                }
            }
            Value::Float(x) => Ok(Value::Float(-x)),
            Value::Bool(_) => unreachable!("neg called on a Bool value"),
        }
    }

    pub fn min(a: Value, b: Value) -> Value {
        let kind = promote(a.kind(), b.kind());
        let (a, b) = (a.cast_to(kind), b.cast_to(kind));
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Value::Int(x.min(y)),
            (Value::UInt(x), Value::UInt(y)) => Value::UInt(x.min(y)),
            (Value::Float(x), Value::Float(y)) => Value::Float(x.min(y)),
            _ => unreachable!(),
        }
    }

    pub fn max(a: Value, b: Value) -> Value {
        let kind = promote(a.kind(), b.kind());
        let (a, b) = (a.cast_to(kind), b.cast_to(kind));
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => Value::Int(x.max(y)),
            (Value::UInt(x), Value::UInt(y)) => Value::UInt(x.max(y)),
            (Value::Float(x), Value::Float(y)) => Value::Float(x.max(y)),
            _ => unreachable!(),
        }
    }

    /// Compare two values, promoting mixed numeric kinds to a common kind
    /// first (§3.1).
    pub fn compare(a: Value, b: Value) -> std::cmp::Ordering {
        let kind = promote(a.kind(), b.kind());
        let (a, b) = (a.cast_to(kind), b.cast_to(kind));
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => x.cmp(&y),
            (Value::UInt(x), Value::UInt(y)) => x.cmp(&y),
            (Value::Float(x), Value::Float(y)) => {
                x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
            }
            (Value::Bool(x), Value::Bool(y)) => x.cmp(&y),
            _ => unreachable!(),
        }
    }
}
