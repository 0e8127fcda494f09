// <FILE>src/semantics/eval.rs</FILE> - <DESC>Dual-mode (Boolean / robustness) recursive evaluation of a typed Expr against a Trace</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added eval_bool_semantics and eval_robust_semantics over the full Expr variant set</CLOG>

//! Both semantics share one recursion structure over the AST (§4.5); only
//! leaf interpretation and the meet/join operators used by the connectives
//! and temporal operators differ between [`Mode::Boolean`] and
//! [`Mode::Robust`]. Numeric subexpressions (the operands of a `Cmp`) are
//! evaluated identically in either mode via [`eval_num`] — they describe
//! real-valued data, not a truth value, so there is nothing to dualize.

use crate::ast::{CmpOp, Expr};
use crate::error::ArgusError;
use crate::semantics::temporal;
use crate::signal::{self, Signal};
use crate::trace::Trace;
use crate::value::{ElemKind, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Boolean,
    Robust,
}

impl Mode {
    fn out_kind(self) -> ElemKind {
        match self {
            Mode::Boolean => ElemKind::Bool,
            Mode::Robust => ElemKind::Float,
        }
    }
}

/// Evaluate `expr`'s Boolean satisfaction against `trace` (§4.5.1).
pub fn eval_bool_semantics(expr: &Expr, trace: &Trace) -> Result<Signal, ArgusError> {
    expr.require_top_level_boolean()?;
    eval_formula(expr, trace, Mode::Boolean)
}

/// Evaluate `expr`'s quantitative robustness against `trace` (§4.5.1).
pub fn eval_robust_semantics(expr: &Expr, trace: &Trace) -> Result<Signal, ArgusError> {
    expr.require_top_level_boolean()?;
    eval_formula(expr, trace, Mode::Robust)
}

fn leaf_bool(b: bool, mode: Mode) -> Signal {
    match mode {
        Mode::Boolean => Signal::constant(ElemKind::Bool, Value::Bool(b)).unwrap(),
        Mode::Robust => {
            let r = if b { f64::INFINITY } else { f64::NEG_INFINITY };
            Signal::constant(ElemKind::Float, Value::Float(r)).unwrap()
        }
    }
}

fn lift_bool_to_robust(sig: &Signal) -> Signal {
    signal::map(sig, ElemKind::Float, |v| {
        Value::Float(if v.as_bool() { f64::INFINITY } else { f64::NEG_INFINITY })
    })
}

fn abs_signal(sig: &Signal) -> Result<Signal, ArgusError> {
    let negated = signal::neg(sig)?;
    signal::max(sig, &negated)
}

fn cmp_robust(op: CmpOp, a: &Signal, b: &Signal) -> Result<Signal, ArgusError> {
    match op {
        CmpOp::Le | CmpOp::Lt => signal::sub(b, a),
        CmpOp::Ge | CmpOp::Gt => signal::sub(a, b),
        CmpOp::Eq => {
            let diff = signal::sub(a, b)?;
            let abs = abs_signal(&diff)?;
            signal::neg(&abs)
        }
        CmpOp::Ne => {
            let diff = signal::sub(a, b)?;
            abs_signal(&diff)
        }
    }
}

fn meet_join(mode: Mode) -> (fn(Value, Value) -> Value, fn(Value, Value) -> Value) {
    fn bool_and(a: Value, b: Value) -> Value {
        Value::Bool(a.as_bool() && b.as_bool())
    }
    fn bool_or(a: Value, b: Value) -> Value {
        Value::Bool(a.as_bool() || b.as_bool())
    }
    fn num_min(a: Value, b: Value) -> Value {
        Value::min(a, b)
    }
    fn num_max(a: Value, b: Value) -> Value {
        Value::max(a, b)
    }
    match mode {
        Mode::Boolean => (bool_and, bool_or),
        Mode::Robust => (num_min, num_max),
    }
}

fn fold_nary(list: &[Expr], trace: &Trace, mode: Mode, is_and: bool) -> Result<Signal, ArgusError> {
    let (meet, join) = meet_join(mode);
    let op = if is_and { meet } else { join };
    let mut acc = eval_formula(&list[0], trace, mode)?;
    for item in &list[1..] {
        let next = eval_formula(item, trace, mode)?;
        acc = match mode {
            Mode::Boolean => signal::fold2(&acc, &next, ElemKind::Bool, op),
            Mode::Robust => {
                if is_and {
                    signal::min(&acc, &next)?
                } else {
                    signal::max(&acc, &next)?
                }
            }
        };
    }
    Ok(acc)
}

fn eval_formula(expr: &Expr, trace: &Trace, mode: Mode) -> Result<Signal, ArgusError> {
    match expr {
        Expr::ConstBool(b) => Ok(leaf_bool(*b, mode)),
        Expr::VarBool(name) => {
            let sig = trace.resolve(name, ElemKind::Bool)?;
            match mode {
                Mode::Boolean => Ok(sig.clone()),
                Mode::Robust => Ok(lift_bool_to_robust(sig)),
            }
        }
        Expr::Cmp(op, a, b) => {
            let na = eval_num(a, trace)?;
            let nb = eval_num(b, trace)?;
            match mode {
                Mode::Boolean => signal::compare(*op, &na, &nb),
                Mode::Robust => cmp_robust(*op, &na, &nb),
            }
        }
        Expr::Not(phi) => {
            let child = eval_formula(phi, trace, mode)?;
            match mode {
                Mode::Boolean => Ok(signal::map(&child, ElemKind::Bool, |v| Value::Bool(!v.as_bool()))),
                Mode::Robust => signal::neg(&child),
            }
        }
        Expr::And(list) => fold_nary(list, trace, mode, true),
        Expr::Or(list) => fold_nary(list, trace, mode, false),
        Expr::Implies(a, b) => {
            let pa = eval_formula(a, trace, mode)?;
            let pb = eval_formula(b, trace, mode)?;
            match mode {
                Mode::Boolean => Ok(signal::fold2(&pa, &pb, ElemKind::Bool, |a, b| {
                    Value::Bool(!a.as_bool() || b.as_bool())
                })),
                Mode::Robust => {
                    let neg_a = signal::neg(&pa)?;
                    signal::max(&neg_a, &pb)
                }
            }
        }
        Expr::Iff(a, b) => {
            let pa = eval_formula(a, trace, mode)?;
            let pb = eval_formula(b, trace, mode)?;
            match mode {
                Mode::Boolean => Ok(signal::fold2(&pa, &pb, ElemKind::Bool, |a, b| {
                    Value::Bool(a.as_bool() == b.as_bool())
                })),
                Mode::Robust => {
                    // Iff = (a -> b) && (b -> a); each implication's
                    // robustness is max(-x, y), and the conjunction is the
                    // min of the two.
                    let neg_a = signal::neg(&pa)?;
                    let neg_b = signal::neg(&pb)?;
                    let a_implies_b = signal::max(&neg_a, &pb)?;
                    let b_implies_a = signal::max(&neg_b, &pa)?;
                    signal::min(&a_implies_b, &b_implies_a)
                }
            }
        }
        Expr::Xor(a, b) => {
            let pa = eval_formula(a, trace, mode)?;
            let pb = eval_formula(b, trace, mode)?;
            match mode {
                Mode::Boolean => Ok(signal::fold2(&pa, &pb, ElemKind::Bool, |a, b| {
                    Value::Bool(a.as_bool() != b.as_bool())
                })),
                Mode::Robust => {
                    let neg_a = signal::neg(&pa)?;
                    let neg_b = signal::neg(&pb)?;
                    let a_implies_b = signal::max(&neg_a, &pb)?;
                    let b_implies_a = signal::max(&neg_b, &pa)?;
                    let iff = signal::min(&a_implies_b, &b_implies_a)?;
                    signal::neg(&iff)
                }
            }
        }
        Expr::Next(phi) => {
            let child = eval_formula(phi, trace, mode)?;
            Ok(temporal::shift_next(&child))
        }
        Expr::Always(interval, phi) => {
            let child = eval_formula(phi, trace, mode)?;
            let (meet, _) = meet_join(mode);
            if interval.is_unbounded() {
                Ok(temporal::unbounded_fold(&child, mode.out_kind(), meet))
            } else {
                Ok(temporal::bounded_fold(&child, interval, mode.out_kind(), meet))
            }
        }
        Expr::Eventually(interval, phi) => {
            let child = eval_formula(phi, trace, mode)?;
            let (_, join) = meet_join(mode);
            if interval.is_unbounded() {
                Ok(temporal::unbounded_fold(&child, mode.out_kind(), join))
            } else {
                Ok(temporal::bounded_fold(&child, interval, mode.out_kind(), join))
            }
        }
        Expr::Until(interval, phi, psi) => {
            let p = eval_formula(phi, trace, mode)?;
            let q = eval_formula(psi, trace, mode)?;
            let (meet, join) = meet_join(mode);
            if interval.is_unbounded() {
                Ok(temporal::until_unbounded(&p, &q, mode.out_kind(), meet, join))
            } else {
                Ok(temporal::until_bounded(&p, &q, interval, mode.out_kind(), meet, join))
            }
        }
        Expr::ConstInt(_)
        | Expr::ConstUInt(_)
        | Expr::ConstFloat(_)
        | Expr::VarNum { .. }
        | Expr::Neg(_)
        | Expr::Add(..)
        | Expr::Sub(..)
        | Expr::Mul(..)
        | Expr::Div(..) => {
            unreachable!("eval_formula called with a numeric expression; only Cmp's operands are numeric")
        }
    }
}

fn eval_num(expr: &Expr, trace: &Trace) -> Result<Signal, ArgusError> {
    match expr {
        Expr::ConstInt(i) => Signal::constant(ElemKind::Int, Value::Int(*i)),
        Expr::ConstUInt(u) => Signal::constant(ElemKind::UInt, Value::UInt(*u)),
        Expr::ConstFloat(f) => Signal::constant(ElemKind::Float, Value::Float(*f)),
        Expr::VarNum { name, elem_ty } => trace.resolve(name, *elem_ty).map(|s| s.clone()),
        Expr::Neg(e) => signal::neg(&eval_num(e, trace)?),
        Expr::Add(a, b) => signal::add(&eval_num(a, trace)?, &eval_num(b, trace)?),
        Expr::Sub(a, b) => signal::sub(&eval_num(a, trace)?, &eval_num(b, trace)?),
        Expr::Mul(a, b) => signal::mul(&eval_num(a, trace)?, &eval_num(b, trace)?),
        Expr::Div(a, b) => signal::div(&eval_num(a, trace)?, &eval_num(b, trace)?),
        _ => unreachable!("eval_num called with a Boolean expression"),
    }
}
