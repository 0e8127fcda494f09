// <FILE>src/signal/algebra.rs</FILE> - <DESC>Arithmetic, comparison, and lattice operations over pairs of signals</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added pointwise signal arithmetic and min/max lattice ops over merged sample grids</CLOG>

//! Binary operators over two signals (§4.2). Every operator synchronizes
//! its operands via [`Signal::iter_pairs`], applies a pointwise [`Value`]
//! operation, and reassembles the result with the inherited interpolation
//! mode (Linear only if both operands are Linear, else Constant).

use crate::error::ArgusError;
use crate::interpolation::Interpolation;
use crate::signal::core::{domain_overlap, Domain};
use crate::signal::{AtResult, Signal};
use crate::value::{promote, ElemKind, Value};

fn result_interpolation(x: &Signal, y: &Signal) -> Interpolation {
    Interpolation::combine(x.interpolation(), y.interpolation())
}

/// Apply a pointwise binary [`Value`] operation over the synchronized union
/// of `x` and `y`, producing a new signal of `out_kind`.
fn combine(
    x: &Signal,
    y: &Signal,
    out_kind: ElemKind,
    op: impl Fn(Value, Value) -> Result<Value, ArgusError>,
) -> Result<Signal, ArgusError> {
    let interpolation = result_interpolation(x, y);
    match domain_overlap(x, y) {
        Domain::Empty => Signal::empty(out_kind, interpolation),
        Domain::Unbounded => {
            let (xv, yv) = match (x.at(0.0).value(), y.at(0.0).value()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Signal::empty(out_kind, interpolation),
            };
            Signal::constant(out_kind, op(xv, yv)?)
        }
        Domain::Bounded(..) => {
            let mut samples = Vec::new();
            for (t, xv, yv) in x.iter_pairs(y) {
                if let (AtResult::Defined(a), AtResult::Defined(b)) = (xv, yv) {
                    samples.push((t, op(a, b)?));
                }
            }
            Signal::from_samples(out_kind, interpolation, samples)
        }
    }
}

fn numeric_kind(x: &Signal, y: &Signal) -> ElemKind {
    promote(x.kind(), y.kind())
}

pub fn add(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), Value::add)
}

pub fn sub(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), Value::sub)
}

pub fn mul(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), Value::mul)
}

pub fn div(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), Value::div)
}

/// Apply an infallible pointwise unary value transform, preserving the
/// signal's structure and interpolation mode. Used by the semantics engine
/// for Boolean negation and for lifting a Boolean leaf to its robustness
/// encoding (`+∞`/`-∞`).
pub fn map(x: &Signal, out_kind: ElemKind, f: impl Fn(Value) -> Value) -> Signal {
    let interpolation = x.interpolation();
    match x {
        Signal::Empty { .. } => Signal::empty(out_kind, interpolation).unwrap(),
        Signal::Constant { value, .. } => {
            Signal::constant(out_kind, f(*value)).expect("map preserves value kind")
        }
        Signal::Sampled { times, values, .. } => {
            let samples = times.iter().zip(values.iter()).map(|(&t, &v)| (t, f(v))).collect();
            Signal::from_samples(out_kind, interpolation, samples)
                .expect("map preserves monotonicity")
        }
    }
}

/// Pointwise negation (unary, but expressed through the same synchronized
/// machinery by pairing `x` with itself).
pub fn neg(x: &Signal) -> Result<Signal, ArgusError> {
    let interpolation = x.interpolation();
    match x {
        Signal::Empty { kind, .. } => Signal::empty(*kind, interpolation),
        Signal::Constant { kind, value, .. } => Signal::constant(*kind, Value::neg(*value)?),
        Signal::Sampled {
            kind, times, values, ..
        } => {
            let mut out = Vec::with_capacity(values.len());
            for (&t, &v) in times.iter().zip(values.iter()) {
                out.push((t, Value::neg(v)?));
            }
            Signal::from_samples(*kind, interpolation, out)
        }
    }
}

pub fn min(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), |a, b| Ok(Value::min(a, b)))
}

pub fn max(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    combine(x, y, numeric_kind(x, y), |a, b| Ok(Value::max(a, b)))
}

fn cmp(
    x: &Signal,
    y: &Signal,
    pass: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Signal, ArgusError> {
    combine(x, y, ElemKind::Bool, move |a, b| {
        Ok(Value::Bool(pass(Value::compare(a, b))))
    })
}

pub fn lt(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_lt())
}

pub fn le(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_le())
}

pub fn gt(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_gt())
}

pub fn ge(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_ge())
}

pub fn eq(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_eq())
}

pub fn ne(x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    cmp(x, y, |o| o.is_ne())
}

/// General comparison dispatch, used by the semantics engine which carries
/// an AST [`crate::ast::CmpOp`] rather than calling `lt`/`le`/... directly.
pub fn compare(op: crate::ast::CmpOp, x: &Signal, y: &Signal) -> Result<Signal, ArgusError> {
    use crate::ast::CmpOp::*;
    match op {
        Lt => lt(x, y),
        Le => le(x, y),
        Gt => gt(x, y),
        Ge => ge(x, y),
        Eq => eq(x, y),
        Ne => ne(x, y),
    }
}

/// Like [`combine`], but for an infallible pointwise op. Used by the
/// semantics engine for Boolean connectives (And/Or/Implies/...), which
/// never fail the way arithmetic can.
pub fn fold2(x: &Signal, y: &Signal, out_kind: ElemKind, op: impl Fn(Value, Value) -> Value) -> Signal {
    combine(x, y, out_kind, move |a, b| Ok(op(a, b))).expect("infallible op never errors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::Interpolation;

    fn lin(samples: &[(f64, f64)]) -> Signal {
        Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            samples.iter().map(|&(t, v)| (t, Value::Float(v))).collect(),
        )
        .unwrap()
    }

    #[test]
    fn add_on_union_of_times() {
        let x = lin(&[(0.0, 1.0), (2.0, 3.0)]);
        let y = lin(&[(0.0, 1.0), (1.0, 2.0), (2.0, 1.0)]);
        let sum = add(&x, &y).unwrap();
        assert_eq!(sum.at(0.0), AtResult::Defined(Value::Float(2.0)));
        assert_eq!(sum.at(2.0), AtResult::Defined(Value::Float(4.0)));
        // x interpolates to 2.0 at t=1 (between 1.0 and 3.0)
        assert_eq!(sum.at(1.0), AtResult::Defined(Value::Float(4.0)));
    }

    #[test]
    fn mixed_kind_comparison_promotes_to_float() {
        let x = Signal::from_samples(
            ElemKind::Int,
            Interpolation::Constant,
            vec![(0.0, Value::Int(3)), (1.0, Value::Int(5))],
        )
        .unwrap();
        let y = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            vec![(0.0, Value::Float(2.0)), (1.0, Value::Float(6.0))],
        )
        .unwrap();
        let result = lt(&x, &y).unwrap();
        assert_eq!(result.at(0.0), AtResult::Defined(Value::Bool(false)));
        assert_eq!(result.at(1.0), AtResult::Defined(Value::Bool(true)));
    }

    #[test]
    fn int_div_by_zero_propagates_as_error() {
        let x = Signal::from_samples(
            ElemKind::Int,
            Interpolation::Constant,
            vec![(0.0, Value::Int(1))],
        )
        .unwrap();
        let zero = Signal::constant(ElemKind::Int, Value::Int(0)).unwrap();
        assert!(div(&x, &zero).is_err());
    }

    #[test]
    fn disjoint_domains_yield_empty_signal() {
        let x = lin(&[(0.0, 1.0)]);
        let y = lin(&[(5.0, 1.0)]);
        assert!(add(&x, &y).unwrap().is_empty());
    }

    #[test]
    fn constant_domain_passthrough() {
        let x = lin(&[(0.0, 1.0), (1.0, 2.0)]);
        let y = Signal::constant(ElemKind::Float, Value::Float(10.0)).unwrap();
        let sum = add(&x, &y).unwrap();
        assert_eq!(sum.start_time(), Some(0.0));
        assert_eq!(sum.at(0.0), AtResult::Defined(Value::Float(11.0)));
    }

    #[test]
    fn both_constant_signals_combine_to_constant() {
        let x = Signal::constant(ElemKind::Float, Value::Float(2.0)).unwrap();
        let y = Signal::constant(ElemKind::Float, Value::Float(3.0)).unwrap();
        let sum = add(&x, &y).unwrap();
        assert!(matches!(sum, Signal::Constant { .. }));
        assert_eq!(sum.at(1000.0), AtResult::Defined(Value::Float(5.0)));
    }

    #[test]
    fn mixing_linear_and_constant_mode_downgrades_result() {
        let x = lin(&[(0.0, 1.0), (1.0, 2.0)]);
        let y = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            vec![(0.0, Value::Float(1.0)), (1.0, Value::Float(1.0))],
        )
        .unwrap();
        let sum = add(&x, &y).unwrap();
        assert_eq!(sum.interpolation(), Interpolation::Constant);
    }
}
