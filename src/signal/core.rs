// <FILE>src/signal/core.rs</FILE> - <DESC>The Signal data model: Empty, Constant, and Sampled variants</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added Signal enum, from_samples/push monotonicity checks, and at() interpolation</CLOG>

//! Grounded on a `Keyframes`-style curve (piecewise-linear interpolation
//! over a sorted `Vec` via binary search) generalized from a single `f32`
//! curve to the four typed element kinds of §3.1, plus the `Empty`/
//! `Constant` variants §3.2 adds on top.

use crate::error::ArgusError;
use crate::interpolation::Interpolation;
use crate::value::{ElemKind, Value};
use serde::{Deserialize, Serialize};

/// The result of a point query against a signal: a sum-type in place of the
/// Python source's optional-value pattern (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AtResult {
    Defined(Value),
    Undefined,
}

impl AtResult {
    pub fn is_defined(&self) -> bool {
        matches!(self, AtResult::Defined(_))
    }

    pub fn value(&self) -> Option<Value> {
        match self {
            AtResult::Defined(v) => Some(*v),
            AtResult::Undefined => None,
        }
    }
}

/// A typed, piecewise function of time.
///
/// One of three structural variants (§3.2):
///
/// - [`Signal::Empty`] carries no samples; every query is `Undefined`.
/// - [`Signal::Constant`] holds one value over an unbounded domain; it is
///   immutable, `push` always fails.
/// - [`Signal::Sampled`] holds a strictly time-increasing sequence of
///   `(t, v)` pairs with a fixed [`Interpolation`] mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Empty {
        kind: ElemKind,
        interpolation: Interpolation,
    },
    Constant {
        kind: ElemKind,
        value: Value,
        interpolation: Interpolation,
    },
    Sampled {
        kind: ElemKind,
        interpolation: Interpolation,
        times: Vec<f64>,
        values: Vec<Value>,
    },
}

fn check_interpolation(kind: ElemKind, interpolation: Interpolation) -> Result<(), ArgusError> {
    if interpolation == Interpolation::Linear && kind == ElemKind::Bool {
        return Err(ArgusError::TypeMismatch(
            "a Bool signal may only use Constant interpolation".into(),
        ));
    }
    Ok(())
}

fn check_kind(kind: ElemKind, value: Value) -> Result<(), ArgusError> {
    if value.kind() != kind {
        return Err(ArgusError::TypeMismatch(format!(
            "expected a {kind} value, got {:?}",
            value
        )));
    }
    Ok(())
}

impl Signal {
    pub fn empty(kind: ElemKind, interpolation: Interpolation) -> Result<Signal, ArgusError> {
        check_interpolation(kind, interpolation)?;
        Ok(Signal::Empty {
            kind,
            interpolation,
        })
    }

    /// A constant signal holding `value` at every time. `interpolation` only
    /// matters when this signal is later combined with a `Sampled` one
    /// (§4.5.3): a `Linear`-tagged constant does not force a `Linear`
    /// combination down to `Constant`.
    pub fn constant(kind: ElemKind, value: Value) -> Result<Signal, ArgusError> {
        check_kind(kind, value)?;
        let interpolation = if kind == ElemKind::Bool {
            Interpolation::Constant
        } else {
            Interpolation::Linear
        };
        Ok(Signal::Constant {
            kind,
            value,
            interpolation,
        })
    }

    /// Build a `Sampled` signal from a list of `(t, v)` pairs. Validates
    /// strict time-monotonicity in O(n) (§4.1).
    pub fn from_samples(
        kind: ElemKind,
        interpolation: Interpolation,
        samples: Vec<(f64, Value)>,
    ) -> Result<Signal, ArgusError> {
        check_interpolation(kind, interpolation)?;
        if samples.is_empty() {
            return Ok(Signal::Empty {
                kind,
                interpolation,
            });
        }
        let mut times = Vec::with_capacity(samples.len());
        let mut values = Vec::with_capacity(samples.len());
        let mut prev: Option<f64> = None;
        for (t, v) in samples {
            check_kind(kind, v)?;
            if let Some(prev_t) = prev {
                if !(t > prev_t) {
                    return Err(ArgusError::Monotonicity {
                        at: t,
                        must_exceed: prev_t,
                    });
                }
            }
            prev = Some(t);
            times.push(t);
            values.push(v);
        }
        Ok(Signal::Sampled {
            kind,
            interpolation,
            times,
            values,
        })
    }

    /// A `Sampled` signal with a single sample, useful as the seed for
    /// incremental construction via [`Signal::push`].
    pub fn singleton(
        kind: ElemKind,
        interpolation: Interpolation,
        t: f64,
        value: Value,
    ) -> Result<Signal, ArgusError> {
        Signal::from_samples(kind, interpolation, vec![(t, value)])
    }

    pub fn kind(&self) -> ElemKind {
        match self {
            Signal::Empty { kind, .. } => *kind,
            Signal::Constant { kind, .. } => *kind,
            Signal::Sampled { kind, .. } => *kind,
        }
    }

    pub fn interpolation(&self) -> Interpolation {
        match self {
            Signal::Empty { interpolation, .. } => *interpolation,
            Signal::Constant { interpolation, .. } => *interpolation,
            Signal::Sampled { interpolation, .. } => *interpolation,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Signal::Empty { .. })
    }

    pub fn start_time(&self) -> Option<f64> {
        match self {
            Signal::Sampled { times, .. } => times.first().copied(),
            _ => None,
        }
    }

    pub fn end_time(&self) -> Option<f64> {
        match self {
            Signal::Sampled { times, .. } => times.last().copied(),
            _ => None,
        }
    }

    /// The strictly increasing sample times, or `None` for `Empty`/`Constant`.
    pub fn sample_times(&self) -> Option<&[f64]> {
        match self {
            Signal::Sampled { times, .. } => Some(times),
            _ => None,
        }
    }

    /// Append a sample. Requires a `Sampled` signal and `t` strictly greater
    /// than the current `end_time` (§3.2).
    pub fn push(&mut self, t: f64, value: Value) -> Result<(), ArgusError> {
        match self {
            Signal::Empty { .. } | Signal::Constant { .. } => Err(ArgusError::NonSampledPush),
            Signal::Sampled {
                kind,
                times,
                values,
                ..
            } => {
                check_kind(*kind, value)?;
                let end = *times.last().expect("Sampled signal is never empty");
                if !(t > end) {
                    return Err(ArgusError::Monotonicity {
                        at: t,
                        must_exceed: end,
                    });
                }
                times.push(t);
                values.push(value);
                Ok(())
            }
        }
    }

    /// Point query per §3.2: binary search on sample times, then
    /// interpolate by the signal's fixed mode.
    pub fn at(&self, t: f64) -> AtResult {
        match self {
            Signal::Empty { .. } => AtResult::Undefined,
            Signal::Constant { value, .. } => AtResult::Defined(*value),
            Signal::Sampled {
                interpolation,
                times,
                values,
                ..
            } => {
                let start = times[0];
                let end = *times.last().unwrap();
                if t < start || t > end {
                    return AtResult::Undefined;
                }
                match times.binary_search_by(|probe| probe.partial_cmp(&t).unwrap()) {
                    Ok(i) => AtResult::Defined(values[i]),
                    Err(i) => {
                        // `i` is the insertion point: times[i-1] < t < times[i].
                        let lo = i - 1;
                        let hi = i;
                        match interpolation {
                            Interpolation::Constant => AtResult::Defined(values[lo]),
                            Interpolation::Linear => {
                                let (t0, t1) = (times[lo], times[hi]);
                                let frac = (t - t0) / (t1 - t0);
                                AtResult::Defined(lerp(values[lo], values[hi], frac))
                            }
                        }
                    }
                }
            }
        }
    }

    /// The synchronized union of `self`'s and `other`'s sample times (§4.1),
    /// as `(t, self.at(t), other.at(t))` triples. When both signals are
    /// `Linear`, also inserts the exact crossing times where the two
    /// piecewise-linear curves cross (§4.2), so downstream `min`/`max`/
    /// comparison operators see them as ordinary sample points.
    pub fn iter_pairs(&self, other: &Signal) -> Vec<(f64, AtResult, AtResult)> {
        let domain = match domain_overlap(self, other) {
            Domain::Empty => return Vec::new(),
            Domain::Unbounded => {
                // Both sides are non-sampled: a single point suffices since
                // both are time-invariant over their shared domain.
                return vec![(0.0, self.at(0.0), other.at(0.0))];
            }
            Domain::Bounded(lo, hi) => (lo, hi),
        };

        let empty: &[f64] = &[];
        let xt = self.sample_times().unwrap_or(empty);
        let yt = other.sample_times().unwrap_or(empty);

        let mut merged = Vec::with_capacity(xt.len() + yt.len());
        let mut i = 0;
        let mut j = 0;
        while i < xt.len() || j < yt.len() {
            let next = match (xt.get(i), yt.get(j)) {
                (Some(&a), Some(&b)) => {
                    if a < b {
                        i += 1;
                        a
                    } else if b < a {
                        j += 1;
                        b
                    } else {
                        i += 1;
                        j += 1;
                        a
                    }
                }
                (Some(&a), None) => {
                    i += 1;
                    a
                }
                (None, Some(&b)) => {
                    j += 1;
                    b
                }
                (None, None) => unreachable!(),
            };
            if next >= domain.0 && next <= domain.1 {
                merged.push(next);
            }
        }
        if merged.is_empty() {
            // Both operands are non-sampled but one end is bounded only
            // through the other's Constant-passthrough; fall back to the
            // domain endpoints themselves.
            merged.push(domain.0);
            if domain.1 > domain.0 {
                merged.push(domain.1);
            }
        }

        let both_linear = self.interpolation() == Interpolation::Linear
            && other.interpolation() == Interpolation::Linear;

        let mut out = Vec::with_capacity(merged.len());
        let mut prev: Option<(f64, AtResult, AtResult)> = None;
        for t in merged {
            let cur = (t, self.at(t), other.at(t));
            if both_linear {
                if let Some(prev_point) = prev {
                    if let Some(cross) = crossing_point(prev_point, cur) {
                        out.push(cross);
                    }
                }
            }
            out.push(cur);
            prev = Some(cur);
        }
        out
    }
}

fn lerp(a: Value, b: Value, frac: f64) -> Value {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => {
            Value::Int(x + (((y - x) as f64) * frac).round() as i64)
        }
        (Value::UInt(x), Value::UInt(y)) => {
            let delta = y as f64 - x as f64;
            Value::UInt((x as f64 + delta * frac).round() as u64)
        }
        (Value::Float(x), Value::Float(y)) => Value::Float(x + (y - x) * frac),
        _ => unreachable!("lerp called with mismatched or non-numeric values"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Domain {
    Empty,
    Unbounded,
    Bounded(f64, f64),
}

/// The overlap of two signals' domains per the synchronization rule in
/// §4.2: `[max(starts), min(ends)]`, with a `Constant` operand contributing
/// the other side's domain, and any `Empty` operand collapsing the result.
pub(crate) fn domain_overlap(x: &Signal, y: &Signal) -> Domain {
    if x.is_empty() || y.is_empty() {
        return Domain::Empty;
    }
    match (x.start_time(), x.end_time(), y.start_time(), y.end_time()) {
        (None, None, None, None) => Domain::Unbounded,
        (None, None, Some(ys), Some(ye)) => Domain::Bounded(ys, ye),
        (Some(xs), Some(xe), None, None) => Domain::Bounded(xs, xe),
        (Some(xs), Some(xe), Some(ys), Some(ye)) => {
            let lo = xs.max(ys);
            let hi = xe.min(ye);
            if lo > hi {
                Domain::Empty
            } else {
                Domain::Bounded(lo, hi)
            }
        }
        _ => unreachable!("a Sampled signal always has both start_time and end_time"),
    }
}

/// Given two consecutive synchronized points of `x - y`, find the exact
/// time the linearly-interpolated difference crosses zero (§4.2). Returns
/// `None` when there is no strict sign change.
fn crossing_point(
    prev: (f64, AtResult, AtResult),
    cur: (f64, AtResult, AtResult),
) -> Option<(f64, AtResult, AtResult)> {
    let (t0, x0, y0) = prev;
    let (t1, x1, y1) = cur;
    let (x0, y0, x1, y1) = match (x0.value(), y0.value(), x1.value(), y1.value()) {
        (Some(x0), Some(y0), Some(x1), Some(y1)) => (x0, y0, x1, y1),
        _ => return None,
    };
    let d0 = x0.as_f64() - y0.as_f64();
    let d1 = x1.as_f64() - y1.as_f64();
    if d0 == 0.0 || d1 == 0.0 || d0.signum() == d1.signum() {
        return None;
    }
    let frac = d0.abs() / (d0.abs() + d1.abs());
    let t_star = t0 + (t1 - t0) * frac;
    let value = lerp(x0, x1, frac);
    Some((t_star, AtResult::Defined(value), AtResult::Defined(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(t: f64, v: f64) -> (f64, Value) {
        (t, Value::Float(v))
    }

    #[test]
    fn from_samples_roundtrips_at() {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            vec![f(0.0, 1.0), f(1.0, 2.0), f(2.0, 3.0)],
        )
        .unwrap();
        assert_eq!(sig.at(0.0), AtResult::Defined(Value::Float(1.0)));
        assert_eq!(sig.at(1.0), AtResult::Defined(Value::Float(2.0)));
        assert_eq!(sig.at(2.0), AtResult::Defined(Value::Float(3.0)));
        assert_eq!(sig.start_time(), Some(0.0));
        assert_eq!(sig.end_time(), Some(2.0));
    }

    #[test]
    fn non_monotone_samples_error() {
        let err = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            vec![f(1.0, 1.0), f(0.5, 2.0)],
        )
        .unwrap_err();
        assert!(matches!(err, ArgusError::Monotonicity { .. }));
    }

    #[test]
    fn push_on_empty_errors() {
        let mut sig = Signal::empty(ElemKind::Float, Interpolation::Constant).unwrap();
        let err = sig.push(0.0, Value::Float(1.0)).unwrap_err();
        assert!(matches!(err, ArgusError::NonSampledPush));
    }

    #[test]
    fn push_on_constant_errors() {
        let mut sig = Signal::constant(ElemKind::Float, Value::Float(1.0)).unwrap();
        let err = sig.push(0.0, Value::Float(2.0)).unwrap_err();
        assert!(matches!(err, ArgusError::NonSampledPush));
    }

    #[test]
    fn push_requires_strictly_greater_time() {
        let mut sig = Signal::singleton(ElemKind::Float, Interpolation::Constant, 1.0, Value::Float(1.0)).unwrap();
        let err = sig.push(1.0, Value::Float(2.0)).unwrap_err();
        assert!(matches!(err, ArgusError::Monotonicity { .. }));
        sig.push(2.0, Value::Float(2.0)).unwrap();
        assert_eq!(sig.end_time(), Some(2.0));
    }

    #[test]
    fn bool_signal_rejects_linear() {
        let err = Signal::empty(ElemKind::Bool, Interpolation::Linear).unwrap_err();
        assert!(matches!(err, ArgusError::TypeMismatch(_)));
    }

    #[test]
    fn query_outside_domain_is_undefined() {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            vec![f(1.0, 1.0), f(2.0, 2.0)],
        )
        .unwrap();
        assert_eq!(sig.at(0.0), AtResult::Undefined);
        assert_eq!(sig.at(3.0), AtResult::Undefined);
    }

    #[test]
    fn constant_mode_is_right_continuous_step() {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            vec![f(0.0, 1.0), f(1.0, 2.0)],
        )
        .unwrap();
        assert_eq!(sig.at(0.5), AtResult::Defined(Value::Float(1.0)));
        assert_eq!(sig.at(1.0), AtResult::Defined(Value::Float(2.0)));
    }

    #[test]
    fn linear_mode_interpolates() {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            vec![f(0.0, 0.0), f(2.0, 4.0)],
        )
        .unwrap();
        assert_eq!(sig.at(1.0), AtResult::Defined(Value::Float(2.0)));
    }

    #[test]
    fn iter_pairs_inserts_crossing_point() {
        let x = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            vec![f(0.0, -1.0), f(2.0, 1.0)],
        )
        .unwrap();
        let zero = Signal::constant(ElemKind::Float, Value::Float(0.0)).unwrap();
        let pairs = x.iter_pairs(&zero);
        let crossing = pairs
            .iter()
            .find(|(t, _, _)| (*t - 1.0).abs() < 1e-9)
            .expect("expected a crossing sample at t=1");
        assert_eq!(crossing.1, AtResult::Defined(Value::Float(0.0)));
    }

    #[test]
    fn disjoint_domains_yield_empty_iteration() {
        let x = Signal::from_samples(ElemKind::Float, Interpolation::Constant, vec![f(0.0, 1.0)])
            .unwrap();
        let y = Signal::from_samples(ElemKind::Float, Interpolation::Constant, vec![f(5.0, 1.0)])
            .unwrap();
        assert!(x.iter_pairs(&y).is_empty());
    }
}
