// <FILE>src/semantics/temporal.rs</FILE> - <DESC>Temporal operator evaluation: Next, bounded/unbounded Always/Eventually, Until</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added windowed min/max robustness evaluation for Always/Eventually/Until</CLOG>

//! Grounded on a `Keyframes`-style windowed curve sample, generalized from
//! operating on a flat `Vec<(f32,f32)>` to the synchronized multi-signal
//! recursion §4.5 describes. Always/Eventually fold a single child signal;
//! Until folds two via [`Signal::iter_pairs`].

use crate::ast::Interval;
use crate::interpolation::Interpolation;
use crate::signal::Signal;
use crate::value::{ElemKind, Value};

/// Shift a child signal one sample to the left (§4.5.2): the value "next"
/// becomes defined one step earlier, and the final sample is dropped since
/// no successor exists for it.
pub fn shift_next(child: &Signal) -> Signal {
    match child {
        Signal::Empty { .. } | Signal::Constant { .. } => child.clone(),
        Signal::Sampled {
            kind,
            interpolation,
            times,
            values,
        } => {
            if times.len() < 2 {
                return Signal::empty(*kind, *interpolation).unwrap();
            }
            let samples = times[..times.len() - 1]
                .iter()
                .copied()
                .zip(values[1..].iter().copied())
                .collect();
            Signal::from_samples(*kind, *interpolation, samples).unwrap()
        }
    }
}

/// Unbounded Always/Eventually (§4.5.1): a single right-to-left running
/// fold over the child's own sample grid, since `op` (min/max or
/// logical and/or) is associative and the window always extends to the
/// signal's end.
pub fn unbounded_fold(
    child: &Signal,
    out_kind: ElemKind,
    op: impl Fn(Value, Value) -> Value,
) -> Signal {
    match child {
        Signal::Empty { interpolation, .. } => Signal::empty(out_kind, *interpolation).unwrap(),
        Signal::Constant { value, .. } => Signal::constant(out_kind, *value).unwrap(),
        Signal::Sampled {
            interpolation,
            times,
            values,
            ..
        } => {
            let n = values.len();
            let mut out = Vec::with_capacity(n);
            let mut running = values[n - 1];
            out.push(running);
            for &v in values[..n - 1].iter().rev() {
                running = op(v, running);
                out.push(running);
            }
            out.reverse();
            let samples = times.iter().copied().zip(out).collect();
            Signal::from_samples(out_kind, *interpolation, samples).unwrap()
        }
    }
}

/// Bounded Always/Eventually (§4.5.1): at each sample time `t`, the window
/// `[t+a, t+b]` must lie entirely within the child's domain or the result
/// is left undefined at `t` (no sample emitted there). The aggregate over
/// the window is exact for a piecewise-linear child because such a
/// function's extrema over an interval occur at a knot or an endpoint, so
/// it suffices to fold over the endpoints (via `at`) and any knots
/// strictly between them.
///
/// This is O(n) per query time, O(n^2) worst case overall; the spec's
/// monotone-deque formulation would bring it to amortized O(n) but adds
/// real complexity for a bound this engine doesn't yet need to hit.
pub fn bounded_fold(
    child: &Signal,
    interval: &Interval,
    out_kind: ElemKind,
    op: impl Fn(Value, Value) -> Value,
) -> Signal {
    match child {
        Signal::Empty { interpolation, .. } => Signal::empty(out_kind, *interpolation).unwrap(),
        Signal::Constant { value, .. } => Signal::constant(out_kind, *value).unwrap(),
        Signal::Sampled {
            interpolation,
            times,
            ..
        } => {
            let start = times[0];
            let end = *times.last().unwrap();
            let mut samples = Vec::new();
            for &t in times {
                let lo = t + interval.a;
                let hi = t + interval.b;
                if lo < start || hi > end {
                    continue;
                }
                samples.push((t, aggregate_window(child, lo, hi, &op)));
            }
            Signal::from_samples(out_kind, *interpolation, samples).unwrap()
        }
    }
}

fn aggregate_window(child: &Signal, lo: f64, hi: f64, op: &impl Fn(Value, Value) -> Value) -> Value {
    let mut acc = child.at(lo).value().expect("lo lies within the domain check above");
    if let Signal::Sampled { times, values, .. } = child {
        let lo_idx = times.partition_point(|&x| x <= lo);
        let hi_idx = times.partition_point(|&x| x < hi);
        for &v in &values[lo_idx..hi_idx] {
            acc = op(acc, v);
        }
    }
    if let Some(v) = child.at(hi).value() {
        acc = op(acc, v);
    }
    acc
}

/// Filter the synchronized union of two signals down to the points where
/// both are defined, as `(t, phi, psi)` triples.
fn synchronized(phi: &Signal, psi: &Signal) -> Vec<(f64, Value, Value)> {
    phi.iter_pairs(psi)
        .into_iter()
        .filter_map(|(t, p, q)| match (p.value(), q.value()) {
            (Some(pv), Some(qv)) => Some((t, pv, qv)),
            _ => None,
        })
        .collect()
}

/// Unbounded Until (§4.5.2): a right-to-left sweep of
/// `U(t) = join(meet(psi(t), phi(t)), meet(phi(t), U(t+)))`. At the last
/// synchronized sample there is no successor to pick `tau` beyond, so the
/// only candidate is `tau = t` itself with an empty `[t, tau)` phi
/// requirement — the seed is `psi` alone, not `meet(psi, phi)`.
pub fn until_unbounded(
    phi: &Signal,
    psi: &Signal,
    out_kind: ElemKind,
    meet: impl Fn(Value, Value) -> Value,
    join: impl Fn(Value, Value) -> Value,
) -> Signal {
    if phi.is_empty() || psi.is_empty() {
        return Signal::empty(out_kind, Interpolation::Constant).unwrap();
    }
    if let (Signal::Constant { value: pv, .. }, Signal::Constant { value: qv, .. }) = (phi, psi) {
        // Time-invariant operands: picking tau = t satisfies the formula
        // with the least required duration of phi, so U collapses to the
        // immediate conjunction/meet.
        return Signal::constant(out_kind, meet(*qv, *pv)).unwrap();
    }
    let defined = synchronized(phi, psi);
    if defined.is_empty() {
        return Signal::empty(out_kind, Interpolation::Constant).unwrap();
    }
    let n = defined.len();
    let mut out = vec![defined[n - 1].1; n];
    let (_, _last_phi, last_psi) = defined[n - 1];
    out[n - 1] = last_psi;
    for i in (0..n - 1).rev() {
        let (_, pv, qv) = defined[i];
        let immediate = meet(qv, pv);
        let carry = meet(pv, out[i + 1]);
        out[i] = join(immediate, carry);
    }
    let samples = defined.iter().map(|(t, ..)| *t).zip(out).collect();
    Signal::from_samples(out_kind, Interpolation::Constant, samples).unwrap()
}

/// Bounded Until: for each candidate start `t`, scan forward over
/// synchronized samples `tau` in `[t+a, t+b]`, tracking the running meet of
/// phi over `[t, tau]` and joining `meet(psi(tau), running_phi)` across all
/// such tau. Undefined when the window exceeds the synchronized domain, the
/// same rule bounded Always/Eventually use.
pub fn until_bounded(
    phi: &Signal,
    psi: &Signal,
    interval: &Interval,
    out_kind: ElemKind,
    meet: impl Fn(Value, Value) -> Value,
    join: impl Fn(Value, Value) -> Value,
) -> Signal {
    if phi.is_empty() || psi.is_empty() {
        return Signal::empty(out_kind, Interpolation::Constant).unwrap();
    }
    if let (Signal::Constant { value: pv, .. }, Signal::Constant { value: qv, .. }) = (phi, psi) {
        return Signal::constant(out_kind, meet(*qv, *pv)).unwrap();
    }
    let defined = synchronized(phi, psi);
    if defined.is_empty() {
        return Signal::empty(out_kind, Interpolation::Constant).unwrap();
    }
    let domain_end = defined.last().unwrap().0;
    let n = defined.len();
    let mut samples = Vec::new();
    for i in 0..n {
        let t = defined[i].0;
        let hi = t + interval.b;
        if hi > domain_end {
            continue;
        }
        let lo = t + interval.a;
        let mut running_phi: Option<Value> = None;
        let mut acc: Option<Value> = None;
        for &(tj, pv, qv) in &defined[i..] {
            if tj > hi {
                break;
            }
            running_phi = Some(match running_phi {
                Some(r) => meet(r, pv),
                None => pv,
            });
            if tj >= lo {
                let candidate = meet(qv, running_phi.unwrap());
                acc = Some(match acc {
                    Some(a) => join(a, candidate),
                    None => candidate,
                });
            }
        }
        if let Some(v) = acc {
            samples.push((t, v));
        }
    }
    Signal::from_samples(out_kind, Interpolation::Constant, samples).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::Interpolation;

    fn bools(samples: &[(f64, bool)]) -> Signal {
        Signal::from_samples(
            ElemKind::Bool,
            Interpolation::Constant,
            samples.iter().map(|&(t, b)| (t, Value::Bool(b))).collect(),
        )
        .unwrap()
    }

    fn and(a: Value, b: Value) -> Value {
        Value::Bool(a.as_bool() && b.as_bool())
    }

    fn or(a: Value, b: Value) -> Value {
        Value::Bool(a.as_bool() || b.as_bool())
    }

    #[test]
    fn shift_next_drops_last_sample() {
        let sig = bools(&[(0.0, true), (1.0, false), (2.0, true)]);
        let shifted = shift_next(&sig);
        assert_eq!(shifted.end_time(), Some(1.0));
        assert_eq!(shifted.at(0.0).value(), Some(Value::Bool(false)));
        assert_eq!(shifted.at(1.0).value(), Some(Value::Bool(true)));
    }

    #[test]
    fn shift_next_of_singleton_is_empty() {
        let sig = bools(&[(0.0, true)]);
        assert!(shift_next(&sig).is_empty());
    }

    #[test]
    fn unbounded_always_is_running_and() {
        let sig = bools(&[(0.0, true), (1.0, true), (2.0, false), (3.0, true)]);
        let out = unbounded_fold(&sig, ElemKind::Bool, and);
        assert_eq!(out.at(0.0).value(), Some(Value::Bool(false)));
        assert_eq!(out.at(2.0).value(), Some(Value::Bool(false)));
        assert_eq!(out.at(3.0).value(), Some(Value::Bool(true)));
    }

    #[test]
    fn unbounded_eventually_is_running_or() {
        let sig = bools(&[(0.0, false), (1.0, false), (2.0, true), (3.0, false)]);
        let out = unbounded_fold(&sig, ElemKind::Bool, or);
        assert_eq!(out.at(0.0).value(), Some(Value::Bool(true)));
        assert_eq!(out.at(2.0).value(), Some(Value::Bool(true)));
        assert_eq!(out.at(3.0).value(), Some(Value::Bool(false)));
    }

    #[test]
    fn bounded_always_window_exceeding_domain_is_undefined() {
        let sig = bools(&[(0.0, true), (1.0, true), (2.0, true), (3.0, true)]);
        let interval = Interval::new(0.0, 1.0).unwrap();
        let out = bounded_fold(&sig, &interval, ElemKind::Bool, and);
        assert_eq!(out.end_time(), Some(2.0));
        assert_eq!(out.at(3.0).value(), None);
    }

    #[test]
    fn bounded_always_detects_false_inside_window() {
        let sig = bools(&[(0.0, true), (1.0, false), (2.0, true), (3.0, true)]);
        let interval = Interval::new(0.0, 1.0).unwrap();
        let out = bounded_fold(&sig, &interval, ElemKind::Bool, and);
        assert_eq!(out.at(0.0).value(), Some(Value::Bool(false)));
        assert_eq!(out.at(1.0).value(), Some(Value::Bool(false)));
        assert_eq!(out.at(2.0).value(), Some(Value::Bool(true)));
    }

    #[test]
    fn until_unbounded_true_once_psi_holds_with_phi_before() {
        let phi = bools(&[(0.0, true), (1.0, true), (2.0, false), (3.0, false)]);
        let psi = bools(&[(0.0, false), (1.0, false), (2.0, true), (3.0, false)]);
        let out = until_unbounded(&phi, &psi, ElemKind::Bool, and, or);
        assert_eq!(out.at(0.0).value(), Some(Value::Bool(true)));
        assert_eq!(out.at(1.0).value(), Some(Value::Bool(true)));
        assert_eq!(out.at(2.0).value(), Some(Value::Bool(true)));
        assert_eq!(out.at(3.0).value(), Some(Value::Bool(false)));
    }

    #[test]
    fn until_unbounded_false_when_psi_never_holds() {
        let phi = bools(&[(0.0, true), (1.0, true)]);
        let psi = bools(&[(0.0, false), (1.0, false)]);
        let out = until_unbounded(&phi, &psi, ElemKind::Bool, and, or);
        assert_eq!(out.at(0.0).value(), Some(Value::Bool(false)));
    }
}
