// <FILE>tests/invariants.rs</FILE> - <DESC>Property-based tests for signal and semantics invariants</DESC>
// <VERS>VERSION: 1.1.0</VERS>
// <WCTX>Review fixes: unparenthesized negation coverage</WCTX>
// <CLOG>always_equals_not_eventually_not now exercises unparenthesized `!F !a` instead of a fully parenthesized rhs</CLOG>

//! Property-based tests verifying the crate's core invariants hold across
//! randomly generated inputs:
//!
//! 1. **Round-trip**: `from_samples` followed by `at` returns each sample
//!    exactly, and the reported domain endpoints match.
//! 2. **Monotonicity**: non-increasing sample times are always rejected.
//! 3. **Push semantics**: `push` never succeeds on `Empty`/`Constant`, and
//!    always requires a strictly increasing time on `Sampled`.
//! 4. **Boolean identity**: evaluating a bare `VarBool` reproduces its
//!    trace signal exactly.
//! 5. **Semantic dualities**: De Morgan's law and `G == !F!` hold pointwise.
//! 6. **Robustness-Boolean soundness**: positive robustness implies Boolean
//!    satisfaction, and negative robustness implies violation.

use argus_stl::prelude::*;
use proptest::prelude::*;

fn strictly_increasing_times() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..100.0, 1..12).prop_map(|deltas| {
        let mut t = 0.0;
        let mut times = Vec::with_capacity(deltas.len());
        for d in deltas {
            t += d;
            times.push(t);
        }
        times
    })
}

fn bool_samples() -> impl Strategy<Value = Vec<(f64, bool)>> {
    strictly_increasing_times().prop_flat_map(|times| {
        let n = times.len();
        prop::collection::vec(any::<bool>(), n).prop_map(move |bs| {
            times.iter().copied().zip(bs).collect()
        })
    })
}

fn float_samples() -> impl Strategy<Value = Vec<(f64, f64)>> {
    strictly_increasing_times().prop_flat_map(|times| {
        let n = times.len();
        prop::collection::vec(-1e3f64..1e3, n).prop_map(move |vs| {
            times.iter().copied().zip(vs).collect()
        })
    })
}

fn bools(samples: &[(f64, bool)]) -> Signal {
    Signal::from_samples(
        ElemKind::Bool,
        Interpolation::Constant,
        samples.iter().map(|&(t, b)| (t, Value::Bool(b))).collect(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn from_samples_roundtrips_every_point(samples in float_samples()) {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            samples.iter().map(|&(t, v)| (t, Value::Float(v))).collect(),
        ).unwrap();
        for &(t, v) in &samples {
            prop_assert_eq!(sig.at(t).value(), Some(Value::Float(v)));
        }
        prop_assert_eq!(sig.start_time(), Some(samples[0].0));
        prop_assert_eq!(sig.end_time(), Some(samples.last().unwrap().0));
    }

    #[test]
    fn non_increasing_times_are_rejected(samples in float_samples()) {
        if samples.len() >= 2 {
            let mut reordered: Vec<(f64, Value)> = samples
                .iter()
                .map(|&(t, v)| (t, Value::Float(v)))
                .collect();
            reordered.swap(0, 1);
            prop_assert!(Signal::from_samples(ElemKind::Float, Interpolation::Constant, reordered).is_err());
        }
    }

    #[test]
    fn push_requires_strictly_greater_time(samples in float_samples(), delta in -50.0f64..50.0) {
        let mut sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Constant,
            samples.iter().map(|&(t, v)| (t, Value::Float(v))).collect(),
        ).unwrap();
        let end = sig.end_time().unwrap();
        let candidate = end + delta;
        let result = sig.push(candidate, Value::Float(0.0));
        if candidate > end {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(matches!(result, Err(ArgusError::Monotonicity { .. })), "expected Monotonicity error");
        }
    }

    #[test]
    fn push_on_empty_or_constant_always_errors(t in -100.0f64..100.0, v in -100.0f64..100.0) {
        let mut empty = Signal::empty(ElemKind::Float, Interpolation::Constant).unwrap();
        prop_assert!(matches!(empty.push(t, Value::Float(v)), Err(ArgusError::NonSampledPush)));

        let mut constant = Signal::constant(ElemKind::Float, Value::Float(v)).unwrap();
        prop_assert!(matches!(constant.push(t, Value::Float(v)), Err(ArgusError::NonSampledPush)));
    }

    #[test]
    fn var_bool_identity(samples in bool_samples()) {
        let sig = bools(&samples);
        let trace = Trace::new([("a".to_string(), sig.clone())]);
        let phi = parse_expr("a").unwrap();
        let out = eval_bool_semantics(&phi, &trace).unwrap();
        for &(t, _) in &samples {
            prop_assert_eq!(out.at(t), sig.at(t));
        }
    }

    #[test]
    fn de_morgan_holds_pointwise(a in bool_samples(), b in bool_samples()) {
        let sig_a = bools(&a);
        let sig_b = bools(&b);
        let trace = Trace::new([("a".to_string(), sig_a), ("b".to_string(), sig_b)]);

        let lhs = parse_expr("!(a && b)").unwrap();
        let rhs = parse_expr("!a || !b").unwrap();

        let out_lhs = eval_bool_semantics(&lhs, &trace).unwrap();
        let out_rhs = eval_bool_semantics(&rhs, &trace).unwrap();

        let times: Vec<f64> = a.iter().chain(b.iter()).map(|&(t, _)| t).collect();
        for t in times {
            prop_assert_eq!(out_lhs.at(t), out_rhs.at(t));
        }
    }

    #[test]
    fn always_equals_not_eventually_not(a in bool_samples()) {
        let sig = bools(&a);
        let trace = Trace::new([("a".to_string(), sig)]);

        let lhs = parse_expr("G a").unwrap();
        // Unparenthesized: a dangling `!` must reach directly past `F`.
        let rhs = parse_expr("!F !a").unwrap();

        let out_lhs = eval_bool_semantics(&lhs, &trace).unwrap();
        let out_rhs = eval_bool_semantics(&rhs, &trace).unwrap();

        for &(t, _) in &a {
            prop_assert_eq!(out_lhs.at(t), out_rhs.at(t));
        }
    }

    #[test]
    fn robustness_sign_agrees_with_boolean_verdict(x in float_samples()) {
        let sig = Signal::from_samples(
            ElemKind::Float,
            Interpolation::Linear,
            x.iter().map(|&(t, v)| (t, Value::Float(v))).collect(),
        ).unwrap();
        let trace = Trace::new([("x".to_string(), sig)]);
        let phi = parse_expr("num_x > 0").unwrap();

        let bool_out = eval_bool_semantics(&phi, &trace).unwrap();
        let robust_out = eval_robust_semantics(&phi, &trace).unwrap();

        for &(t, _) in &x {
            let r = robust_out.at(t).value().unwrap();
            let b = bool_out.at(t).value().unwrap();
            if let Value::Float(r) = r {
                if r > 0.0 {
                    prop_assert_eq!(b, Value::Bool(true));
                } else if r < 0.0 {
                    prop_assert_eq!(b, Value::Bool(false));
                }
            }
        }
    }
}
