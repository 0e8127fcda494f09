// <FILE>src/trace.rs</FILE> - <DESC>Named bundle of signals providing variable lookup for the semantics engine</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added Trace and its name-to-Signal lookup used by VarBool/VarNum resolution</CLOG>

use crate::error::ArgusError;
use crate::signal::Signal;
use crate::value::ElemKind;
use std::collections::HashMap;

/// A mapping from variable name to [`Signal`], built once per evaluation
/// call (§3.4, §4.6). Signals in a trace may be sparse or span different
/// domains; the semantics engine samples each at the union of referenced
/// variables' domains as it evaluates a formula.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    signals: HashMap<String, Signal>,
}

impl Trace {
    pub fn new(signals: impl IntoIterator<Item = (String, Signal)>) -> Trace {
        Trace {
            signals: signals.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, signal: Signal) {
        self.signals.insert(name.into(), signal);
    }

    /// Look up `name`, failing with `UnknownVariable` if absent or
    /// `TypeMismatch` if its kind differs from `expected_kind`.
    pub fn resolve(&self, name: &str, expected_kind: ElemKind) -> Result<&Signal, ArgusError> {
        let signal = self
            .signals
            .get(name)
            .ok_or_else(|| ArgusError::UnknownVariable(name.to_string()))?;
        if signal.kind() != expected_kind {
            return Err(ArgusError::TypeMismatch(format!(
                "variable `{name}` has kind {}, expected {expected_kind}",
                signal.kind()
            )));
        }
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation::Interpolation;
    use crate::value::Value;

    #[test]
    fn resolve_unknown_variable_errors() {
        let trace = Trace::new([]);
        let err = trace.resolve("a", ElemKind::Bool).unwrap_err();
        assert!(matches!(err, ArgusError::UnknownVariable(_)));
    }

    #[test]
    fn resolve_kind_mismatch_errors() {
        let sig = Signal::constant(ElemKind::Float, Value::Float(1.0)).unwrap();
        let trace = Trace::new([("x".to_string(), sig)]);
        let err = trace.resolve("x", ElemKind::Bool).unwrap_err();
        assert!(matches!(err, ArgusError::TypeMismatch(_)));
    }

    #[test]
    fn resolve_returns_matching_signal() {
        let sig = Signal::singleton(ElemKind::Bool, Interpolation::Constant, 0.0, Value::Bool(true))
            .unwrap();
        let trace = Trace::new([("a".to_string(), sig.clone())]);
        assert_eq!(trace.resolve("a", ElemKind::Bool).unwrap(), &sig);
    }
}
