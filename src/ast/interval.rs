// <FILE>src/ast/interval.rs</FILE> - <DESC>Time interval annotations for temporal operators</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added bounded/unbounded Interval type and containment checks</CLOG>

use crate::error::ArgusError;
use serde::{Deserialize, Serialize};

/// A closed time interval `[a, b]` with `0 <= a <= b`, `b` possibly
/// infinite (§4.3). Absent in the concrete syntax means `[0, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub a: f64,
    pub b: f64,
}

impl Interval {
    pub const UNBOUNDED: Interval = Interval {
        a: 0.0,
        b: f64::INFINITY,
    };

    pub fn new(a: f64, b: f64) -> Result<Interval, ArgusError> {
        if a < 0.0 {
            return Err(ArgusError::TypeMismatch(format!(
                "interval lower bound must be >= 0, got {a}"
            )));
        }
        if b < a {
            return Err(ArgusError::TypeMismatch(format!(
                "interval upper bound {b} must be >= lower bound {a}"
            )));
        }
        Ok(Interval { a, b })
    }

    pub fn is_unbounded(&self) -> bool {
        self.b.is_infinite()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::UNBOUNDED
    }
}
