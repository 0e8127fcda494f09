// <FILE>src/interpolation.rs</FILE> - <DESC>Interpolation mode, a property of a signal rather than a per-call parameter</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added Interpolation enum and the Constant/Linear combine rule</CLOG>

use serde::{Deserialize, Serialize};

/// How a [`crate::signal::Signal`] answers queries that fall strictly
/// between two of its samples.
///
/// Fixed at construction (§3.2) — this removes the "mode mismatch" bugs an
/// interpolation parameter threaded through every operation would invite
/// (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Right-continuous step: value `vᵢ` holds on `[tᵢ, tᵢ₊₁)`, and `vₙ` at
    /// the final sample time.
    Constant,
    /// Piecewise-linear between consecutive samples. Requires a numeric
    /// element kind — `Bool` signals may only use `Constant`.
    Linear,
}

impl Interpolation {
    /// The conservative mode adopted when combining a `Linear` signal with
    /// a `Constant` one (§4.5.3).
    pub fn combine(a: Interpolation, b: Interpolation) -> Interpolation {
        match (a, b) {
            (Interpolation::Linear, Interpolation::Linear) => Interpolation::Linear,
            _ => Interpolation::Constant,
        }
    }
}
