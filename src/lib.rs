// <FILE>src/lib.rs</FILE> - <DESC>Offline STL monitoring library: signals, formulas, traces, and semantics</DESC>
// <VERS>VERSION: 1.1.0</VERS>
// <WCTX>Review fixes: dependency ledger cleanup</WCTX>
// <CLOG>Dropped the unused serde_json dev-dependency</CLOG>

//! # argus-stl
//!
//! Offline monitoring of Signal Temporal Logic (STL) specifications against
//! typed, timestamped signals.
//!
//! A user declares variables, parses a formula in the concrete STL syntax
//! (see [`parser`]), constructs a [`Trace`] assigning each variable to a
//! [`Signal`], and asks the [`semantics`] engine to evaluate either Boolean
//! satisfaction or quantitative robustness of the formula against the
//! trace. The result is itself a `Signal`, giving the monitored value at
//! every time index referenced by the formula.
//!
//! ## Quick start
//!
//! ```rust
//! use argus_stl::prelude::*;
//!
//! // a: [(0, true), (1, true), (2, false)]
//! let a = Signal::from_samples(
//!     ElemKind::Bool,
//!     Interpolation::Constant,
//!     vec![(0.0, Value::Bool(true)), (1.0, Value::Bool(true)), (2.0, Value::Bool(false))],
//! )
//! .unwrap();
//! let b = Signal::from_samples(
//!     ElemKind::Bool,
//!     Interpolation::Constant,
//!     vec![(0.0, Value::Bool(false)), (1.0, Value::Bool(true)), (2.0, Value::Bool(true))],
//! )
//! .unwrap();
//!
//! let trace = Trace::new([("a".to_string(), a), ("b".to_string(), b)]);
//! let phi = parse_expr("a && b").unwrap();
//! let result = eval_bool_semantics(&phi, &trace).unwrap();
//! assert_eq!(result.at(2.0), AtResult::Defined(Value::Bool(true)));
//! ```
//!
//! ## Module map
//!
//! - [`value`] / [`interpolation`]: the element-type and interpolation-mode
//!   primitives every signal is built from.
//! - [`signal`]: the typed `Signal` data model (Empty / Constant / Sampled)
//!   and its arithmetic, comparison, and lattice algebra.
//! - [`ast`]: the typed STL expression tree.
//! - [`parser`]: concrete STL syntax → [`ast::Expr`].
//! - [`trace`]: named bundle of signals used for variable resolution.
//! - [`semantics`]: the Boolean and quantitative (robustness) evaluators.
//! - [`error`]: the structured error surface shared by every module.

pub mod ast;
pub mod error;
pub mod interpolation;
pub mod parser;
pub mod semantics;
pub mod signal;
pub mod trace;
pub mod value;

pub mod prelude {
    //! Convenient re-exports for common usage.
    pub use crate::ast::{
        literal_bool, literal_float, literal_int, literal_uint, var_bool, var_float, var_int,
        var_uint, CmpOp, Expr, ExprKind, Interval,
    };
    pub use crate::error::{ArgusError, ParseError, ParseErrorKind};
    pub use crate::interpolation::Interpolation;
    pub use crate::parser::parse_expr;
    pub use crate::semantics::{eval_bool_semantics, eval_robust_semantics};
    pub use crate::signal::{AtResult, Signal};
    pub use crate::trace::Trace;
    pub use crate::value::{ElemKind, Value};
}
