// <FILE>src/error.rs</FILE> - <DESC>Structured error surface for signals, the AST, and the parser</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added ArgusError and ParseError enums covering every documented error kind</CLOG>

//! Structured error kinds for every fallible operation in the crate.
//!
//! Follows the hand-written `Display`/`Error` pattern the rest of this
//! corpus uses (see `SignalBuildError` in the signal-spec module this crate
//! grew out of) rather than pulling in a derive-macro error crate: every
//! variant here is simple enough that a manual `impl fmt::Display` is no
//! more code than a derive would be, and it keeps the dependency list small.

use std::fmt;

/// Everything that can go wrong while building, pushing to, or evaluating
/// signals and formulas.
///
/// `Domain` is the one variant that evaluation code is not expected to
/// propagate as an `Err` on its own — per the monitoring semantics, a query
/// outside a signal's domain resolves to [`crate::signal::AtResult::Undefined`]
/// at that time index, not a thrown error. It exists as a variant so APIs
/// that *do* need to fail loudly (e.g. a caller asking for a single point
/// that must exist) have something to return.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgusError {
    /// Construction or `push` supplied a time that does not strictly
    /// increase the signal's existing sample times.
    Monotonicity {
        /// The offending time.
        at: f64,
        /// The time it was required to exceed (the signal's current
        /// `end_time`, or the previous sample in a batch).
        must_exceed: f64,
    },
    /// `push` was called on an `Empty` or `Constant` signal.
    NonSampledPush,
    /// Integer arithmetic failed: division by zero or overflow on a
    /// non-`Float` result.
    Arithmetic(String),
    /// An AST node, signal, or variable was used somewhere its element
    /// kind does not permit.
    TypeMismatch(String),
    /// A trace lookup named a variable the trace does not contain.
    UnknownVariable(String),
    /// Lexing, parsing, or interval construction failed.
    Parse(ParseError),
    /// A query fell outside the domain an evaluation could satisfy.
    Domain(String),
}

impl fmt::Display for ArgusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgusError::Monotonicity { at, must_exceed } => write!(
                f,
                "non-monotone sample time: {at} does not exceed {must_exceed}"
            ),
            ArgusError::NonSampledPush => {
                write!(f, "cannot push a sample onto an Empty or Constant signal")
            }
            ArgusError::Arithmetic(msg) => write!(f, "arithmetic error: {msg}"),
            ArgusError::TypeMismatch(msg) => write!(f, "type mismatch: {msg}"),
            ArgusError::UnknownVariable(name) => write!(f, "unknown variable `{name}`"),
            ArgusError::Parse(err) => write!(f, "{err}"),
            ArgusError::Domain(msg) => write!(f, "domain error: {msg}"),
        }
    }
}

impl std::error::Error for ArgusError {}

impl From<ParseError> for ArgusError {
    fn from(err: ParseError) -> Self {
        ArgusError::Parse(err)
    }
}

/// A parse failure with the byte span in the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// `[start, end)` byte offsets into the source string.
    pub span: (usize, usize),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: (usize, usize)) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}..{}: {}",
            self.span.0, self.span.1, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// A lexical or grammatical error, with a human-readable description.
    Syntax(String),
    /// An integer literal did not fit in a signed 64-bit value.
    ParseIntOverflow,
    /// A construct the grammar does not support (reserved for forward
    /// compatibility; the current grammar does not leave any gaps but every
    /// parser frontend in this corpus keeps the hook for new syntax).
    UnsupportedConstruct(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Syntax(msg) => write!(f, "syntax error: {msg}"),
            ParseErrorKind::ParseIntOverflow => {
                write!(f, "integer literal overflows a signed 64-bit value")
            }
            ParseErrorKind::UnsupportedConstruct(what) => {
                write!(f, "unsupported construct: {what}")
            }
        }
    }
}
