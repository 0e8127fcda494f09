// <FILE>src/ast/expr.rs</FILE> - <DESC>Typed STL expression tree and its type-checked smart constructors</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Added Expr enum, ExprKind, and validated smart constructors for every operator</CLOG>

//! A single tagged `Expr` union rather than a class hierarchy (design note
//! in DESIGN.md), mirroring a `SignalSpec`-style pattern: one enum, every
//! variant validated by a smart constructor that returns `Result`, with
//! evaluation dispatching on the tag instead of a v-table.

use crate::ast::Interval;
use crate::error::ArgusError;
use crate::value::ElemKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// Whether an [`Expr`] node is Boolean-valued, or Numeric with a concrete
/// element kind (§3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind {
    Boolean,
    Numeric(ElemKind),
}

impl ExprKind {
    pub fn is_boolean(self) -> bool {
        matches!(self, ExprKind::Boolean)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ExprKind::Numeric(_))
    }
}

/// A node in the typed STL expression tree (§4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    // --- Numeric leaves and operators ---
    ConstInt(i64),
    ConstUInt(u64),
    ConstFloat(f64),
    VarNum { name: String, elem_ty: ElemKind },
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),

    // --- Boolean leaves and operators ---
    ConstBool(bool),
    VarBool(String),
    Cmp(CmpOp, Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Implies(Box<Expr>, Box<Expr>),
    Iff(Box<Expr>, Box<Expr>),
    Xor(Box<Expr>, Box<Expr>),
    Next(Box<Expr>),
    Always(Interval, Box<Expr>),
    Eventually(Interval, Box<Expr>),
    Until(Interval, Box<Expr>, Box<Expr>),
}

fn mismatch(msg: impl Into<String>) -> ArgusError {
    ArgusError::TypeMismatch(msg.into())
}

impl Expr {
    /// The kind of this node, computed recursively. Infallible: every
    /// `Expr` reachable through the smart constructors below is
    /// well-typed by construction.
    pub fn kind(&self) -> ExprKind {
        match self {
            Expr::ConstInt(_) => ExprKind::Numeric(ElemKind::Int),
            Expr::ConstUInt(_) => ExprKind::Numeric(ElemKind::UInt),
            Expr::ConstFloat(_) => ExprKind::Numeric(ElemKind::Float),
            Expr::VarNum { elem_ty, .. } => ExprKind::Numeric(*elem_ty),
            Expr::Neg(e) => e.kind(),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                let (ka, kb) = (numeric_kind(a), numeric_kind(b));
                ExprKind::Numeric(crate::value::promote(ka, kb))
            }
            Expr::ConstBool(_)
            | Expr::VarBool(_)
            | Expr::Cmp(..)
            | Expr::Not(_)
            | Expr::And(_)
            | Expr::Or(_)
            | Expr::Implies(..)
            | Expr::Iff(..)
            | Expr::Xor(..)
            | Expr::Next(_)
            | Expr::Always(..)
            | Expr::Eventually(..)
            | Expr::Until(..) => ExprKind::Boolean,
        }
    }

    fn require_numeric(&self) -> Result<ElemKind, ArgusError> {
        match self.kind() {
            ExprKind::Numeric(k) => Ok(k),
            ExprKind::Boolean => Err(mismatch("expected a numeric expression, found Boolean")),
        }
    }

    fn require_boolean(&self) -> Result<(), ArgusError> {
        match self.kind() {
            ExprKind::Boolean => Ok(()),
            ExprKind::Numeric(k) => Err(mismatch(format!(
                "expected a Boolean expression, found numeric ({k})"
            ))),
        }
    }

    /// Checked entry point for the semantics engine (§4.5): a formula
    /// handed to `eval_bool_semantics`/`eval_robust_semantics` must itself
    /// be Boolean-kinded, since robustness and satisfaction are only
    /// defined for Boolean-valued formulas.
    pub fn require_top_level_boolean(&self) -> Result<(), ArgusError> {
        self.require_boolean()
    }
}

fn numeric_kind(e: &Expr) -> ElemKind {
    match e.kind() {
        ExprKind::Numeric(k) => k,
        ExprKind::Boolean => unreachable!("numeric operator constructed with a Boolean child"),
    }
}

macro_rules! numeric_binop {
    ($name:ident, $variant:ident) => {
        pub fn $name(a: Expr, b: Expr) -> Result<Expr, ArgusError> {
            a.require_numeric()?;
            b.require_numeric()?;
            Ok(Expr::$variant(Box::new(a), Box::new(b)))
        }
    };
}

numeric_binop!(add, Add);
numeric_binop!(sub, Sub);
numeric_binop!(mul, Mul);
numeric_binop!(div, Div);

pub fn neg(a: Expr) -> Result<Expr, ArgusError> {
    a.require_numeric()?;
    Ok(Expr::Neg(Box::new(a)))
}

pub fn cmp(op: CmpOp, a: Expr, b: Expr) -> Result<Expr, ArgusError> {
    a.require_numeric()?;
    b.require_numeric()?;
    Ok(Expr::Cmp(op, Box::new(a), Box::new(b)))
}

pub fn not(phi: Expr) -> Result<Expr, ArgusError> {
    phi.require_boolean()?;
    Ok(Expr::Not(Box::new(phi)))
}

/// n-ary conjunction; requires at least 2 Boolean operands (§4.3).
pub fn and(operands: Vec<Expr>) -> Result<Expr, ArgusError> {
    if operands.len() < 2 {
        return Err(mismatch("And requires at least 2 operands"));
    }
    for phi in &operands {
        phi.require_boolean()?;
    }
    Ok(Expr::And(operands))
}

pub fn or(operands: Vec<Expr>) -> Result<Expr, ArgusError> {
    if operands.len() < 2 {
        return Err(mismatch("Or requires at least 2 operands"));
    }
    for phi in &operands {
        phi.require_boolean()?;
    }
    Ok(Expr::Or(operands))
}

macro_rules! boolean_binop {
    ($name:ident, $variant:ident) => {
        pub fn $name(phi: Expr, psi: Expr) -> Result<Expr, ArgusError> {
            phi.require_boolean()?;
            psi.require_boolean()?;
            Ok(Expr::$variant(Box::new(phi), Box::new(psi)))
        }
    };
}

boolean_binop!(implies, Implies);
boolean_binop!(iff, Iff);
boolean_binop!(xor, Xor);

pub fn next(phi: Expr) -> Result<Expr, ArgusError> {
    phi.require_boolean()?;
    Ok(Expr::Next(Box::new(phi)))
}

pub fn always(interval: Interval, phi: Expr) -> Result<Expr, ArgusError> {
    phi.require_boolean()?;
    Ok(Expr::Always(interval, Box::new(phi)))
}

pub fn eventually(interval: Interval, phi: Expr) -> Result<Expr, ArgusError> {
    phi.require_boolean()?;
    Ok(Expr::Eventually(interval, Box::new(phi)))
}

pub fn until(interval: Interval, phi: Expr, psi: Expr) -> Result<Expr, ArgusError> {
    phi.require_boolean()?;
    psi.require_boolean()?;
    Ok(Expr::Until(interval, Box::new(phi), Box::new(psi)))
}

// --- Convenience literal / variable constructors (supplemented from
// original_source/pyargus's `declare_var`/`literal` free functions) ---

pub fn literal_bool(b: bool) -> Expr {
    Expr::ConstBool(b)
}

pub fn literal_int(i: i64) -> Expr {
    Expr::ConstInt(i)
}

pub fn literal_uint(u: u64) -> Expr {
    Expr::ConstUInt(u)
}

pub fn literal_float(f: f64) -> Expr {
    Expr::ConstFloat(f)
}

pub fn var_bool(name: impl Into<String>) -> Expr {
    Expr::VarBool(name.into())
}

pub fn var_int(name: impl Into<String>) -> Expr {
    Expr::VarNum {
        name: name.into(),
        elem_ty: ElemKind::Int,
    }
}

pub fn var_uint(name: impl Into<String>) -> Expr {
    Expr::VarNum {
        name: name.into(),
        elem_ty: ElemKind::UInt,
    }
}

pub fn var_float(name: impl Into<String>) -> Expr {
    Expr::VarNum {
        name: name.into(),
        elem_ty: ElemKind::Float,
    }
}
