// <FILE>src/ast/mod.rs</FILE> - <DESC>Typed STL expression tree module</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Wired up expr and interval submodules</CLOG>

mod expr;
mod interval;

pub use expr::{
    add, always, and, cmp, div, eventually, iff, implies, literal_bool, literal_float,
    literal_int, literal_uint, mul, neg, next, not, or, sub, until, var_bool, var_float, var_int,
    var_uint, xor, CmpOp, Expr, ExprKind,
};
pub use interval::Interval;
