// <FILE>src/signal/mod.rs</FILE> - <DESC>Typed signal data model and its algebra</DESC>
// <VERS>VERSION: 1.0.0</VERS>
// <WCTX>Initial monitor core</WCTX>
// <CLOG>Wired up core and algebra submodules</CLOG>

mod algebra;
mod core;

pub use algebra::{add, compare, div, eq, fold2, ge, gt, le, lt, map, max, min, mul, ne, neg, sub};
pub use core::{AtResult, Signal};
