//! Simplification and numeric evaluation of expression trees.

mod binary_ops;
mod collect;
mod core_eval;
mod dispatch;
mod numeric_eval;
mod substitute;

pub use binary_ops::*;
pub use collect::*;
pub use core_eval::*;
pub use dispatch::*;
pub use numeric_eval::*;
pub use substitute::*;
