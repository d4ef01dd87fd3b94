//! AST-native math functions: elementary functions, number theory,
//! combinatorics, trigonometry and number formatting.

mod digits;
mod elementary;
mod number_theory;
mod trigonometric;

pub use digits::*;
pub use elementary::*;
pub use number_theory::*;
pub use trigonometric::*;
