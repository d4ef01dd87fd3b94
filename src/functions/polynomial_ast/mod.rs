//! Univariate polynomial arithmetic and the linear equation solver.
//!
//! pdiv, prem, pgcd, solve.

mod helpers;
mod polynomial_division;
mod solve;

pub use helpers::*;
pub use polynomial_division::*;
pub use solve::*;
