// Functions are organized by categories
pub mod datetime_ast;
pub mod linear_algebra_ast;
pub mod math_ast;
pub mod polynomial_ast;
pub mod quantity_ast;
pub mod summation_ast;
