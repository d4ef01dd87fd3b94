#[allow(unused_imports)]
use super::*;
use crate::CalcError;
use crate::functions::{
  datetime_ast, linear_algebra_ast, math_ast, polynomial_ast, quantity_ast,
  summation_ast,
};
use crate::settings::Settings;
use crate::syntax::Expr;

/// Apply the rules for a named function to already simplified operands.
/// Calls no rule applies to come back unevaluated.
pub fn evaluate_function_call_ast(
  name: &str,
  args: Vec<Expr>,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  match (name, args.as_slice()) {
    ("abs", [x]) => math_ast::abs_ast(x),
    ("sqrt", [x]) => math_ast::sqrt_ast(x, settings),
    ("gcd", [a, b]) => math_ast::gcd(a, b),
    ("lcm", [a, b]) => math_ast::lcm_ast(a, b),
    ("choose", [n, k]) => math_ast::choose_ast(n, k),
    ("sin" | "cos" | "tan" | "cot" | "sec" | "csc", [x]) => {
      math_ast::trig_ast(name, x, settings)
    }
    ("det", [m]) => linear_algebra_ast::det_ast(m, settings),
    ("sum", _) => summation_ast::sum_ast(&args, settings),
    ("prod", _) => summation_ast::prod_ast(&args, settings),
    ("solve", [system, unknowns]) => {
      polynomial_ast::solve(system, unknowns, settings)
    }
    ("pdiv" | "prem" | "pgcd", _) => {
      polynomial_ast::polynomial_division_ast(name, &args)
    }
    ("date", _) => datetime_ast::date_ast(&args),
    ("julian", [d]) => datetime_ast::julian_ast(d),
    ("usimplify", [e]) => quantity_ast::simplify_units(e, settings),
    ("remove_units", [e]) => quantity_ast::remove_units(e, settings),
    ("extract_units", [e]) => quantity_ast::extract_units(e, settings),
    ("convert_units", [e, new]) => {
      quantity_ast::convert_units(e, None, new, settings)
    }
    ("convert_units", [e, old, new]) => {
      quantity_ast::convert_units(e, Some(old), new, settings)
    }
    _ => Ok(Expr::call(name, args)),
  }
}
