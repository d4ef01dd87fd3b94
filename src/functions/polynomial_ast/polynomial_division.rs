#[allow(unused_imports)]
use super::*;
use tracing::debug;

use crate::CalcError;
use crate::syntax::{Expr, Symbol};

/// Quotient and remainder of a univariate polynomial division.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyDivision {
  pub quotient: Expr,
  pub remainder: Expr,
}

impl PolyDivision {
  /// The two log lines a division records, `pdiv <q>` then `prem <r>`.
  pub fn log_text(&self) -> String {
    format!("pdiv {}\nprem {}\n", self.quotient, self.remainder)
  }
}

/// The one free symbol of the operands (`x` when there is none).
fn division_variable(
  operands: &[&Expr],
  var: Option<&Symbol>,
) -> Result<Symbol, CalcError> {
  if let Some(var) = var {
    return Ok(var.clone());
  }
  let mut symbols: Vec<Symbol> = Vec::new();
  for operand in operands {
    for s in operand.free_symbols() {
      if !symbols.contains(&s) {
        symbols.push(s);
      }
    }
  }
  match symbols.len() {
    0 => Ok(Symbol::new("x")),
    1 => Ok(symbols.remove(0)),
    _ => Err(CalcError::Malformed(format!(
      "ambiguous variable among {}",
      symbols
        .iter()
        .map(Symbol::name)
        .collect::<Vec<_>>()
        .join(", ")
    ))),
  }
}

/// Divide `dividend` by `divisor` as polynomials in `var`, inferred when
/// not given.
pub fn poly_div(
  dividend: &Expr,
  divisor: &Expr,
  var: Option<&Symbol>,
) -> Result<PolyDivision, CalcError> {
  let var = division_variable(&[dividend, divisor], var)?;
  let a = Poly::from_expr(dividend, &var)?;
  let b = Poly::from_expr(divisor, &var)?;
  let (q, r) = a.div_rem(&b)?;
  let division = PolyDivision {
    quotient: q.to_expr(&var)?,
    remainder: r.to_expr(&var)?,
  };
  debug!(
    target: "polynomial",
    quotient = %division.quotient,
    remainder = %division.remainder,
    "divided"
  );
  Ok(division)
}

/// Monic gcd of two polynomials in `var`.
pub fn poly_gcd(
  a: &Expr,
  b: &Expr,
  var: Option<&Symbol>,
) -> Result<Expr, CalcError> {
  let var = division_variable(&[a, b], var)?;
  let g = Poly::from_expr(a, &var)?.gcd(&Poly::from_expr(b, &var)?)?;
  g.to_expr(&var)
}

/// pdiv(a, b[, x]), prem(a, b[, x]) and pgcd(a, b[, x]).
pub fn polynomial_division_ast(
  name: &str,
  args: &[Expr],
) -> Result<Expr, CalcError> {
  let unevaluated = || Ok(Expr::call(name, args.to_vec()));
  let (a, b, var) = match args {
    [a, b] => (a, b, None),
    [a, b, Expr::Var(x)] => (a, b, Some(x)),
    [_, _, other] => {
      return Err(CalcError::Malformed(format!(
        "{name}: {other} is not a variable"
      )));
    }
    _ => return unevaluated(),
  };
  let result = match name {
    "pgcd" => poly_gcd(a, b, var),
    "prem" => poly_div(a, b, var).map(|d| d.remainder),
    _ => poly_div(a, b, var).map(|d| d.quotient),
  };
  match result {
    Err(CalcError::NotPolynomial(_)) => unevaluated(),
    other => other,
  }
}
