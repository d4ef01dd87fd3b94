#[allow(unused_imports)]
use super::*;
use crate::CalcError;
use crate::functions::math_ast::{is_trig, trig_numeric};
use crate::number::{Float, Number};
use crate::settings::Settings;
use crate::syntax::{Expr, Op};

const PI_DIGITS: &str = "314159265358979323846264338327950288419716939937510";
const E_DIGITS: &str = "271828182845904523536028747135266249775724709369995";

fn constant(digits: &str, precision: u32) -> Option<Number> {
  let mantissa = digits.parse().ok()?;
  let exponent = 1 - digits.len() as i64;
  Some(Number::Float(Float::new(mantissa, exponent).round_to(precision)))
}

/// Float value of a named constant (`pi`, `e`).
pub fn constant_value(name: &str, precision: u32) -> Option<Number> {
  match name {
    "pi" => constant(PI_DIGITS, precision),
    "e" => constant(E_DIGITS, precision),
    _ => None,
  }
}

/// Evaluate to floats wherever possible.
///
/// Bare trig operands are read in the ambient angle mode; operands tagged
/// with `deg` or `rad` are read in their own unit.
pub fn evaluate_numeric(
  expr: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let simplified = simplify(expr, settings)?;
  let evaluated = numeric_pass(&simplified, settings)?;
  simplify(&evaluated, settings)
}

fn numeric_pass(expr: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  match expr {
    Expr::Num(n) if n.is_date() => Ok(expr.clone()),
    Expr::Num(n) => Ok(Expr::Num(n.approximate(settings.precision)?)),
    Expr::Var(s) => Ok(
      constant_value(s.name(), settings.precision)
        .map(Expr::Num)
        .unwrap_or_else(|| expr.clone()),
    ),
    Expr::Form { op, args } => {
      let args = args
        .iter()
        .map(|a| numeric_pass(a, settings))
        .collect::<Result<Vec<_>, _>>()?;
      numeric_fold(op, args, settings)
    }
  }
}

fn numeric_fold(
  op: &Op,
  args: Vec<Expr>,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  if let Op::Call(name) = op {
    let value = match (name.as_str(), args.as_slice()) {
      (name, [arg]) if is_trig(name) => trig_numeric(name, arg, settings)?,
      ("sqrt", [Expr::Num(n)]) if !n.is_date() => {
        Some(n.sqrt(settings.precision)?)
      }
      ("abs", [Expr::Num(n)]) => Some(n.abs()?),
      _ => None,
    };
    if let Some(n) = value {
      return Ok(Expr::Num(n));
    }
  }
  Ok(Expr::Form {
    op: op.clone(),
    args,
  })
}
