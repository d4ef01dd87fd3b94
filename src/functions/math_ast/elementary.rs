#[allow(unused_imports)]
use super::*;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::CalcError;
use crate::number::Number;
use crate::settings::Settings;
use crate::syntax::{Expr, Op};

/// abs(x): folds numbers, drops a sign, and is idempotent.
pub fn abs_ast(x: &Expr) -> Result<Expr, CalcError> {
  match x {
    Expr::Num(n) => Ok(Expr::Num(n.abs()?)),
    Expr::Form { op: Op::Neg, args } if args.len() == 1 => {
      Ok(Expr::call("abs", vec![args[0].clone()]))
    }
    _ if x.is_call("abs") => Ok(x.clone()),
    _ => Ok(Expr::call("abs", vec![x.clone()])),
  }
}

/// Split `n` into `(k, m)` with `n = k^2 * m`, trying divisors up to a
/// small bound.
fn square_part(n: &BigInt) -> (BigInt, BigInt) {
  let mut outside = BigInt::one();
  let mut inside = n.clone();
  let mut d: u32 = 2;
  while d <= 1000 {
    let square = BigInt::from(d * d);
    if square > inside {
      break;
    }
    while (&inside % &square).is_zero() {
      inside /= &square;
      outside *= d;
    }
    d += 1;
  }
  (outside, inside)
}

/// sqrt(x): exact for perfect squares; in symbolic mode pulls square
/// factors out (`sqrt(8) = 2 * sqrt(2)`, `sqrt(1:2) = sqrt(2) / 2`).
pub fn sqrt_ast(x: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  let unevaluated = || Ok(Expr::call("sqrt", vec![x.clone()]));
  let Expr::Num(n) = x else {
    return unevaluated();
  };
  if let Some(root) = n.exact_sqrt() {
    return Ok(Expr::Num(root));
  }
  match n {
    Number::Float(_) if !n.is_negative() => {
      Ok(Expr::Num(n.sqrt(settings.precision)?))
    }
    Number::Integer(_) | Number::Fraction(_) if n.is_negative() => {
      match n.neg()?.exact_sqrt() {
        Some(root) => Ok(Expr::Num(Number::complex(Number::zero(), root)?)),
        None => unevaluated(),
      }
    }
    Number::Integer(_) | Number::Fraction(_) if settings.symbolic => {
      let Some(r) = n.to_rational() else {
        return unevaluated();
      };
      // sqrt(p/q) = sqrt(p q) / q
      let radicand = r.numer() * r.denom();
      let (outside, inside) = square_part(&radicand);
      if outside.is_one() && r.denom().is_one() {
        return unevaluated();
      }
      let coef =
        Number::from_rational(BigRational::new(outside, r.denom().clone()));
      let root = Expr::call("sqrt", vec![Expr::Num(Number::Integer(inside))]);
      Ok(Expr::times(Expr::Num(coef), root))
    }
    _ => unevaluated(),
  }
}
