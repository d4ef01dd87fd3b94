#[allow(unused_imports)]
use super::*;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::CalcError;
use crate::number::Number;
use crate::syntax::{Expr, Op};

pub fn bigint_gcd(a: &BigInt, b: &BigInt) -> BigInt {
  a.gcd(b)
}

pub fn bigint_lcm(a: &BigInt, b: &BigInt) -> BigInt {
  if a.is_zero() || b.is_zero() {
    BigInt::zero()
  } else {
    a.lcm(b)
  }
}

/// Integer value of an exact integer or an integral float.
fn integer_value(expr: &Expr) -> Option<BigInt> {
  match expr.as_number()? {
    Number::Integer(n) => Some(n.clone()),
    Number::Float(f) => {
      let r = f.to_rational();
      r.is_integer().then(|| r.to_integer())
    }
    _ => None,
  }
}

fn exact_rational(expr: &Expr) -> Option<BigRational> {
  match expr.as_number()? {
    n @ (Number::Integer(_) | Number::Fraction(_)) => n.to_rational(),
    _ => None,
  }
}

/// Negative numbers, negations, and products or quotients led by one.
pub fn looks_negative(expr: &Expr) -> bool {
  match expr {
    Expr::Num(n) => n.is_negative(),
    Expr::Form { op: Op::Neg, .. } => true,
    Expr::Form {
      op: Op::Mul | Op::Div,
      args,
    } => args.first().is_some_and(looks_negative),
    _ => false,
  }
}

/// Negate by flipping the leading sign rather than wrapping in `neg`.
pub fn flip_sign(expr: &Expr) -> Result<Expr, CalcError> {
  match expr {
    Expr::Num(n) => Ok(Expr::Num(n.neg()?)),
    Expr::Form { op: Op::Neg, args } if args.len() == 1 => Ok(args[0].clone()),
    Expr::Form {
      op: op @ (Op::Mul | Op::Div),
      args,
    } if args.len() == 2 => Ok(Expr::Form {
      op: op.clone(),
      args: vec![flip_sign(&args[0])?, args[1].clone()],
    }),
    _ => Ok(Expr::negate(expr.clone())),
  }
}

/// gcd(a, b). Integers give the nonnegative gcd, `gcd(0, x)` is `abs(x)`
/// for any x, and rationals give `gcd(numerators) / lcm(denominators)`.
pub fn gcd(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  if let (Some(x), Some(y)) = (integer_value(a), integer_value(b)) {
    return Ok(Expr::Num(Number::Integer(bigint_gcd(&x, &y))));
  }
  if looks_negative(a) {
    return gcd(&flip_sign(a)?, b);
  }
  if looks_negative(b) {
    return gcd(a, &flip_sign(b)?);
  }
  if a.is_zero() {
    return abs_ast(b);
  }
  if b.is_zero() {
    return abs_ast(a);
  }
  if let (Some(x), Some(y)) = (exact_rational(a), exact_rational(b)) {
    let numer = bigint_gcd(x.numer(), y.numer());
    let denom = bigint_lcm(x.denom(), y.denom());
    return Ok(Expr::Num(Number::fraction(numer, denom)?));
  }
  Ok(Expr::call("gcd", vec![a.clone(), b.clone()]))
}

pub fn lcm_ast(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  if let (Some(x), Some(y)) = (integer_value(a), integer_value(b)) {
    return Ok(Expr::Num(Number::Integer(bigint_lcm(&x, &y).abs())));
  }
  if let (Some(x), Some(y)) = (exact_rational(a), exact_rational(b)) {
    let numer = bigint_lcm(x.numer(), y.numer()).abs();
    let denom = bigint_gcd(x.denom(), y.denom());
    return Ok(Expr::Num(Number::fraction(numer, denom)?));
  }
  Ok(Expr::call("lcm", vec![a.clone(), b.clone()]))
}

// ─── Binomial coefficients ──────────────────────────────────────────────────

fn nonnegative_binomial(n: &BigInt, k: &BigInt) -> BigInt {
  let k = std::cmp::min(k.clone(), n - k);
  let mut result = BigInt::one();
  let mut i = BigInt::zero();
  while i < k {
    result = result * (n - &i) / (&i + BigInt::one());
    i += BigInt::one();
  }
  result
}

fn sign_of_parity(e: &BigInt) -> BigInt {
  if e.is_odd() { BigInt::from(-1) } else { BigInt::one() }
}

/// Binomial coefficient for all integers, following Kronenburg for
/// negative `n`.
pub fn binomial_coeff(n: &BigInt, k: &BigInt) -> BigInt {
  if !n.is_negative() {
    if k.is_negative() || k > n {
      BigInt::zero()
    } else {
      nonnegative_binomial(n, k)
    }
  } else if !k.is_negative() {
    sign_of_parity(k) * nonnegative_binomial(&(k - n - BigInt::one()), k)
  } else if k <= n {
    let d = n - k;
    sign_of_parity(&d) * nonnegative_binomial(&(-k - BigInt::one()), &d)
  } else {
    BigInt::zero()
  }
}

/// `n (n - 1) ... (n - k + 1) / k!` over the numeric tower.
fn falling_binomial(n: &Number, k: &BigInt) -> Result<Number, CalcError> {
  let steps = k.to_u64().ok_or_else(|| {
    CalcError::UnsupportedArguments(format!("choose with k = {k}"))
  })?;
  let mut result = Number::one();
  let mut factor = n.clone();
  for i in 1..=steps {
    result = result.mul(&factor)?.div(&Number::from(i as i64))?;
    factor = factor.sub(&Number::one())?;
  }
  Ok(result)
}

/// Generalized binomial coefficient.
pub fn choose(n: &Number, k: &Number) -> Result<Number, CalcError> {
  for arg in [n, k] {
    if arg.is_date() {
      return Err(CalcError::NotConverted(arg.to_string()));
    }
  }
  match (n, k) {
    (Number::Integer(n), Number::Integer(k)) => {
      Ok(Number::Integer(binomial_coeff(n, k)))
    }
    (Number::Fraction(_) | Number::Float(_), Number::Integer(k))
      if !k.is_negative() =>
    {
      falling_binomial(n, k)
    }
    _ => Err(CalcError::UnsupportedArguments(format!("choose({n}, {k})"))),
  }
}

pub fn choose_ast(n: &Expr, k: &Expr) -> Result<Expr, CalcError> {
  match (n, k) {
    (Expr::Num(n), Expr::Num(k)) => Ok(Expr::Num(choose(n, k)?)),
    _ => Ok(Expr::call("choose", vec![n.clone(), k.clone()])),
  }
}
