#[allow(unused_imports)]
use super::*;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::CalcError;
use crate::evaluator::{Term, neg_expr};
use crate::number::{Float, Number, not_converted};
use crate::settings::{AngleMode, Settings};
use crate::syntax::Expr;

pub fn is_trig(name: &str) -> bool {
  matches!(name, "sin" | "cos" | "tan" | "cot" | "sec" | "csc")
}

fn odd_function(name: &str) -> bool {
  matches!(name, "sin" | "tan" | "cot" | "csc")
}

// ─── Exact values on the 15° lattice ────────────────────────────────────────

fn sqrt_of(n: i64) -> Expr {
  Expr::call("sqrt", vec![Expr::int(n)])
}

/// sin(r * 15°) for r in 0..=6.
fn sine_table(r: usize) -> Expr {
  match r {
    0 => Expr::int(0),
    1 => Expr::divide(Expr::minus(sqrt_of(6), sqrt_of(2)), Expr::int(4)),
    2 => Expr::Num(Number::from_rational(BigRational::new(
      BigInt::from(1),
      BigInt::from(2),
    ))),
    3 => Expr::divide(sqrt_of(2), Expr::int(2)),
    4 => Expr::divide(sqrt_of(3), Expr::int(2)),
    5 => Expr::divide(Expr::plus(sqrt_of(6), sqrt_of(2)), Expr::int(4)),
    _ => Expr::int(1),
  }
}

/// tan(r * 15°) for r in 0..=6; undefined at 90°.
fn tangent_table(r: usize) -> Option<Expr> {
  Some(match r {
    0 => Expr::int(0),
    1 => Expr::minus(Expr::int(2), sqrt_of(3)),
    2 => Expr::divide(sqrt_of(3), Expr::int(3)),
    3 => Expr::int(1),
    4 => sqrt_of(3),
    5 => Expr::plus(Expr::int(2), sqrt_of(3)),
    _ => return None,
  })
}

/// csc(r * 15°) for r in 0..=6; undefined at 0°.
fn cosecant_table(r: usize) -> Option<Expr> {
  Some(match r {
    0 => return None,
    1 => Expr::plus(sqrt_of(6), sqrt_of(2)),
    2 => Expr::int(2),
    3 => sqrt_of(2),
    4 => Expr::divide(Expr::times(Expr::int(2), sqrt_of(3)), Expr::int(3)),
    5 => Expr::minus(sqrt_of(6), sqrt_of(2)),
    _ => Expr::int(1),
  })
}

/// sin(k * 15°) as `(sign, reference index)`.
fn sine_reference(k: i64) -> (i64, usize) {
  let k = k.rem_euclid(24);
  let (sign, r) = match k {
    0..=6 => (1, k),
    7..=12 => (1, 12 - k),
    13..=18 => (-1, k - 12),
    _ => (-1, 24 - k),
  };
  (sign, r as usize)
}

fn lattice_value(name: &str, k: i64) -> Result<Option<Expr>, CalcError> {
  let (s_sign, s_ref) = sine_reference(k);
  let (c_sign, c_ref) = sine_reference(k + 6);
  let (sign, value) = match name {
    "sin" => (s_sign, Some(sine_table(s_ref))),
    "cos" => (c_sign, Some(sine_table(c_ref))),
    "tan" => (s_sign * c_sign, tangent_table(s_ref)),
    "cot" => (s_sign * c_sign, tangent_table(c_ref)),
    "csc" => (s_sign, cosecant_table(s_ref)),
    "sec" => (c_sign, cosecant_table(c_ref)),
    _ => (1, None),
  };
  match value {
    Some(v) if sign < 0 && !v.is_zero() => Ok(Some(neg_expr(&v)?)),
    other => Ok(other),
  }
}

// ─── Angle recognition ──────────────────────────────────────────────────────

enum Angle {
  Degrees(Number),
  Radians(Number),
  /// A number with no unit tag, read in the ambient angle mode.
  Bare(Number),
}

fn is_unit_power(factor: &(Expr, BigInt), name: &str) -> bool {
  factor.0.is_symbol(name) && factor.1 == BigInt::from(1)
}

fn angle_of(term: &Term) -> Option<Angle> {
  let coef = term.coef.clone();
  match term.factors.as_slice() {
    [] => Some(Angle::Bare(coef)),
    [f] if is_unit_power(f, "deg") => Some(Angle::Degrees(coef)),
    [f] if is_unit_power(f, "rad") => Some(Angle::Radians(coef)),
    _ => None,
  }
}

/// The angle as a multiple of π, when it is an exact rational one.
fn pi_multiple(term: &Term, settings: &Settings) -> Option<BigRational> {
  let coef = match &term.coef {
    n @ (Number::Integer(_) | Number::Fraction(_)) => n.to_rational()?,
    _ => return None,
  };
  let degrees = coef.clone() / BigInt::from(180);
  match term.factors.as_slice() {
    [] if settings.angle_mode == AngleMode::Degrees => Some(degrees),
    [] if coef.is_zero() => Some(coef),
    [f] if is_unit_power(f, "deg") => Some(degrees),
    [f] if is_unit_power(f, "pi") => {
      (settings.angle_mode == AngleMode::Radians).then_some(coef)
    }
    [f, g] if is_unit_power(f, "pi") && is_unit_power(g, "rad") => Some(coef),
    [f, g] if is_unit_power(f, "rad") && is_unit_power(g, "pi") => Some(coef),
    _ => None,
  }
}

/// Exact value of a trig function on the 15° lattice, or `None`.
fn exact_trig(
  name: &str,
  x: &Expr,
  settings: &Settings,
) -> Result<Option<Expr>, CalcError> {
  let term = Term::of(x)?;
  let Some(turns) = pi_multiple(&term, settings) else {
    return Ok(None);
  };
  let steps = turns * BigInt::from(12);
  if !steps.is_integer() {
    return Ok(None);
  }
  let k = steps.to_integer().mod_floor(&BigInt::from(24));
  match k.to_i64() {
    Some(k) => lattice_value(name, k),
    None => Ok(None),
  }
}

/// Symbolic trig rewrite. Outside symbolic mode the call is left alone.
pub fn trig_ast(
  name: &str,
  x: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let unevaluated = || Ok(Expr::call(name, vec![x.clone()]));
  if !settings.symbolic {
    return unevaluated();
  }
  if let Some(value) = exact_trig(name, x, settings)? {
    return Ok(value);
  }
  if !matches!(x, Expr::Num(_)) && looks_negative(x) {
    let inner = Expr::call(name, vec![flip_sign(x)?]);
    return Ok(if odd_function(name) {
      Expr::negate(inner)
    } else {
      inner
    });
  }
  unevaluated()
}

fn snap(v: f64) -> f64 {
  if v.abs() < 1e-14 { 0.0 } else { v }
}

/// Float value of a trig function of a numeric angle, `None` when the
/// operand is not a numeric angle or the function is undefined there.
pub fn trig_numeric(
  name: &str,
  x: &Expr,
  settings: &Settings,
) -> Result<Option<Number>, CalcError> {
  if let Expr::Num(n @ Number::Date(_)) = x {
    return Err(not_converted(n));
  }
  let Some(angle) = angle_of(&Term::of(x)?) else {
    return Ok(None);
  };
  let (value, in_degrees) = match angle {
    Angle::Degrees(n) => (n, true),
    Angle::Radians(n) => (n, false),
    Angle::Bare(n) => (n, settings.angle_mode == AngleMode::Degrees),
  };
  let Some(mut radians) = value.to_f64() else {
    return Ok(None);
  };
  if in_degrees {
    radians = radians.to_radians();
  }
  let (s, c) = (snap(radians.sin()), snap(radians.cos()));
  let result = match name {
    "sin" => Some(s),
    "cos" => Some(c),
    "tan" => (c != 0.0).then(|| s / c),
    "cot" => (s != 0.0).then(|| c / s),
    "sec" => (c != 0.0).then(|| 1.0 / c),
    "csc" => (s != 0.0).then(|| 1.0 / s),
    _ => None,
  };
  Ok(
    result
      .and_then(|v| Float::from_f64(v, settings.precision))
      .map(Number::Float),
  )
}
