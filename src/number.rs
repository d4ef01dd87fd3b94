//! The numeric tower.
//!
//! Exact integers and fractions, decimal floats (`mantissa * 10^exponent`),
//! complex numbers and calendar dates. Representations are never converted
//! implicitly: an exact `10` and the float `1e1` are different values
//! structurally and only compare equal through [`Number::num_eq`].

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::CalcError;
use crate::functions::datetime_ast::checked_day;

/// Significant decimal digits kept by float arithmetic.
pub const DEFAULT_PRECISION: u32 = 12;

pub(crate) fn pow10(n: u64) -> BigInt {
  num_traits::pow(BigInt::from(10), n as usize)
}

fn digit_count(n: &BigInt) -> u64 {
  n.magnitude().to_str_radix(10).len() as u64
}

// ─── Float ──────────────────────────────────────────────────────────────────

/// A decimal floating-point value `mantissa * 10^exponent`.
///
/// The mantissa never carries trailing zeros and zero is always `(0, 0)`,
/// so two floats denoting the same value are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Float {
  mantissa: BigInt,
  exponent: i64,
}

impl Float {
  pub fn new(mantissa: BigInt, exponent: i64) -> Self {
    if mantissa.is_zero() {
      return Float {
        mantissa,
        exponent: 0,
      };
    }
    let ten = BigInt::from(10);
    let mut mantissa = mantissa;
    let mut exponent = exponent;
    loop {
      let (q, r) = mantissa.div_rem(&ten);
      if !r.is_zero() {
        break;
      }
      mantissa = q;
      exponent += 1;
    }
    Float { mantissa, exponent }
  }

  pub fn mantissa(&self) -> &BigInt {
    &self.mantissa
  }

  pub fn exponent(&self) -> i64 {
    self.exponent
  }

  pub fn is_zero(&self) -> bool {
    self.mantissa.is_zero()
  }

  pub fn is_negative(&self) -> bool {
    self.mantissa.is_negative()
  }

  /// Round half away from zero to `precision` significant digits.
  pub fn round_to(&self, precision: u32) -> Float {
    let digits = digit_count(&self.mantissa);
    let precision = u64::from(precision.max(1));
    if digits <= precision {
      return self.clone();
    }
    let drop = digits - precision;
    let divisor = pow10(drop);
    let (q, r) = self.mantissa.abs().div_rem(&divisor);
    let q = if r * 2 >= divisor { q + 1 } else { q };
    let q = if self.mantissa.is_negative() { -q } else { q };
    Float::new(q, self.exponent + drop as i64)
  }

  /// Exact value; decimal floats are always representable as rationals.
  pub fn to_rational(&self) -> BigRational {
    if self.exponent >= 0 {
      BigRational::from_integer(&self.mantissa * pow10(self.exponent as u64))
    } else {
      BigRational::new(
        self.mantissa.clone(),
        pow10(self.exponent.unsigned_abs()),
      )
    }
  }

  pub fn from_rational(value: &BigRational, precision: u32) -> Float {
    if value.is_zero() {
      return Float::new(BigInt::zero(), 0);
    }
    let numer = value.numer().abs();
    let denom = value.denom().clone();
    // One guard digit beyond the target; truncating then rounding half-up
    // gives the same digits as rounding the exact quotient.
    let shift = i64::from(precision) + 1
      - (digit_count(&numer) as i64 - digit_count(&denom) as i64);
    let q = if shift >= 0 {
      (numer * pow10(shift as u64)) / denom
    } else {
      numer / (denom * pow10(shift.unsigned_abs()))
    };
    let q = if value.is_negative() { -q } else { q };
    Float::new(q, -shift).round_to(precision)
  }

  pub fn from_f64(value: f64, precision: u32) -> Option<Float> {
    if !value.is_finite() {
      return None;
    }
    let digits = precision.clamp(1, 17) as usize;
    let text = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = text.split_once('e')?;
    let exponent: i64 = exponent.parse().ok()?;
    let fraction_digits =
      mantissa.split_once('.').map_or(0, |(_, f)| f.len()) as i64;
    let mantissa: BigInt = mantissa.replace('.', "").parse().ok()?;
    Some(Float::new(mantissa, exponent - fraction_digits))
  }

  pub fn to_f64(&self) -> f64 {
    format!("{}e{}", self.mantissa, self.exponent)
      .parse()
      .unwrap_or(f64::NAN)
  }

  pub fn sqrt(&self, precision: u32) -> Option<Float> {
    if self.is_negative() {
      return None;
    }
    if self.is_zero() {
      return Some(self.clone());
    }
    let wanted = 2 * (u64::from(precision) + 2);
    let mut extra = wanted.saturating_sub(digit_count(&self.mantissa)) as i64;
    if (self.exponent - extra).rem_euclid(2) != 0 {
      extra += 1;
    }
    let mantissa = &self.mantissa * pow10(extra as u64);
    let exponent = self.exponent - extra;
    Some(Float::new(mantissa.sqrt(), exponent / 2).round_to(precision))
  }
}

// ─── Number ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
  Integer(BigInt),
  /// Always reduced, denominator > 1.
  Fraction(BigRational),
  Float(Float),
  /// Real and imaginary parts; the imaginary part is never an exact zero.
  Complex(Box<Number>, Box<Number>),
  /// Absolute day number: day 1 is 0001-01-01 in the Gregorian calendar.
  Date(i64),
}

impl From<i64> for Number {
  fn from(n: i64) -> Self {
    Number::Integer(BigInt::from(n))
  }
}

impl From<BigInt> for Number {
  fn from(n: BigInt) -> Self {
    Number::Integer(n)
  }
}

impl From<Float> for Number {
  fn from(f: Float) -> Self {
    Number::Float(f)
  }
}

pub(crate) fn not_converted(n: &Number) -> CalcError {
  CalcError::NotConverted(n.to_string())
}

impl Number {
  pub fn fraction(
    numer: impl Into<BigInt>,
    denom: impl Into<BigInt>,
  ) -> Result<Number, CalcError> {
    let denom = denom.into();
    if denom.is_zero() {
      return Err(CalcError::DivisionByZero);
    }
    Ok(Number::from_rational(BigRational::new(numer.into(), denom)))
  }

  pub fn from_rational(value: BigRational) -> Number {
    if value.is_integer() {
      Number::Integer(value.to_integer())
    } else {
      Number::Fraction(value)
    }
  }

  pub fn float(mantissa: impl Into<BigInt>, exponent: i64) -> Number {
    Number::Float(Float::new(mantissa.into(), exponent))
  }

  pub fn complex(re: Number, im: Number) -> Result<Number, CalcError> {
    for part in [&re, &im] {
      if !part.is_real() {
        return Err(not_converted(part));
      }
    }
    if im.is_exact_zero() {
      Ok(re)
    } else {
      Ok(Number::Complex(Box::new(re), Box::new(im)))
    }
  }

  pub fn zero() -> Number {
    Number::Integer(BigInt::zero())
  }

  pub fn one() -> Number {
    Number::Integer(BigInt::one())
  }

  // ─── predicates ──────────────────────────────────────────────────────

  pub fn is_zero(&self) -> bool {
    match self {
      Number::Integer(n) => n.is_zero(),
      Number::Fraction(_) | Number::Date(_) => false,
      Number::Float(f) => f.is_zero(),
      Number::Complex(re, im) => re.is_zero() && im.is_zero(),
    }
  }

  pub fn is_exact_zero(&self) -> bool {
    matches!(self, Number::Integer(n) if n.is_zero())
  }

  pub fn is_one(&self) -> bool {
    matches!(self, Number::Integer(n) if n.is_one())
  }

  pub fn is_minus_one(&self) -> bool {
    matches!(self, Number::Integer(n) if *n == BigInt::from(-1))
  }

  pub fn is_negative(&self) -> bool {
    match self {
      Number::Integer(n) => n.is_negative(),
      Number::Fraction(r) => r.is_negative(),
      Number::Float(f) => f.is_negative(),
      Number::Complex(..) | Number::Date(_) => false,
    }
  }

  pub fn is_integer(&self) -> bool {
    matches!(self, Number::Integer(_))
  }

  pub fn is_exact(&self) -> bool {
    matches!(self, Number::Integer(_) | Number::Fraction(_))
  }

  pub fn is_real(&self) -> bool {
    matches!(
      self,
      Number::Integer(_) | Number::Fraction(_) | Number::Float(_)
    )
  }

  pub fn is_date(&self) -> bool {
    matches!(self, Number::Date(_))
  }

  // ─── conversions ─────────────────────────────────────────────────────

  pub fn to_rational(&self) -> Option<BigRational> {
    match self {
      Number::Integer(n) => Some(BigRational::from_integer(n.clone())),
      Number::Fraction(r) => Some(r.clone()),
      Number::Float(f) => Some(f.to_rational()),
      _ => None,
    }
  }

  pub fn to_bigint(&self) -> Option<BigInt> {
    match self {
      Number::Integer(n) => Some(n.clone()),
      _ => None,
    }
  }

  pub fn to_i64(&self) -> Option<i64> {
    self.to_bigint().and_then(|n| n.to_i64())
  }

  pub fn to_f64(&self) -> Option<f64> {
    match self {
      Number::Integer(n) => n.to_f64(),
      Number::Fraction(r) => r.to_f64(),
      Number::Float(f) => Some(f.to_f64()),
      _ => None,
    }
  }

  /// Float approximation to `precision` significant digits.
  pub fn approximate(&self, precision: u32) -> Result<Number, CalcError> {
    match self {
      Number::Float(f) => Ok(Number::Float(f.round_to(precision))),
      Number::Integer(_) | Number::Fraction(_) => {
        let value = self.to_rational().ok_or_else(|| not_converted(self))?;
        Ok(Number::Float(Float::from_rational(&value, precision)))
      }
      Number::Complex(re, im) => Number::complex(
        re.approximate(precision)?,
        im.approximate(precision)?,
      ),
      Number::Date(_) => Err(not_converted(self)),
    }
  }

  fn parts(&self) -> Result<(Number, Number), CalcError> {
    match self {
      Number::Complex(re, im) => Ok(((**re).clone(), (**im).clone())),
      Number::Date(_) => Err(not_converted(self)),
      _ => Ok((self.clone(), Number::zero())),
    }
  }

  // ─── arithmetic ──────────────────────────────────────────────────────

  pub fn add(&self, rhs: &Number) -> Result<Number, CalcError> {
    match (self, rhs) {
      (Number::Date(day), other) | (other, Number::Date(day)) => {
        let offset = other.to_i64().ok_or_else(|| not_converted(other))?;
        Ok(Number::Date(checked_day(day.checked_add(offset))?))
      }
      (Number::Complex(..), _) | (_, Number::Complex(..)) => {
        let (a, b) = self.parts()?;
        let (c, d) = rhs.parts()?;
        Number::complex(a.add(&c)?, b.add(&d)?)
      }
      _ => real_op(self, rhs, |a, b| Ok(a + b)),
    }
  }

  pub fn sub(&self, rhs: &Number) -> Result<Number, CalcError> {
    match (self, rhs) {
      (Number::Date(a), Number::Date(b)) => {
        Ok(Number::Integer(BigInt::from(*a) - BigInt::from(*b)))
      }
      (Number::Date(day), other) => {
        let offset = other.to_i64().ok_or_else(|| not_converted(other))?;
        Ok(Number::Date(checked_day(day.checked_sub(offset))?))
      }
      _ => self.add(&rhs.neg()?),
    }
  }

  pub fn neg(&self) -> Result<Number, CalcError> {
    match self {
      Number::Integer(n) => Ok(Number::Integer(-n)),
      Number::Fraction(r) => Ok(Number::Fraction(-r)),
      Number::Float(f) => Ok(Number::Float(Float::new(
        -f.mantissa().clone(),
        f.exponent(),
      ))),
      Number::Complex(re, im) => Number::complex(re.neg()?, im.neg()?),
      Number::Date(_) => Err(not_converted(self)),
    }
  }

  pub fn mul(&self, rhs: &Number) -> Result<Number, CalcError> {
    match (self, rhs) {
      (Number::Date(_), _) => Err(not_converted(self)),
      (_, Number::Date(_)) => Err(not_converted(rhs)),
      (Number::Complex(..), _) | (_, Number::Complex(..)) => {
        let (a, b) = self.parts()?;
        let (c, d) = rhs.parts()?;
        Number::complex(
          a.mul(&c)?.sub(&b.mul(&d)?)?,
          a.mul(&d)?.add(&b.mul(&c)?)?,
        )
      }
      _ => real_op(self, rhs, |a, b| Ok(a * b)),
    }
  }

  pub fn div(&self, rhs: &Number) -> Result<Number, CalcError> {
    if rhs.is_zero() {
      return Err(CalcError::DivisionByZero);
    }
    match (self, rhs) {
      (Number::Date(_), _) => Err(not_converted(self)),
      (_, Number::Date(_)) => Err(not_converted(rhs)),
      (Number::Complex(..), _) | (_, Number::Complex(..)) => {
        let (a, b) = self.parts()?;
        let (c, d) = rhs.parts()?;
        let denom = c.mul(&c)?.add(&d.mul(&d)?)?;
        Number::complex(
          a.mul(&c)?.add(&b.mul(&d)?)?.div(&denom)?,
          b.mul(&c)?.sub(&a.mul(&d)?)?.div(&denom)?,
        )
      }
      _ => real_op(self, rhs, |a, b| Ok(a / b)),
    }
  }

  pub fn abs(&self) -> Result<Number, CalcError> {
    match self {
      Number::Complex(re, im) => {
        re.mul(re)?.add(&im.mul(im)?)?.sqrt(DEFAULT_PRECISION)
      }
      Number::Date(_) => Err(not_converted(self)),
      _ if self.is_negative() => self.neg(),
      _ => Ok(self.clone()),
    }
  }

  /// Integer power by repeated squaring.
  pub fn powi(&self, exponent: &BigInt) -> Result<Number, CalcError> {
    if self.is_date() {
      return Err(not_converted(self));
    }
    if exponent.is_zero() {
      return Ok(Number::one());
    }
    let base = if exponent.is_negative() {
      Number::one().div(self)?
    } else {
      self.clone()
    };
    let mut n = exponent.abs().to_u32().ok_or_else(|| {
      CalcError::UnsupportedArguments(format!("exponent {exponent}"))
    })?;
    let mut result = Number::one();
    let mut square = base;
    while n > 0 {
      if n & 1 == 1 {
        result = result.mul(&square)?;
      }
      n >>= 1;
      if n > 0 {
        square = square.mul(&square)?;
      }
    }
    Ok(result)
  }

  /// The exact square root when `self` is the square of an exact rational.
  pub fn exact_sqrt(&self) -> Option<Number> {
    match self {
      Number::Integer(_) | Number::Fraction(_) if !self.is_negative() => {
        let value = self.to_rational()?;
        let numer = value.numer().sqrt();
        let denom = value.denom().sqrt();
        if &(&numer * &numer) == value.numer()
          && &(&denom * &denom) == value.denom()
        {
          Some(Number::from_rational(BigRational::new(numer, denom)))
        } else {
          None
        }
      }
      _ => None,
    }
  }

  pub fn sqrt(&self, precision: u32) -> Result<Number, CalcError> {
    if let Some(root) = self.exact_sqrt() {
      return Ok(root);
    }
    match self {
      Number::Date(_) => Err(not_converted(self)),
      Number::Complex(re, im) => {
        // sqrt(a + bi) = sqrt((r + a) / 2) + sign(b) sqrt((r - a) / 2) i
        let r = self.abs()?;
        let two = Number::from(2);
        let x = r.add(re)?.div(&two)?.sqrt(precision)?;
        let y = r.sub(re)?.div(&two)?.sqrt(precision)?;
        let y = if im.is_negative() { y.neg()? } else { y };
        Number::complex(x, y)
      }
      _ if self.is_negative() => {
        Number::complex(Number::zero(), self.neg()?.sqrt(precision)?)
      }
      _ => {
        let value = self.to_rational().ok_or_else(|| not_converted(self))?;
        let float = Float::from_rational(&value, precision + 2);
        float
          .sqrt(precision)
          .map(Number::Float)
          .ok_or_else(|| not_converted(self))
      }
    }
  }

  // ─── comparison ──────────────────────────────────────────────────────

  /// Numeric equivalence: same mathematical value, any representation.
  pub fn num_eq(&self, other: &Number) -> bool {
    match (self, other) {
      (Number::Date(a), Number::Date(b)) => a == b,
      (Number::Date(_), _) | (_, Number::Date(_)) => false,
      (Number::Complex(..), _) | (_, Number::Complex(..)) => {
        match (self.parts(), other.parts()) {
          (Ok((a, b)), Ok((c, d))) => a.num_eq(&c) && b.num_eq(&d),
          _ => false,
        }
      }
      _ => self.to_rational() == other.to_rational(),
    }
  }

  /// Ordering of real values (and of dates among themselves).
  pub fn cmp_real(&self, other: &Number) -> Option<Ordering> {
    match (self, other) {
      (Number::Date(a), Number::Date(b)) => Some(a.cmp(b)),
      _ => Some(self.to_rational()?.cmp(&other.to_rational()?)),
    }
  }
}

fn real_op(
  lhs: &Number,
  rhs: &Number,
  op: impl FnOnce(BigRational, BigRational) -> Result<BigRational, CalcError>,
) -> Result<Number, CalcError> {
  let a = lhs.to_rational().ok_or_else(|| not_converted(lhs))?;
  let b = rhs.to_rational().ok_or_else(|| not_converted(rhs))?;
  let value = op(a, b)?;
  if matches!(lhs, Number::Float(_)) || matches!(rhs, Number::Float(_)) {
    Ok(Number::Float(Float::from_rational(&value, DEFAULT_PRECISION)))
  } else {
    Ok(Number::from_rational(value))
  }
}

impl fmt::Display for Number {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&crate::functions::math_ast::number_to_string(self, 10, false))
  }
}
