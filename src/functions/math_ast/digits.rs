#[allow(unused_imports)]
use super::*;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::CalcError;
use crate::functions::datetime_ast::format_date;
use crate::number::{DEFAULT_PRECISION, Float, Number};

/// Insert `,` every `size` digits counting from the least significant one.
pub fn group_digits(digits: &str, size: usize) -> String {
  let chars: Vec<char> = digits.chars().collect();
  let mut out = String::with_capacity(chars.len() + chars.len() / size);
  for (i, c) in chars.iter().enumerate() {
    if i > 0 && (chars.len() - i) % size == 0 {
      out.push(',');
    }
    out.push(*c);
  }
  out
}

struct Radix {
  radix: u32,
  grouped: bool,
}

impl Radix {
  fn prefix(&self) -> String {
    if self.radix == 10 {
      String::new()
    } else {
      format!("{}#", self.radix)
    }
  }

  fn digits(&self, n: &BigInt) -> String {
    let digits = n.magnitude().to_str_radix(self.radix).to_uppercase();
    if self.grouped {
      group_digits(&digits, if self.radix == 10 { 3 } else { 4 })
    } else {
      digits
    }
  }

  fn sign(negative: bool) -> &'static str {
    if negative { "-" } else { "" }
  }

  fn integer(&self, n: &BigInt) -> String {
    format!(
      "{}{}{}",
      Self::sign(n.is_negative()),
      self.prefix(),
      self.digits(n)
    )
  }

  fn fraction(&self, r: &BigRational) -> String {
    format!(
      "{}{}{}:{}",
      Self::sign(r.is_negative()),
      self.prefix(),
      self.digits(r.numer()),
      self.digits(r.denom())
    )
  }

  fn float(&self, f: &Float) -> String {
    if self.radix == 10 {
      return decimal_float(f, self.grouped);
    }
    let value = f.to_rational().abs();
    let whole = value.floor();
    let mut rest = &value - &whole;
    let wanted = (f64::from(DEFAULT_PRECISION) * 10f64.ln()
      / f64::from(self.radix).ln())
    .ceil() as usize;
    let radix = BigRational::from_integer(BigInt::from(self.radix));
    let mut fraction = String::new();
    for _ in 0..wanted {
      if rest.is_zero() {
        break;
      }
      rest = &rest * &radix;
      let digit = rest.floor();
      rest = &rest - &digit;
      let d = digit.to_integer().to_u32().unwrap_or(0);
      fraction.push(
        std::char::from_digit(d, self.radix)
          .unwrap_or('0')
          .to_ascii_uppercase(),
      );
    }
    let fraction = fraction.trim_end_matches('0');
    format!(
      "{}{}{}.{}",
      Self::sign(f.is_negative()),
      self.prefix(),
      self.digits(&whole.to_integer()),
      fraction
    )
  }
}

/// Calculator-style decimal float: `0.5`, `100.`, `1.5e20`, `1e-10`.
fn decimal_float(f: &Float, grouped: bool) -> String {
  let sign = if f.is_negative() { "-" } else { "" };
  let digits = f.mantissa().magnitude().to_str_radix(10);
  let n = digits.len() as i64;
  let point = n + f.exponent();
  let group = |s: &str| {
    if grouped {
      group_digits(s, 3)
    } else {
      s.to_string()
    }
  };
  let body = if f.exponent() >= 0 && point <= i64::from(DEFAULT_PRECISION) {
    let zeros = "0".repeat(f.exponent() as usize);
    format!("{}.", group(&format!("{digits}{zeros}")))
  } else if f.exponent() < 0 && point > 0 {
    let (int_part, frac_part) = digits.split_at(point as usize);
    format!("{}.{frac_part}", group(int_part))
  } else if f.exponent() < 0 && point > -5 {
    format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
  } else {
    let (lead, rest) = digits.split_at(1);
    let rest = if rest.is_empty() {
      String::new()
    } else {
      format!(".{rest}")
    };
    format!("{lead}{rest}e{}", point - 1)
  };
  format!("{sign}{body}")
}

/// Text of a number in `radix`; radices outside 2..=36 fall back to 10.
pub fn number_to_string(n: &Number, radix: u32, grouped: bool) -> String {
  let radix = if (2..=36).contains(&radix) { radix } else { 10 };
  let fmt = Radix { radix, grouped };
  match n {
    Number::Integer(i) => fmt.integer(i),
    Number::Fraction(r) => fmt.fraction(r),
    Number::Float(f) => fmt.float(f),
    Number::Complex(re, im) => format!(
      "({}, {})",
      number_to_string(re, radix, grouped),
      number_to_string(im, radix, grouped)
    ),
    Number::Date(day) => format_date(*day),
  }
}

pub fn format_number(
  n: &Number,
  radix: u32,
  grouped: bool,
) -> Result<String, CalcError> {
  if !(2..=36).contains(&radix) {
    return Err(CalcError::InvalidRadix(radix));
  }
  Ok(number_to_string(n, radix, grouped))
}
