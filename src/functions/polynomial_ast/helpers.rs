#[allow(unused_imports)]
use super::*;
use num_traits::ToPrimitive;

use crate::CalcError;
use crate::evaluator::collect_sum;
use crate::number::{Number, not_converted};
use crate::syntax::{Expr, Op, Symbol};

// ─── helpers ────────────────────────────────────────────────────────

/// Dense univariate polynomial with numeric coefficients, lowest degree
/// first. The last coefficient, when present, is nonzero.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
  coeffs: Vec<Number>,
}

fn not_polynomial(expr: &Expr, var: &Symbol) -> CalcError {
  CalcError::NotPolynomial(format!(
    "{expr} is not a polynomial in {}",
    var.name()
  ))
}

impl Poly {
  fn trimmed(mut coeffs: Vec<Number>) -> Poly {
    while coeffs.last().is_some_and(Number::is_zero) {
      coeffs.pop();
    }
    Poly { coeffs }
  }

  pub fn zero() -> Poly {
    Poly { coeffs: Vec::new() }
  }

  pub fn constant(c: Number) -> Poly {
    Poly::trimmed(vec![c])
  }

  /// The polynomial `x`.
  pub fn variable() -> Poly {
    Poly::monomial(Number::one(), 1)
  }

  pub fn monomial(c: Number, degree: usize) -> Poly {
    let mut coeffs = vec![Number::zero(); degree];
    coeffs.push(c);
    Poly::trimmed(coeffs)
  }

  pub fn is_zero(&self) -> bool {
    self.coeffs.is_empty()
  }

  /// `None` for the zero polynomial.
  pub fn degree(&self) -> Option<usize> {
    self.coeffs.len().checked_sub(1)
  }

  pub fn leading(&self) -> Option<&Number> {
    self.coeffs.last()
  }

  pub fn coeff(&self, i: usize) -> Number {
    self.coeffs.get(i).cloned().unwrap_or_else(Number::zero)
  }

  pub fn add(&self, other: &Poly) -> Result<Poly, CalcError> {
    let len = self.coeffs.len().max(other.coeffs.len());
    let coeffs = (0..len)
      .map(|i| self.coeff(i).add(&other.coeff(i)))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Poly::trimmed(coeffs))
  }

  pub fn neg(&self) -> Result<Poly, CalcError> {
    let coeffs = self
      .coeffs
      .iter()
      .map(Number::neg)
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Poly::trimmed(coeffs))
  }

  pub fn sub(&self, other: &Poly) -> Result<Poly, CalcError> {
    self.add(&other.neg()?)
  }

  pub fn scale(&self, c: &Number) -> Result<Poly, CalcError> {
    let coeffs = self
      .coeffs
      .iter()
      .map(|a| a.mul(c))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Poly::trimmed(coeffs))
  }

  pub fn mul(&self, other: &Poly) -> Result<Poly, CalcError> {
    if self.is_zero() || other.is_zero() {
      return Ok(Poly::zero());
    }
    let mut coeffs =
      vec![Number::zero(); self.coeffs.len() + other.coeffs.len() - 1];
    for (i, a) in self.coeffs.iter().enumerate() {
      for (j, b) in other.coeffs.iter().enumerate() {
        coeffs[i + j] = coeffs[i + j].add(&a.mul(b)?)?;
      }
    }
    Ok(Poly::trimmed(coeffs))
  }

  pub fn powi(&self, k: usize) -> Result<Poly, CalcError> {
    let mut result = Poly::constant(Number::one());
    for _ in 0..k {
      result = result.mul(self)?;
    }
    Ok(result)
  }

  /// Long division: `self = q * divisor + r` with `deg r < deg divisor`.
  pub fn div_rem(&self, divisor: &Poly) -> Result<(Poly, Poly), CalcError> {
    let (Some(d_deg), Some(d_lead)) = (divisor.degree(), divisor.leading())
    else {
      return Err(CalcError::DivisionByZero);
    };
    let mut rest = self.coeffs.clone();
    let q_len = rest.len().saturating_sub(d_deg);
    let mut quotient = vec![Number::zero(); q_len];
    while rest.len() > d_deg {
      let top = rest.len() - 1;
      let shift = top - d_deg;
      let c = rest[top].div(d_lead)?;
      for (i, d) in divisor.coeffs.iter().enumerate().take(d_deg) {
        rest[shift + i] = rest[shift + i].sub(&c.mul(d)?)?;
      }
      rest.pop();
      quotient[shift] = c;
      while rest.last().is_some_and(Number::is_zero) {
        rest.pop();
      }
    }
    Ok((Poly::trimmed(quotient), Poly::trimmed(rest)))
  }

  pub fn monic(&self) -> Result<Poly, CalcError> {
    match self.leading() {
      Some(lead) => self.scale(&Number::one().div(lead)?),
      None => Ok(Poly::zero()),
    }
  }

  /// Monic greatest common divisor (Euclid).
  pub fn gcd(&self, other: &Poly) -> Result<Poly, CalcError> {
    let (mut a, mut b) = (self.clone(), other.clone());
    while !b.is_zero() {
      let (_, r) = a.div_rem(&b)?;
      a = b;
      b = r;
    }
    a.monic()
  }

  pub fn derivative(&self) -> Result<Poly, CalcError> {
    let coeffs = self
      .coeffs
      .iter()
      .enumerate()
      .skip(1)
      .map(|(i, c)| c.mul(&Number::from(i as i64)))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Poly::trimmed(coeffs))
  }

  /// The product of the distinct irreducible factors (`p / gcd(p, p')`).
  pub fn squarefree(&self) -> Result<Poly, CalcError> {
    if self.degree().unwrap_or(0) == 0 {
      return Ok(self.clone());
    }
    let g = self.gcd(&self.derivative()?)?;
    Ok(self.div_rem(&g)?.0)
  }

  /// Read `expr` as a polynomial in `var` with numeric coefficients.
  /// Equations read as `lhs - rhs`.
  pub fn from_expr(expr: &Expr, var: &Symbol) -> Result<Poly, CalcError> {
    let read = |e: &Expr| Poly::from_expr(e, var);
    match expr {
      Expr::Num(n) if n.is_date() => Err(not_converted(n)),
      Expr::Num(n) => Ok(Poly::constant(n.clone())),
      Expr::Var(s) if s == var => Ok(Poly::variable()),
      Expr::Var(_) => Err(not_polynomial(expr, var)),
      Expr::Form { op, args } => match (op, args.as_slice()) {
        (Op::Add, [a, b]) => read(a)?.add(&read(b)?),
        (Op::Sub | Op::Eq, [a, b]) => read(a)?.sub(&read(b)?),
        (Op::Neg, [a]) => read(a)?.neg(),
        (Op::Mul, [a, b]) => read(a)?.mul(&read(b)?),
        (Op::Div, [a, b]) => {
          let d = read(b)?;
          match (d.degree(), d.leading()) {
            (Some(0), Some(c)) => read(a)?.scale(&Number::one().div(c)?),
            _ => Err(not_polynomial(expr, var)),
          }
        }
        (Op::Pow, [a, Expr::Num(Number::Integer(k))]) => {
          let k = k.to_usize().ok_or_else(|| not_polynomial(expr, var))?;
          read(a)?.powi(k)
        }
        _ => Err(not_polynomial(expr, var)),
      },
    }
  }

  /// Highest degree first, in collected form (`2 * x - 4`).
  pub fn to_expr(&self, var: &Symbol) -> Result<Expr, CalcError> {
    let x = Expr::Var(var.clone());
    let mut sum: Option<Expr> = None;
    for (i, c) in self.coeffs.iter().enumerate().rev() {
      if c.is_zero() {
        continue;
      }
      let term = match i {
        0 => Expr::Num(c.clone()),
        1 => Expr::times(Expr::Num(c.clone()), x.clone()),
        _ => Expr::times(
          Expr::Num(c.clone()),
          Expr::power(x.clone(), Expr::int(i as i64)),
        ),
      };
      sum = Some(match sum {
        Some(acc) => Expr::plus(acc, term),
        None => term,
      });
    }
    match sum {
      Some(e) => collect_sum(&e),
      None => Ok(Expr::int(0)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse_expr;

  fn poly(input: &str) -> Poly {
    Poly::from_expr(&parse_expr(input).unwrap(), &Symbol::new("x")).unwrap()
  }

  fn text(p: &Poly) -> String {
    p.to_expr(&Symbol::new("x")).unwrap().to_string()
  }

  #[test]
  fn reads_and_prints() {
    assert_eq!(text(&poly("(x + 1)^2")), "x^2 + 2 * x + 1");
    assert_eq!(text(&poly("x - x")), "0");
    assert_eq!(poly("(x^2 - 1) / 2").degree(), Some(2));
  }

  #[test]
  fn rejects_other_symbols() {
    let y = parse_expr("x + y").unwrap();
    assert!(matches!(
      Poly::from_expr(&y, &Symbol::new("x")),
      Err(CalcError::NotPolynomial(_))
    ));
  }

  #[test]
  fn long_division() {
    let (q, r) = poly("2 x^3 + 1").div_rem(&poly("x^2 + 2 x")).unwrap();
    assert_eq!(text(&q), "2 * x - 4");
    assert_eq!(text(&r), "8 * x + 1");
    assert!(matches!(
      poly("x").div_rem(&Poly::zero()),
      Err(CalcError::DivisionByZero)
    ));
  }

  #[test]
  fn gcd_and_squarefree() {
    let g = poly("x^2 - 1").gcd(&poly("x^2 + 2 x + 1")).unwrap();
    assert_eq!(text(&g), "x + 1");
    assert_eq!(poly("4 x^2").squarefree().unwrap().degree(), Some(1));
  }
}
