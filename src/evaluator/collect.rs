//! Term collection: the normal form for sums and products.
//!
//! A product is flattened into a numeric coefficient and an ordered list of
//! `(base, integer exponent)` factors; a sum into an ordered list of such
//! terms plus a numeric constant. Like factors and like terms merge, and the
//! rebuilt tree keeps first-appearance order, so rebuilding a collected
//! expression yields the same tree again.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::CalcError;
use crate::number::Number;
use crate::syntax::{Expr, Op};

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
  pub coef: Number,
  pub factors: Vec<(Expr, BigInt)>,
}

impl Term {
  pub fn constant(coef: Number) -> Self {
    Term {
      coef,
      factors: Vec::new(),
    }
  }

  pub fn of(expr: &Expr) -> Result<Term, CalcError> {
    let mut term = Term::constant(Number::one());
    term.absorb(expr, &BigInt::one())?;
    term.tidy()?;
    Ok(term)
  }

  pub fn is_constant(&self) -> bool {
    self.factors.is_empty()
  }

  /// Exponent of `base` in this term (zero when absent).
  pub fn exponent_of(&self, base: &Expr) -> BigInt {
    self
      .factors
      .iter()
      .find(|(b, _)| b == base)
      .map(|(_, e)| e.clone())
      .unwrap_or_default()
  }

  fn absorb(&mut self, expr: &Expr, power: &BigInt) -> Result<(), CalcError> {
    match expr {
      Expr::Num(n) => {
        self.coef = self.coef.mul(&n.powi(power)?)?;
      }
      Expr::Form { op: Op::Mul, args } if args.len() == 2 => {
        self.absorb(&args[0], power)?;
        self.absorb(&args[1], power)?;
      }
      Expr::Form { op: Op::Div, args } if args.len() == 2 => {
        self.absorb(&args[0], power)?;
        self.absorb(&args[1], &-power)?;
      }
      Expr::Form { op: Op::Neg, args } if args.len() == 1 => {
        if power.is_odd() {
          self.coef = self.coef.neg()?;
        }
        self.absorb(&args[0], power)?;
      }
      Expr::Form { op: Op::Pow, args } if args.len() == 2 => {
        match &args[1] {
          Expr::Num(Number::Integer(k)) => self.absorb(&args[0], &(power * k))?,
          _ => self.push_factor(expr, power),
        }
      }
      _ => self.push_factor(expr, power),
    }
    Ok(())
  }

  fn push_factor(&mut self, base: &Expr, power: &BigInt) {
    match self.factors.iter_mut().find(|(b, _)| b == base) {
      Some((_, e)) => *e += power,
      None => self.factors.push((base.clone(), power.clone())),
    }
  }

  fn tidy(&mut self) -> Result<(), CalcError> {
    let factors = std::mem::take(&mut self.factors);
    for (base, e) in factors {
      if e.is_zero() {
        continue;
      }
      match sqrt_operand(&base) {
        Some(radicand) if e.is_even() => {
          self.absorb(radicand, &(&e / BigInt::from(2)))?;
        }
        Some(radicand) if is_plain_radicand(radicand) && e > BigInt::one() => {
          self.absorb(radicand, &((&e - BigInt::one()) / BigInt::from(2)))?;
          self.push_factor(&base, &BigInt::one());
        }
        _ => self.push_factor(&base, &e),
      }
    }
    self.factors.retain(|(_, e)| !e.is_zero());
    if self.coef.is_zero() {
      self.factors.clear();
    }
    Ok(())
  }

  /// Rebuild as `p * f1 * f2 / (q * g1)` with the sign carried by `p`.
  pub fn to_expr(&self) -> Expr {
    if self.coef.is_zero() {
      return Expr::Num(self.coef.clone());
    }
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for (base, e) in &self.factors {
      if e.is_positive() {
        numer.push(power_expr(base, e));
      } else {
        denom.push(power_expr(base, &-e));
      }
    }
    let (p, q) = match &self.coef {
      Number::Fraction(r) => (
        Number::Integer(r.numer().clone()),
        Some(Number::Integer(r.denom().clone())),
      ),
      other => (other.clone(), None),
    };
    let numerator = numerator_chain(p, numer);
    let mut denominator = q.map(Expr::Num);
    for factor in denom {
      denominator = Some(match denominator {
        Some(acc) => Expr::times(acc, factor),
        None => factor,
      });
    }
    match denominator {
      Some(d) => Expr::divide(numerator, d),
      None => numerator,
    }
  }
}

fn sqrt_operand(expr: &Expr) -> Option<&Expr> {
  match expr {
    Expr::Form { op: Op::Call(name), args } if name == "sqrt" => args.first(),
    _ => None,
  }
}

fn is_plain_radicand(expr: &Expr) -> bool {
  matches!(expr, Expr::Num(n) if n.is_exact() && !n.is_negative())
}

fn power_expr(base: &Expr, e: &BigInt) -> Expr {
  if e.is_one() {
    base.clone()
  } else {
    Expr::power(base.clone(), Expr::Num(Number::Integer(e.clone())))
  }
}

fn numerator_chain(p: Number, factors: Vec<Expr>) -> Expr {
  let mut iter = factors.into_iter();
  let Some(first) = iter.next() else {
    return Expr::Num(p);
  };
  let negate = p.is_minus_one();
  let mut acc = if p.is_one() || negate {
    first
  } else {
    Expr::times(Expr::Num(p), first)
  };
  for factor in iter {
    acc = Expr::times(acc, factor);
  }
  if negate { Expr::negate(acc) } else { acc }
}

fn same_factors(a: &Term, b: &Term) -> bool {
  a.factors.len() == b.factors.len()
    && a
      .factors
      .iter()
      .all(|f| b.factors.iter().any(|g| g == f))
}

/// Normal form of a product-shaped expression.
pub fn collect_product(expr: &Expr) -> Result<Expr, CalcError> {
  Ok(Term::of(expr)?.to_expr())
}

enum Slot {
  Constant,
  Term(Term),
}

struct SumCollector {
  constant: Number,
  has_constant: bool,
  slots: Vec<Slot>,
}

impl SumCollector {
  fn absorb(&mut self, expr: &Expr, negate: bool) -> Result<(), CalcError> {
    match expr {
      Expr::Form { op: Op::Add, args } if args.len() == 2 => {
        self.absorb(&args[0], negate)?;
        self.absorb(&args[1], negate)
      }
      Expr::Form { op: Op::Sub, args } if args.len() == 2 => {
        self.absorb(&args[0], negate)?;
        self.absorb(&args[1], !negate)
      }
      Expr::Form { op: Op::Neg, args } if args.len() == 1 => {
        self.absorb(&args[0], !negate)
      }
      Expr::Num(n) => self.add_constant(n, negate),
      _ => {
        let mut term = Term::of(expr)?;
        if negate {
          term.coef = term.coef.neg()?;
        }
        if term.is_constant() {
          self.add_constant(&term.coef, false)
        } else {
          self.merge(term)
        }
      }
    }
  }

  fn add_constant(
    &mut self,
    n: &Number,
    negate: bool,
  ) -> Result<(), CalcError> {
    self.constant = if negate {
      self.constant.sub(n)?
    } else {
      self.constant.add(n)?
    };
    if !self.has_constant {
      self.has_constant = true;
      self.slots.push(Slot::Constant);
    }
    Ok(())
  }

  fn merge(&mut self, term: Term) -> Result<(), CalcError> {
    for slot in &mut self.slots {
      if let Slot::Term(existing) = slot {
        if same_factors(existing, &term) {
          existing.coef = existing.coef.add(&term.coef)?;
          return Ok(());
        }
      }
    }
    self.slots.push(Slot::Term(term));
    Ok(())
  }

  fn coef_of<'a>(&'a self, slot: &'a Slot) -> &'a Number {
    match slot {
      Slot::Constant => &self.constant,
      Slot::Term(t) => &t.coef,
    }
  }

  fn rebuild(slot: &Slot, coef: Number) -> Expr {
    match slot {
      Slot::Constant => Expr::Num(coef),
      Slot::Term(t) => Term {
        coef,
        factors: t.factors.clone(),
      }
      .to_expr(),
    }
  }

  fn to_expr(&self) -> Result<Expr, CalcError> {
    let mut acc: Option<Expr> = None;
    for slot in &self.slots {
      let coef = self.coef_of(slot);
      if coef.is_zero() {
        continue;
      }
      acc = Some(match acc {
        None => Self::rebuild(slot, coef.clone()),
        Some(prev) if coef.is_negative() => {
          Expr::minus(prev, Self::rebuild(slot, coef.neg()?))
        }
        Some(prev) => Expr::plus(prev, Self::rebuild(slot, coef.clone())),
      });
    }
    Ok(acc.unwrap_or_else(|| Expr::Num(self.constant.clone())))
  }
}

/// Normal form of a sum-shaped expression (`+`, `-`, `neg`).
pub fn collect_sum(expr: &Expr) -> Result<Expr, CalcError> {
  let mut collector = SumCollector {
    constant: Number::zero(),
    has_constant: false,
    slots: Vec::new(),
  };
  collector.absorb(expr, false)?;
  collector.to_expr()
}
