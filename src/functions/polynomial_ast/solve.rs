#[allow(unused_imports)]
use super::*;
use num_traits::One;
use tracing::{debug, trace};

use crate::CalcError;
use crate::evaluator::{
  Term, add_exprs, mul_exprs, simplify, sub_exprs, substitute,
};
use crate::number::Number;
use crate::settings::Settings;
use crate::syntax::{Expr, Op, Symbol};

// ─── Solve ──────────────────────────────────────────────────────────

/// Outcome of solving a system of equations.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
  /// One value per unknown, in the order the unknowns were given.
  Solved(Vec<(Symbol, Expr)>),
  /// Some equation reduces to `0 = c` with `c` nonzero.
  Inconsistent,
  /// The equations do not pin every unknown down to one value.
  Underdetermined,
}

/// One linear equation `coefs . unknowns = rhs`.
#[derive(Debug, Clone)]
struct Row {
  coefs: Vec<Number>,
  rhs: Expr,
}

impl Row {
  fn scaled(&self, c: &Number) -> Result<Row, CalcError> {
    Ok(Row {
      coefs: self
        .coefs
        .iter()
        .map(|a| a.mul(c))
        .collect::<Result<Vec<_>, _>>()?,
      rhs: mul_exprs(&Expr::Num(c.clone()), &self.rhs)?,
    })
  }

  /// `self - f * pivot`
  fn minus_multiple(&self, pivot: &Row, f: &Number) -> Result<Row, CalcError> {
    let coefs = self
      .coefs
      .iter()
      .zip(&pivot.coefs)
      .map(|(a, p)| a.sub(&f.mul(p)?))
      .collect::<Result<Vec<_>, _>>()?;
    let shift = mul_exprs(&Expr::Num(f.clone()), &pivot.rhs)?;
    Ok(Row {
      coefs,
      rhs: sub_exprs(&self.rhs, &shift)?,
    })
  }
}

fn items(expr: &Expr) -> Vec<Expr> {
  match expr {
    Expr::Form { op: Op::Vec, args } => args.clone(),
    _ => vec![expr.clone()],
  }
}

fn unknown_symbols(unknowns: &Expr) -> Result<Vec<Symbol>, CalcError> {
  items(unknowns)
    .iter()
    .map(|u| match u {
      Expr::Var(s) => Ok(s.clone()),
      other => Err(CalcError::Malformed(format!("{other} is not an unknown"))),
    })
    .collect()
}

/// `lhs - rhs` of an equation, simplified; a bare expression means `e = 0`.
fn residual(equation: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  match equation {
    Expr::Form { op: Op::Eq, args } if args.len() == 2 => {
      simplify(&Expr::minus(args[0].clone(), args[1].clone()), settings)
    }
    _ => simplify(equation, settings),
  }
}

fn additive_terms(expr: &Expr, negated: bool, out: &mut Vec<(bool, Expr)>) {
  match expr {
    Expr::Form { op: Op::Add, args } if args.len() == 2 => {
      additive_terms(&args[0], negated, out);
      additive_terms(&args[1], negated, out);
    }
    Expr::Form { op: Op::Sub, args } if args.len() == 2 => {
      additive_terms(&args[0], negated, out);
      additive_terms(&args[1], !negated, out);
    }
    Expr::Form { op: Op::Neg, args } if args.len() == 1 => {
      additive_terms(&args[0], !negated, out);
    }
    _ => out.push((negated, expr.clone())),
  }
}

/// Coefficients of `residual = 0` in the unknowns, or `None` when an
/// unknown occurs other than to the first power with a numeric factor.
fn linear_form(
  residual: &Expr,
  unknowns: &[Symbol],
) -> Result<Option<Row>, CalcError> {
  let mut terms = Vec::new();
  additive_terms(residual, false, &mut terms);
  let mut row = Row {
    coefs: vec![Number::zero(); unknowns.len()],
    rhs: Expr::int(0),
  };
  for (negated, term) in terms {
    if !unknowns.iter().any(|u| term.contains_symbol(u)) {
      row.rhs = if negated {
        add_exprs(&row.rhs, &term)?
      } else {
        sub_exprs(&row.rhs, &term)?
      };
      continue;
    }
    let t = Term::of(&term)?;
    let [(Expr::Var(s), e)] = t.factors.as_slice() else {
      return Ok(None);
    };
    let Some(i) = unknowns.iter().position(|u| u == s) else {
      return Ok(None);
    };
    if !e.is_one() {
      return Ok(None);
    }
    let coef = if negated { t.coef.neg()? } else { t.coef.clone() };
    row.coefs[i] = row.coefs[i].add(&coef)?;
  }
  Ok(Some(row))
}

enum Round {
  Found(Vec<(Symbol, Expr)>),
  Inconsistent,
}

/// Gauss-Jordan elimination over the linear equations. Only unknowns
/// whose pivot row has no other nonzero coefficient are assigned.
fn linear_round(
  residuals: &[Expr],
  pending: &[Symbol],
  settings: &Settings,
) -> Result<Round, CalcError> {
  let mut rows = Vec::new();
  for r in residuals {
    if let Some(row) = linear_form(r, pending)? {
      rows.push(row);
    }
  }
  let mut pivots = Vec::new();
  let mut next = 0;
  for col in 0..pending.len() {
    let Some(p) = (next..rows.len()).find(|&r| !rows[r].coefs[col].is_zero())
    else {
      continue;
    };
    rows.swap(next, p);
    let inverse = Number::one().div(&rows[next].coefs[col])?;
    rows[next] = rows[next].scaled(&inverse)?;
    for r in 0..rows.len() {
      if r == next || rows[r].coefs[col].is_zero() {
        continue;
      }
      let f = rows[r].coefs[col].clone();
      let updated = rows[r].minus_multiple(&rows[next], &f)?;
      rows[r] = updated;
    }
    pivots.push((col, next));
    next += 1;
  }
  for row in &rows[next..] {
    if !simplify(&row.rhs, settings)?.is_zero() {
      trace!(target: "solve", rhs = %row.rhs, "inconsistent row");
      return Ok(Round::Inconsistent);
    }
  }
  let mut found = Vec::new();
  for (col, r) in pivots {
    let row = &rows[r];
    let alone = row
      .coefs
      .iter()
      .enumerate()
      .all(|(c, a)| c == col || a.is_zero());
    if alone {
      found.push((pending[col].clone(), simplify(&row.rhs, settings)?));
    }
  }
  Ok(Round::Found(found))
}

/// Solve an equation left in a single unknown when its squarefree part
/// is linear, so the root is unique.
fn univariate_round(
  residuals: &[Expr],
  pending: &[Symbol],
) -> Result<Vec<(Symbol, Expr)>, CalcError> {
  for r in residuals {
    let present: Vec<&Symbol> =
      pending.iter().filter(|u| r.contains_symbol(u)).collect();
    let [u] = present.as_slice() else {
      continue;
    };
    let p = match Poly::from_expr(r, u) {
      Ok(p) => p,
      Err(CalcError::NotPolynomial(_)) => continue,
      Err(e) => return Err(e),
    };
    let core = p.squarefree()?;
    if core.degree() == Some(1) {
      let root = core.coeff(0).neg()?.div(&core.coeff(1))?;
      return Ok(vec![((*u).clone(), Expr::Num(root))]);
    }
  }
  Ok(Vec::new())
}

/// A residual with no pending unknowns left must vanish.
fn contradicts(residual: &Expr, pending: &[Symbol]) -> bool {
  !residual.is_zero() && !pending.iter().any(|u| residual.contains_symbol(u))
}

/// Solve `system` (a vector of equations, or one equation) for
/// `unknowns` (a vector of symbols, or one symbol).
pub fn solve_system(
  system: &Expr,
  unknowns: &Expr,
  settings: &Settings,
) -> Result<Solution, CalcError> {
  let equations = items(system);
  let unknowns = unknown_symbols(unknowns)?;
  if equations.len() != unknowns.len() {
    return Err(CalcError::DimensionMismatch(format!(
      "{} equations for {} unknowns",
      equations.len(),
      unknowns.len()
    )));
  }
  let mut residuals = equations
    .iter()
    .map(|e| residual(e, settings))
    .collect::<Result<Vec<_>, _>>()?;
  let mut pending = unknowns.clone();
  let mut solved: Vec<(Symbol, Expr)> = Vec::new();
  let mut round = 0;
  loop {
    residuals.retain(|r| !r.is_zero());
    if residuals.iter().any(|r| contradicts(r, &pending)) {
      return Ok(Solution::Inconsistent);
    }
    if pending.is_empty() {
      break;
    }
    let found = match linear_round(&residuals, &pending, settings)? {
      Round::Inconsistent => return Ok(Solution::Inconsistent),
      Round::Found(found) if !found.is_empty() => found,
      Round::Found(_) => univariate_round(&residuals, &pending)?,
    };
    if found.is_empty() {
      debug!(
        target: "solve",
        round,
        pending = pending.len(),
        "underdetermined"
      );
      return Ok(Solution::Underdetermined);
    }
    for (symbol, value) in &found {
      debug!(
        target: "solve",
        round,
        unknown = symbol.name(),
        value = %value,
        "determined"
      );
      residuals = residuals
        .iter()
        .map(|r| simplify(&substitute(r, symbol, value), settings))
        .collect::<Result<Vec<_>, _>>()?;
      pending.retain(|u| u != symbol);
    }
    solved.extend(found);
    round += 1;
  }
  let ordered = unknowns
    .iter()
    .filter_map(|u| solved.iter().find(|(s, _)| s == u).cloned())
    .collect();
  Ok(Solution::Solved(ordered))
}

/// Solve, returning the vector of `unknown = value` equations, or the
/// unevaluated `solve(system, unknowns)` call when there is no unique
/// solution.
pub fn solve(
  system: &Expr,
  unknowns: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  match solve_system(system, unknowns, settings)? {
    Solution::Solved(bindings) => Ok(Expr::vector(
      bindings
        .into_iter()
        .map(|(s, v)| Expr::equation(Expr::Var(s), v))
        .collect(),
    )),
    _ => Ok(Expr::call("solve", vec![system.clone(), unknowns.clone()])),
  }
}
