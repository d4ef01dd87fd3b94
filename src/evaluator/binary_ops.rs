#[allow(unused_imports)]
use super::*;
use crate::CalcError;
use crate::syntax::Expr;

// Arithmetic on expressions that folds numbers and drops identities but
// otherwise just builds the form; callers simplify the result.

pub fn add_exprs(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  Ok(match (a, b) {
    (Expr::Num(x), Expr::Num(y)) => Expr::Num(x.add(y)?),
    _ if a.is_zero() => b.clone(),
    _ if b.is_zero() => a.clone(),
    _ => Expr::plus(a.clone(), b.clone()),
  })
}

pub fn sub_exprs(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  Ok(match (a, b) {
    (Expr::Num(x), Expr::Num(y)) => Expr::Num(x.sub(y)?),
    _ if b.is_zero() => a.clone(),
    _ if a.is_zero() => neg_expr(b)?,
    _ => Expr::minus(a.clone(), b.clone()),
  })
}

pub fn mul_exprs(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  Ok(match (a, b) {
    (Expr::Num(x), Expr::Num(y)) => Expr::Num(x.mul(y)?),
    _ if a.is_zero() || b.is_zero() => Expr::int(0),
    _ if a.is_one() => b.clone(),
    _ if b.is_one() => a.clone(),
    _ => Expr::times(a.clone(), b.clone()),
  })
}

pub fn div_exprs(a: &Expr, b: &Expr) -> Result<Expr, CalcError> {
  if b.is_zero() {
    return Err(CalcError::DivisionByZero);
  }
  Ok(match (a, b) {
    (Expr::Num(x), Expr::Num(y)) => Expr::Num(x.div(y)?),
    _ if a.is_zero() => Expr::int(0),
    _ if b.is_one() => a.clone(),
    _ => Expr::divide(a.clone(), b.clone()),
  })
}

pub fn neg_expr(a: &Expr) -> Result<Expr, CalcError> {
  Ok(match a {
    Expr::Num(x) => Expr::Num(x.neg()?),
    _ => Expr::negate(a.clone()),
  })
}
