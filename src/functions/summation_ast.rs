//! Finite sums and products over an integer index: `sum(body, n, lo, hi)`
//! and `prod(body, n, lo, hi)`, each with an optional positive step.

use num_bigint::BigInt;
use num_traits::{One, Signed};
use tracing::trace;

use crate::CalcError;
use crate::evaluator::{
  add_exprs, div_exprs, mul_exprs, neg_expr, simplify, substitute,
};
use crate::number::Number;
use crate::settings::Settings;
use crate::syntax::{Expr, Symbol};

#[derive(Clone, Copy)]
enum Series {
  Sum,
  Product,
}

impl Series {
  fn name(self) -> &'static str {
    match self {
      Series::Sum => "sum",
      Series::Product => "prod",
    }
  }

  fn identity(self) -> Expr {
    match self {
      Series::Sum => Expr::int(0),
      Series::Product => Expr::int(1),
    }
  }

  fn combine(self, acc: &Expr, term: &Expr) -> Result<Expr, CalcError> {
    match self {
      Series::Sum => add_exprs(acc, term),
      Series::Product => mul_exprs(acc, term),
    }
  }

  /// What running the range backwards does to the value.
  fn reverse(self, value: &Expr) -> Result<Expr, CalcError> {
    match self {
      Series::Sum => neg_expr(value),
      Series::Product => div_exprs(&Expr::int(1), value),
    }
  }
}

fn integer_bound(expr: &Expr) -> Option<BigInt> {
  expr.as_number().and_then(Number::to_bigint)
}

fn expand(
  series: Series,
  body: &Expr,
  index: &Symbol,
  lo: &BigInt,
  hi: &BigInt,
  step: &BigInt,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let mut acc = series.identity();
  let mut i = lo.clone();
  while &i <= hi {
    let term = substitute(body, index, &Expr::Num(Number::Integer(i.clone())));
    acc = series.combine(&acc, &simplify(&term, settings)?)?;
    i += step;
  }
  simplify(&acc, settings)
}

fn evaluate_series(
  series: Series,
  args: &[Expr],
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let unevaluated = || Ok(Expr::call(series.name(), args.to_vec()));
  let (body, index, lo, hi, step) = match args {
    [body, Expr::Var(index), lo, hi] => (body, index, lo, hi, None),
    [body, Expr::Var(index), lo, hi, step] => (body, index, lo, hi, Some(step)),
    _ => return unevaluated(),
  };
  let (Some(lo), Some(hi)) = (integer_bound(lo), integer_bound(hi)) else {
    return unevaluated();
  };
  let step = match step.map(integer_bound) {
    None => BigInt::one(),
    Some(Some(s)) if s.is_positive() => s,
    Some(Some(s)) => {
      return Err(CalcError::Malformed(format!(
        "{}: step {s} is not positive",
        series.name()
      )));
    }
    Some(None) => return unevaluated(),
  };
  trace!(
    target: "simplify",
    series = series.name(),
    %lo,
    %hi,
    %step,
    "expanding"
  );
  if hi < &lo - BigInt::one() && step.is_one() {
    let inner = expand(
      series,
      body,
      index,
      &(&hi + BigInt::one()),
      &(&lo - BigInt::one()),
      &step,
      settings,
    )?;
    return simplify(&series.reverse(&inner)?, settings);
  }
  expand(series, body, index, &lo, &hi, &step, settings)
}

pub fn sum_ast(args: &[Expr], settings: &Settings) -> Result<Expr, CalcError> {
  evaluate_series(Series::Sum, args, settings)
}

pub fn prod_ast(args: &[Expr], settings: &Settings) -> Result<Expr, CalcError> {
  evaluate_series(Series::Product, args, settings)
}
