#[allow(unused_imports)]
use super::*;
use num_traits::{One, ToPrimitive};
use tracing::{debug, trace, warn};

use crate::CalcError;
use crate::functions::polynomial_ast::solve;
use crate::number::{DEFAULT_PRECISION, Float, Number};
use crate::settings::Settings;
use crate::syntax::{Expr, Op};

const MAX_PASSES: usize = 32;

/// Rewrite `expr` to its simplest equivalent under `settings`.
///
/// Passes run bottom-up until the tree stops changing, so the result is a
/// fixpoint: simplifying it again returns it unchanged.
pub fn simplify(expr: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  let mut current = expr.clone();
  for pass in 0..MAX_PASSES {
    let next = simplify_pass(&current, settings)?;
    if next == current {
      trace!(target: "simplify", pass, "fixpoint");
      return Ok(next);
    }
    debug!(target: "simplify", pass, result = %next, "rewrote");
    current = next;
  }
  warn!(
    target: "simplify",
    input = %expr,
    "no fixpoint after {MAX_PASSES} passes"
  );
  Ok(current)
}

fn simplify_pass(expr: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  match expr {
    Expr::Num(_) | Expr::Var(_) => Ok(expr.clone()),
    // An unsolved system comes back exactly as written.
    Expr::Form {
      op: Op::Call(name),
      args,
    } if name == "solve" && args.len() == 2 => {
      solve(&args[0], &args[1], settings)
    }
    Expr::Form { op, args } => {
      let args = args
        .iter()
        .map(|a| simplify_pass(a, settings))
        .collect::<Result<Vec<_>, _>>()?;
      apply_rules(op, args, settings)
    }
  }
}

fn apply_rules(
  op: &Op,
  args: Vec<Expr>,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  match op {
    Op::Add | Op::Sub | Op::Neg => collect_sum(&Expr::Form {
      op: op.clone(),
      args,
    }),
    Op::Mul | Op::Div => collect_product(&Expr::Form {
      op: op.clone(),
      args,
    }),
    Op::Pow => match <[Expr; 2]>::try_from(args) {
      Ok([base, exponent]) => simplify_power(base, exponent),
      Err(args) => Ok(Expr::Form {
        op: Op::Pow,
        args,
      }),
    },
    Op::Eq | Op::Vec => Ok(Expr::Form {
      op: op.clone(),
      args,
    }),
    Op::Call(name) => evaluate_function_call_ast(name, args, settings),
  }
}

fn simplify_power(base: Expr, exponent: Expr) -> Result<Expr, CalcError> {
  match (&base, &exponent) {
    (_, Expr::Num(Number::Integer(_))) => {
      collect_product(&Expr::power(base, exponent))
    }
    (_, Expr::Num(Number::Fraction(r)))
      if r.numer().is_one() && r.denom().to_u32() == Some(2) =>
    {
      Ok(Expr::call("sqrt", vec![base]))
    }
    (Expr::Num(b), Expr::Num(e))
      if b.is_real()
        && e.is_real()
        && !b.is_negative()
        && (matches!(b, Number::Float(_)) || matches!(e, Number::Float(_))) =>
    {
      let value = match (b.to_f64(), e.to_f64()) {
        (Some(b), Some(e)) => Float::from_f64(b.powf(e), DEFAULT_PRECISION),
        _ => None,
      };
      Ok(match value {
        Some(f) => Expr::Num(Number::Float(f)),
        None => Expr::power(base, exponent),
      })
    }
    _ => Ok(Expr::power(base, exponent)),
  }
}
