#[allow(unused_imports)]
use super::*;
use crate::syntax::{Expr, Symbol};

/// Replace every free occurrence of `symbol` with `value`.
///
/// `sum` and `prod` bind their index variable: inside a nested call that
/// reuses the same index only the bounds are rewritten.
pub fn substitute(expr: &Expr, symbol: &Symbol, value: &Expr) -> Expr {
  match expr {
    Expr::Var(s) if s == symbol => value.clone(),
    Expr::Num(_) | Expr::Var(_) => expr.clone(),
    Expr::Form { op, args } => {
      let bound = binds_index(expr, symbol);
      Expr::Form {
        op: op.clone(),
        args: args
          .iter()
          .enumerate()
          .map(|(i, arg)| {
            if bound && i < 2 {
              arg.clone()
            } else {
              substitute(arg, symbol, value)
            }
          })
          .collect(),
      }
    }
  }
}

fn binds_index(expr: &Expr, symbol: &Symbol) -> bool {
  (expr.is_call("sum") || expr.is_call("prod"))
    && expr.args().get(1).and_then(Expr::as_symbol) == Some(symbol)
}

/// Replace symbols for which `f` yields a value.
pub fn replace_symbols(
  expr: &Expr,
  f: &dyn Fn(&Symbol) -> Option<Expr>,
) -> Expr {
  match expr {
    Expr::Var(s) => f(s).unwrap_or_else(|| expr.clone()),
    Expr::Num(_) => expr.clone(),
    Expr::Form { op, args } => Expr::Form {
      op: op.clone(),
      args: args.iter().map(|a| replace_symbols(a, f)).collect(),
    },
  }
}
