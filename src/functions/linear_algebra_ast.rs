//! Determinants of square matrices given as vectors of row vectors.

use crate::CalcError;
use crate::evaluator::{add_exprs, mul_exprs, simplify, sub_exprs};
use crate::number::Number;
use crate::settings::Settings;
use crate::syntax::{Expr, Op};

/// Helper: extract the rows of a square matrix.
fn expr_to_matrix(expr: &Expr) -> Result<Vec<Vec<Expr>>, CalcError> {
  let rows = match expr {
    Expr::Form { op: Op::Vec, args } => args,
    _ => {
      return Err(CalcError::DimensionMismatch(format!(
        "{expr} is not a matrix"
      )));
    }
  };
  let n = rows.len();
  if n == 0 {
    return Err(CalcError::DimensionMismatch("empty matrix".into()));
  }
  rows
    .iter()
    .enumerate()
    .map(|(i, row)| match row {
      Expr::Form { op: Op::Vec, args } if args.len() == n => Ok(args.clone()),
      Expr::Form { op: Op::Vec, args } => Err(CalcError::DimensionMismatch(
        format!("row {} has {} entries, expected {n}", i + 1, args.len()),
      )),
      _ => Err(CalcError::DimensionMismatch(format!(
        "row {} is not a vector",
        i + 1
      ))),
    })
    .collect()
}

fn numeric_matrix(matrix: &[Vec<Expr>]) -> Option<Vec<Vec<Number>>> {
  matrix
    .iter()
    .map(|row| {
      row
        .iter()
        .map(|e| match e {
          Expr::Num(n) if !n.is_date() => Some(n.clone()),
          _ => None,
        })
        .collect()
    })
    .collect()
}

/// Gaussian elimination over the numeric tower; exact for exact entries.
fn numeric_determinant(mut m: Vec<Vec<Number>>) -> Result<Number, CalcError> {
  let n = m.len();
  let mut det = Number::one();
  for col in 0..n {
    let Some(pivot) = (col..n).find(|&r| !m[r][col].is_zero()) else {
      return Ok(Number::zero());
    };
    if pivot != col {
      m.swap(pivot, col);
      det = det.neg()?;
    }
    det = det.mul(&m[col][col])?;
    for r in col + 1..n {
      if m[r][col].is_zero() {
        continue;
      }
      let factor = m[r][col].div(&m[col][col])?;
      for c in col..n {
        let delta = factor.mul(&m[col][c])?;
        m[r][c] = m[r][c].sub(&delta)?;
      }
    }
  }
  Ok(det)
}

/// Cofactor expansion along the first row, skipping zero entries.
fn symbolic_determinant(matrix: &[Vec<Expr>]) -> Result<Expr, CalcError> {
  let n = matrix.len();
  if n == 1 {
    return Ok(matrix[0][0].clone());
  }
  let mut det = Expr::int(0);
  for j in 0..n {
    if matrix[0][j].is_zero() {
      continue;
    }
    let minor: Vec<Vec<Expr>> = matrix[1..]
      .iter()
      .map(|row| {
        row
          .iter()
          .enumerate()
          .filter(|&(k, _)| k != j)
          .map(|(_, e)| e.clone())
          .collect()
      })
      .collect();
    let cofactor = mul_exprs(&matrix[0][j], &symbolic_determinant(&minor)?)?;
    det = if j % 2 == 0 {
      add_exprs(&det, &cofactor)?
    } else {
      sub_exprs(&det, &cofactor)?
    };
  }
  Ok(det)
}

/// Determinant of a square matrix.
pub fn det(matrix: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  let rows = expr_to_matrix(matrix)?;
  match numeric_matrix(&rows) {
    Some(m) => Ok(Expr::Num(numeric_determinant(m)?)),
    None => simplify(&symbolic_determinant(&rows)?, settings),
  }
}

/// det(m); anything that is not a vector stays unevaluated.
pub fn det_ast(m: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  if m.is_op(&Op::Vec) {
    det(m, settings)
  } else {
    Ok(Expr::call("det", vec![m.clone()]))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse_expr;

  fn det_of(input: &str) -> Result<String, CalcError> {
    det(&parse_expr(input).unwrap(), &Settings::default())
      .map(|e| e.to_string())
  }

  #[test]
  fn numeric_determinants() {
    assert_eq!(det_of("[[1, 2], [3, 4]]").unwrap(), "-2");
    assert_eq!(det_of("[[0, 1], [1, 0]]").unwrap(), "-1");
    assert_eq!(det_of("[[2, 0, 0], [0, 3, 0], [0, 0, 1:2]]").unwrap(), "3");
    assert_eq!(det_of("[[1, 2], [2, 4]]").unwrap(), "0");
  }

  #[test]
  fn symbolic_entry() {
    assert_eq!(
      det_of("[[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 0, 1], [0, 0, a, 0]]")
        .unwrap(),
      "-a"
    );
    assert_eq!(det_of("[[a, b], [c, d]]").unwrap(), "a * d - b * c");
  }

  #[test]
  fn shape_errors() {
    assert!(matches!(
      det_of("[[1, 2, 3], [4, 5, 6]]"),
      Err(CalcError::DimensionMismatch(_))
    ));
    assert!(matches!(
      det_of("[[1, 2], [3]]"),
      Err(CalcError::DimensionMismatch(_))
    ));
  }

  #[test]
  fn non_vectors_stay_unevaluated() {
    let m = Expr::var("m");
    assert_eq!(
      det_ast(&m, &Settings::default()).unwrap(),
      Expr::call("det", vec![m.clone()])
    );
  }
}
