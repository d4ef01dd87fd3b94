use super::*;

#[test]
fn det_of_integer_matrix() {
  assert_eq!(interpret("det([[1, 2], [3, 4]])").unwrap(), "-2");
}

#[test]
fn det_needs_row_swaps() {
  assert_eq!(
    interpret("det([[0, 1, 2], [1, 0, 3], [4, -3, 8]])").unwrap(),
    "-2"
  );
}

#[test]
fn det_of_singular_matrix() {
  assert_eq!(interpret("det([[1, 2], [2, 4]])").unwrap(), "0");
}

#[test]
fn det_with_fractions() {
  assert_eq!(interpret("det([[1:2, 1], [1, 4]])").unwrap(), "1");
}

#[test]
fn det_with_a_symbolic_entry() {
  assert_eq!(
    interpret("det([[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 0, 1], [0, 0, a, 0]])")
      .unwrap(),
    "-a"
  );
}

#[test]
fn det_of_symbolic_matrix() {
  assert_eq!(interpret("det([[a, b], [c, d]])").unwrap(), "a * d - b * c");
}

#[test]
fn det_of_non_square_matrix() {
  assert!(matches!(
    interpret("det([[1, 2, 3], [4, 5, 6]])"),
    Err(CalcError::DimensionMismatch(_))
  ));
}

#[test]
fn det_of_a_symbol_stays_unevaluated() {
  assert_eq!(interpret("det(m)").unwrap(), "det(m)");
}

#[test]
fn det_of_one_by_one_matrices() {
  assert_eq!(interpret("det([[5]])").unwrap(), "5");
  assert_eq!(interpret("det([[a]])").unwrap(), "a");
}

#[test]
fn det_of_four_by_four_matrix() {
  assert_eq!(
    interpret("det([[1, 2, 3, 4], [5, 6, 7, 8], [2, 6, 4, 8], [3, 1, 1, 2]])")
      .unwrap(),
    "72"
  );
}
