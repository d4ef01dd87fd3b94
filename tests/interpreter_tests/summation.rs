use super::*;

#[test]
fn sum_of_squares() {
  assert_eq!(interpret("sum(n^2, n, 1, 4)").unwrap(), "30");
}

#[test]
fn sum_with_a_step() {
  assert_eq!(interpret("sum(n, n, 1, 10, 3)").unwrap(), "22");
}

#[test]
fn sum_with_a_symbolic_body() {
  assert_eq!(interpret("sum(x^n, n, 1, 2)").unwrap(), "x + x^2");
}

#[test]
fn empty_sum_and_product() {
  assert_eq!(interpret("sum(n, n, 1, 0)").unwrap(), "0");
  assert_eq!(interpret("prod(n, n, 1, 0)").unwrap(), "1");
}

#[test]
fn reversed_ranges() {
  assert_eq!(interpret("sum(n, n, 3, 0)").unwrap(), "-3");
  assert_eq!(interpret("prod(n, n, 4, 1)").unwrap(), "1:6");
}

#[test]
fn factorial_as_a_product() {
  assert_eq!(interpret("prod(n, n, 1, 5)").unwrap(), "120");
}

#[test]
fn gcd_body_at_a_single_point() {
  assert_eq!(interpret("sum(gcd(0, n), n, -1, -1)").unwrap(), "1");
}

#[test]
fn nested_sums_of_gcds() {
  assert_eq!(
    interpret("sum(sum(gcd(n, k), k, -1, 1), n, -1, 1)").unwrap(),
    "8"
  );
}

#[test]
fn symbolic_bounds_stay_unevaluated() {
  assert_eq!(interpret("sum(n, n, 1, m)").unwrap(), "sum(n, n, 1, m)");
}

#[test]
fn step_must_be_positive() {
  assert!(matches!(
    interpret("sum(n, n, 1, 3, 0)"),
    Err(CalcError::Malformed(_))
  ));
}
