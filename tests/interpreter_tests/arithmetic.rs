use super::*;

// ─── Exact numbers ──────────────────────────────────────────────────────────

#[test]
fn integer_sum() {
  assert_eq!(interpret("1 + 2").unwrap(), "3");
}

#[test]
fn big_integer_power() {
  assert_eq!(
    interpret("2^100").unwrap(),
    "1267650600228229401496703205376"
  );
}

#[test]
fn fractions_stay_exact() {
  assert_eq!(interpret("1:2 + 1:3").unwrap(), "5:6");
  assert_eq!(interpret("6:3").unwrap(), "2");
}

#[test]
fn division_by_zero_is_an_error() {
  assert!(matches!(interpret("1 / 0"), Err(CalcError::DivisionByZero)));
}

// ─── Floats ─────────────────────────────────────────────────────────────────

#[test]
fn decimal_floats_add_exactly() {
  assert_eq!(interpret("0.1 + 0.2").unwrap(), "0.3");
}

#[test]
fn float_and_fraction_mix() {
  assert_eq!(interpret("0.5 + 1:2").unwrap(), "1.");
}

// ─── Like terms and factors ─────────────────────────────────────────────────

#[test]
fn like_terms_merge() {
  assert_eq!(interpret("2 x + 3 x").unwrap(), "5 * x");
  assert_eq!(interpret("2 x - 4 + x").unwrap(), "3 * x - 4");
}

#[test]
fn like_factors_merge() {
  assert_eq!(interpret("x * 2 * x").unwrap(), "2 * x^2");
  assert_eq!(interpret("3 * x / 6").unwrap(), "x / 2");
}

#[test]
fn negation_distributes_over_sums() {
  assert_eq!(interpret("-(x + 1)").unwrap(), "-x - 1");
}

#[test]
fn cancellation_leaves_zero() {
  assert_eq!(interpret("x - x").unwrap(), "0");
}

// ─── Functions ──────────────────────────────────────────────────────────────

#[test]
fn square_roots() {
  assert_eq!(interpret("sqrt(49)").unwrap(), "7");
  assert_eq!(interpret("sqrt(-4)").unwrap(), "(0, 2)");
  assert_eq!(
    interpret_with("sqrt(8)", &symbolic(AngleMode::Degrees)).unwrap(),
    "2 * sqrt(2)"
  );
}

#[test]
fn absolute_value() {
  assert_eq!(interpret("abs(-3)").unwrap(), "3");
  assert_eq!(interpret("abs(-x)").unwrap(), "abs(x)");
}

#[test]
fn gcd_of_integers() {
  assert_eq!(interpret("gcd(12, -18)").unwrap(), "6");
  assert_eq!(interpret("gcd(0, 0)").unwrap(), "0");
}

#[test]
fn gcd_with_zero_is_abs() {
  assert_eq!(interpret("gcd(0, x)").unwrap(), "abs(x)");
  assert_eq!(interpret("gcd(x, 0)").unwrap(), "abs(x)");
}

#[test]
fn unknown_functions_stay_unevaluated() {
  assert_eq!(interpret("f(1 + 1, x)").unwrap(), "f(2, x)");
}

#[test]
fn wrong_arity_is_rejected() {
  assert!(matches!(interpret("gcd(1)"), Err(CalcError::Arity { .. })));
}

// ─── Dates as numbers ───────────────────────────────────────────────────────

#[test]
fn date_plus_days() {
  assert_eq!(
    interpret("date(2019, 7, 27) + 5").unwrap(),
    "<Thu Aug 1, 2019>"
  );
}

#[test]
fn date_difference_is_days() {
  assert_eq!(
    interpret("date(2019, 7, 27) - date(2019, 7, 1)").unwrap(),
    "26"
  );
}

#[test]
fn dates_cannot_be_multiplied() {
  assert!(matches!(
    interpret("2 * date(2019, 7, 27)"),
    Err(CalcError::NotConverted(_))
  ));
}

#[test]
fn collected_sum_snapshot() {
  insta::assert_snapshot!(
    interpret("3 x^2 / y - x^2 / y + 2").unwrap(),
    @"2 * x^2 / y + 2"
  );
}
