use super::*;
use symcalc::{Expr, Solution, Symbol, parse_expr, poly_div, solve_system};

// ─── solve ──────────────────────────────────────────────────────────────────

#[test]
fn two_by_two_system() {
  assert_eq!(
    interpret("solve([x + y = 3, 2 x - 3 y = -4], [x, y])").unwrap(),
    "[x = 1, y = 2]"
  );
}

#[test]
fn three_unknowns() {
  assert_eq!(
    interpret("solve([x + y + z = 6, y - z = -1, 2 z = 6], [x, y, z])")
      .unwrap(),
    "[x = 1, y = 2, z = 3]"
  );
}

#[test]
fn bindings_follow_the_unknowns_order() {
  assert_eq!(
    interpret("solve([x + y = 3, x - y = 1], [y, x])").unwrap(),
    "[y = 1, x = 2]"
  );
}

#[test]
fn single_equation_without_vectors() {
  assert_eq!(interpret("solve(2 x = 6, x)").unwrap(), "[x = 3]");
}

#[test]
fn symbolic_right_hand_side() {
  assert_eq!(interpret("solve(x - a = 0, x)").unwrap(), "[x = a]");
}

#[test]
fn inconsistent_system_stays_unevaluated() {
  assert_eq!(
    interpret("solve([x + y = 1, x + y = 2], [x, y])").unwrap(),
    "solve([x + y = 1, x + y = 2], [x, y])"
  );
}

#[test]
fn unsolved_systems_echo_the_input_as_written() {
  assert_eq!(
    interpret("solve([x + x + y = 1, x + x + y = 2], [x, y])").unwrap(),
    "solve([x + x + y = 1, x + x + y = 2], [x, y])"
  );
}

#[test]
fn tagged_result_distinguishes_failures() {
  let settings = Settings::default();
  let unknowns = parse_expr("[x, y]").unwrap();
  let inconsistent = parse_expr("[x + y = 1, x + y = 2]").unwrap();
  assert_eq!(
    solve_system(&inconsistent, &unknowns, &settings).unwrap(),
    Solution::Inconsistent
  );
  let dependent = parse_expr("[x + y = 1, 2 x + 2 y = 2]").unwrap();
  assert_eq!(
    solve_system(&dependent, &unknowns, &settings).unwrap(),
    Solution::Underdetermined
  );
  let solvable = parse_expr("[x + y = 1, x - y = 1]").unwrap();
  assert_eq!(
    solve_system(&solvable, &unknowns, &settings).unwrap(),
    Solution::Solved(vec![
      (Symbol::new("x"), Expr::int(1)),
      (Symbol::new("y"), Expr::int(0)),
    ])
  );
}

#[test]
fn equation_count_must_match() {
  assert!(matches!(
    interpret("solve([x = 1], [x, y])"),
    Err(CalcError::DimensionMismatch(_))
  ));
}

// ─── Polynomial division ────────────────────────────────────────────────────

#[test]
fn pdiv_and_prem() {
  assert_eq!(interpret("pdiv(2 x^3 + 1, x^2 + 2 x)").unwrap(), "2 * x - 4");
  assert_eq!(interpret("prem(2 x^3 + 1, x^2 + 2 x)").unwrap(), "8 * x + 1");
}

#[test]
fn division_log_lines() {
  let dividend = parse_expr("2 x^3 + 1").unwrap();
  let divisor = parse_expr("x^2 + 2 x").unwrap();
  let division = poly_div(&dividend, &divisor, None).unwrap();
  assert_eq!(division.log_text(), "pdiv 2 * x - 4\nprem 8 * x + 1\n");
}

#[test]
fn explicit_variable() {
  assert_eq!(interpret("prem(y^2, y + 1, y)").unwrap(), "1");
}

#[test]
fn polynomial_gcd() {
  assert_eq!(
    interpret("pgcd(x^2 - 1, x^2 - 2 x + 1)").unwrap(),
    "x - 1"
  );
}

#[test]
fn ambiguous_variable_is_rejected() {
  assert!(matches!(
    interpret("pdiv(x + y, x)"),
    Err(CalcError::Malformed(_))
  ));
}

#[test]
fn division_by_the_zero_polynomial() {
  assert!(matches!(
    interpret("pdiv(x^2, 0)"),
    Err(CalcError::DivisionByZero)
  ));
}
