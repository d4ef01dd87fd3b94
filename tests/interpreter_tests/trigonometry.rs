use super::*;
use symcalc::{evaluate_numeric, parse_expr};

fn numeric(input: &str, settings: &Settings) -> String {
  evaluate_numeric(&parse_expr(input).unwrap(), settings)
    .unwrap()
    .to_string()
}

// ─── Exact values ───────────────────────────────────────────────────────────

#[test]
fn radians_lattice() {
  let rad = symbolic(AngleMode::Radians);
  assert_eq!(interpret_with("sin(pi / 4)", &rad).unwrap(), "sqrt(2) / 2");
  assert_eq!(interpret_with("cos(pi / 4)", &rad).unwrap(), "sqrt(2) / 2");
  assert_eq!(interpret_with("tan(pi / 3)", &rad).unwrap(), "sqrt(3)");
  assert_eq!(interpret_with("cos(pi)", &rad).unwrap(), "-1");
}

#[test]
fn degrees_lattice() {
  let deg = symbolic(AngleMode::Degrees);
  assert_eq!(interpret_with("sin(30)", &deg).unwrap(), "1:2");
  assert_eq!(interpret_with("sec(60)", &deg).unwrap(), "2");
  assert_eq!(interpret_with("cot(45)", &deg).unwrap(), "1");
}

#[test]
fn tagged_angles_ignore_the_mode() {
  let deg = symbolic(AngleMode::Degrees);
  assert_eq!(
    interpret_with("sin(pi / 4 rad)", &deg).unwrap(),
    "sqrt(2) / 2"
  );
}

#[test]
fn poles_stay_unevaluated() {
  let deg = symbolic(AngleMode::Degrees);
  assert_eq!(interpret_with("tan(90)", &deg).unwrap(), "tan(90)");
  assert_eq!(interpret_with("csc(0)", &deg).unwrap(), "csc(0)");
}

#[test]
fn parity() {
  let rad = symbolic(AngleMode::Radians);
  assert_eq!(interpret_with("sin(-x)", &rad).unwrap(), "-sin(x)");
  assert_eq!(interpret_with("cos(-x)", &rad).unwrap(), "cos(x)");
}

#[test]
fn symbolic_mode_off_never_rewrites() {
  assert_eq!(interpret("sin(30)").unwrap(), "sin(30)");
  let rad = Settings::default().with_angle_mode(AngleMode::Radians);
  assert_eq!(interpret_with("sin(pi / 4)", &rad).unwrap(), "sin(pi / 4)");
}

// ─── Numeric evaluation ─────────────────────────────────────────────────────

#[test]
fn bare_angles_follow_the_mode() {
  let deg = Settings::default();
  let rad = deg.with_angle_mode(AngleMode::Radians);
  assert_eq!(numeric("sin(30)", &deg), "0.5");
  assert_eq!(numeric("sin(30)", &rad), "-0.988031624093");
}

#[test]
fn tagged_angles_in_numeric_mode() {
  let rad = Settings::default().with_angle_mode(AngleMode::Radians);
  assert_eq!(numeric("cos(60 deg)", &rad), "0.5");
}

#[test]
fn constants_approximate() {
  assert_eq!(numeric("pi", &Settings::default()), "3.14159265359");
  assert_eq!(numeric("sqrt(2)", &Settings::default()), "1.41421356237");
}
