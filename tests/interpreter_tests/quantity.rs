use super::*;
use symcalc::{convert_units, parse_expr};

// ─── Removing and extracting ────────────────────────────────────────────────

#[test]
fn remove_units_keeps_the_magnitude() {
  assert_eq!(interpret("remove_units(-1 m * cm)").unwrap(), "-1");
  assert_eq!(interpret("remove_units(5 kg * m / s^2)").unwrap(), "5");
}

#[test]
fn remove_units_leaves_other_symbols() {
  assert_eq!(interpret("remove_units(3 x ft)").unwrap(), "3 * x");
}

#[test]
fn extract_units_folds_scale_into_units() {
  assert_eq!(
    interpret("extract_units(-1 m * cm)").unwrap(),
    "0.01 * m^2"
  );
}

#[test]
fn extract_units_of_a_rate() {
  assert_eq!(interpret("extract_units(60 mi / hr)").unwrap(), "mi / hr");
}

// ─── Conversion ─────────────────────────────────────────────────────────────

#[test]
fn convert_with_inferred_units() {
  assert_eq!(interpret("convert_units(-1 m, cm)").unwrap(), "-100 * cm");
  assert_eq!(interpret("convert_units(2 ft, in)").unwrap(), "24 * in");
}

#[test]
fn convert_with_explicit_old_units() {
  assert_eq!(interpret("convert_units(3, hr, min)").unwrap(), "180 * min");
}

#[test]
fn convert_compound_units() {
  assert_eq!(
    interpret("convert_units(1 km / hr, m / s)").unwrap(),
    "5 * m / (18 * s)"
  );
}

#[test]
fn convert_prefixed_units() {
  assert_eq!(
    interpret("convert_units(3 kWh, J)").unwrap(),
    "10800000 * J"
  );
}

#[test]
fn convert_angles_brings_in_pi() {
  assert_eq!(
    interpret("convert_units(30 deg, rad)").unwrap(),
    "pi * rad / 6"
  );
}

#[test]
fn incompatible_units() {
  assert!(matches!(
    interpret("convert_units(1 m, s)"),
    Err(CalcError::IncompatibleUnits(_, _))
  ));
}

#[test]
fn nothing_to_convert() {
  let settings = Settings::default();
  let five = parse_expr("5").unwrap();
  let m = parse_expr("m").unwrap();
  assert!(matches!(
    convert_units(&five, None, &m, &settings),
    Err(CalcError::Unitless)
  ));
}

#[test]
fn usimplify_merges_same_dimension_units() {
  assert_eq!(
    interpret("usimplify(2 ft * in)").unwrap(),
    "0.166666666667 * ft^2"
  );
}

#[test]
fn sums_convert_each_term() {
  assert_eq!(
    interpret("convert_units(3 m + 2 cm, cm)").unwrap(),
    "302 * cm"
  );
  assert!(matches!(
    interpret("extract_units(3 m + 2 cm)"),
    Err(CalcError::Malformed(_))
  ));
  assert!(matches!(
    interpret("convert_units(3 m + 2 kg, cm)"),
    Err(CalcError::IncompatibleUnits(_, _))
  ));
}
