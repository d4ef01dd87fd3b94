use super::*;
use num_bigint::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use symcalc::{Number, format_number};

fn in_radix(radix: u32, grouping: bool) -> Settings {
  Settings::default()
    .with_radix(radix)
    .unwrap()
    .with_grouping(grouping)
}

#[test]
fn results_print_in_the_display_radix() {
  assert_eq!(interpret_with("255", &in_radix(16, false)).unwrap(), "16#FF");
  assert_eq!(interpret_with("5", &in_radix(2, false)).unwrap(), "2#101");
  assert_eq!(
    interpret_with("-255", &in_radix(16, false)).unwrap(),
    "-16#FF"
  );
}

#[test]
fn radix_literals_parse() {
  assert_eq!(interpret("16#FF + 1").unwrap(), "256");
  assert_eq!(interpret("2#1010").unwrap(), "10");
  assert!(matches!(
    interpret("2#102"),
    Err(CalcError::Malformed(_))
  ));
}

#[test]
fn grouping() {
  assert_eq!(
    interpret_with("12345678901", &in_radix(10, true)).unwrap(),
    "12,345,678,901"
  );
  assert_eq!(
    interpret_with("12345678901", &in_radix(16, true)).unwrap(),
    "16#2,DFDC,1C35"
  );
}

#[test]
fn fractions_in_another_radix() {
  assert_eq!(interpret_with("1:2", &in_radix(16, false)).unwrap(), "16#1:2");
  assert_eq!(
    interpret_with("31:16", &in_radix(16, false)).unwrap(),
    "16#1F:10"
  );
}

#[test]
fn symbols_are_untouched_by_the_radix() {
  assert_eq!(
    interpret_with("x + 255", &in_radix(16, false)).unwrap(),
    "x + 16#FF"
  );
}

#[test]
fn radix_is_validated() {
  assert!(matches!(
    Settings::default().with_radix(40),
    Err(CalcError::InvalidRadix(40))
  ));
  assert!(matches!(
    format_number(&Number::from(1), 1, false),
    Err(CalcError::InvalidRadix(1))
  ));
}

#[test]
fn random_integers_round_trip() {
  let mut rng = ChaCha8Rng::seed_from_u64(36);
  for _ in 0..200 {
    let value: i64 = rng.gen_range(-1_000_000_000_000..1_000_000_000_000);
    let radix = rng.gen_range(2..=36);
    let text = format_number(&Number::from(value), radix, false).unwrap();
    assert_eq!(
      interpret(&text).unwrap(),
      BigInt::from(value).to_string(),
      "{text}"
    );
  }
}
