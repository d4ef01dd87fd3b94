use super::*;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use symcalc::{Number, choose};

fn c(n: i64, k: i64) -> Number {
  choose(&Number::from(n), &Number::from(k)).unwrap()
}

/// n (n - 1) ... (n - k + 1) / k! for k >= 0.
fn falling(n: i64, k: i64) -> Number {
  let mut value = BigRational::one();
  for i in 0..k {
    value = value * BigRational::from_integer(BigInt::from(n - i))
      / BigRational::from_integer(BigInt::from(i + 1));
  }
  Number::from_rational(value)
}

#[test]
fn choose_forms() {
  assert_eq!(interpret("choose(5, 2)").unwrap(), "10");
  assert_eq!(interpret("choose(-3, 2)").unwrap(), "6");
  assert_eq!(interpret("choose(-3, -5)").unwrap(), "6");
  assert_eq!(interpret("choose(1:2, 3)").unwrap(), "1:16");
  assert_eq!(interpret("choose(n, 2)").unwrap(), "choose(n, 2)");
}

#[test]
fn nonnegative_k_matches_the_falling_factorial() {
  for n in -6..=6 {
    for k in 0..=6 {
      assert_eq!(c(n, k), falling(n, k), "choose({n}, {k})");
    }
  }
}

#[test]
fn negative_k_with_nonnegative_n_is_zero() {
  for n in 0..=6 {
    for k in -6..0 {
      assert_eq!(c(n, k), Number::from(0), "choose({n}, {k})");
    }
  }
}

#[test]
fn symmetry_holds_for_all_integers() {
  for n in -6..=6 {
    for k in -6..=6 {
      assert_eq!(c(n, k), c(n, n - k), "choose({n}, {k})");
    }
  }
}

#[test]
fn pascal_rule_holds_except_at_the_origin() {
  for n in -6..=6 {
    for k in -6..=6 {
      if (n, k) == (0, 0) {
        continue;
      }
      let sum = c(n - 1, k).add(&c(n - 1, k - 1)).unwrap();
      assert_eq!(c(n, k), sum, "choose({n}, {k})");
    }
  }
  assert_eq!(c(0, 0), Number::from(1));
  assert_eq!(c(-1, 0).add(&c(-1, -1)).unwrap(), Number::from(2));
}

#[test]
fn choose_rejects_dates() {
  assert!(matches!(
    interpret("choose(date(2019, 7, 27), 2)"),
    Err(CalcError::NotConverted(_))
  ));
}
