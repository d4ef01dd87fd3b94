use super::*;
use chrono::Datelike;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use symcalc::functions::datetime_ast::to_naive_date;
use symcalc::{
  absolute_from_gregorian, absolute_from_julian, date_from_julian_day_number,
  date_to_gregorian, date_to_julian, julian_day_number, weekday,
};

// ─── Forms ──────────────────────────────────────────────────────────────────

#[test]
fn date_from_parts() {
  assert_eq!(
    interpret("date(2019, 7, 27)").unwrap(),
    "<Sat Jul 27, 2019>"
  );
  assert_eq!(interpret("date(2019, 7)").unwrap(), "<Mon Jul 1, 2019>");
}

#[test]
fn date_from_absolute_day() {
  assert_eq!(interpret("date(737267)").unwrap(), "<Sat Jul 27, 2019>");
}

#[test]
fn julian_day_numbers() {
  assert_eq!(interpret("julian(date(2019, 7, 27))").unwrap(), "2458692");
  assert_eq!(interpret("julian(2458692)").unwrap(), "<Sat Jul 27, 2019>");
}

#[test]
fn invalid_dates() {
  assert!(matches!(
    interpret("date(2019, 2, 29)"),
    Err(CalcError::InvalidDate(_))
  ));
  assert!(matches!(
    interpret("date(2019, 13, 1)"),
    Err(CalcError::InvalidDate(_))
  ));
}

#[test]
fn symbolic_date_stays_unevaluated() {
  assert_eq!(interpret("date(y, 1, 1)").unwrap(), "date(y, 1, 1)");
}

// ─── Calendar arithmetic ────────────────────────────────────────────────────

#[test]
fn reference_days() {
  assert_eq!(absolute_from_gregorian(1, 1, 1).unwrap(), 1);
  assert_eq!(date_to_gregorian(0), (-1, 12, 31));
  assert_eq!(julian_day_number(0), 1721425);
  assert_eq!(date_to_gregorian(-1721425), (-4714, 11, 24));
}

#[test]
fn julian_and_gregorian_agree_on_the_same_day() {
  let day = absolute_from_gregorian(2019, 7, 27).unwrap();
  assert_eq!(absolute_from_julian(2019, 7, 14).unwrap(), day);
  assert_eq!(date_to_julian(day), (2019, 7, 14));
}

#[test]
fn there_is_no_year_zero() {
  assert!(matches!(
    absolute_from_gregorian(0, 3, 1),
    Err(CalcError::InvalidDate(_))
  ));
  assert!(matches!(
    interpret("date(0, 1, 1)"),
    Err(CalcError::InvalidDate(_))
  ));
  assert_eq!(
    absolute_from_gregorian(1, 1, 1).unwrap()
      - absolute_from_gregorian(-1, 1, 1).unwrap(),
    366
  );
}

#[test]
fn round_trips_through_julian_day_numbers() {
  let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
  for _ in 0..500 {
    let day: i64 = rng.gen_range(-2_000_000..3_000_000);
    assert_eq!(
      date_from_julian_day_number(julian_day_number(day)).unwrap(),
      day
    );
    let (y, m, d) = date_to_gregorian(day);
    assert_eq!(absolute_from_gregorian(y, m, d).unwrap(), day);
    let (y, m, d) = date_to_julian(day);
    assert_eq!(absolute_from_julian(y, m, d).unwrap(), day);
  }
}

#[test]
fn agrees_with_chrono_in_the_common_era() {
  let mut rng = ChaCha8Rng::seed_from_u64(2019);
  for _ in 0..500 {
    let day: i64 = rng.gen_range(1..3_000_000);
    let date = to_naive_date(day).unwrap();
    let (y, m, d) = date_to_gregorian(day);
    assert_eq!(
      (i64::from(date.year()), i64::from(date.month()), i64::from(date.day())),
      (y, m, d),
      "absolute day {day}"
    );
    assert_eq!(
      weekday(day),
      i64::from(date.weekday().num_days_from_sunday()),
      "absolute day {day}"
    );
  }
}

#[test]
fn huge_day_numbers_are_invalid_dates() {
  for input in [
    "julian(-9223372036854775808)",
    "date(9223372036854775807)",
    "date(9223372036854775807) + 1",
    "date(-9223372036854775807, 1, 1)",
    "date(1000000000000) + 1",
    "date(-1000000000000) - 1",
  ] {
    assert!(
      matches!(interpret(input), Err(CalcError::InvalidDate(_))),
      "{input}"
    );
  }
}

#[test]
fn far_dates_inside_the_range_still_work() {
  assert_eq!(
    interpret("date(1000000000000) - date(-1000000000000)").unwrap(),
    "2000000000000"
  );
}
