//! Calendar arithmetic on absolute day numbers.
//!
//! Day 1 is Monday, January 1 of year 1 in the proleptic Gregorian
//! calendar. Years count ..., -2, -1, 1, 2, ... with no year 0; year -1
//! is the year before year 1 and is a leap year in both calendars.

use chrono::{Datelike, NaiveDate};
use num_traits::ToPrimitive;

use crate::CalcError;
use crate::number::Number;
use crate::syntax::Expr;

/// Julian day number of absolute day 0.
const JDN_OFFSET: i64 = 1_721_425;

/// Largest absolute day (either side of day 0) a Date may hold.
pub const MAX_DAY: i64 = 1_000_000_000_000;

/// Largest year (either sign) accepted when building a date.
const MAX_YEAR: i64 = 1_000_000_000;

/// `day` as a Date, or `InvalidDate` when it is missing (overflowed) or
/// outside `-MAX_DAY..=MAX_DAY`.
pub fn checked_day(day: Option<i64>) -> Result<i64, CalcError> {
  match day {
    Some(d) if (-MAX_DAY..=MAX_DAY).contains(&d) => Ok(d),
    Some(d) => Err(CalcError::InvalidDate(format!("day {d} out of range"))),
    None => Err(CalcError::InvalidDate("day out of range".to_string())),
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Calendar {
  Gregorian,
  Julian,
}

/// Year on a number line that includes 0 (year -1 becomes 0).
fn astronomical(year: i64) -> i64 {
  if year < 0 { year + 1 } else { year }
}

fn displayed(year: i64) -> i64 {
  if year <= 0 { year - 1 } else { year }
}

impl Calendar {
  fn is_leap(self, a: i64) -> bool {
    match self {
      Calendar::Gregorian => {
        a.rem_euclid(4) == 0
          && (a.rem_euclid(100) != 0 || a.rem_euclid(400) == 0)
      }
      Calendar::Julian => a.rem_euclid(4) == 0,
    }
  }

  fn days_in_month(self, a: i64, month: i64) -> i64 {
    match month {
      2 if self.is_leap(a) => 29,
      2 => 28,
      4 | 6 | 9 | 11 => 30,
      _ => 31,
    }
  }

  fn day_of_year(self, a: i64, month: i64, day: i64) -> i64 {
    (1..month).map(|m| self.days_in_month(a, m)).sum::<i64>() + day
  }

  /// Absolute day of `day/month` in astronomical year `a`.
  fn absolute(self, a: i64, month: i64, day: i64) -> i64 {
    let prior = a - 1;
    let doy = self.day_of_year(a, month, day);
    match self {
      Calendar::Gregorian => {
        365 * prior + prior.div_euclid(4) - prior.div_euclid(100)
          + prior.div_euclid(400)
          + doy
      }
      Calendar::Julian => 365 * prior + prior.div_euclid(4) + doy - 2,
    }
  }

  /// Astronomical year containing absolute day `d`.
  fn year_of(self, d: i64) -> i64 {
    match self {
      Calendar::Gregorian => {
        let d0 = d - 1;
        let n400 = d0.div_euclid(146_097);
        let d1 = d0.rem_euclid(146_097);
        let n100 = d1 / 36_524;
        let d2 = d1 % 36_524;
        let n4 = d2 / 1461;
        let n1 = (d2 % 1461) / 365;
        let year = 400 * n400 + 100 * n100 + 4 * n4 + n1;
        if n100 == 4 || n1 == 4 { year } else { year + 1 }
      }
      Calendar::Julian => {
        let d0 = d + 1;
        let n4 = d0.div_euclid(1461);
        let n1 = d0.rem_euclid(1461) / 365;
        let year = 4 * n4 + n1;
        if n1 == 4 { year } else { year + 1 }
      }
    }
  }

  fn to_absolute(
    self,
    year: i64,
    month: i64,
    day: i64,
  ) -> Result<i64, CalcError> {
    if year == 0 || !(-MAX_YEAR..=MAX_YEAR).contains(&year) {
      return Err(CalcError::InvalidDate(format!("year {year}")));
    }
    let a = astronomical(year);
    if !(1..=12).contains(&month)
      || day < 1
      || day > self.days_in_month(a, month)
    {
      return Err(CalcError::InvalidDate(format!("{year}-{month}-{day}")));
    }
    Ok(self.absolute(a, month, day))
  }

  fn from_absolute(self, d: i64) -> (i64, i64, i64) {
    let a = self.year_of(d);
    let mut rest = d - self.absolute(a, 1, 1) + 1;
    let mut month = 1;
    while month < 12 && rest > self.days_in_month(a, month) {
      rest -= self.days_in_month(a, month);
      month += 1;
    }
    (displayed(a), month, rest)
  }
}

pub fn absolute_from_gregorian(
  year: i64,
  month: i64,
  day: i64,
) -> Result<i64, CalcError> {
  Calendar::Gregorian.to_absolute(year, month, day)
}

pub fn absolute_from_julian(
  year: i64,
  month: i64,
  day: i64,
) -> Result<i64, CalcError> {
  Calendar::Julian.to_absolute(year, month, day)
}

/// `(year, month, day)` in the proleptic Gregorian calendar.
///
/// Days outside `-MAX_DAY..=MAX_DAY` are not supported.
pub fn date_to_gregorian(absolute: i64) -> (i64, i64, i64) {
  Calendar::Gregorian.from_absolute(absolute)
}

pub fn date_to_julian(absolute: i64) -> (i64, i64, i64) {
  Calendar::Julian.from_absolute(absolute)
}

pub fn julian_day_number(absolute: i64) -> i64 {
  absolute + JDN_OFFSET
}

pub fn date_from_julian_day_number(jdn: i64) -> Result<i64, CalcError> {
  checked_day(jdn.checked_sub(JDN_OFFSET))
}

/// Day of the week, 0 = Sunday.
pub fn weekday(absolute: i64) -> i64 {
  absolute.rem_euclid(7)
}

pub fn day_of_year(absolute: i64) -> i64 {
  let (year, month, day) = date_to_gregorian(absolute);
  Calendar::Gregorian.day_of_year(astronomical(year), month, day)
}

pub fn is_leap_year(year: i64) -> bool {
  Calendar::Gregorian.is_leap(astronomical(year))
}

pub fn is_julian_leap_year(year: i64) -> bool {
  Calendar::Julian.is_leap(astronomical(year))
}

/// The same day as a `chrono` date, when chrono can represent it.
pub fn to_naive_date(absolute: i64) -> Option<NaiveDate> {
  NaiveDate::from_num_days_from_ce_opt(absolute.to_i32()?)
}

pub fn from_naive_date(date: NaiveDate) -> i64 {
  i64::from(date.num_days_from_ce())
}

fn day_name_short(dow: i64) -> &'static str {
  match dow {
    0 => "Sun",
    1 => "Mon",
    2 => "Tue",
    3 => "Wed",
    4 => "Thu",
    5 => "Fri",
    _ => "Sat",
  }
}

fn month_name_short(month: i64) -> &'static str {
  match month {
    1 => "Jan",
    2 => "Feb",
    3 => "Mar",
    4 => "Apr",
    5 => "May",
    6 => "Jun",
    7 => "Jul",
    8 => "Aug",
    9 => "Sep",
    10 => "Oct",
    11 => "Nov",
    _ => "Dec",
  }
}

/// `<Sat Jul 27, 2019>`
pub fn format_date(absolute: i64) -> String {
  let (year, month, day) = date_to_gregorian(absolute);
  format!(
    "<{} {} {}, {}>",
    day_name_short(weekday(absolute)),
    month_name_short(month),
    day,
    year
  )
}

// ─── Forms ──────────────────────────────────────────────────────────────────

fn whole(expr: &Expr) -> Option<i64> {
  match expr.as_number()? {
    n @ Number::Integer(_) => n.to_i64(),
    _ => None,
  }
}

/// `date(n)`, `date(y, m)` or `date(y, m, d)`.
pub fn date_ast(args: &[Expr]) -> Result<Expr, CalcError> {
  let parts: Option<Vec<i64>> = args.iter().map(whole).collect();
  let day = match parts.as_deref() {
    Some([n]) => checked_day(Some(*n))?,
    Some([y, m]) => absolute_from_gregorian(*y, *m, 1)?,
    Some([y, m, d]) => absolute_from_gregorian(*y, *m, *d)?,
    _ => {
      if let [Expr::Num(n @ Number::Date(_))] = args {
        return Ok(Expr::Num(n.clone()));
      }
      return Ok(Expr::call("date", args.to_vec()));
    }
  };
  Ok(Expr::Num(Number::Date(day)))
}

/// `julian(date)` is the Julian day number; `julian(n)` is the date with
/// that day number.
pub fn julian_ast(d: &Expr) -> Result<Expr, CalcError> {
  match d {
    Expr::Num(Number::Date(day)) => Ok(Expr::int(julian_day_number(*day))),
    _ => match whole(d) {
      Some(jdn) => {
        Ok(Expr::Num(Number::Date(date_from_julian_day_number(jdn)?)))
      }
      None => Ok(Expr::call("julian", vec![d.clone()])),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_days() {
    assert_eq!(absolute_from_gregorian(2019, 7, 27).unwrap(), 737267);
    assert_eq!(date_to_gregorian(737267), (2019, 7, 27));
    assert_eq!(date_to_gregorian(1), (1, 1, 1));
    assert_eq!(date_to_gregorian(0), (-1, 12, 31));
    assert_eq!(date_to_gregorian(-1721425), (-4714, 11, 24));
  }

  #[test]
  fn julian_day_numbers() {
    assert_eq!(julian_day_number(737267), 2458692);
    assert_eq!(julian_day_number(0), 1721425);
    assert_eq!(date_from_julian_day_number(2458692).unwrap(), 737267);
  }

  #[test]
  fn julian_calendar_lags_by_thirteen_days() {
    assert_eq!(absolute_from_julian(2019, 7, 14).unwrap(), 737267);
    assert_eq!(date_to_julian(737267), (2019, 7, 14));
  }

  #[test]
  fn there_is_no_year_zero() {
    assert!(matches!(
      absolute_from_gregorian(0, 3, 1),
      Err(CalcError::InvalidDate(_))
    ));
    assert!(matches!(
      absolute_from_julian(0, 3, 1),
      Err(CalcError::InvalidDate(_))
    ));
    let day = absolute_from_gregorian(-1, 3, 1).unwrap();
    assert_eq!(date_to_gregorian(day), (-1, 3, 1));
    assert!(is_leap_year(-1));
    assert!(is_julian_leap_year(-1));
    assert!(!is_leap_year(1900));
    assert!(is_julian_leap_year(1900));
  }

  #[test]
  fn rejects_impossible_dates() {
    assert!(matches!(
      absolute_from_gregorian(2019, 2, 29),
      Err(CalcError::InvalidDate(_))
    ));
    assert!(matches!(
      absolute_from_julian(2019, 13, 1),
      Err(CalcError::InvalidDate(_))
    ));
  }

  #[test]
  fn weekdays_and_formatting() {
    assert_eq!(weekday(737267), 6);
    assert_eq!(weekday(1), 1);
    assert_eq!(format_date(737267), "<Sat Jul 27, 2019>");
    assert_eq!(day_of_year(737267), 208);
  }

  #[test]
  fn agrees_with_chrono() {
    let date = NaiveDate::from_ymd_opt(2019, 7, 27).unwrap();
    assert_eq!(to_naive_date(737267), Some(date));
    assert_eq!(from_naive_date(date), 737267);
  }

  #[test]
  fn forms() {
    let date =
      date_ast(&[Expr::int(2019), Expr::int(7), Expr::int(27)]).unwrap();
    assert_eq!(date, Expr::Num(Number::Date(737267)));
    assert_eq!(julian_ast(&date).unwrap(), Expr::int(2458692));
    assert_eq!(julian_ast(&Expr::int(2458692)).unwrap(), date);
    let x = Expr::var("x");
    assert_eq!(
      julian_ast(&x).unwrap(),
      Expr::call("julian", vec![x.clone()])
    );
  }

  #[test]
  fn days_out_of_range_are_rejected() {
    assert!(checked_day(Some(MAX_DAY)).is_ok());
    assert!(matches!(
      checked_day(Some(i64::MAX)),
      Err(CalcError::InvalidDate(_))
    ));
    assert!(matches!(checked_day(None), Err(CalcError::InvalidDate(_))));
    assert!(matches!(
      date_from_julian_day_number(i64::MIN),
      Err(CalcError::InvalidDate(_))
    ));
    assert!(matches!(
      absolute_from_gregorian(-i64::MAX, 1, 1),
      Err(CalcError::InvalidDate(_))
    ));
    assert!(matches!(
      date_ast(&[Expr::int(i64::MAX)]),
      Err(CalcError::InvalidDate(_))
    ));
  }
}
