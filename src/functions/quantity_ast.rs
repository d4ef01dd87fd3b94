//! Physical units as symbolic factors: `5 ft`, `3 m / s^2`, `20 kWh`.
//!
//! A unit is a symbol found in the unit table, optionally behind an SI
//! prefix. Scales are exact rationals relative to SI base units, times a
//! power of π for angles.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use tracing::debug;

use crate::CalcError;
use crate::evaluator::{
  Term, collect_product, constant_value, replace_symbols, simplify,
};
use crate::number::{Float, Number, not_converted};
use crate::settings::Settings;
use crate::syntax::{Expr, Op};

// ─── Unit dimension system ──────────────────────────────────────────────────

/// Exponents of length, mass, time, current, temperature, amount,
/// luminosity and angle.
type Dims = [i32; 8];

const L: usize = 0;
const M: usize = 1;
const T: usize = 2;
const I: usize = 3;
const THETA: usize = 4;
const N: usize = 5;
const J: usize = 6;
const ANGLE: usize = 7;

fn dims(pairs: &[(usize, i32)]) -> Dims {
  let mut d = [0; 8];
  for &(i, e) in pairs {
    d[i] = e;
  }
  d
}

#[derive(Debug, Clone, PartialEq)]
struct UnitInfo {
  dims: Dims,
  scale: BigRational,
  pi_power: i32,
}

struct UnitDef {
  name: &'static str,
  dims: &'static [(usize, i32)],
  numer: i128,
  denom: i128,
  pi_power: i32,
  prefixable: bool,
}

const fn unit(
  name: &'static str,
  dims: &'static [(usize, i32)],
  numer: i128,
  denom: i128,
  prefixable: bool,
) -> UnitDef {
  UnitDef {
    name,
    dims,
    numer,
    denom,
    pi_power: 0,
    prefixable,
  }
}

const fn angle(name: &'static str, denom: i128) -> UnitDef {
  UnitDef {
    name,
    dims: &[(ANGLE, 1)],
    numer: 1,
    denom,
    pi_power: 1,
    prefixable: false,
  }
}

const VOLUME: &[(usize, i32)] = &[(L, 3)];
const FORCE: &[(usize, i32)] = &[(L, 1), (M, 1), (T, -2)];
const ENERGY: &[(usize, i32)] = &[(L, 2), (M, 1), (T, -2)];
const POWER: &[(usize, i32)] = &[(L, 2), (M, 1), (T, -3)];
const PRESSURE: &[(usize, i32)] = &[(L, -1), (M, 1), (T, -2)];
const SPEED: &[(usize, i32)] = &[(L, 1), (T, -1)];

#[rustfmt::skip]
const UNITS: &[UnitDef] = &[
  // Length
  unit("m", &[(L, 1)], 1, 1, true),
  unit("in", &[(L, 1)], 127, 5000, false),
  unit("ft", &[(L, 1)], 381, 1250, false),
  unit("yd", &[(L, 1)], 1143, 1250, false),
  unit("mi", &[(L, 1)], 201168, 125, false),
  unit("nmi", &[(L, 1)], 1852, 1, false),
  unit("au", &[(L, 1)], 149597870700, 1, false),
  unit("ly", &[(L, 1)], 9460730472580800, 1, false),
  unit("Ang", &[(L, 1)], 1, 10_000_000_000, false),
  // Mass
  unit("g", &[(M, 1)], 1, 1000, true),
  unit("lb", &[(M, 1)], 45359237, 100000000, false),
  unit("oz", &[(M, 1)], 45359237, 1600000000, false),
  unit("t", &[(M, 1)], 1000, 1, false),
  unit("ton", &[(M, 1)], 45359237, 50000, false),
  // Time
  unit("s", &[(T, 1)], 1, 1, true),
  unit("min", &[(T, 1)], 60, 1, false),
  unit("hr", &[(T, 1)], 3600, 1, false),
  unit("day", &[(T, 1)], 86400, 1, false),
  unit("wk", &[(T, 1)], 604800, 1, false),
  unit("yr", &[(T, 1)], 31557600, 1, false),
  // Angle
  unit("rad", &[(ANGLE, 1)], 1, 1, true),
  angle("deg", 180),
  angle("arcmin", 10800),
  angle("arcsec", 648000),
  // Volume
  unit("L", VOLUME, 1, 1000, true),
  unit("gal", VOLUME, 473176473, 125000000000, false),
  unit("qt", VOLUME, 473176473, 500000000000, false),
  unit("pt", VOLUME, 473176473, 1000000000000, false),
  unit("cup", VOLUME, 473176473, 2000000000000, false),
  unit("floz", VOLUME, 473176473, 16000000000000, false),
  // Area
  unit("ha", &[(L, 2)], 10000, 1, false),
  unit("acre", &[(L, 2)], 316160658, 78125, false),
  // Frequency
  unit("Hz", &[(T, -1)], 1, 1, true),
  // Force
  unit("N", FORCE, 1, 1, true),
  unit("lbf", FORCE, 8896443230521, 2000000000000, false),
  // Energy
  unit("J", ENERGY, 1, 1, true),
  unit("cal", ENERGY, 523, 125, true),
  unit("eV", ENERGY, 1602176634, 10_000_000_000_000_000_000_000_000_000, true),
  unit("Wh", ENERGY, 3600, 1, true),
  // Power
  unit("W", POWER, 1, 1, true),
  unit("hp", POWER, 37284993579113511, 50000000000000, false),
  // Pressure
  unit("Pa", PRESSURE, 1, 1, true),
  unit("bar", PRESSURE, 100000, 1, true),
  unit("atm", PRESSURE, 101325, 1, false),
  unit("psi", PRESSURE, 8896443230521, 1290320000, false),
  // Electric
  unit("A", &[(I, 1)], 1, 1, true),
  unit("C", &[(T, 1), (I, 1)], 1, 1, true),
  unit("V", &[(L, 2), (M, 1), (T, -3), (I, -1)], 1, 1, true),
  unit("ohm", &[(L, 2), (M, 1), (T, -3), (I, -2)], 1, 1, true),
  // Temperature differences
  unit("K", &[(THETA, 1)], 1, 1, true),
  unit("degC", &[(THETA, 1)], 1, 1, false),
  unit("degF", &[(THETA, 1)], 5, 9, false),
  // Amount and luminosity
  unit("mol", &[(N, 1)], 1, 1, true),
  unit("cd", &[(J, 1)], 1, 1, true),
  // Speed
  unit("mph", SPEED, 1397, 3125, false),
  unit("knot", SPEED, 463, 900, false),
];

/// SI prefixes as powers of ten.
const PREFIXES: &[(char, i32)] = &[
  ('Y', 24),
  ('Z', 21),
  ('E', 18),
  ('P', 15),
  ('T', 12),
  ('G', 9),
  ('M', 6),
  ('k', 3),
  ('h', 2),
  ('D', 1),
  ('d', -1),
  ('c', -2),
  ('m', -3),
  ('u', -6),
  ('n', -9),
  ('p', -12),
  ('f', -15),
  ('a', -18),
  ('z', -21),
  ('y', -24),
];

fn find_unit(name: &str) -> Option<&'static UnitDef> {
  UNITS.iter().find(|u| u.name == name)
}

fn ten_to(power: i32) -> BigRational {
  let ten = BigRational::from_integer(BigInt::from(10));
  num_traits::pow::Pow::pow(ten, power)
}

/// Table entry for `name`, trying an SI prefix split when there is no
/// exact match.
fn get_unit_info(name: &str) -> Option<UnitInfo> {
  let info = |def: &UnitDef, scale: BigRational| UnitInfo {
    dims: dims(def.dims),
    scale: scale
      * BigRational::new(BigInt::from(def.numer), BigInt::from(def.denom)),
    pi_power: def.pi_power,
  };
  if let Some(def) = find_unit(name) {
    return Some(info(def, BigRational::one()));
  }
  let mut chars = name.chars();
  let first = chars.next()?;
  let (_, power) = PREFIXES.iter().find(|(p, _)| *p == first)?;
  let def = find_unit(chars.as_str()).filter(|def| def.prefixable)?;
  Some(info(def, ten_to(*power)))
}

pub fn is_unit_name(name: &str) -> bool {
  get_unit_info(name).is_some()
}

fn unit_info_of(expr: &Expr) -> Option<UnitInfo> {
  match expr {
    Expr::Var(s) => get_unit_info(s.name()),
    _ => None,
  }
}

fn contains_units(expr: &Expr) -> bool {
  match expr {
    Expr::Num(_) => false,
    Expr::Var(s) => is_unit_name(s.name()),
    Expr::Form { args, .. } => args.iter().any(contains_units),
  }
}

/// Float value of `scale * pi^pi_power`.
fn scale_number(
  scale: &BigRational,
  pi_power: i32,
  precision: u32,
) -> Result<Number, CalcError> {
  let mut value = Number::Float(Float::from_rational(scale, precision));
  if pi_power != 0 {
    let pi = constant_value("pi", precision)
      .ok_or_else(|| CalcError::Malformed("pi".into()))?;
    value = value.mul(&pi.powi(&BigInt::from(pi_power))?)?;
  }
  Ok(value)
}

// ─── Measures ───────────────────────────────────────────────────────────────

/// The dimension and size of a product of units.
struct Measure {
  dims: Dims,
  scale: BigRational,
  pi_power: i32,
}

fn measure(units: &Expr) -> Result<Measure, CalcError> {
  let term = Term::of(units)?;
  let mut m = Measure {
    dims: [0; 8],
    scale: term.coef.to_rational().ok_or_else(|| not_converted(&term.coef))?,
    pi_power: 0,
  };
  for (base, e) in &term.factors {
    let info = unit_info_of(base)
      .ok_or_else(|| CalcError::Malformed(format!("{base} is not a unit")))?;
    let e = e
      .to_i32()
      .ok_or_else(|| CalcError::Malformed(format!("{base}^{e}")))?;
    for (d, unit_d) in m.dims.iter_mut().zip(info.dims) {
      *d += unit_d * e;
    }
    m.scale *= num_traits::pow::Pow::pow(info.scale, e);
    m.pi_power += info.pi_power * e;
  }
  Ok(m)
}

// ─── Operations ─────────────────────────────────────────────────────────────

/// The expression with every unit replaced by 1.
pub fn remove_units(
  expr: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let stripped = replace_symbols(expr, &|s| {
    is_unit_name(s.name()).then(|| Expr::int(1))
  });
  simplify(&stripped, settings)
}

fn unit_part(expr: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  Ok(match expr {
    Expr::Var(s) if is_unit_name(s.name()) => expr.clone(),
    Expr::Form { op, args } => match (op, args.as_slice()) {
      (Op::Mul, [a, b]) => {
        Expr::times(unit_part(a, settings)?, unit_part(b, settings)?)
      }
      (Op::Div, [a, b]) => {
        Expr::divide(unit_part(a, settings)?, unit_part(b, settings)?)
      }
      (Op::Pow, [a, n]) => Expr::power(unit_part(a, settings)?, n.clone()),
      (Op::Neg, [a]) => unit_part(a, settings)?,
      (Op::Add | Op::Sub, [a, b]) => shared_units(expr, a, b, settings)?,
      _ => Expr::int(1),
    },
    _ => Expr::int(1),
  })
}

/// The units common to both terms of a sum.
fn shared_units(
  sum: &Expr,
  a: &Expr,
  b: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let ua = extract_units(a, settings)?;
  let ub = extract_units(b, settings)?;
  if ua == ub {
    return Ok(ua);
  }
  if measure(&ua)?.dims != measure(&ub)?.dims {
    return Err(CalcError::IncompatibleUnits(ua.to_string(), ub.to_string()));
  }
  Err(CalcError::Malformed(format!("{sum} mixes {ua} and {ub}")))
}

/// Only the units of `expr`, merged by [`simplify_units`]. The scale of a
/// merged unit stays in the result (`m * cm` gives `0.01 * m^2`). The
/// terms of a sum must carry the same units.
pub fn extract_units(
  expr: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let units = simplify(&unit_part(expr, settings)?, settings)?;
  simplify_units(&units, settings)
}

fn merge_units(expr: &Expr, settings: &Settings) -> Result<Expr, CalcError> {
  let term = Term::of(expr)?;
  let mut coef = term.coef.clone();
  // First unit seen for each dimension vector.
  let mut targets: Vec<(Expr, UnitInfo)> = Vec::new();
  let mut product = Expr::Num(Number::one());
  for (base, e) in &term.factors {
    let mut base = base.clone();
    if let Some(info) = unit_info_of(&base) {
      match targets.iter().find(|(_, t)| t.dims == info.dims) {
        Some((target, t)) if *target != base => {
          let e = e
            .to_i32()
            .ok_or_else(|| CalcError::Malformed(format!("{base}^{e}")))?;
          let ratio = scale_number(
            &(info.scale.clone() / t.scale.clone()),
            info.pi_power - t.pi_power,
            settings.precision,
          )?;
          coef = coef.mul(&ratio.powi(&BigInt::from(e))?)?;
          debug!(target: "units", from = %base, to = %target, "merged");
          base = target.clone();
        }
        Some(_) => {}
        None => targets.push((base.clone(), info)),
      }
    }
    let factor = if e.is_one() {
      base
    } else {
      Expr::power(base, Expr::Num(Number::Integer(e.clone())))
    };
    product = Expr::times(product, factor);
  }
  collect_product(&Expr::times(Expr::Num(coef), product))
}

/// Merge units of the same dimension in each product into the first such
/// unit, folding the scale in as a float coefficient.
pub fn simplify_units(
  expr: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let merged = match expr {
    Expr::Form {
      op: op @ (Op::Add | Op::Sub | Op::Neg | Op::Eq | Op::Vec),
      args,
    } => Expr::Form {
      op: op.clone(),
      args: args
        .iter()
        .map(|a| simplify_units(a, settings))
        .collect::<Result<Vec<_>, _>>()?,
    },
    _ if contains_units(expr) => merge_units(expr, settings)?,
    _ => expr.clone(),
  };
  simplify(&merged, settings)
}

/// Convert each term of a sum on its own, inferring its units.
fn convert_terms(
  expr: &Expr,
  new: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  match expr {
    Expr::Form {
      op: op @ (Op::Add | Op::Sub | Op::Neg),
      args,
    } => Ok(Expr::Form {
      op: op.clone(),
      args: args
        .iter()
        .map(|a| convert_terms(a, new, settings))
        .collect::<Result<Vec<_>, _>>()?,
    }),
    _ => convert_units(expr, None, new, settings),
  }
}

/// Express `expr` in `new` units. Without `old` the units are taken from
/// `expr` itself, term by term when `expr` is a sum.
pub fn convert_units(
  expr: &Expr,
  old: Option<&Expr>,
  new: &Expr,
  settings: &Settings,
) -> Result<Expr, CalcError> {
  let old = match old {
    Some(old) => old.clone(),
    None if matches!(
      expr,
      Expr::Form {
        op: Op::Add | Op::Sub,
        ..
      }
    ) =>
    {
      return simplify(&convert_terms(expr, new, settings)?, settings);
    }
    None => extract_units(expr, settings)?,
  };
  if !contains_units(&old) {
    return Err(CalcError::Unitless);
  }
  let from = measure(&old)?;
  let to = measure(new)?;
  if from.dims != to.dims {
    return Err(CalcError::IncompatibleUnits(
      old.to_string(),
      new.to_string(),
    ));
  }
  if to.scale.is_zero() {
    return Err(CalcError::DivisionByZero);
  }
  let factor = Expr::Num(Number::from_rational(from.scale / to.scale));
  let pi_power = from.pi_power - to.pi_power;
  debug!(
    target: "units",
    old = %old,
    new = %new,
    %factor,
    pi_power,
    "converting"
  );
  let mut result = Expr::times(remove_units(expr, settings)?, factor);
  if pi_power != 0 {
    result = Expr::times(
      result,
      Expr::power(Expr::var("pi"), Expr::int(i64::from(pi_power))),
    );
  }
  simplify(&Expr::times(result, new.clone()), settings)
}
