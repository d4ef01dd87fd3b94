use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use symcalc::{parse_expr, simplify};

const SYMBOLS: [&str; 3] = ["x", "y", "z"];

fn monomial(rng: &mut ChaCha8Rng) -> String {
  let coef: i64 = rng.gen_range(-5..=5);
  let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];
  let exponent: u32 = rng.gen_range(0..=3);
  match rng.gen_range(0..3) {
    0 => format!("{coef} {symbol}^{exponent}"),
    1 => format!("{coef} * {symbol} / {}", rng.gen_range(1..=4)),
    _ => format!("{coef}:{} {symbol}", rng.gen_range(1..=6)),
  }
}

fn random_sum(rng: &mut ChaCha8Rng) -> String {
  let mut text = monomial(rng);
  for _ in 0..rng.gen_range(1..5) {
    let op = if rng.gen_bool(0.5) { "+" } else { "-" };
    text = format!("{text} {op} ({})", monomial(rng));
  }
  text
}

#[test]
fn simplify_twice_changes_nothing() {
  let mut rng = ChaCha8Rng::seed_from_u64(7);
  let settings = Settings::default();
  for _ in 0..300 {
    let input = random_sum(&mut rng);
    let once = simplify(&parse_expr(&input).unwrap(), &settings).unwrap();
    let twice = simplify(&once, &settings).unwrap();
    assert_eq!(once, twice, "{input}");
  }
}

#[test]
fn printed_results_read_back_unchanged() {
  let mut rng = ChaCha8Rng::seed_from_u64(11);
  for _ in 0..300 {
    let input = random_sum(&mut rng);
    let printed = interpret(&input).unwrap();
    assert_eq!(interpret(&printed).unwrap(), printed, "{input}");
  }
}

#[test]
fn symbolic_trig_results_are_fixpoints() {
  let rad = symbolic(AngleMode::Radians);
  for k in 0..24 {
    let input = format!("sin({k} pi / 12) + cos({k} pi / 12)");
    let once = simplify(&parse_expr(&input).unwrap(), &rad).unwrap();
    assert_eq!(simplify(&once, &rad).unwrap(), once, "{input}");
  }
}
