use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod evaluator;
pub mod functions;
pub mod number;
pub mod settings;
pub mod syntax;

pub use evaluator::{evaluate_numeric, simplify};
pub use functions::datetime_ast::{
  absolute_from_gregorian, absolute_from_julian, date_from_julian_day_number,
  date_to_gregorian, date_to_julian, julian_day_number, weekday,
};
pub use functions::linear_algebra_ast::det;
pub use functions::math_ast::{choose, format_number, gcd};
pub use functions::polynomial_ast::{
  PolyDivision, Solution, poly_div, solve, solve_system,
};
pub use functions::quantity_ast::{
  convert_units, extract_units, remove_units, simplify_units,
};
pub use number::Number;
pub use settings::{AngleMode, Settings};
pub use syntax::{Expr, Op, Symbol, equal_expr, numberp};

#[derive(Parser)]
#[grammar = "calc.pest"]
pub struct CalcParser;

#[derive(Error, Debug)]
pub enum CalcError {
  #[error("Parse error: {0}")]
  Parse(#[from] Box<pest::error::Error<Rule>>),
  #[error("Division by zero")]
  DivisionByZero,
  #[error("Dimension mismatch: {0}")]
  DimensionMismatch(String),
  #[error("Unsupported arguments: {0}")]
  UnsupportedArguments(String),
  #[error("Not a plain number: {0}")]
  NotConverted(String),
  #[error("{name} called with {got} arguments; {expected} expected")]
  Arity {
    name: String,
    expected: String,
    got: usize,
  },
  #[error("Incompatible units: {0} and {1}")]
  IncompatibleUnits(String, String),
  #[error("Expression is unitless")]
  Unitless,
  #[error("Invalid date: {0}")]
  InvalidDate(String),
  #[error("Invalid radix: {0}")]
  InvalidRadix(u32),
  #[error("Not a polynomial: {0}")]
  NotPolynomial(String),
  #[error("Malformed input: {0}")]
  Malformed(String),
}

impl CalcParser {
  pub fn parse_program(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

/// Parse algebraic entry into an expression tree.
pub fn parse_expr(input: &str) -> Result<Expr, CalcError> {
  let mut pairs = CalcParser::parse_program(input.trim())?;
  match pairs.next() {
    Some(program) => syntax::pair_to_expr(program),
    None => Err(CalcError::Malformed("empty input".to_string())),
  }
}

/// Print an expression using the radix and grouping of `settings`.
pub fn format_expr(expr: &Expr, settings: &Settings) -> String {
  syntax::Printer {
    radix: settings.radix,
    grouping: settings.grouping,
  }
  .print(expr)
}

pub fn interpret(input: &str) -> Result<String, CalcError> {
  interpret_with(input, &Settings::default())
}

/// Parse, simplify and print.
pub fn interpret_with(
  input: &str,
  settings: &Settings,
) -> Result<String, CalcError> {
  let expr = parse_expr(input)?;
  let result = simplify(&expr, settings)?;
  Ok(format_expr(&result, settings))
}
