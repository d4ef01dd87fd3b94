use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use pest::iterators::Pair;

use crate::functions::math_ast::number_to_string;
use crate::number::Number;
use crate::{CalcError, Rule};

// ─── Symbols ────────────────────────────────────────────────────────────────

/// A variable reference. Two symbols are the same variable iff their ids
/// match; the name is only used for display.
#[derive(Debug, Clone, Eq)]
pub struct Symbol {
  name: String,
  id: String,
}

impl Symbol {
  pub fn new(name: &str) -> Self {
    Symbol {
      name: name.to_string(),
      id: format!("var-{name}"),
    }
  }

  pub fn with_id(name: &str, id: &str) -> Self {
    Symbol {
      name: name.to_string(),
      id: id.to_string(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn id(&self) -> &str {
    &self.id
  }
}

impl PartialEq for Symbol {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Hash for Symbol {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

// ─── Operators ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
  Add,
  Sub,
  Mul,
  Div,
  Pow,
  Neg,
  Eq,
  Vec,
  Call(String),
}

/// Operand count contract of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
  Exactly(usize),
  Range(usize, usize),
  Any,
}

impl Arity {
  pub fn accepts(self, count: usize) -> bool {
    match self {
      Arity::Exactly(n) => count == n,
      Arity::Range(lo, hi) => (lo..=hi).contains(&count),
      Arity::Any => true,
    }
  }
}

impl fmt::Display for Arity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Arity::Exactly(n) => write!(f, "{n}"),
      Arity::Range(lo, hi) => write!(f, "{lo} to {hi}"),
      Arity::Any => f.write_str("any number of"),
    }
  }
}

impl Op {
  pub fn call(name: &str) -> Op {
    Op::Call(name.to_string())
  }

  pub fn name(&self) -> &str {
    match self {
      Op::Add => "+",
      Op::Sub => "-",
      Op::Mul => "*",
      Op::Div => "/",
      Op::Pow => "^",
      Op::Neg => "neg",
      Op::Eq => "eq",
      Op::Vec => "vec",
      Op::Call(name) => name,
    }
  }

  pub fn arity(&self) -> Arity {
    match self {
      Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Pow | Op::Eq => {
        Arity::Exactly(2)
      }
      Op::Neg => Arity::Exactly(1),
      Op::Vec => Arity::Any,
      Op::Call(name) => function_arity(name),
    }
  }
}

fn function_arity(name: &str) -> Arity {
  match name {
    "sin" | "cos" | "tan" | "cot" | "sec" | "csc" | "sqrt" | "abs" | "det"
    | "julian" | "usimplify" | "remove_units" | "extract_units" => {
      Arity::Exactly(1)
    }
    "gcd" | "lcm" | "choose" | "solve" => Arity::Exactly(2),
    "pdiv" | "prem" | "pgcd" | "convert_units" => Arity::Range(2, 3),
    "sum" | "prod" => Arity::Range(4, 5),
    "date" => Arity::Range(1, 3),
    _ => Arity::Any,
  }
}

// ─── Expressions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Num(Number),
  Var(Symbol),
  Form { op: Op, args: Vec<Expr> },
}

impl From<Number> for Expr {
  fn from(n: Number) -> Self {
    Expr::Num(n)
  }
}

impl Expr {
  pub fn int(n: i64) -> Expr {
    Expr::Num(Number::from(n))
  }

  pub fn var(name: &str) -> Expr {
    Expr::Var(Symbol::new(name))
  }

  /// Build a form, checking the operator's arity contract.
  pub fn form(op: Op, args: Vec<Expr>) -> Result<Expr, CalcError> {
    let arity = op.arity();
    if !arity.accepts(args.len()) {
      return Err(CalcError::Arity {
        name: op.name().to_string(),
        expected: arity.to_string(),
        got: args.len(),
      });
    }
    Ok(Expr::Form { op, args })
  }

  fn binary(op: Op, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Form {
      op,
      args: vec![lhs, rhs],
    }
  }

  pub fn plus(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(Op::Add, lhs, rhs)
  }

  pub fn minus(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(Op::Sub, lhs, rhs)
  }

  pub fn times(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(Op::Mul, lhs, rhs)
  }

  pub fn divide(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(Op::Div, lhs, rhs)
  }

  pub fn power(base: Expr, exponent: Expr) -> Expr {
    Expr::binary(Op::Pow, base, exponent)
  }

  pub fn equation(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(Op::Eq, lhs, rhs)
  }

  pub fn negate(operand: Expr) -> Expr {
    Expr::Form {
      op: Op::Neg,
      args: vec![operand],
    }
  }

  pub fn vector(items: Vec<Expr>) -> Expr {
    Expr::Form {
      op: Op::Vec,
      args: items,
    }
  }

  /// Call of a named function with a known-good operand count.
  pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Form {
      op: Op::call(name),
      args,
    }
  }

  pub fn as_number(&self) -> Option<&Number> {
    match self {
      Expr::Num(n) => Some(n),
      _ => None,
    }
  }

  pub fn as_symbol(&self) -> Option<&Symbol> {
    match self {
      Expr::Var(s) => Some(s),
      _ => None,
    }
  }

  pub fn is_symbol(&self, name: &str) -> bool {
    matches!(self, Expr::Var(s) if s.name() == name)
  }

  pub fn is_op(&self, wanted: &Op) -> bool {
    matches!(self, Expr::Form { op, .. } if op == wanted)
  }

  pub fn is_call(&self, name: &str) -> bool {
    matches!(self, Expr::Form { op: Op::Call(n), .. } if n == name)
  }

  pub fn args(&self) -> &[Expr] {
    match self {
      Expr::Form { args, .. } => args,
      _ => &[],
    }
  }

  pub fn is_zero(&self) -> bool {
    matches!(self, Expr::Num(n) if n.is_zero())
  }

  pub fn is_one(&self) -> bool {
    matches!(self, Expr::Num(n) if n.is_one())
  }

  pub fn contains_symbol(&self, symbol: &Symbol) -> bool {
    match self {
      Expr::Num(_) => false,
      Expr::Var(s) => s == symbol,
      Expr::Form { args, .. } => args.iter().any(|a| a.contains_symbol(symbol)),
    }
  }

  /// Distinct symbols in first-appearance order.
  pub fn free_symbols(&self) -> Vec<Symbol> {
    let mut out = Vec::new();
    collect_symbols(self, &mut out);
    out
  }
}

fn collect_symbols(expr: &Expr, out: &mut Vec<Symbol>) {
  match expr {
    Expr::Num(_) => {}
    Expr::Var(s) => {
      if !out.contains(s) {
        out.push(s.clone());
      }
    }
    Expr::Form { args, .. } => {
      for arg in args {
        collect_symbols(arg, out);
      }
    }
  }
}

pub fn numberp(expr: &Expr) -> bool {
  matches!(expr, Expr::Num(_))
}

/// Equality used for comparing results: numbers by numeric equivalence,
/// forms operand by operand (no reordering), symbols by identity.
pub fn equal_expr(a: &Expr, b: &Expr) -> bool {
  match (a, b) {
    (Expr::Num(x), Expr::Num(y)) => x.num_eq(y),
    (Expr::Var(x), Expr::Var(y)) => x == y,
    (
      Expr::Form { op: op_a, args: args_a },
      Expr::Form { op: op_b, args: args_b },
    ) => {
      op_a == op_b
        && args_a.len() == args_b.len()
        && args_a.iter().zip(args_b).all(|(x, y)| equal_expr(x, y))
    }
    _ => false,
  }
}

// ─── Printing ───────────────────────────────────────────────────────────────

/// Canonical text of an expression with numbers in the given radix.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
  pub radix: u32,
  pub grouping: bool,
}

impl Default for Printer {
  fn default() -> Self {
    Printer {
      radix: 10,
      grouping: false,
    }
  }
}

const PREC_EQ: u8 = 1;
const PREC_SUM: u8 = 2;
const PREC_PRODUCT: u8 = 3;
const PREC_NEG: u8 = 4;
const PREC_POW: u8 = 5;
const PREC_ATOM: u8 = 6;

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Num(n) if n.is_negative() => PREC_NEG,
    Expr::Num(_) | Expr::Var(_) => PREC_ATOM,
    Expr::Form { op, .. } => match op {
      Op::Eq => PREC_EQ,
      Op::Add | Op::Sub => PREC_SUM,
      Op::Mul | Op::Div => PREC_PRODUCT,
      Op::Neg => PREC_NEG,
      Op::Pow => PREC_POW,
      Op::Vec | Op::Call(_) => PREC_ATOM,
    },
  }
}

impl Printer {
  pub fn print(&self, expr: &Expr) -> String {
    let mut out = String::new();
    self.write(expr, &mut out);
    out
  }

  fn write_child(&self, expr: &Expr, parens: bool, out: &mut String) {
    if parens {
      out.push('(');
      self.write(expr, out);
      out.push(')');
    } else {
      self.write(expr, out);
    }
  }

  fn write_list(&self, args: &[Expr], out: &mut String) {
    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        out.push_str(", ");
      }
      self.write(arg, out);
    }
  }

  fn write(&self, expr: &Expr, out: &mut String) {
    match expr {
      Expr::Num(n) => {
        out.push_str(&number_to_string(n, self.radix, self.grouping))
      }
      Expr::Var(s) => out.push_str(s.name()),
      Expr::Form { op, args } => match (op, args.as_slice()) {
        (Op::Neg, [operand]) => {
          out.push('-');
          self.write_child(operand, precedence(operand) < PREC_PRODUCT, out);
        }
        (Op::Pow, [base, exponent]) => {
          self.write_child(base, precedence(base) <= PREC_POW, out);
          out.push('^');
          self.write_child(exponent, precedence(exponent) < PREC_POW, out);
        }
        (Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Eq, [lhs, rhs]) => {
          let prec = precedence(expr);
          self.write_child(lhs, precedence(lhs) < prec, out);
          out.push(' ');
          out.push_str(if *op == Op::Eq { "=" } else { op.name() });
          out.push(' ');
          self.write_child(rhs, precedence(rhs) <= prec, out);
        }
        (Op::Vec, items) => {
          out.push('[');
          self.write_list(items, out);
          out.push(']');
        }
        _ => {
          out.push_str(op.name());
          out.push('(');
          self.write_list(args, out);
          out.push(')');
        }
      },
    }
  }
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&Printer::default().print(self))
  }
}

// ─── Parse tree → Expr ──────────────────────────────────────────────────────

fn malformed(pair: &Pair<Rule>) -> CalcError {
  CalcError::Malformed(format!("unexpected {:?}", pair.as_rule()))
}

fn next_expr(
  inner: &mut pest::iterators::Pairs<Rule>,
) -> Result<Expr, CalcError> {
  match inner.next() {
    Some(pair) => pair_to_expr(pair),
    None => Err(CalcError::Malformed("missing operand".to_string())),
  }
}

fn negate_literal(expr: Expr) -> Result<Expr, CalcError> {
  match expr {
    Expr::Num(n) => Ok(Expr::Num(n.neg()?)),
    other => Ok(Expr::negate(other)),
  }
}

pub fn pair_to_expr(pair: Pair<Rule>) -> Result<Expr, CalcError> {
  match pair.as_rule() {
    Rule::Program | Rule::Implicit => next_expr(&mut pair.into_inner()),
    Rule::Equation => {
      let mut inner = pair.into_inner();
      let lhs = next_expr(&mut inner)?;
      match inner.next() {
        Some(rhs) => Ok(Expr::equation(lhs, pair_to_expr(rhs)?)),
        None => Ok(lhs),
      }
    }
    Rule::Sum => {
      let mut inner = pair.into_inner();
      let mut acc = next_expr(&mut inner)?;
      while let Some(op) = inner.next() {
        let rhs = next_expr(&mut inner)?;
        acc = match op.as_str() {
          "+" => Expr::plus(acc, rhs),
          _ => Expr::minus(acc, rhs),
        };
      }
      Ok(acc)
    }
    Rule::Product => {
      let mut inner = pair.into_inner();
      let mut acc = next_expr(&mut inner)?;
      while let Some(next) = inner.next() {
        acc = match next.as_rule() {
          Rule::MulOp => {
            let rhs = next_expr(&mut inner)?;
            if next.as_str() == "*" {
              Expr::times(acc, rhs)
            } else {
              Expr::divide(acc, rhs)
            }
          }
          _ => Expr::times(acc, pair_to_expr(next)?),
        };
      }
      Ok(acc)
    }
    Rule::Unary => {
      let mut negations = 0;
      let mut operand = None;
      for part in pair.into_inner() {
        match part.as_rule() {
          Rule::Minus => negations += 1,
          _ => operand = Some(pair_to_expr(part)?),
        }
      }
      let mut expr = operand
        .ok_or_else(|| CalcError::Malformed("missing operand".to_string()))?;
      for _ in 0..negations {
        expr = negate_literal(expr)?;
      }
      Ok(expr)
    }
    Rule::Power => {
      let mut inner = pair.into_inner();
      let base = next_expr(&mut inner)?;
      match inner.next() {
        Some(exponent) => Ok(Expr::power(base, pair_to_expr(exponent)?)),
        None => Ok(base),
      }
    }
    Rule::Call => {
      let mut inner = pair.into_inner();
      let name = inner
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| CalcError::Malformed("missing name".to_string()))?;
      let args = match inner.next() {
        Some(list) => list
          .into_inner()
          .map(pair_to_expr)
          .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
      };
      Expr::form(Op::Call(name), args)
    }
    Rule::Vector => Ok(Expr::vector(
      pair
        .into_inner()
        .map(pair_to_expr)
        .collect::<Result<Vec<_>, _>>()?,
    )),
    Rule::ComplexLit => {
      let mut inner = pair.into_inner();
      let re = next_expr(&mut inner)?;
      let im = next_expr(&mut inner)?;
      match (re, im) {
        (Expr::Num(re), Expr::Num(im)) => {
          Ok(Expr::Num(Number::complex(re, im)?))
        }
        _ => Err(CalcError::Malformed(
          "complex parts must be numbers".to_string(),
        )),
      }
    }
    Rule::Ident => Ok(Expr::var(pair.as_str())),
    Rule::RadixInt => parse_radix_int(pair.as_str()).map(Expr::Num),
    Rule::Fraction => parse_fraction(pair.as_str()).map(Expr::Num),
    Rule::Decimal => parse_decimal(pair.as_str()).map(Expr::Num),
    _ => Err(malformed(&pair)),
  }
}

fn parse_radix_int(text: &str) -> Result<Number, CalcError> {
  let (radix, digits) = text
    .split_once('#')
    .ok_or_else(|| CalcError::Malformed(text.to_string()))?;
  let radix: u32 = radix
    .parse()
    .map_err(|_| CalcError::Malformed(text.to_string()))?;
  if !(2..=36).contains(&radix) {
    return Err(CalcError::InvalidRadix(radix));
  }
  BigInt::parse_bytes(digits.as_bytes(), radix)
    .map(Number::Integer)
    .ok_or_else(|| {
      CalcError::Malformed(format!(
        "invalid digits for radix {radix}: {digits}"
      ))
    })
}

fn parse_fraction(text: &str) -> Result<Number, CalcError> {
  let (numer, denom) = text
    .split_once(':')
    .ok_or_else(|| CalcError::Malformed(text.to_string()))?;
  let parse = |s: &str| {
    s.parse::<BigInt>()
      .map_err(|_| CalcError::Malformed(text.to_string()))
  };
  Number::fraction(parse(numer)?, parse(denom)?)
}

fn parse_decimal(text: &str) -> Result<Number, CalcError> {
  let bad = || CalcError::Malformed(text.to_string());
  if !text.contains(|c| matches!(c, '.' | 'e' | 'E')) {
    return text.parse::<BigInt>().map(Number::Integer).map_err(|_| bad());
  }
  let (mantissa, exponent) = match text.find(|c| matches!(c, 'e' | 'E')) {
    Some(i) => (&text[..i], text[i + 1..].parse::<i64>().map_err(|_| bad())?),
    None => (text, 0),
  };
  let (int_part, frac_part) =
    mantissa.split_once('.').unwrap_or((mantissa, ""));
  let digits: BigInt = format!("{int_part}{frac_part}")
    .parse()
    .map_err(|_| bad())?;
  Ok(Number::float(digits, exponent - frac_part.len() as i64))
}
