use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_bigint::BigInt;
use serde_json::json;
use symcalc::functions::datetime_ast::{
  absolute_from_gregorian, checked_day, date_to_gregorian, date_to_julian,
  format_date, from_naive_date, julian_day_number, weekday,
};
use symcalc::{
  AngleMode, Number, Settings, evaluate_numeric, format_expr, parse_expr,
  simplify,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(flatten)]
  modes: Modes,

  /// Print results as JSON
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct Modes {
  /// How bare numbers are read as angles
  #[arg(long, value_enum, default_value_t = AngleArg::Degrees, global = true)]
  angle_mode: AngleArg,

  /// Keep exact symbolic results such as sqrt(2) / 2
  #[arg(long, global = true)]
  symbolic: bool,

  /// Display radix (2 to 36)
  #[arg(long, default_value_t = 10, global = true)]
  radix: u32,

  /// Group digits with commas
  #[arg(long, global = true)]
  grouping: bool,

  /// Significant digits for approximate results
  #[arg(long, default_value_t = 12, global = true)]
  precision: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum AngleArg {
  Degrees,
  Radians,
}

#[derive(Subcommand)]
enum Commands {
  /// Simplify an algebraic expression
  Eval {
    /// The expression, e.g. "2 x + 3 x" or "sin(30)"
    expression: String,

    /// Evaluate to floats after simplifying
    #[arg(long)]
    numeric: bool,
  },
  /// Print an integer in the display radix
  Radix {
    /// Decimal integer
    value: String,
  },
  /// Describe an absolute day number
  Date {
    #[arg(allow_negative_numbers = true)]
    absolute: i64,
  },
  /// Describe a Gregorian calendar date
  Gregorian {
    #[arg(allow_negative_numbers = true)]
    year: i64,
    month: i64,
    day: i64,
  },
  /// Describe the current local date
  Today,
}

impl Modes {
  fn settings(&self) -> Result<Settings> {
    let angle_mode = match self.angle_mode {
      AngleArg::Degrees => AngleMode::Degrees,
      AngleArg::Radians => AngleMode::Radians,
    };
    Ok(
      Settings::default()
        .with_angle_mode(angle_mode)
        .with_symbolic(self.symbolic)
        .with_radix(self.radix)?
        .with_grouping(self.grouping)
        .with_precision(self.precision),
    )
  }
}

fn describe_date(absolute: i64, as_json: bool) {
  let (gy, gm, gd) = date_to_gregorian(absolute);
  let (jy, jm, jd) = date_to_julian(absolute);
  if as_json {
    let value = json!({
      "absolute": absolute,
      "gregorian": [gy, gm, gd],
      "julian": [jy, jm, jd],
      "jdn": julian_day_number(absolute),
      "weekday": weekday(absolute),
      "display": format_date(absolute),
    });
    println!("{value}");
  } else {
    println!("{}", format_date(absolute));
    println!("absolute  {absolute}");
    println!("gregorian {gy}-{gm:02}-{gd:02}");
    println!("julian    {jy}-{jm:02}-{jd:02}");
    println!("jdn       {}", julian_day_number(absolute));
  }
}

fn run(cli: Cli) -> Result<()> {
  let settings = cli.modes.settings()?;
  match cli.command {
    Commands::Eval {
      expression,
      numeric,
    } => {
      let expr = parse_expr(&expression)?;
      let result = if numeric {
        evaluate_numeric(&expr, &settings)?
      } else {
        simplify(&expr, &settings)?
      };
      let text = format_expr(&result, &settings);
      if cli.json {
        println!("{}", json!({ "input": expression, "result": text }));
      } else {
        println!("{text}");
      }
    }
    Commands::Radix { value } => {
      let n: BigInt = value
        .trim()
        .parse()
        .with_context(|| format!("{value} is not a decimal integer"))?;
      let text = symcalc::format_number(
        &Number::Integer(n),
        settings.radix,
        settings.grouping,
      )?;
      if cli.json {
        println!("{}", json!({ "radix": settings.radix, "value": text }));
      } else {
        println!("{text}");
      }
    }
    Commands::Date { absolute } => {
      describe_date(checked_day(Some(absolute))?, cli.json)
    }
    Commands::Gregorian { year, month, day } => {
      let absolute = absolute_from_gregorian(year, month, day)?;
      describe_date(absolute, cli.json);
    }
    Commands::Today => {
      let today = chrono::Local::now().date_naive();
      describe_date(from_naive_date(today), cli.json);
    }
  }
  Ok(())
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn")),
    )
    .with_writer(std::io::stderr)
    .init();

  run(Cli::parse())
}
