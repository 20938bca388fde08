//! `peano-trace` — Derive Peano arithmetic step by step.
//!
//! Invokes the derivation engine on user-supplied operands and prints
//! the resulting trace: one line per step with the rule applied, the
//! symbolic form, and the integer meaning, followed by the final value
//! and summary metrics.
//!
//! **Usage:**
//! ```text
//! peano-trace natural 3
//! peano-trace fraction 6 9
//! peano-trace multiply 3 4 --json
//! peano-trace describe 7 3
//! ```
//!
//! Exits non-zero and prints the error for invalid input.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use peano::{Nat, Outcome, Stepper, Trace};

/// Derive Peano arithmetic step by step.
#[derive(Parser)]
#[command(name = "peano-trace", about = "Derive Peano arithmetic step by step")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Emit the full derivation as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Deepest nesting level shown in text output.
    #[arg(long, global = true, default_value_t = 10)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Command {
    /// Construct a natural number from the axioms.
    Natural {
        /// Target value.
        n: i64,
    },
    /// Construct a fraction, reduced to lowest terms by default.
    Fraction {
        /// Numerator.
        numerator: i64,
        /// Denominator (must be positive).
        denominator: i64,
        /// Keep the raw pair instead of reducing.
        #[arg(long)]
        no_reduce: bool,
    },
    /// Derive x + y.
    Add { x: u64, y: u64 },
    /// Derive x − y, clamped at zero.
    Subtract { x: u64, y: u64 },
    /// Derive x × y.
    Multiply { x: u64, y: u64 },
    /// Derive the quotient x ÷ y.
    Div { x: u64, y: u64 },
    /// Derive the remainder x mod y.
    Mod { x: u64, y: u64 },
    /// Derive gcd(x, y) by the Euclidean algorithm.
    Gcd { x: u64, y: u64 },
    /// Check x < y.
    LessThan { x: u64, y: u64 },
    /// Check x = y.
    Equal { x: u64, y: u64 },
    /// Check x > y.
    GreaterThan { x: u64, y: u64 },
    /// Simplify n/d to lowest terms.
    Simplify {
        /// Numerator.
        numerator: u64,
        /// Denominator (must be positive).
        denominator: u64,
    },
    /// Describe n/d: gcd, simplified form, and the division relation.
    Describe {
        /// Numerator.
        numerator: u64,
        /// Denominator (must be positive).
        denominator: u64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let trace = match args.command {
        Command::Natural { n } => peano::build_natural(n)?,
        Command::Fraction {
            numerator,
            denominator,
            no_reduce,
        } => peano::build_fraction(numerator, denominator, !no_reduce)?,
        Command::Add { x, y } => run(|s| Outcome::Term(s.add(Nat::new(x), Nat::new(y)))),
        Command::Subtract { x, y } => run(|s| Outcome::Term(s.subtract(Nat::new(x), Nat::new(y)))),
        Command::Multiply { x, y } => run(|s| Outcome::Term(s.multiply(Nat::new(x), Nat::new(y)))),
        Command::Div { x, y } => try_run(|s| Ok(Outcome::Term(s.div(Nat::new(x), Nat::new(y))?)))?,
        Command::Mod { x, y } => {
            try_run(|s| Ok(Outcome::Term(s.modulo(Nat::new(x), Nat::new(y))?)))?
        }
        Command::Gcd { x, y } => run(|s| Outcome::Term(s.gcd(Nat::new(x), Nat::new(y)))),
        Command::LessThan { x, y } => {
            run(|s| Outcome::Truth(s.less_than(Nat::new(x), Nat::new(y))))
        }
        Command::Equal { x, y } => run(|s| Outcome::Truth(s.equal(Nat::new(x), Nat::new(y)))),
        Command::GreaterThan { x, y } => {
            run(|s| Outcome::Truth(s.greater_than(Nat::new(x), Nat::new(y))))
        }
        Command::Simplify {
            numerator,
            denominator,
        } => try_run(|s| {
            let frac = s.pair(Nat::new(numerator), Nat::new(denominator))?;
            Ok(Outcome::Ratio(s.simplify_fraction(frac)))
        })?,
        Command::Describe {
            numerator,
            denominator,
        } => {
            return describe(Nat::new(numerator), Nat::new(denominator), args.json);
        }
    };

    if args.json {
        print_json(&trace)?;
    } else {
        print_text(&trace, args.max_depth);
    }
    Ok(())
}

/// Runs an infallible derivation in a fresh stepper.
fn run(derive: impl FnOnce(&mut Stepper) -> Outcome) -> Trace {
    let mut stepper = Stepper::new();
    let result = derive(&mut stepper);
    stepper.finish(result)
}

/// Runs a fallible derivation in a fresh stepper.
///
/// # Errors
///
/// Propagates the engine's invalid-input error.
fn try_run(derive: impl FnOnce(&mut Stepper) -> peano::Result<Outcome>) -> Result<Trace> {
    let mut stepper = Stepper::new();
    let result = derive(&mut stepper)?;
    Ok(stepper.finish(result))
}

/// Prints the derivation as an indented text listing.
fn print_text(trace: &Trace, max_depth: usize) {
    let visible = trace.filtered(max_depth);
    let hidden = trace.len() - visible.len();

    for step in &visible {
        let row = step.row();
        let indent = "  ".repeat(row.depth);
        println!("{:>4}  {indent}[{}] {}   |  {}", row.index, row.rule, row.symbolic, row.meaning);
    }

    println!();
    println!("Result: {}", trace.result().value_text());
    let metrics = trace.metrics();
    print!("Steps: {}", metrics.step_count);
    if hidden > 0 {
        print!(" ({hidden} below the depth budget hidden)");
    }
    println!();
    if metrics.clamped {
        println!("Note: a subtraction clamped at zero during this derivation.");
    }
}

/// Prints the derivation as JSON: rows, final value, and metrics.
///
/// # Errors
///
/// Fails only if serialization fails, which would be a bug.
fn print_json(trace: &Trace) -> Result<()> {
    let payload = serde_json::json!({
        "rows": trace.rows(),
        "result": trace.result().value_text(),
        "metrics": trace.metrics(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Derives and prints the rich fraction report.
///
/// # Errors
///
/// Propagates invalid input (zero denominator).
fn describe(numerator: Nat, denominator: Nat, json: bool) -> Result<()> {
    let mut stepper = Stepper::new();
    let report = stepper.describe_fraction(numerator, denominator)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Fraction {}/{}",
        report.numerator.value, report.denominator.value
    );
    println!("  numerator   = {}", report.numerator.term);
    println!("  denominator = {}", report.denominator.term);
    println!("  gcd         = {}", report.gcd.value);
    println!(
        "  simplified  = {}/{}",
        report.simplified_numerator.value, report.simplified_denominator.value
    );
    println!(
        "  division    : {} = {}·{} + {}",
        report.numerator.value, report.denominator.value, report.quotient.value, report.remainder.value
    );
    println!(
        "  check       : {} + {} = {}",
        report.product.value, report.remainder.value, report.check.value
    );
    println!("  steps       : {}", stepper.step_count());
    Ok(())
}
