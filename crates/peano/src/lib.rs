//! Symbolic stepper for Peano arithmetic.
//!
//! This crate constructs natural numbers and fractions from the Peano
//! axioms and explains every computation with an ordered derivation
//! trace — the sequence of axiom and defining-equation applications that
//! reaches the result.
//!
//! Peano axioms:
//!
//! - A1: 0 is a natural number
//! - A2: if x is natural, s(x) is natural
//! - A3: s(x) ≠ 0 for all x
//! - A4: s(x) = s(y) → x = y (injectivity)
//! - A5: induction schema (implicit in the recursive definitions)
//!
//! Derived operations (addition, multiplication, clamped subtraction,
//! the order relations, division, modulo, gcd) are definitional
//! extensions whose defining equations the traces cite step by step.
//!
//! # Construction
//!
//! ```
//! let trace = peano::build_natural(3).unwrap();
//! assert_eq!(trace.len(), 4); // zero, then three successors
//! assert_eq!(trace.result().value_text(), "3");
//!
//! let trace = peano::build_fraction(6, 9, true).unwrap();
//! assert_eq!(trace.result().value_text(), "2/3");
//! ```
//!
//! # Arithmetic with derivations
//!
//! ```
//! use peano::{Nat, Outcome, Stepper};
//!
//! let mut stepper = Stepper::new();
//! let product = stepper.multiply(Nat::new(2), Nat::new(3));
//! let trace = stepper.finish(Outcome::Term(product));
//! for row in trace.rows() {
//!     // e.g. "[MULT-REC] 2 × 3 = 6"
//!     let _ = format!("[{}] {}", row.rule, row.meaning);
//! }
//! ```
//!
//! # Purity
//!
//! The engine is pure and stateless across invocations: a [`Stepper`] is
//! request-scoped, reads nothing but its arguments, and allocates only
//! the trace it returns. Any number of derivations may run concurrently
//! with no coordination. Work is linear in operand magnitude, so callers
//! should bound user-supplied operands to keep traces reasonably sized.

#![deny(missing_docs)]

mod build;
mod error;
mod fraction;
mod nat;
mod rule;
mod stepper;
mod trace;

pub use build::{build_fraction, build_natural};
pub use error::{Error, Result};
pub use fraction::{Fraction, FractionReport, TermView};
pub use nat::Nat;
pub use rule::Rule;
pub use stepper::Stepper;
pub use trace::{Op, Outcome, Step, StepRow, Trace, TraceMetrics};
