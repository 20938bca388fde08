//! Construction entry points: build a natural or a fraction from the
//! axioms, returning the full derivation.
//!
//! These are the two operations the surrounding application invokes per
//! request. Both take signed integers so that out-of-domain input is
//! reported as [`Error::InvalidInput`](crate::Error) rather than being
//! silently unrepresentable at the call site.

use crate::error::{Error, Result};
use crate::nat::Nat;
use crate::stepper::Stepper;
use crate::trace::{Outcome, Trace};

/// Checks a signed operand into the naturals.
fn into_natural(value: i64, what: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::invalid(format!("{what} must be non-negative, got {value}")))
}

/// Constructs the natural `n` from the axioms.
///
/// The trace opens with the zero step (A1) and applies the successor
/// (A2) exactly `n` times, each step showing the running value — `n + 1`
/// steps in total. Identical input always yields the identical sequence.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error) when `n` is negative.
///
/// # Example
///
/// ```
/// let trace = peano::build_natural(3).unwrap();
/// assert_eq!(trace.len(), 4);
/// assert_eq!(trace.result().value_text(), "3");
/// ```
pub fn build_natural(n: i64) -> Result<Trace> {
    let target = into_natural(n, "n")?;
    let mut stepper = Stepper::new();
    let mut current = stepper.zero();
    for _ in 0..target {
        current = stepper.successor(current);
    }
    Ok(stepper.finish(Outcome::Term(current)))
}

/// Constructs the fraction `numerator/denominator` from the axioms.
///
/// Builds both component naturals step by step, pairs them, and — when
/// `reduce` is set — derives the gcd and appends a reduction step
/// showing both components divided by it. The reduction step is skipped
/// entirely when the gcd is 1, and reduction is skipped altogether for a
/// zero numerator: `0/d` is reported unreduced.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`](crate::Error) when either operand is
/// negative or the denominator is zero.
///
/// # Example
///
/// ```
/// let trace = peano::build_fraction(6, 9, true).unwrap();
/// assert_eq!(trace.result().value_text(), "2/3");
/// ```
pub fn build_fraction(numerator: i64, denominator: i64, reduce: bool) -> Result<Trace> {
    let num = into_natural(numerator, "numerator")?;
    let den = into_natural(denominator, "denominator")?;
    if den == 0 {
        return Err(Error::invalid("denominator cannot be 0"));
    }

    let mut stepper = Stepper::new();

    let mut n = stepper.zero();
    for _ in 0..num {
        n = stepper.successor(n);
    }
    let mut d = stepper.zero();
    for _ in 0..den {
        d = stepper.successor(d);
    }

    let paired = stepper.pair(n, d)?;
    let result = if reduce && !n.is_zero() {
        stepper.simplify_fraction(paired)
    } else {
        paired
    };
    Ok(stepper.finish(Outcome::Ratio(result)))
}
