//! Fractions as pairs of Peano naturals.
//!
//! A [`Fraction`] is an ordered pair of naturals with a non-zero
//! denominator, enforced at construction. Arithmetic on fractions is the
//! textbook cross-multiplication, expressed entirely through the traced
//! natural-number operations of the [`Stepper`], so every fraction
//! computation carries the full derivation of its parts. Results are
//! simplified to lowest terms by gcd elimination.
//!
//! Subtraction inherits the clamping of natural subtraction: a difference
//! that would be negative collapses to `0/1` after simplification, with
//! the trace's clamped flag set.

use core::fmt;

use crate::error::{Error, Result};
use crate::nat::Nat;
use crate::rule::Rule;
use crate::stepper::{gcd_u64, Stepper};
use crate::trace::{Op, Outcome};

/// An ordered pair of naturals with a non-zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: Nat,
    denominator: Nat,
}

impl Fraction {
    /// Creates a fraction, rejecting a zero denominator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `denominator` is zero.
    pub fn new(numerator: Nat, denominator: Nat) -> Result<Self> {
        if denominator.is_zero() {
            return Err(Error::invalid("denominator cannot be 0"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Embeds a natural as the fraction `x/1`.
    #[must_use]
    pub const fn from_nat(x: Nat) -> Self {
        Self {
            numerator: x,
            denominator: Nat::ONE,
        }
    }

    /// The numerator.
    #[must_use]
    pub const fn numerator(self) -> Nat {
        self.numerator
    }

    /// The denominator. Never zero.
    #[must_use]
    pub const fn denominator(self) -> Nat {
        self.denominator
    }

    /// Whether the fraction is in lowest terms (gcd ≤ 1).
    #[must_use]
    pub fn is_reduced(self) -> bool {
        gcd_u64(self.numerator.value(), self.denominator.value()) <= 1
    }

    /// Integer-land rendering, e.g. `2/3`.
    #[must_use]
    pub fn value_text(self) -> String {
        format!("{}/{}", self.numerator.value(), self.denominator.value())
    }
}

impl fmt::Display for Fraction {
    /// Renders both components in term syntax: `s(s(0))/s(s(s(0)))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Term-plus-value view of a natural, the display form used in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TermView {
    /// The canonical term in `s(…)` syntax.
    pub term: String,
    /// The canonical integer value.
    pub value: u64,
}

impl From<Nat> for TermView {
    fn from(n: Nat) -> Self {
        Self {
            term: n.to_string(),
            value: n.value(),
        }
    }
}

/// Rich description of a fraction `n/d`: its gcd, simplified form, and
/// the division relation `n = d·q + r` with its check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FractionReport {
    /// The numerator.
    pub numerator: TermView,
    /// The denominator.
    pub denominator: TermView,
    /// gcd(numerator, denominator).
    pub gcd: TermView,
    /// Numerator of the simplified fraction.
    pub simplified_numerator: TermView,
    /// Denominator of the simplified fraction.
    pub simplified_denominator: TermView,
    /// Quotient of numerator ÷ denominator.
    pub quotient: TermView,
    /// Remainder of numerator mod denominator.
    pub remainder: TermView,
    /// The product d·q of the division check.
    pub product: TermView,
    /// The full right-hand side d·q + r; equals the numerator.
    pub check: TermView,
}

impl Stepper {
    /// Pairs two naturals into a fraction, emitting the pairing step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `denominator` is zero.
    pub fn pair(&mut self, numerator: Nat, denominator: Nat) -> Result<Fraction> {
        let frac = Fraction::new(numerator, denominator)?;
        self.emit_pair(frac);
        Ok(frac)
    }

    /// Reduces a fraction to lowest terms, deriving the gcd and the two
    /// component divisions.
    ///
    /// The reduction step itself is emitted only when there is something
    /// to reduce: a gcd of 1 leaves the fraction untouched, so reducing
    /// an already-reduced fraction adds no reduction step.
    pub fn simplify_fraction(&mut self, frac: Fraction) -> Fraction {
        let d0 = self.depth();
        let g = self.gcd(frac.numerator(), frac.denominator());
        if g.value() <= 1 {
            return frac;
        }

        let reduced = Fraction {
            numerator: Nat::new(frac.numerator().value() / g.value()),
            denominator: Nat::new(frac.denominator().value() / g.value()),
        };
        self.emit_reduce(frac, g, reduced);
        self.set_depth(d0 + 1);
        // Component divisions; the divisor is the gcd, never zero here.
        self.div_nonzero(frac.numerator(), g);
        self.div_nonzero(frac.denominator(), g);
        self.set_depth(d0);
        reduced
    }

    /// Adds two fractions: `a/b + c/d = (a·d + c·b)/(b·d)`, simplified.
    pub fn add_fractions(&mut self, x: Fraction, y: Fraction) -> Fraction {
        let left = self.multiply(x.numerator(), y.denominator());
        let right = self.multiply(y.numerator(), x.denominator());
        let num = self.add(left, right);
        let den = self.multiply(x.denominator(), y.denominator());
        self.simplify_fraction(Fraction {
            numerator: num,
            denominator: den,
        })
    }

    /// Subtracts two fractions with clamping at zero:
    /// `a/b − c/d = (a·d ∸ c·b)/(b·d)`, simplified.
    ///
    /// A clamped numerator simplifies to `0/1` and sets the trace's
    /// clamped flag.
    pub fn subtract_fractions(&mut self, x: Fraction, y: Fraction) -> Fraction {
        let left = self.multiply(x.numerator(), y.denominator());
        let right = self.multiply(y.numerator(), x.denominator());
        let num = self.subtract(left, right);
        let den = self.multiply(x.denominator(), y.denominator());
        self.simplify_fraction(Fraction {
            numerator: num,
            denominator: den,
        })
    }

    /// Multiplies two fractions componentwise, simplified.
    pub fn multiply_fractions(&mut self, x: Fraction, y: Fraction) -> Fraction {
        let num = self.multiply(x.numerator(), y.numerator());
        let den = self.multiply(x.denominator(), y.denominator());
        self.simplify_fraction(Fraction {
            numerator: num,
            denominator: den,
        })
    }

    /// Divides two fractions by cross multiplication, simplified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when the divisor's numerator is
    /// zero (division by a zero fraction).
    pub fn divide_fractions(&mut self, x: Fraction, y: Fraction) -> Result<Fraction> {
        if y.numerator().is_zero() {
            return Err(Error::invalid("division by zero in fraction"));
        }
        let num = self.multiply(x.numerator(), y.denominator());
        let den = self.multiply(x.denominator(), y.numerator());
        Ok(self.simplify_fraction(Fraction {
            numerator: num,
            denominator: den,
        }))
    }

    /// Derives the rich description of `n/d`: gcd, simplified form, and
    /// the division relation `n = d·q + r`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `denominator` is zero.
    pub fn describe_fraction(&mut self, numerator: Nat, denominator: Nat) -> Result<FractionReport> {
        if denominator.is_zero() {
            return Err(Error::invalid("denominator cannot be 0"));
        }

        let g = self.gcd(numerator, denominator);
        let (simp_num, simp_den) = if g.value() <= 1 {
            (numerator, denominator)
        } else {
            (self.div(numerator, g)?, self.div(denominator, g)?)
        };

        let q = self.div(numerator, denominator)?;
        let r = self.modulo(numerator, denominator)?;
        let product = self.multiply(denominator, q);
        let check = self.add(product, r);

        Ok(FractionReport {
            numerator: numerator.into(),
            denominator: denominator.into(),
            gcd: g.into(),
            simplified_numerator: simp_num.into(),
            simplified_denominator: simp_den.into(),
            quotient: q.into(),
            remainder: r.into(),
            product: product.into(),
            check: check.into(),
        })
    }

    fn emit_pair(&mut self, frac: Fraction) {
        self.push_step(
            Op::Pair,
            Rule::Pair,
            vec![frac.numerator(), frac.denominator()],
            Outcome::Ratio(frac),
        );
    }

    fn emit_reduce(&mut self, frac: Fraction, g: Nat, reduced: Fraction) {
        self.push_step(
            Op::Reduce,
            Rule::Reduce,
            vec![frac.numerator(), frac.denominator(), g],
            Outcome::Ratio(reduced),
        );
    }
}
