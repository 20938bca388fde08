//! Rules: the axiom or defining equation justifying each step.
//!
//! Every derivation step cites the rule that licensed it — one of the
//! Peano axioms A1–A4, a defining equation of a derived operation
//! (addition, multiplication, clamped subtraction, the order relations,
//! division, modulo, gcd), or a fraction-level construction rule.
//!
//! Primitive recursive definitions derived from the axioms:
//!
//! ```text
//! add(x, 0)    = x           add(x, s(y))  = s(add(x, y))
//! mult(x, 0)   = 0           mult(x, s(y)) = mult(x, y) + x
//! ```
//!
//! The remaining operations (predecessor, clamped subtraction, division,
//! modulo, gcd) are definitional extensions, not primitive Peano.

/// The axiom or defining equation applied by a derivation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A1: 0 is a natural number.
    ZeroIsNat,
    /// A2: if x is a natural number, s(x) is a natural number.
    SuccIsNat,
    /// A3: s(x) ≠ 0 for all x.
    SuccNotZero,
    /// A4: s(x) = s(y) → x = y (injectivity of the successor).
    SuccInjective,
    /// Base case of equality: 0 = 0.
    EqBase,
    /// Predecessor, clamped: pred(0) = 0; pred(s(x)) = x.
    PredDef,
    /// add(x, 0) = x.
    AddBase,
    /// add(x, s(y)) = s(add(x, y)).
    AddRec,
    /// mult(x, 0) = 0.
    MulBase,
    /// mult(x, s(y)) = mult(x, y) + x.
    MulRec,
    /// sub(x, 0) = x; sub(0, s(y)) = 0 (clamped).
    SubBase,
    /// sub(s(x), s(y)) = sub(x, y).
    SubRec,
    /// lt base cases: lt(0, 0) = false; lt(0, s(y)) = true; lt(s(x), 0) = false.
    LtBase,
    /// lt(s(x), s(y)) = lt(x, y).
    LtRec,
    /// x > y ⇔ ¬(x = y) ∧ ¬(x < y).
    GtDef,
    /// div(x, y) by repeated subtraction.
    DivDef,
    /// One division round: stop when remainder < divisor, else subtract
    /// and increment the quotient.
    DivStep,
    /// mod(x, y): remainder after repeated subtraction.
    ModDef,
    /// One modulo round: stop when remainder < divisor, else subtract.
    ModStep,
    /// gcd(x, 0) = x.
    GcdBase,
    /// gcd(x, y) = gcd(y, x mod y).
    GcdRec,
    /// Pair a numerator and a non-zero denominator into a fraction.
    Pair,
    /// Divide both fraction components by their gcd.
    Reduce,
}

impl Rule {
    /// Short tag used in rendered traces (`A1`, `ADD-REC`, …).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Rule::ZeroIsNat => "A1",
            Rule::SuccIsNat => "A2",
            Rule::SuccNotZero => "A3",
            Rule::SuccInjective => "A4",
            Rule::EqBase => "EQ-BASE",
            Rule::PredDef => "PRED-DEF",
            Rule::AddBase => "ADD-BASE",
            Rule::AddRec => "ADD-REC",
            Rule::MulBase => "MULT-BASE",
            Rule::MulRec => "MULT-REC",
            Rule::SubBase => "SUB-BASE",
            Rule::SubRec => "SUB-REC",
            Rule::LtBase => "LT-BASE",
            Rule::LtRec => "LT-REC",
            Rule::GtDef => "GT-DEF",
            Rule::DivDef => "DIV-DEF",
            Rule::DivStep => "DIV-STEP",
            Rule::ModDef => "MOD-DEF",
            Rule::ModStep => "MOD-STEP",
            Rule::GcdBase => "GCD-BASE",
            Rule::GcdRec => "GCD-REC",
            Rule::Pair => "PAIR",
            Rule::Reduce => "REDUCE",
        }
    }

    /// The statement of the rule, as cited in rendered traces.
    #[must_use]
    pub const fn citation(self) -> &'static str {
        match self {
            Rule::ZeroIsNat => "0 is a natural number",
            Rule::SuccIsNat => "if x is natural, s(x) is natural",
            Rule::SuccNotZero => "s(x) ≠ 0",
            Rule::SuccInjective => "s(x) = s(y) → x = y",
            Rule::EqBase => "0 = 0",
            Rule::PredDef => "pred(0) = 0; pred(s(x)) = x",
            Rule::AddBase => "add(x, 0) = x",
            Rule::AddRec => "add(x, s(y)) = s(add(x, y))",
            Rule::MulBase => "mult(x, 0) = 0",
            Rule::MulRec => "mult(x, s(y)) = mult(x, y) + x",
            Rule::SubBase => "sub(x, 0) = x; sub(0, s(y)) = 0",
            Rule::SubRec => "sub(s(x), s(y)) = sub(x, y)",
            Rule::LtBase => "lt(0, s(y)) = true; lt(x, 0) = false",
            Rule::LtRec => "lt(s(x), s(y)) = lt(x, y)",
            Rule::GtDef => "x > y ⇔ ¬(x = y) ∧ ¬(x < y)",
            Rule::DivDef => "div(x, y): repeated subtraction of y",
            Rule::DivStep => "if rem < y stop, else subtract y and increment",
            Rule::ModDef => "mod(x, y): remainder after repeated subtraction",
            Rule::ModStep => "if rem < y stop, else subtract y",
            Rule::GcdBase => "gcd(x, 0) = x",
            Rule::GcdRec => "gcd(x, y) = gcd(y, x mod y)",
            Rule::Pair => "a fraction is a pair (n, d) with d ≠ 0",
            Rule::Reduce => "n/d = (n ÷ g)/(d ÷ g) where g = gcd(n, d)",
        }
    }

    /// Whether this rule is one of the Peano axioms proper (A1–A4) rather
    /// than a definitional extension.
    #[must_use]
    pub const fn is_axiom(self) -> bool {
        matches!(
            self,
            Rule::ZeroIsNat | Rule::SuccIsNat | Rule::SuccNotZero | Rule::SuccInjective
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axiom_tags() {
        assert_eq!(Rule::ZeroIsNat.tag(), "A1");
        assert_eq!(Rule::SuccInjective.tag(), "A4");
        assert!(Rule::ZeroIsNat.is_axiom());
        assert!(!Rule::AddRec.is_axiom());
    }

    #[test]
    fn citations_are_nonempty() {
        for rule in [
            Rule::ZeroIsNat,
            Rule::AddBase,
            Rule::AddRec,
            Rule::GcdRec,
            Rule::Pair,
            Rule::Reduce,
        ] {
            assert!(!rule.citation().is_empty());
        }
    }
}
