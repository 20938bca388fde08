//! The traced stepper: Peano arithmetic with derivation recording.
//!
//! A [`Stepper`] owns the step recorder for one derivation. Every
//! operation computes its result the ordinary way (on the counters) while
//! emitting the steps the defining equations would produce — one step per
//! unrolled recursion level, with nesting depth mirroring the recursion
//! structure. No operation here actually recurses: deep inputs cost trace
//! length, never stack.
//!
//! A `Stepper` is request-scoped state: build one, run one computation,
//! call [`Stepper::finish`] to obtain the [`Trace`], and drop it. Nothing
//! is shared between invocations, so concurrent use needs no
//! coordination.
//!
//! # Example
//!
//! ```
//! use peano::{Nat, Outcome, Stepper};
//!
//! let mut stepper = Stepper::new();
//! let sum = stepper.add(Nat::new(2), Nat::new(3));
//! assert_eq!(sum.value(), 5);
//! let trace = stepper.finish(Outcome::Term(sum));
//! assert!(trace.metrics().step_count > 0);
//! ```

use crate::error::{Error, Result};
use crate::nat::Nat;
use crate::rule::Rule;
use crate::trace::{Op, Outcome, Step, Trace};

/// Iterative Euclidean gcd on raw counters. `gcd(0, 0) = 0`.
pub(crate) const fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Records the derivation of one computation.
///
/// Holds the emitted steps, the current nesting depth, and whether any
/// clamped subtraction occurred.
#[derive(Debug, Default)]
pub struct Stepper {
    steps: Vec<Step>,
    depth: usize,
    clamped: bool,
}

impl Stepper {
    /// Creates an empty recorder at depth zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps recorded so far.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Whether any subtraction clamped a would-be-negative result.
    #[must_use]
    pub const fn clamped(&self) -> bool {
        self.clamped
    }

    /// Consumes the recorder, producing the finished trace.
    #[must_use]
    pub fn finish(self, result: Outcome) -> Trace {
        Trace::new(self.steps, result, self.clamped)
    }

    fn push_full(&mut self, op: Op, rule: Rule, args: Vec<Nat>, outcome: Outcome, clamped: bool) {
        self.steps.push(Step {
            index: self.steps.len(),
            depth: self.depth,
            op,
            rule,
            args,
            outcome,
            clamped,
        });
    }

    fn push(&mut self, op: Op, rule: Rule, args: Vec<Nat>, outcome: Outcome) {
        self.push_full(op, rule, args, outcome, false);
    }

    /// Records one step at the current depth. Crate-internal: the
    /// fraction layer emits its pairing and reduction steps through this.
    pub(crate) fn push_step(&mut self, op: Op, rule: Rule, args: Vec<Nat>, outcome: Outcome) {
        self.push(op, rule, args, outcome);
    }

    // ----- Axioms A1, A2 and the clamped predecessor -----

    /// Introduces the zero term (axiom A1).
    pub fn zero(&mut self) -> Nat {
        self.push(Op::Zero, Rule::ZeroIsNat, Vec::new(), Outcome::Term(Nat::ZERO));
        Nat::ZERO
    }

    /// Applies the successor function (axiom A2).
    pub fn successor(&mut self, x: Nat) -> Nat {
        let res = x.succ();
        self.push(Op::Successor, Rule::SuccIsNat, vec![x], Outcome::Term(res));
        res
    }

    /// Applies the clamped predecessor: `pred(0) = 0`, `pred(s(x)) = x`.
    pub fn predecessor(&mut self, x: Nat) -> Nat {
        let res = x.pred();
        self.push_full(
            Op::Predecessor,
            Rule::PredDef,
            vec![x],
            Outcome::Term(res),
            x.is_zero(),
        );
        res
    }

    // ----- Primitive recursive definitions -----

    /// Addition: `add(x, 0) = x; add(x, s(y)) = s(add(x, y))`.
    ///
    /// Emits one `ADD-REC` step per successor peeled off `y`, with the
    /// predecessor bookkeeping the recursion implies, then the
    /// `ADD-BASE` step.
    pub fn add(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        for off in 0..y.value() {
            let yk = Nat::new(y.value() - off);
            self.depth = d0 + off as usize;
            self.push(
                Op::Add,
                Rule::AddRec,
                vec![x, yk],
                Outcome::Term(Nat::new(x.value() + yk.value())),
            );
            self.depth += 1;
            self.predecessor(yk);
        }
        self.depth = d0 + y.value() as usize;
        self.push(Op::Add, Rule::AddBase, vec![x, Nat::ZERO], Outcome::Term(x));
        self.depth = d0;
        Nat::new(x.value() + y.value())
    }

    /// Multiplication: `mult(x, 0) = 0; mult(x, s(y)) = mult(x, y) + x`.
    ///
    /// The descent emits the `MULT-REC` chain down to the base, then the
    /// unwind replays each level's addition, innermost first — the flat
    /// order the recursive definition would produce.
    pub fn multiply(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        let yv = y.value();
        for off in 0..yv {
            let yk = Nat::new(yv - off);
            self.depth = d0 + off as usize;
            self.push(
                Op::Multiply,
                Rule::MulRec,
                vec![x, yk],
                Outcome::Term(Nat::new(x.value() * yk.value())),
            );
            self.depth += 1;
            self.predecessor(yk);
        }
        self.depth = d0 + yv as usize;
        self.push(
            Op::Multiply,
            Rule::MulBase,
            vec![x, Nat::ZERO],
            Outcome::Term(Nat::ZERO),
        );
        for k in 1..=yv {
            self.depth = d0 + (yv - k) as usize + 1;
            let acc = Nat::new(x.value() * (k - 1));
            self.add(acc, x);
        }
        self.depth = d0;
        Nat::new(x.value() * yv)
    }

    /// Clamped subtraction: `sub(x, 0) = x; sub(0, s(y)) = 0;
    /// sub(s(x), s(y)) = sub(x, y)`.
    ///
    /// Sets the trace's clamped flag when the true difference would be
    /// negative.
    pub fn subtract(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        let res = Nat::new(x.value().saturating_sub(y.value()));
        let levels = x.value().min(y.value());
        for off in 0..levels {
            let xa = Nat::new(x.value() - off);
            let ya = Nat::new(y.value() - off);
            self.depth = d0 + off as usize;
            self.push(Op::Subtract, Rule::SubRec, vec![xa, ya], Outcome::Term(res));
            self.depth += 1;
            self.predecessor(xa);
            self.predecessor(ya);
        }
        let (rem_x, rem_y) = (x.value() - levels, y.value() - levels);
        self.depth = d0 + levels as usize;
        if rem_y == 0 {
            self.push(
                Op::Subtract,
                Rule::SubBase,
                vec![Nat::new(rem_x), Nat::ZERO],
                Outcome::Term(Nat::new(rem_x)),
            );
        } else {
            // x exhausted first: the result clamps at zero.
            self.clamped = true;
            self.push_full(
                Op::Subtract,
                Rule::SubBase,
                vec![Nat::ZERO, Nat::new(rem_y)],
                Outcome::Term(Nat::ZERO),
                true,
            );
        }
        self.depth = d0;
        res
    }

    // ----- Order and equality (A3, A4) -----

    /// The strict order: `lt(s(x), s(y)) = lt(x, y)` down to a base case.
    pub fn less_than(&mut self, x: Nat, y: Nat) -> bool {
        let d0 = self.depth;
        let res = x.value() < y.value();
        let levels = x.value().min(y.value());
        for off in 0..levels {
            let xa = Nat::new(x.value() - off);
            let ya = Nat::new(y.value() - off);
            self.depth = d0 + off as usize;
            self.push(Op::LessThan, Rule::LtRec, vec![xa, ya], Outcome::Truth(res));
            self.depth += 1;
            self.predecessor(xa);
            self.predecessor(ya);
        }
        self.depth = d0 + levels as usize;
        self.push(
            Op::LessThan,
            Rule::LtBase,
            vec![
                Nat::new(x.value() - levels),
                Nat::new(y.value() - levels),
            ],
            Outcome::Truth(res),
        );
        self.depth = d0;
        res
    }

    /// Equality via injectivity (A4) down to a zero base case, with A3
    /// refuting equality when exactly one side reaches zero.
    pub fn equal(&mut self, x: Nat, y: Nat) -> bool {
        let d0 = self.depth;
        let res = x == y;
        let levels = x.value().min(y.value());
        for off in 0..levels {
            let xa = Nat::new(x.value() - off);
            let ya = Nat::new(y.value() - off);
            self.depth = d0 + off as usize;
            self.push(
                Op::Equal,
                Rule::SuccInjective,
                vec![xa, ya],
                Outcome::Truth(res),
            );
            self.depth += 1;
            self.predecessor(xa);
            self.predecessor(ya);
        }
        let (rem_x, rem_y) = (x.value() - levels, y.value() - levels);
        self.depth = d0 + levels as usize;
        let rule = if rem_x == 0 && rem_y == 0 {
            Rule::EqBase
        } else {
            Rule::SuccNotZero
        };
        self.push(
            Op::Equal,
            rule,
            vec![Nat::new(rem_x), Nat::new(rem_y)],
            Outcome::Truth(res),
        );
        self.depth = d0;
        res
    }

    /// The reversed strict order: `x > y ⇔ ¬(x = y) ∧ ¬(x < y)`.
    ///
    /// Mirrors the short-circuit of the defining conjunction: when the
    /// equality check succeeds, the order check is never derived.
    pub fn greater_than(&mut self, x: Nat, y: Nat) -> bool {
        let d0 = self.depth;
        let res = x.value() > y.value();
        self.push(Op::GreaterThan, Rule::GtDef, vec![x, y], Outcome::Truth(res));
        self.depth = d0 + 1;
        let eq = self.equal(x, y);
        if !eq {
            self.less_than(x, y);
        }
        self.depth = d0;
        res
    }

    // ----- Division, modulo, gcd (definitional extensions) -----

    /// Quotient by repeated subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `y` is zero.
    pub fn div(&mut self, x: Nat, y: Nat) -> Result<Nat> {
        if y.is_zero() {
            return Err(Error::invalid("division by zero"));
        }
        Ok(self.div_nonzero(x, y))
    }

    /// Remainder by repeated subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `y` is zero.
    pub fn modulo(&mut self, x: Nat, y: Nat) -> Result<Nat> {
        if y.is_zero() {
            return Err(Error::invalid("modulo by zero"));
        }
        Ok(self.mod_nonzero(x, y))
    }

    /// Greatest common divisor by the Euclidean algorithm:
    /// `gcd(x, 0) = x; gcd(x, y) = gcd(y, x mod y)`.
    pub fn gcd(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        let g = Nat::new(gcd_u64(x.value(), y.value()));
        let (mut a, mut b) = (x, y);
        while !b.is_zero() {
            self.push(Op::Gcd, Rule::GcdRec, vec![a, b], Outcome::Term(g));
            self.depth += 1;
            let r = self.mod_nonzero(a, b);
            (a, b) = (b, r);
        }
        self.push(Op::Gcd, Rule::GcdBase, vec![a, Nat::ZERO], Outcome::Term(a));
        self.depth = d0;
        g
    }

    /// Division loop with a known-nonzero divisor.
    pub(crate) fn div_nonzero(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        let q = Nat::new(x.value() / y.value());
        self.push(Op::Div, Rule::DivDef, vec![x, y], Outcome::Term(q));
        self.depth = d0 + 1;
        let (mut rem, mut acc) = (x, Nat::ZERO);
        loop {
            self.push(
                Op::DivStep,
                Rule::DivStep,
                vec![rem, y, acc],
                Outcome::Term(q),
            );
            self.depth += 1;
            if self.less_than(rem, y) {
                break;
            }
            rem = self.subtract(rem, y);
            acc = self.successor(acc);
        }
        self.depth = d0;
        q
    }

    /// Modulo loop with a known-nonzero divisor.
    fn mod_nonzero(&mut self, x: Nat, y: Nat) -> Nat {
        let d0 = self.depth;
        let r = Nat::new(x.value() % y.value());
        self.push(Op::Mod, Rule::ModDef, vec![x, y], Outcome::Term(r));
        self.depth = d0 + 1;
        let mut rem = x;
        loop {
            self.push(Op::ModStep, Rule::ModStep, vec![rem, y], Outcome::Term(r));
            self.depth += 1;
            if self.less_than(rem, y) {
                break;
            }
            rem = self.subtract(rem, y);
        }
        self.depth = d0;
        r
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(stepper: Stepper, value: Nat) -> Trace {
        stepper.finish(Outcome::Term(value))
    }

    #[test]
    fn add_agrees_and_derives() {
        let mut s = Stepper::new();
        let sum = s.add(Nat::new(2), Nat::new(3));
        assert_eq!(sum, Nat::new(5));

        // Three ADD-REC unrollings and the base, outermost first.
        let adds: Vec<_> = s
            .steps()
            .iter()
            .filter(|st| st.op == Op::Add)
            .collect();
        assert_eq!(adds.len(), 4);
        assert_eq!(adds[0].rule, Rule::AddRec);
        assert_eq!(adds[0].args, vec![Nat::new(2), Nat::new(3)]);
        assert_eq!(adds[0].outcome, Outcome::Term(Nat::new(5)));
        assert_eq!(adds[3].rule, Rule::AddBase);
        assert_eq!(adds[3].outcome, Outcome::Term(Nat::new(2)));
    }

    #[test]
    fn add_zero_is_base_only() {
        let mut s = Stepper::new();
        s.add(Nat::new(4), Nat::ZERO);
        assert_eq!(s.step_count(), 1);
        assert_eq!(s.steps()[0].rule, Rule::AddBase);
    }

    #[test]
    fn multiply_agrees() {
        for (x, y) in [(0, 0), (0, 5), (5, 0), (1, 7), (3, 4), (6, 2)] {
            let mut s = Stepper::new();
            let got = s.multiply(Nat::new(x), Nat::new(y));
            assert_eq!(got.value(), x * y, "{x} × {y}");
        }
    }

    #[test]
    fn multiply_unwinds_innermost_addition_first() {
        let mut s = Stepper::new();
        s.multiply(Nat::new(2), Nat::new(3));
        let adds: Vec<_> = s
            .steps()
            .iter()
            .filter(|st| st.op == Op::Add && st.depth > 0)
            .collect();
        // First replayed addition is the innermost: 0 + 2.
        assert_eq!(adds[0].args[0], Nat::ZERO);
        assert_eq!(adds[0].args[1], Nat::new(2));
    }

    #[test]
    fn subtract_clamps_and_flags() {
        let mut s = Stepper::new();
        let res = s.subtract(Nat::new(2), Nat::new(5));
        assert_eq!(res, Nat::ZERO);
        assert!(s.clamped());

        let mut s = Stepper::new();
        let res = s.subtract(Nat::new(5), Nat::new(2));
        assert_eq!(res, Nat::new(3));
        assert!(!s.clamped());
    }

    #[test]
    fn subtract_equal_operands_is_not_clamped() {
        let mut s = Stepper::new();
        assert_eq!(s.subtract(Nat::new(4), Nat::new(4)), Nat::ZERO);
        assert!(!s.clamped());
    }

    #[test]
    fn comparisons_agree() {
        for (x, y) in [(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (5, 5)] {
            let mut s = Stepper::new();
            assert_eq!(s.less_than(Nat::new(x), Nat::new(y)), x < y);
            assert_eq!(s.equal(Nat::new(x), Nat::new(y)), x == y);
            assert_eq!(s.greater_than(Nat::new(x), Nat::new(y)), x > y);
        }
    }

    #[test]
    fn equality_base_rules() {
        let mut s = Stepper::new();
        s.equal(Nat::new(2), Nat::new(2));
        let last_eq = s
            .steps()
            .iter()
            .filter(|st| st.op == Op::Equal)
            .next_back()
            .map(|st| st.rule);
        assert_eq!(last_eq, Some(Rule::EqBase));

        let mut s = Stepper::new();
        s.equal(Nat::new(2), Nat::new(4));
        let last_eq = s
            .steps()
            .iter()
            .filter(|st| st.op == Op::Equal)
            .next_back()
            .map(|st| st.rule);
        // One side reached zero first: refuted by A3.
        assert_eq!(last_eq, Some(Rule::SuccNotZero));
    }

    #[test]
    fn greater_than_short_circuits_on_equality() {
        let mut s = Stepper::new();
        s.greater_than(Nat::new(3), Nat::new(3));
        assert!(s.steps().iter().all(|st| st.op != Op::LessThan));

        let mut s = Stepper::new();
        s.greater_than(Nat::new(4), Nat::new(2));
        assert!(s.steps().iter().any(|st| st.op == Op::LessThan));
    }

    #[test]
    fn division_relation_holds() {
        for (x, y) in [(0, 1), (7, 3), (12, 4), (11, 4), (25, 5), (5, 7)] {
            let mut s = Stepper::new();
            let q = s.div(Nat::new(x), Nat::new(y)).unwrap();
            let mut s = Stepper::new();
            let r = s.modulo(Nat::new(x), Nat::new(y)).unwrap();
            assert_eq!(y * q.value() + r.value(), x, "{x} ÷ {y}");
            assert!(r.value() < y);
        }
    }

    #[test]
    fn division_by_zero_is_invalid_input() {
        let mut s = Stepper::new();
        assert!(s.div(Nat::new(5), Nat::ZERO).is_err());
        let mut s = Stepper::new();
        assert!(s.modulo(Nat::new(5), Nat::ZERO).is_err());
    }

    #[test]
    fn gcd_agrees_with_euclid() {
        for (x, y, g) in [
            (12, 8, 4),
            (8, 12, 4),
            (7, 3, 1),
            (21, 14, 7),
            (5, 0, 5),
            (0, 5, 5),
            (0, 0, 0),
        ] {
            let mut s = Stepper::new();
            assert_eq!(s.gcd(Nat::new(x), Nat::new(y)).value(), g, "gcd({x}, {y})");
        }
    }

    #[test]
    fn gcd_trace_ends_at_base_rule() {
        let mut s = Stepper::new();
        s.gcd(Nat::new(12), Nat::new(8));
        let gcd_steps: Vec<_> = s.steps().iter().filter(|st| st.op == Op::Gcd).collect();
        assert!(gcd_steps.len() >= 2);
        assert_eq!(gcd_steps.last().map(|st| st.rule), Some(Rule::GcdBase));
        assert_eq!(
            gcd_steps.last().map(|st| st.args[1]),
            Some(Nat::ZERO)
        );
    }

    #[test]
    fn depth_is_restored_after_each_operation() {
        let mut s = Stepper::new();
        s.add(Nat::new(2), Nat::new(3));
        assert_eq!(s.depth(), 0);
        s.multiply(Nat::new(3), Nat::new(2));
        assert_eq!(s.depth(), 0);
        s.gcd(Nat::new(12), Nat::new(8));
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn step_indices_are_dense() {
        let mut s = Stepper::new();
        s.multiply(Nat::new(3), Nat::new(4));
        let trace = finish(s, Nat::new(12));
        for (i, step) in trace.steps().iter().enumerate() {
            assert_eq!(step.index, i);
        }
    }
}
