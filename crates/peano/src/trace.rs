//! Derivation traces: the ordered record of a computation.
//!
//! A [`Trace`] is the complete witness of one engine invocation: every
//! operation applied, in order, with the rule that licensed it and the
//! partial result it produced, plus the final value and summary metrics.
//! Traces are built fresh per invocation, owned by the caller, and have
//! no lifecycle beyond being rendered and dropped.
//!
//! Each [`Step`] offers three renderings for display layers:
//!
//! - integer meaning — `2 + 3 = 5`
//! - symbolic meaning — `add: s(s(0)) + s(s(s(0))) → s(s(s(s(s(0)))))`
//! - a natural-language explanation sentence
//!
//! [`Trace::rows`] flattens steps into serializable [`StepRow`] records,
//! the wire form consumed by view layers.

use crate::fraction::Fraction;
use crate::nat::Nat;
use crate::rule::Rule;

/// The operation a derivation step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Introduce the zero term.
    Zero,
    /// Apply the successor function.
    Successor,
    /// Apply the clamped predecessor.
    Predecessor,
    /// Addition by primitive recursion.
    Add,
    /// Clamped subtraction.
    Subtract,
    /// Multiplication by primitive recursion.
    Multiply,
    /// The strict order relation.
    LessThan,
    /// Equality via A3/A4.
    Equal,
    /// The reversed strict order, derived from equality and less-than.
    GreaterThan,
    /// Quotient by repeated subtraction.
    Div,
    /// Remainder by repeated subtraction.
    Mod,
    /// Greatest common divisor by the Euclidean algorithm.
    Gcd,
    /// One round of the division loop.
    DivStep,
    /// One round of the modulo loop.
    ModStep,
    /// Pair two naturals into a fraction.
    Pair,
    /// Reduce a fraction by its gcd.
    Reduce,
}

impl Op {
    /// Lowercase operation name used in rendered traces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Op::Zero => "zero",
            Op::Successor => "successor",
            Op::Predecessor => "predecessor",
            Op::Add => "add",
            Op::Subtract => "subtract",
            Op::Multiply => "multiply",
            Op::LessThan => "less_than",
            Op::Equal => "equal",
            Op::GreaterThan => "greater_than",
            Op::Div => "div",
            Op::Mod => "mod",
            Op::Gcd => "gcd",
            Op::DivStep => "div_step",
            Op::ModStep => "mod_step",
            Op::Pair => "pair",
            Op::Reduce => "reduce",
        }
    }

    /// Whether this step is successor/predecessor bookkeeping inside a
    /// larger derivation, as opposed to part of the formal argument.
    #[must_use]
    pub const fn is_bookkeeping(self) -> bool {
        matches!(self, Op::Successor | Op::Predecessor)
    }
}

/// The result produced by a single step or a whole trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A natural-number term.
    Term(Nat),
    /// A truth value from a comparison.
    Truth(bool),
    /// A fraction from a pairing or reduction step.
    Ratio(Fraction),
}

impl Outcome {
    /// The natural carried by this outcome, if it is one.
    #[must_use]
    pub const fn as_term(&self) -> Option<Nat> {
        match self {
            Outcome::Term(n) => Some(*n),
            _ => None,
        }
    }

    /// The fraction carried by this outcome, if it is one.
    #[must_use]
    pub const fn as_ratio(&self) -> Option<Fraction> {
        match self {
            Outcome::Ratio(f) => Some(*f),
            _ => None,
        }
    }

    /// Symbolic rendering: the canonical term, `true`/`false`, or `n/d`
    /// in term syntax.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Outcome::Term(n) => n.to_string(),
            Outcome::Truth(b) => b.to_string(),
            Outcome::Ratio(f) => f.to_string(),
        }
    }

    /// Integer-land rendering: `5`, `true`, or `2/3`.
    #[must_use]
    pub fn value_text(&self) -> String {
        match self {
            Outcome::Term(n) => n.value().to_string(),
            Outcome::Truth(b) => b.to_string(),
            Outcome::Ratio(f) => f.value_text(),
        }
    }
}

/// One derivation action: an operation applied under a rule.
///
/// Steps are immutable records; order within a trace is significant. The
/// `depth` field is the nesting level of this step inside the derivations
/// that spawned it, mirroring the recursion structure of the defining
/// equations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Zero-based position of this step within its trace.
    pub index: usize,
    /// Nesting depth within enclosing derivations.
    pub depth: usize,
    /// The operation applied.
    pub op: Op,
    /// The axiom or defining equation that licensed the step.
    pub rule: Rule,
    /// Operand terms, outermost operands first.
    pub args: Vec<Nat>,
    /// The partial value reached at this point.
    pub outcome: Outcome,
    /// Whether clamping at zero occurred in this step.
    pub clamped: bool,
}

impl Step {
    /// Integer meaning of the step, e.g. `2 + 3 = 5`.
    #[must_use]
    pub fn meaning(&self) -> String {
        let v = |i: usize| self.args.get(i).map_or(0, |n| n.value());
        let out = self.outcome.value_text();
        let clamp = if self.clamped { " (clamped)" } else { "" };
        match self.op {
            Op::Zero => "0".to_string(),
            Op::Successor => format!("{} + 1 = {out}", v(0)),
            Op::Predecessor => format!("{} - 1 = {out}{clamp}", v(0)),
            Op::Add => format!("{} + {} = {out}", v(0), v(1)),
            Op::Subtract => format!("{} - {} = {out}{clamp}", v(0), v(1)),
            Op::Multiply => format!("{} × {} = {out}", v(0), v(1)),
            Op::LessThan => format!("{} < {} = {out}", v(0), v(1)),
            Op::Equal => format!("{} = {} = {out}", v(0), v(1)),
            Op::GreaterThan => format!("{} > {} = {out}", v(0), v(1)),
            Op::Div => format!("{} ÷ {} = {out}", v(0), v(1)),
            Op::Mod => format!("{} mod {} = {out}", v(0), v(1)),
            Op::Gcd => format!("gcd({}, {}) = {out}", v(0), v(1)),
            Op::DivStep => format!("remainder {}, quotient so far {}", v(0), v(2)),
            Op::ModStep => format!("remainder {}", v(0)),
            Op::Pair => format!("{}/{}", v(0), v(1)),
            Op::Reduce => format!("{}/{} = {out} (gcd {})", v(0), v(1), v(2)),
        }
    }

    /// Symbolic meaning of the step in Peano term syntax.
    #[must_use]
    pub fn symbolic(&self) -> String {
        let t = |i: usize| {
            self.args
                .get(i)
                .map_or_else(|| "0".to_string(), |n| n.to_string())
        };
        let out = self.outcome.render();
        match self.op {
            Op::Zero => "zero: 0".to_string(),
            Op::Successor => format!("successor: {} → {out}", t(0)),
            Op::Predecessor => format!("pred (derived): {} → {out}", t(0)),
            Op::Add => format!("add: {} + {} → {out}", t(0), t(1)),
            Op::Subtract => format!("sub (derived, clamped): {} − {} → {out}", t(0), t(1)),
            Op::Multiply => format!("mult: {} × {} → {out}", t(0), t(1)),
            Op::LessThan => format!("compare: {} < {} → {out}", t(0), t(1)),
            Op::Equal => format!("compare: {} = {} → {out}", t(0), t(1)),
            Op::GreaterThan => format!("compare: {} > {} → {out}", t(0), t(1)),
            Op::Div => format!("divide: {} ÷ {} → {out}", t(0), t(1)),
            Op::Mod => format!("mod: {} mod {} → {out}", t(0), t(1)),
            Op::Gcd => format!("gcd: {}, {} → {out}", t(0), t(1)),
            Op::DivStep => format!("div-step: {}, acc {}", t(0), t(2)),
            Op::ModStep => format!("mod-step: {}", t(0)),
            Op::Pair => format!("pair: {} / {}", t(0), t(1)),
            Op::Reduce => format!("reduce: {} / {} by gcd {} → {out}", t(0), t(1), t(2)),
        }
    }

    /// Natural-language explanation of the step.
    #[must_use]
    pub fn explanation(&self) -> String {
        let t = |i: usize| {
            self.args
                .get(i)
                .map_or_else(|| "0".to_string(), |n| n.to_string())
        };
        let out = self.outcome.render();
        match self.op {
            Op::Zero => "0 is a natural number.".to_string(),
            Op::Successor => format!("Successor of {} is {out}.", t(0)),
            Op::Predecessor => format!("Predecessor of {} (clamped at 0) is {out}.", t(0)),
            Op::Add => format!("Add {} and {} → {out}.", t(0), t(1)),
            Op::Subtract => format!("Subtract {} from {} (clamped at 0) → {out}.", t(1), t(0)),
            Op::Multiply => format!("Multiply {} by {} (repeated addition) → {out}.", t(0), t(1)),
            Op::LessThan => format!("Check {} < {} → {out}.", t(0), t(1)),
            Op::Equal => format!("Check {} = {} → {out}.", t(0), t(1)),
            Op::GreaterThan => format!("Check {} > {} → {out}.", t(0), t(1)),
            Op::Div => format!("Divide {} by {} (repeated subtraction) → quotient {out}.", t(0), t(1)),
            Op::Mod => format!("Compute {} mod {} (repeated subtraction) → remainder {out}.", t(0), t(1)),
            Op::Gcd => format!("gcd({}, {}) via Euclidean method → {out}.", t(0), t(1)),
            Op::DivStep => {
                "Division step: if remainder < divisor stop; otherwise subtract divisor and \
                 increment quotient."
                    .to_string()
            }
            Op::ModStep => {
                "Modulo step: if remainder < divisor stop; otherwise subtract divisor and \
                 continue."
                    .to_string()
            }
            Op::Pair => format!("Form the fraction {} / {}.", t(0), t(1)),
            Op::Reduce => format!("Reduce by gcd {} → {out}.", t(2)),
        }
    }

    /// Flattens the step into its serializable row form.
    #[must_use]
    pub fn row(&self) -> StepRow {
        StepRow {
            index: self.index,
            depth: self.depth,
            op: self.op.name(),
            rule: self.rule.tag(),
            citation: self.rule.citation(),
            args: self.args.iter().map(|n| n.value()).collect(),
            terms: self.args.iter().map(Nat::to_string).collect(),
            result: self.outcome.render(),
            result_value: self.outcome.as_term().map(Nat::value),
            meaning: self.meaning(),
            symbolic: self.symbolic(),
            explanation: self.explanation(),
            clamped: self.clamped,
        }
    }
}

/// Serializable, display-ready form of one step.
///
/// This is the wire contract for view layers: everything is a plain
/// number or string, with the rule tag and its citation spelled out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepRow {
    /// Zero-based position within the trace.
    pub index: usize,
    /// Nesting depth.
    pub depth: usize,
    /// Operation name.
    pub op: &'static str,
    /// Rule tag (`A1`, `ADD-REC`, …).
    pub rule: &'static str,
    /// Statement of the rule.
    pub citation: &'static str,
    /// Canonical values of the operands.
    pub args: Vec<u64>,
    /// Operand terms in `s(…)` syntax.
    pub terms: Vec<String>,
    /// Rendered result (term, truth value, or fraction).
    pub result: String,
    /// Canonical value of the result when it is a natural.
    pub result_value: Option<u64>,
    /// Integer meaning, e.g. `2 + 3 = 5`.
    pub meaning: String,
    /// Symbolic meaning in term syntax.
    pub symbolic: String,
    /// Natural-language explanation sentence.
    pub explanation: String,
    /// Whether clamping at zero occurred.
    pub clamped: bool,
}

/// Summary metrics for a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TraceMetrics {
    /// Total number of steps recorded.
    pub step_count: usize,
    /// Whether any step clamped a would-be-negative result at zero.
    pub clamped: bool,
}

/// A complete derivation: ordered steps plus the final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<Step>,
    result: Outcome,
    metrics: TraceMetrics,
}

impl Trace {
    pub(crate) fn new(steps: Vec<Step>, result: Outcome, clamped: bool) -> Self {
        let metrics = TraceMetrics {
            step_count: steps.len(),
            clamped,
        };
        Self {
            steps,
            result,
            metrics,
        }
    }

    /// The ordered steps of the derivation.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The final constructed value.
    #[must_use]
    pub const fn result(&self) -> Outcome {
        self.result
    }

    /// Summary metrics.
    #[must_use]
    pub const fn metrics(&self) -> TraceMetrics {
        self.metrics
    }

    /// Number of steps in the trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trace is empty. Engine-produced traces never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps flattened to serializable rows.
    #[must_use]
    pub fn rows(&self) -> Vec<StepRow> {
        self.steps.iter().map(Step::row).collect()
    }

    /// Display view: steps at most `max_depth` deep, with nested
    /// successor/predecessor bookkeeping hidden.
    ///
    /// Top-level successor steps survive the filter — in a construction
    /// trace they ARE the derivation. Only bookkeeping nested inside a
    /// larger derivation is dropped.
    #[must_use]
    pub fn filtered(&self, max_depth: usize) -> Vec<&Step> {
        self.steps
            .iter()
            .filter(|s| s.depth <= max_depth && !(s.depth > 0 && s.op.is_bookkeeping()))
            .collect()
    }
}
