//! Concrete derivation scenarios, end to end.
//!
//! Each test pins one observable behavior of the public surface: the
//! exact step sequences of the construction entry points, the derivation
//! shapes of the arithmetic operations, and the serialized row format
//! consumed by view layers.

use peano::{build_fraction, build_natural, Nat, Op, Outcome, Rule, Stepper};

#[test]
fn natural_zero_trace() {
    let trace = build_natural(0).unwrap();
    let rows = trace.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].op, "zero");
    assert_eq!(rows[0].rule, "A1");
    assert_eq!(rows[0].result, "0");
}

#[test]
fn natural_three_trace() {
    let trace = build_natural(3).unwrap();
    let rows = trace.rows();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0].rule, "A1");
    assert_eq!(rows[0].result_value, Some(0));
    for (i, row) in rows.iter().enumerate().skip(1) {
        assert_eq!(row.op, "successor");
        assert_eq!(row.rule, "A2");
        assert_eq!(row.result_value, Some(i as u64));
    }
    assert_eq!(rows[3].result, "s(s(s(0)))");
}

#[test]
fn fraction_six_ninths_reduces_by_three() {
    let trace = build_fraction(6, 9, true).unwrap();

    let pair = trace
        .steps()
        .iter()
        .find(|s| s.op == Op::Pair)
        .expect("pairing step");
    assert_eq!(pair.args[0].value(), 6);
    assert_eq!(pair.args[1].value(), 9);

    let reduce = trace
        .steps()
        .iter()
        .find(|s| s.op == Op::Reduce)
        .expect("reduction step");
    assert_eq!(reduce.rule, Rule::Reduce);
    assert_eq!(reduce.args[2].value(), 3);
    assert_eq!(reduce.outcome.value_text(), "2/3");

    assert_eq!(trace.result().value_text(), "2/3");
}

#[test]
fn fraction_zero_denominator_fails() {
    let err = build_fraction(5, 0, true).unwrap_err();
    assert!(err.to_string().contains("invalid input"));
}

#[test]
fn fraction_zero_numerator_is_reported_unreduced() {
    let trace = build_fraction(0, 7, true).unwrap();
    assert_eq!(trace.result().value_text(), "0/7");
    assert!(trace.steps().iter().all(|s| s.op != Op::Reduce));
}

#[test]
fn pairing_follows_both_component_constructions() {
    let trace = build_fraction(2, 5, true).unwrap();
    let pair_index = trace
        .steps()
        .iter()
        .position(|s| s.op == Op::Pair)
        .expect("pairing step");
    // 3 steps for the numerator, 6 for the denominator.
    assert_eq!(pair_index, 9);
    let successors = trace.steps()[..pair_index]
        .iter()
        .filter(|s| s.op == Op::Successor)
        .count();
    assert_eq!(successors, 7);
}

// ----- Original operation vectors -----

#[test]
fn addition_vectors() {
    for (a, b) in [(0, 0), (0, 10), (10, 0), (2, 3), (7, 8), (12, 3), (6, 6)] {
        let mut s = Stepper::new();
        assert_eq!(s.add(Nat::new(a), Nat::new(b)).value(), a + b);
    }
}

#[test]
fn multiplication_vectors() {
    for (a, b) in [(0, 0), (0, 1), (1, 0), (2, 3), (3, 4), (5, 2), (6, 1)] {
        let mut s = Stepper::new();
        assert_eq!(s.multiply(Nat::new(a), Nat::new(b)).value(), a * b);
    }
}

#[test]
fn division_vectors() {
    for (a, b, q, r) in [
        (0, 1, 0, 0),
        (10, 2, 5, 0),
        (7, 3, 2, 1),
        (11, 4, 2, 3),
        (17, 6, 2, 5),
        (5, 7, 0, 5),
    ] {
        let mut s = Stepper::new();
        assert_eq!(s.div(Nat::new(a), Nat::new(b)).unwrap().value(), q);
        let mut s = Stepper::new();
        assert_eq!(s.modulo(Nat::new(a), Nat::new(b)).unwrap().value(), r);
    }
}

#[test]
fn gcd_vectors() {
    for (a, b, g) in [
        (1, 1, 1),
        (4, 6, 2),
        (8, 12, 4),
        (14, 21, 7),
        (18, 24, 6),
        (13, 7, 1),
        (30, 18, 6),
    ] {
        let mut s = Stepper::new();
        assert_eq!(s.gcd(Nat::new(a), Nat::new(b)).value(), g);
    }
}

#[test]
fn step_counting_varies_with_work() {
    let mut s = Stepper::new();
    s.add(Nat::new(2), Nat::new(3));
    let add_steps = s.step_count();

    let mut s = Stepper::new();
    s.multiply(Nat::new(3), Nat::new(4));
    let mul_steps = s.step_count();

    assert!(add_steps > 0);
    // Multiplication replays an addition per level and costs strictly more.
    assert!(mul_steps > add_steps);
}

#[test]
fn fraction_report_for_seven_thirds() {
    let mut s = Stepper::new();
    let report = s.describe_fraction(Nat::new(7), Nat::new(3)).unwrap();
    assert_eq!(report.numerator.value, 7);
    assert_eq!(report.numerator.term, "s(s(s(s(s(s(s(0)))))))");
    assert_eq!(report.gcd.value, 1);
    assert_eq!(report.quotient.value, 2);
    assert_eq!(report.remainder.value, 1);
    assert_eq!(report.check.value, 7);
}

// ----- Serialized row format -----

#[test]
fn rows_serialize_for_the_view_layer() {
    let trace = build_natural(2).unwrap();
    let json = serde_json::to_value(trace.rows()).unwrap();

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["rule"], "A1");
    assert_eq!(rows[2]["op"], "successor");
    assert_eq!(rows[2]["result"], "s(s(0))");
    assert_eq!(rows[2]["result_value"], 2);
    assert_eq!(rows[2]["meaning"], "1 + 1 = 2");
    assert!(rows[2]["explanation"].as_str().unwrap().starts_with("Successor of"));
}

#[test]
fn metrics_serialize() {
    let mut s = Stepper::new();
    let diff = s.subtract(Nat::new(2), Nat::new(5));
    let trace = s.finish(Outcome::Term(diff));
    let json = serde_json::to_value(trace.metrics()).unwrap();
    assert_eq!(json["clamped"], true);
    assert_eq!(json["step_count"], trace.len());
}
