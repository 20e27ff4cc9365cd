//! Tests for the boolean model.

use super::*;

fn two_vars() -> (BoolModel, BoolVar, BoolVar) {
    let mut model = BoolModel::new();
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    (model, a, b)
}

#[test]
fn test_new_vars_are_indexed_in_order() {
    let (model, a, b) = two_vars();
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(model.var_count(), 2);
    assert_eq!(model.name(b), "b");
}

#[test]
fn test_constant_is_folded_into_rhs() {
    let (mut model, a, b) = two_vars();
    let c = model.add_le(LinearExpr::sum([a, b]).plus(1), 2).clone();
    assert_eq!(c.rhs(), 1);
    assert_eq!(c.comparison(), Comparison::Le);
    assert!(c.is_satisfied(&[true, false]));
    assert!(!c.is_satisfied(&[true, true]));
}

#[test]
fn test_strict_comparisons_shift_bound() {
    let (mut model, a, b) = two_vars();
    model.add_lt(LinearExpr::sum([a, b]), 2);
    model.add_gt(LinearExpr::sum([a, b]), 0);
    assert!(model.is_feasible(&[true, false]));
    assert!(!model.is_feasible(&[true, true]));
    assert!(!model.is_feasible(&[false, false]));
}

#[test]
fn test_enforcement_literal_gates_constraint() {
    let (mut model, a, b) = two_vars();
    model.fix(b, true).only_enforce_if(!a);
    assert!(model.is_feasible(&[false, true]));
    assert!(model.is_feasible(&[true, false]));
    assert!(!model.is_feasible(&[false, false]));
}

#[test]
fn test_first_violation_reports_constraint_index() {
    let (mut model, a, b) = two_vars();
    model.add_ge(LinearExpr::from(a), 1);
    model.add_eq(LinearExpr::new().term(a, 2).term(b, -1), 1);
    assert_eq!(model.first_violation(&[false, false]), Some(0));
    assert_eq!(model.first_violation(&[true, false]), Some(1));
    assert_eq!(model.first_violation(&[true, true]), None);
}

#[test]
fn test_assignment_must_cover_every_var() {
    let (model, _, _) = two_vars();
    assert!(!model.is_feasible(&[true]));
}

#[test]
fn test_objective_value() {
    let (mut model, a, b) = two_vars();
    model.maximize(LinearExpr::new().term(a, 3).term(b, 1).plus(2));
    assert_eq!(model.objective_value(&[true, true]), 6);
    assert_eq!(model.objective_value(&[false, false]), 2);
}

#[test]
fn test_literal_polarity() {
    let (_, a, _) = two_vars();
    let neg = !a;
    assert!(neg.is_negated());
    assert!(neg.holds(false));
    assert!(!neg.satisfying_value());
    assert_eq!(!neg, Literal::from(a));
}

#[test]
fn test_zero_coefficients_are_dropped() {
    let (_, a, b) = two_vars();
    let expr = LinearExpr::new().term(a, 0).term(b, 4);
    assert_eq!(expr.terms(), &[(b, 4)]);
}
