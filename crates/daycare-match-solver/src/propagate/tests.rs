//! Tests for bounds propagation.

use super::*;

fn two_vars() -> (BoolModel, daycare_match_model::BoolVar, daycare_match_model::BoolVar) {
    let mut model = BoolModel::new();
    let a = model.new_bool_var("a");
    let b = model.new_bool_var("b");
    (model, a, b)
}

#[test]
fn test_at_most_one_fixes_the_rest() {
    let (mut model, a, b) = two_vars();
    model.add_le(LinearExpr::sum([a, b]), 1);

    let mut propagator = Propagator::new(&model);
    propagator.propagate_all().unwrap();
    assert_eq!(propagator.value(b.index()), None);

    propagator.decide(a.index(), true).unwrap();
    assert_eq!(propagator.value(b.index()), Some(false));
    assert_eq!(propagator.fixed_count(), 1);
}

#[test]
fn test_equality_channels_both_ways() {
    let (mut model, a, b) = two_vars();
    model.add_eq(LinearExpr::from(a).term(b, -1), 0);

    let mut propagator = Propagator::new(&model);
    propagator.decide(b.index(), false).unwrap();
    assert_eq!(propagator.value(a.index()), Some(false));
}

#[test]
fn test_violated_constraint_disables_its_enforcement() {
    let (mut model, a, b) = two_vars();
    model.fix(b, true).only_enforce_if(a);
    model.fix(b, false);

    let mut propagator = Propagator::new(&model);
    propagator.propagate_all().unwrap();
    assert_eq!(propagator.value(b.index()), Some(false));
    assert_eq!(propagator.value(a.index()), Some(false));
}

#[test]
fn test_negated_enforcement_is_set_true() {
    let (mut model, a, b) = two_vars();
    model.add_ge(LinearExpr::from(b), 1).only_enforce_if(!a);
    model.fix(b, false);

    let mut propagator = Propagator::new(&model);
    propagator.propagate_all().unwrap();
    assert_eq!(propagator.value(a.index()), Some(true));
}

#[test]
fn test_contradiction_is_a_conflict() {
    let (mut model, a, _) = two_vars();
    model.fix(a, true);
    model.fix(a, false);

    let mut propagator = Propagator::new(&model);
    assert_eq!(propagator.propagate_all(), Err(Conflict));
}

#[test]
fn test_undo_restores_unassigned_state() {
    let (mut model, a, b) = two_vars();
    model.add_le(LinearExpr::sum([a, b]), 1);

    let mut propagator = Propagator::new(&model);
    let mark = propagator.trail_len();
    propagator.decide(a.index(), true).unwrap();
    assert_eq!(propagator.trail_len(), 2);

    propagator.undo_to(mark);
    assert_eq!(propagator.value(a.index()), None);
    assert_eq!(propagator.value(b.index()), None);
    assert_eq!(propagator.next_unassigned(0), Some(0));
}

#[test]
fn test_optimistic_bound_counts_open_positive_terms() {
    let (mut model, a, b) = two_vars();
    model.add_le(LinearExpr::sum([a, b]), 2);
    let objective = LinearExpr::new().term(a, 3).term(b, -2).plus(1);

    let mut propagator = Propagator::new(&model);
    assert_eq!(propagator.optimistic_bound(&objective), 4);
    propagator.decide(a.index(), false).unwrap();
    propagator.decide(b.index(), true).unwrap();
    assert_eq!(propagator.optimistic_bound(&objective), -1);
    assert_eq!(propagator.snapshot(), vec![false, true]);
}
