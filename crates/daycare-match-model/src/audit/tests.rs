//! Tests for readback and the outcome audit.

use std::time::Duration;

use daycare_match_core::{ChildId, MatchingContext, PreferenceTuple};
use daycare_match_test::scenarios::{self, MAIN_DAYCARE, OTHER_DAYCARE};

use super::*;
use crate::builder::{MatchingModel, MatchingModelBuilder};
use crate::solver::{SolveResponse, SolveStatus};
use crate::test_support::outcome_for;

const MAIN: DaycareId = DaycareId(MAIN_DAYCARE);

fn build(ctx: &MatchingContext, settings: ModelSettings) -> MatchingModel {
    MatchingModelBuilder::new(ctx, settings).build().unwrap()
}

#[test]
fn test_read_back_assigns_projected_daycares() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());
    let outcome = outcome_for(&built, &ctx, &[(1, 1), (50, 0)]);

    assert_eq!(outcome.assigned_daycare(ChildId(1)), DaycareId::UNMATCHED);
    assert_eq!(outcome.assigned_daycare(ChildId(11)), MAIN);
    assert_eq!(outcome.assigned_daycare(ChildId(12)), MAIN);
    assert_eq!(outcome.matched_count(), 2);
    assert_eq!(outcome.chosen_position(FamilyId(50)), Some(0));
    assert_eq!(outcome.chosen_positions[&(FamilyId(50), 1)], false);
    assert_eq!(
        outcome.family_assignments[&FamilyId(50)],
        PreferenceTuple::from_slice(&[MAIN, MAIN])
    );
    assert_eq!(outcome.blocking, 1);
}

#[test]
fn test_read_back_without_solution_leaves_everyone_unmatched() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());
    let response = SolveResponse::without_solution(SolveStatus::Unknown, Duration::from_secs(1));
    let outcome = built.read_back(&ctx, &response).unwrap();

    assert!(!outcome.has_solution());
    assert_eq!(outcome.matched_count(), 0);
    assert_eq!(outcome.assignments.len(), 3);
    assert!(outcome.chosen_positions.values().all(|chosen| !chosen));
    assert!(outcome.family_assignments.is_empty());
    assert_eq!(outcome.objective, None);
}

#[test]
fn test_audit_of_stable_outcome() {
    let ctx = scenarios::derive(&scenarios::stability());
    let settings = ModelSettings::default();
    let built = build(&ctx, settings);
    let outcome = outcome_for(&built, &ctx, &[(1, 0), (50, 1)]);

    let audit = audit_outcome(&ctx, &settings, &outcome).unwrap();
    assert!(audit.is_feasible());
    assert_eq!(audit.blocking_count(), 0);
    assert_eq!(audit.matched, 1);
}

#[test]
fn test_audit_finds_blocking_pair() {
    let ctx = scenarios::derive(&scenarios::stability());
    let settings = ModelSettings::default();
    let built = build(&ctx, settings);
    let outcome = outcome_for(&built, &ctx, &[(1, 1), (50, 0)]);

    let audit = audit_outcome(&ctx, &settings, &outcome).unwrap();
    assert!(audit.is_feasible());
    assert_eq!(audit.blocking_pairs, vec![(FamilyId(1), 0)]);
    assert_eq!(audit.blocking_count(), outcome.blocking);
}

#[test]
fn test_audit_finds_capacity_violation() {
    let ctx = scenarios::derive(&scenarios::siblings(1));
    let settings = ModelSettings::default();
    let built = build(&ctx, settings);
    let outcome = outcome_for(&built, &ctx, &[(1, 1), (50, 0)]);

    let audit = audit_outcome(&ctx, &settings, &outcome).unwrap();
    assert_eq!(
        audit.capacity_violations,
        vec![CapacityViolation {
            daycare: MAIN,
            age: 0,
            seated: 2,
            capacity: 1,
        }]
    );
    assert!(!audit.is_feasible());
}

#[test]
fn test_audit_finds_unplaced_transfer() {
    let ctx = scenarios::derive(&scenarios::transfer());
    let settings = ModelSettings::default();
    let built = build(&ctx, settings);

    let unplaced = outcome_for(&built, &ctx, &[(1, 0)]);
    let audit = audit_outcome(&ctx, &settings, &unplaced).unwrap();
    assert_eq!(audit.unplaced_transfers, vec![FamilyId(5)]);

    let placed = outcome_for(&built, &ctx, &[(1, 0), (5, 1)]);
    assert_eq!(placed.assigned_daycare(ChildId(5)), DaycareId(OTHER_DAYCARE));
    let audit = audit_outcome(&ctx, &settings, &placed).unwrap();
    assert!(audit.is_feasible());
    assert_eq!(audit.blocking_count(), 0);
}

#[test]
fn test_pooled_capacity_seats_same_age_children() {
    let ctx = scenarios::derive(&scenarios::pooling_same_age());

    let per_age = ModelSettings::default();
    let built = build(&ctx, per_age);
    let outcome = outcome_for(&built, &ctx, &[(1, 0), (2, 0)]);
    let audit = audit_outcome(&ctx, &per_age, &outcome).unwrap();
    assert_eq!(audit.capacity_violations.len(), 1);

    let pooled = ModelSettings::default().with_scope(daycare_match_core::RankingScope::Pooled);
    let built = build(&ctx, pooled);
    let outcome = outcome_for(&built, &ctx, &[(1, 0), (2, 0)]);
    let audit = audit_outcome(&ctx, &pooled, &outcome).unwrap();
    assert!(audit.is_feasible());
    assert_eq!(audit.matched, 2);
}
