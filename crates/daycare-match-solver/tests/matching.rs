//! End-to-end solves of the fixture scenarios.

use std::time::Duration;

use daycare_match_core::{ChildId, DaycareId, MatchingContext, MatchingInput, RankingScope};
use daycare_match_model::{
    audit_outcome, MatchOutcome, MatchingModelBuilder, ModelSettings, OutcomeAudit, SolveParams,
    SolveStatus, SolverService,
};
use daycare_match_solver::BranchAndBoundSolver;
use daycare_match_test::scenarios::{self, MAIN_DAYCARE, OTHER_DAYCARE};

const MAIN: DaycareId = DaycareId(MAIN_DAYCARE);

fn solve(input: &MatchingInput, settings: ModelSettings) -> (MatchOutcome, OutcomeAudit) {
    let ctx = scenarios::derive(input);
    let built = MatchingModelBuilder::new(&ctx, settings).build().unwrap();
    let params = SolveParams {
        time_limit: Duration::from_secs(30),
        worker_count: 1,
    };
    let response = BranchAndBoundSolver::new().solve(built.model(), &params);
    let outcome = built.read_back(&ctx, &response).unwrap();
    let audit = audit_outcome(&ctx, &settings, &outcome).unwrap();
    (outcome, audit)
}

fn assert_invariants(
    ctx: &MatchingContext,
    settings: &ModelSettings,
    outcome: &MatchOutcome,
    audit: &OutcomeAudit,
) {
    assert!(audit.is_feasible(), "{audit:?}");
    assert!(audit.blocking_count() <= settings.blocking_budget as usize);
    assert_eq!(audit.blocking_count(), outcome.blocking);
    assert_eq!(outcome.objective, Some(outcome.matched_count() as i64));
    for child in ctx.children() {
        let assigned = outcome.assigned_daycare(child.id);
        let derived = ctx.derived_child(child.id).unwrap();
        assert!(assigned.is_unmatched() || derived.applies_to(assigned));
    }
}

#[test]
fn test_pooling_matches_both_children() {
    for scope in [RankingScope::PerAge, RankingScope::Pooled] {
        let settings = ModelSettings::default().with_scope(scope);
        let (outcome, audit) = solve(&scenarios::pooling(), settings);
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.matched_count(), 2);
        assert_eq!(audit.blocking_count(), 0);
    }
}

#[test]
fn test_pooling_same_age_needs_pooled_capacity() {
    let (outcome, _) = solve(&scenarios::pooling_same_age(), ModelSettings::default());
    assert_eq!(outcome.matched_count(), 1);
    assert_eq!(outcome.assigned_daycare(ChildId(1)), MAIN);

    let pooled = ModelSettings::default().with_scope(RankingScope::Pooled);
    let (outcome, audit) = solve(&scenarios::pooling_same_age(), pooled);
    assert_eq!(outcome.matched_count(), 2);
    assert!(audit.is_feasible());
}

#[test]
fn test_siblings_are_never_split() {
    for capacity in 1..=3 {
        let (outcome, audit) = solve(&scenarios::siblings(capacity), ModelSettings::default());
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert!(audit.is_feasible());
        assert_eq!(
            outcome.assigned_daycare(ChildId(11)),
            outcome.assigned_daycare(ChildId(12))
        );
    }
}

#[test]
fn test_siblings_need_room_for_both() {
    let (outcome, _) = solve(&scenarios::siblings(1), ModelSettings::default());
    assert_eq!(outcome.assigned_daycare(ChildId(1)), MAIN);
    assert_eq!(outcome.assigned_daycare(ChildId(11)), DaycareId::UNMATCHED);
    assert_eq!(outcome.matched_count(), 1);

    let (outcome, _) = solve(&scenarios::siblings(3), ModelSettings::default());
    assert_eq!(outcome.matched_count(), 3);
}

#[test]
fn test_stability_trades_blocking_for_matches() {
    let (strict, audit) = solve(&scenarios::stability(), ModelSettings::default());
    assert_eq!(strict.status, SolveStatus::Optimal);
    assert_eq!(strict.matched_count(), 1);
    assert_eq!(strict.assigned_daycare(ChildId(1)), MAIN);
    assert_eq!(audit.blocking_count(), 0);

    let relaxed_settings = ModelSettings::default().with_blocking_budget(1);
    let (relaxed, audit) = solve(&scenarios::stability(), relaxed_settings);
    assert_eq!(relaxed.matched_count(), 2);
    assert_eq!(relaxed.assigned_daycare(ChildId(1)), DaycareId::UNMATCHED);
    assert_eq!(audit.blocking_count(), 1);
}

#[test]
fn test_transfer_keeps_current_seat() {
    let (outcome, audit) = solve(&scenarios::transfer(), ModelSettings::default());
    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.assigned_daycare(ChildId(1)), MAIN);
    assert_eq!(outcome.assigned_daycare(ChildId(5)), DaycareId(OTHER_DAYCARE));
    assert!(audit.unplaced_transfers.is_empty());
}

#[test]
fn test_stranded_transfer_is_infeasible() {
    let (outcome, _) = solve(&scenarios::stranded_transfer(), ModelSettings::default());
    assert_eq!(outcome.status, SolveStatus::Infeasible);
    assert_eq!(outcome.matched_count(), 0);
    assert_eq!(outcome.assigned_daycare(ChildId(5)), DaycareId::UNMATCHED);
}

#[test]
fn test_small_city_fills_every_seat_stably() {
    let input = scenarios::small_city();
    let ctx = scenarios::derive(&input);
    let settings = ModelSettings::default();
    let (outcome, audit) = solve(&input, settings);

    assert_eq!(outcome.status, SolveStatus::Optimal);
    assert_eq!(outcome.matched_count(), 7);
    assert_eq!(outcome.assigned_daycare(ChildId(7)), DaycareId(OTHER_DAYCARE));
    assert_invariants(&ctx, &settings, &outcome, &audit);
}

#[test]
fn test_repeated_solves_agree() {
    let input = scenarios::small_city();
    let settings = ModelSettings::default().with_blocking_budget(2);
    let (first, _) = solve(&input, settings);
    let (second, _) = solve(&input, settings);
    assert_eq!(first.objective, second.objective);
    assert_eq!(first.assignments, second.assignments);
}
