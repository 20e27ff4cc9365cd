//! Tests for the matching model builder.

use daycare_match_core::{MatchError, RankingScope, SiblingPolicy};
use daycare_match_test::scenarios::{self, MAIN_DAYCARE, OTHER_DAYCARE};

use super::*;
use crate::model::Comparison;
use crate::test_support::values_for;

fn build(ctx: &MatchingContext, settings: ModelSettings) -> MatchingModel {
    MatchingModelBuilder::new(ctx, settings).build().unwrap()
}

const MAIN: DaycareId = DaycareId(MAIN_DAYCARE);

#[test]
fn test_variables_per_family_position() {
    let ctx = scenarios::derive(&scenarios::pooling());
    let built = build(&ctx, ModelSettings::default());

    assert_eq!(built.positions().count(), 4);
    assert!(built.xcd(ChildId(1), MAIN).is_some());
    assert!(built.xcd(ChildId(1), DaycareId::UNMATCHED).is_some());
    assert!(built.xcd(ChildId(1), DaycareId(OTHER_DAYCARE)).is_none());
    assert!(built.alpha(FamilyId(2), 1).is_some());
    assert!(built.gamma_group(FamilyId(2), 0, MAIN, 1).is_some());
    assert!(built.gamma_group(FamilyId(2), 0, MAIN, 0).is_none());
    assert_eq!(built.blocking_vars().count(), 4);
}

#[test]
fn test_pooled_scope_groups_every_age_of_the_pool() {
    let ctx = scenarios::derive(&scenarios::pooling());
    let settings = ModelSettings::default().with_scope(RankingScope::Pooled);
    let built = build(&ctx, settings);

    assert!(built.gamma_group(FamilyId(2), 0, MAIN, 0).is_some());
    assert!(built.gamma_group(FamilyId(2), 0, MAIN, 1).is_some());
}

#[test]
fn test_objective_counts_real_daycares_only() {
    let ctx = scenarios::derive(&scenarios::pooling());
    let built = build(&ctx, ModelSettings::default());
    let objective = built.model().objective();

    assert_eq!(objective.terms().len(), 2);
    let unmatched = built.xcd(ChildId(1), DaycareId::UNMATCHED).unwrap();
    assert!(objective.terms().iter().all(|(v, _)| *v != unmatched));
}

#[test]
fn test_transfer_family_takes_exactly_one_position() {
    let ctx = scenarios::derive(&scenarios::transfer());
    let built = build(&ctx, ModelSettings::default());
    let x0 = built.xfp(FamilyId(5), 0).unwrap();
    let x1 = built.xfp(FamilyId(5), 1).unwrap();

    let exactly_one = built.model().constraints().iter().any(|c| {
        c.comparison() == Comparison::Eq
            && c.rhs() == 1
            && c.enforcement().is_empty()
            && c.terms() == [(x0, 1), (x1, 1)]
    });
    assert!(exactly_one);

    let unplaced = values_for(&built, &ctx, &[(1, 0)]);
    assert!(!built.model().is_feasible(&unplaced));
    let placed = values_for(&built, &ctx, &[(1, 0), (5, 1)]);
    assert!(built.model().is_feasible(&placed));
    assert_eq!(built.model().objective_value(&placed), 2);
}

#[test]
fn test_stable_assignment_is_feasible_without_budget() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());

    let values = values_for(&built, &ctx, &[(1, 0), (50, 1)]);
    assert!(built.model().is_feasible(&values));
    assert_eq!(built.model().objective_value(&values), 1);
}

#[test]
fn test_blocking_assignment_needs_budget() {
    let ctx = scenarios::derive(&scenarios::stability());

    let strict = build(&ctx, ModelSettings::default());
    let values = values_for(&strict, &ctx, &[(1, 1), (50, 0)]);
    assert!(!strict.model().is_feasible(&values));
    assert!(values[strict.beta(FamilyId(1), 0).unwrap().index()]);

    let relaxed = build(&ctx, ModelSettings::default().with_blocking_budget(1));
    let values = values_for(&relaxed, &ctx, &[(1, 1), (50, 0)]);
    assert!(relaxed.model().is_feasible(&values));
    assert_eq!(relaxed.model().objective_value(&values), 2);
}

#[test]
fn test_family_with_no_position_blocks_at_unmatched_position() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());

    let values = values_for(&built, &ctx, &[(1, 0)]);
    assert!(values[built.beta(FamilyId(50), 1).unwrap().index()]);
    assert!(!built.model().is_feasible(&values));
}

#[test]
fn test_siblings_do_not_fit_single_seat() {
    let ctx = scenarios::derive(&scenarios::siblings(1));
    let built = build(&ctx, ModelSettings::default());

    let values = values_for(&built, &ctx, &[(1, 1), (50, 0)]);
    assert!(!values[built.gamma(FamilyId(50), 0).unwrap().index()]);
    assert!(!built.model().is_feasible(&values));

    let values = values_for(&built, &ctx, &[(1, 0), (50, 1)]);
    assert!(built.model().is_feasible(&values));
}

#[test]
fn test_included_sibling_enters_better_set() {
    let ctx = scenarios::derive(&scenarios::split_siblings());

    // 11 takes the seat; 12 applies alone at the next position.
    let excluded = build(&ctx, ModelSettings::default());
    let mut values = values_for(&excluded, &ctx, &[(50, 0)]);
    let gamma = excluded.gamma_group(FamilyId(50), 1, MAIN, 0).unwrap();
    assert!(excluded.model().is_feasible(&values));
    assert!(values[gamma.index()]);
    values[gamma.index()] = false;
    assert!(!excluded.model().is_feasible(&values));

    let settings = ModelSettings::default().with_siblings(SiblingPolicy::Include);
    let included = build(&ctx, settings);
    let mut values = values_for(&included, &ctx, &[(50, 0)]);
    let gamma = included.gamma_group(FamilyId(50), 1, MAIN, 0).unwrap();
    assert!(included.model().is_feasible(&values));
    assert!(!values[gamma.index()]);
    values[gamma.index()] = true;
    assert!(!included.model().is_feasible(&values));
}

#[test]
fn test_group_eligibility_is_channeled() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());
    let mut values = values_for(&built, &ctx, &[(1, 0), (50, 1)]);

    let gamma = built.gamma_group(FamilyId(50), 0, MAIN, 0).unwrap();
    assert!(!values[gamma.index()]);
    values[gamma.index()] = true;
    assert!(!built.model().is_feasible(&values));
}

#[test]
fn test_assignment_is_channeled_to_position() {
    let ctx = scenarios::derive(&scenarios::stability());
    let built = build(&ctx, ModelSettings::default());
    let mut values = values_for(&built, &ctx, &[(1, 0), (50, 1)]);

    let xcd = built.xcd(ChildId(11), MAIN).unwrap();
    values[xcd.index()] = true;
    assert!(!built.model().is_feasible(&values));
}

#[test]
fn test_unranked_applicant_is_reported() {
    let mut input = scenarios::siblings(2);
    input.daycares[0].priority_child_id_list.pop();
    input.daycares[0].priority_score_list.pop();
    let ctx = scenarios::derive(&input);

    let err = MatchingModelBuilder::new(&ctx, ModelSettings::default())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::NotRanked {
            child: ChildId(12),
            daycare: MAIN
        }
    );
}
