//! Hand-computed assignments for checking the model without a solver.

use std::collections::BTreeMap;
use std::time::Duration;

use daycare_match_core::{ChildId, DaycareId, FamilyId, MatchingContext};

use crate::builder::MatchingModel;
use crate::eligibility::sibling_groups;
use crate::expr::BoolVar;
use crate::outcome::MatchOutcome;
use crate::solver::{SolveResponse, SolveStatus};

/// Values of every model variable when each listed family takes the given
/// position and every other family stays unassigned.
pub(crate) fn values_for(
    built: &MatchingModel,
    ctx: &MatchingContext,
    chosen: &[(u32, usize)],
) -> Vec<bool> {
    let chosen: BTreeMap<FamilyId, usize> =
        chosen.iter().map(|&(f, p)| (FamilyId(f), p)).collect();
    let mut values = vec![false; built.model().var_count()];
    let mut assigned: BTreeMap<ChildId, DaycareId> = BTreeMap::new();

    for family in ctx.families() {
        let pick = chosen.get(&family.id).copied();
        for p in 0..family.position_count() {
            set(&mut values, built.xfp(family.id, p), pick == Some(p));
            set(
                &mut values,
                built.alpha(family.id, p),
                pick.is_some_and(|q| q <= p),
            );
        }
        if let Some(p) = pick {
            for (&c, &d) in family.children.iter().zip(&family.pref[p]) {
                assigned.insert(c, d);
            }
        }
    }

    for child in ctx.children() {
        let derived = ctx.derived_child(child.id).unwrap();
        for &d in &derived.all_daycare_ids {
            set(
                &mut values,
                built.xcd(child.id, d),
                assigned.get(&child.id) == Some(&d),
            );
        }
    }

    for family in ctx.families() {
        let pick = chosen.get(&family.id).copied();
        for p in 0..family.position_count() {
            let mut position_fits = true;
            for d in family.daycares_at(p) {
                let mut daycare_fits = true;
                for group in sibling_groups(ctx, built.settings(), family, p, d).unwrap() {
                    let occupied = group
                        .better
                        .iter()
                        .filter(|b| assigned.get(b) == Some(&d))
                        .count();
                    let fits = group.fits_with(occupied);
                    set(&mut values, built.gamma_group(family.id, p, d, group.age), fits);
                    daycare_fits &= fits;
                }
                set(&mut values, built.gamma_daycare(family.id, p, d), daycare_fits);
                position_fits &= daycare_fits;
            }
            set(&mut values, built.gamma(family.id, p), position_fits);
            let matched = pick.is_some_and(|q| q <= p);
            set(&mut values, built.beta(family.id, p), !matched && position_fits);
        }
    }
    values
}

/// Reads back [`values_for`] as if a solver had returned it.
pub(crate) fn outcome_for(
    built: &MatchingModel,
    ctx: &MatchingContext,
    chosen: &[(u32, usize)],
) -> MatchOutcome {
    let values = values_for(built, ctx, chosen);
    let objective = built.model().objective_value(&values);
    let response =
        SolveResponse::with_solution(SolveStatus::Feasible, values, objective, Duration::ZERO);
    built.read_back(ctx, &response).unwrap()
}

fn set(values: &mut [bool], var: Option<BoolVar>, value: bool) {
    let var = var.expect("variable exists");
    values[var.index()] = value;
}
