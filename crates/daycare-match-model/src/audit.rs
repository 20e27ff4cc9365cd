//! Solver-independent check of an outcome.
//!
//! The audit recomputes capacity usage, the transfer guarantee and the
//! blocking pairs from the assignments alone, using the same eligibility
//! rules as the model builder.

use daycare_match_core::{Age, DaycareId, FamilyId, MatchingContext, Result, AGE_COUNT};

use crate::eligibility::sibling_groups;
use crate::outcome::MatchOutcome;
use crate::settings::ModelSettings;

/// More children seated than an age's effective capacity allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityViolation {
    pub daycare: DaycareId,
    pub age: Age,
    pub seated: usize,
    pub capacity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeAudit {
    pub capacity_violations: Vec<CapacityViolation>,
    /// Families holding a current seat that were not assigned a position.
    pub unplaced_transfers: Vec<FamilyId>,
    /// (family, position) pairs at which the family blocks.
    pub blocking_pairs: Vec<(FamilyId, usize)>,
    pub matched: usize,
}

impl OutcomeAudit {
    /// No capacity is exceeded and every transfer family is placed.
    pub fn is_feasible(&self) -> bool {
        self.capacity_violations.is_empty() && self.unplaced_transfers.is_empty()
    }

    pub fn blocking_count(&self) -> usize {
        self.blocking_pairs.len()
    }
}

/// Audits `outcome` against the context it was solved for.
pub fn audit_outcome(
    ctx: &MatchingContext,
    settings: &ModelSettings,
    outcome: &MatchOutcome,
) -> Result<OutcomeAudit> {
    let mut audit = OutcomeAudit {
        matched: outcome.matched_count(),
        ..OutcomeAudit::default()
    };

    for daycare in ctx.daycares() {
        let derived = ctx.derived_daycare(daycare.id)?;
        for age in 0..AGE_COUNT {
            let seated = derived
                .ranking(settings.scope, age)
                .iter()
                .filter(|&&c| outcome.assigned_daycare(c) == daycare.id)
                .count();
            let capacity = derived.capacity_for(settings.scope, age);
            if seated as u64 > u64::from(capacity) {
                audit.capacity_violations.push(CapacityViolation {
                    daycare: daycare.id,
                    age,
                    seated,
                    capacity,
                });
            }
        }
    }

    for family in ctx.families() {
        let assigned = outcome.chosen_position(family.id);
        if assigned.is_none() && ctx.is_transfer_family(family)? {
            audit.unplaced_transfers.push(family.id);
        }

        for p in 0..family.position_count() {
            if assigned.is_some_and(|q| q <= p) {
                continue;
            }
            let mut admitted = true;
            for d in family.daycares_at(p) {
                for group in sibling_groups(ctx, settings, family, p, d)? {
                    let occupied = group
                        .better
                        .iter()
                        .filter(|&&b| outcome.assigned_daycare(b) == d)
                        .count();
                    admitted &= group.fits_with(occupied);
                }
            }
            if admitted {
                audit.blocking_pairs.push((family.id, p));
            }
        }
    }

    Ok(audit)
}

#[cfg(test)]
mod tests;
