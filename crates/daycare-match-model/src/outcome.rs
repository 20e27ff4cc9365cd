//! Readback of a solver response into per-child assignments.

use std::collections::BTreeMap;
use std::time::Duration;

use daycare_match_core::{ChildId, DaycareId, FamilyId, MatchingContext, PreferenceTuple, Result};

use crate::builder::MatchingModel;
use crate::solver::{SolveResponse, SolveStatus};

/// Result of one matching run.
///
/// Without a solution every child is unmatched and no position is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub status: SolveStatus,
    /// Number of matched children reported by the solver.
    pub objective: Option<i64>,
    pub wall_time: Duration,
    /// Assigned daycare per child, [`DaycareId::UNMATCHED`] when unmatched.
    pub assignments: BTreeMap<ChildId, DaycareId>,
    /// Whether each (family, position) was chosen.
    pub chosen_positions: BTreeMap<(FamilyId, usize), bool>,
    /// The preference tuple each assigned family received.
    pub family_assignments: BTreeMap<FamilyId, PreferenceTuple>,
    /// Number of blocking (family, position) pairs in the solution.
    pub blocking: usize,
}

impl MatchOutcome {
    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    /// Children placed at a real daycare.
    pub fn matched_count(&self) -> usize {
        self.assignments
            .values()
            .filter(|d| !d.is_unmatched())
            .count()
    }

    pub fn assigned_daycare(&self, child: ChildId) -> DaycareId {
        self.assignments
            .get(&child)
            .copied()
            .unwrap_or(DaycareId::UNMATCHED)
    }

    /// The position assigned to `family`, if any.
    pub fn chosen_position(&self, family: FamilyId) -> Option<usize> {
        self.chosen_positions
            .iter()
            .find(|((f, _), chosen)| *f == family && **chosen)
            .map(|((_, p), _)| *p)
    }
}

impl MatchingModel {
    /// Reads a solver response back into assignments.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if `ctx` is not the context the model was built from.
    pub fn read_back(&self, ctx: &MatchingContext, response: &SolveResponse) -> Result<MatchOutcome> {
        let mut assignments: BTreeMap<ChildId, DaycareId> = ctx
            .children()
            .iter()
            .map(|c| (c.id, DaycareId::UNMATCHED))
            .collect();
        let mut chosen_positions = BTreeMap::new();
        let mut family_assignments = BTreeMap::new();

        for family in ctx.families() {
            for p in 0..family.position_count() {
                let chosen = self
                    .xfp(family.id, p)
                    .and_then(|x| response.value(x))
                    .unwrap_or(false);
                chosen_positions.insert((family.id, p), chosen);
                if !chosen {
                    continue;
                }
                for &c in &family.children {
                    let derived = ctx.derived_child(c)?;
                    if let Some(&d) = derived.projected_pref.get(p) {
                        assignments.insert(c, d);
                    }
                }
                if let Some(tuple) = family.pref.get(p) {
                    family_assignments.insert(family.id, tuple.clone());
                }
            }
        }

        let blocking = self
            .blocking_vars()
            .filter(|(_, b)| response.value(*b).unwrap_or(false))
            .count();

        Ok(MatchOutcome {
            status: response.status,
            objective: response.objective,
            wall_time: response.wall_time,
            assignments,
            chosen_positions,
            family_assignments,
            blocking,
        })
    }
}
