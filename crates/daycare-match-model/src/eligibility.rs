//! Sibling groups and the children that outrank them.
//!
//! A family applying to daycare `d` at position `p` is split into one group
//! per age (or per pooling group when capacity is pooled). A group is
//! represented by its worst-ranked member; it fits when the children ranked
//! ahead of that member who hold a seat at `d`, plus the group itself, stay
//! within the effective capacity.

use daycare_match_core::{
    Age, ChildId, DaycareId, Family, MatchingContext, PriorityQuery, Result, AGE_COUNT,
};

use crate::settings::ModelSettings;

/// Members of one family applying to one daycare at one position, grouped
/// by age.
#[derive(Debug, Clone, PartialEq)]
pub struct SiblingGroup {
    pub daycare: DaycareId,
    pub age: Age,
    pub members: Vec<ChildId>,
    /// Lowest-ranked member.
    pub worst: ChildId,
    /// Non-siblings that outrank `worst`.
    pub better: Vec<ChildId>,
    /// Effective capacity for `age` at `daycare`.
    pub capacity: u32,
}

impl SiblingGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether the group fits when `occupied` of the better children hold a seat.
    pub fn fits_with(&self, occupied: usize) -> bool {
        (occupied + self.size()) as u64 <= u64::from(self.capacity)
    }

    /// Largest number of better children that may hold a seat with the group
    /// still fitting; negative when the group alone exceeds capacity.
    pub fn slack(&self) -> i64 {
        i64::from(self.capacity) - self.size() as i64
    }
}

/// Groups of `family` at (`position`, `daycare`), one per age with applicants.
pub fn sibling_groups(
    ctx: &MatchingContext,
    settings: &ModelSettings,
    family: &Family,
    position: usize,
    daycare: DaycareId,
) -> Result<Vec<SiblingGroup>> {
    let query = PriorityQuery::new(ctx, settings.scope, settings.siblings)
        .with_tie_tolerance(settings.tie_tolerance);
    let derived = ctx.derived_daycare(daycare)?;

    let mut groups = Vec::new();
    for age in 0..AGE_COUNT {
        let members = query.siblings_in_age_group(family, position, daycare, age)?;
        let Some(worst) = query.worst_sibling(family, position, daycare, age)? else {
            continue;
        };
        let better = query.better(worst, daycare, settings.comparison, settings.search_depth)?;
        groups.push(SiblingGroup {
            daycare,
            age,
            members,
            worst,
            better,
            capacity: derived.capacity_for(settings.scope, age),
        });
    }
    Ok(groups)
}
