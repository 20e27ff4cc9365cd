//! The matching context: raw entities plus their derived views.
//!
//! [`MatchingContext::from_input`] runs the derivation pipeline. The stages
//! must run in this order because each one reads what the previous wrote:
//!
//! 1. build entities and append the synthetic unmatched daycare
//! 2. normalize family preferences (done by [`Family::from_record`])
//! 3. project family preferences onto children
//! 4. rank the applicants of the unmatched daycare
//! 5. split every priority list by age, plain and pooled
//! 6. compute effective capacities, plain and pooled
//!
//! Entities are immutable once the context exists; every derived attribute
//! lives in [`DerivedChild`] and [`DerivedDaycare`].

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::domain::{Child, Daycare, Family};
use crate::error::{MatchError, Result};
use crate::ids::{Age, ChildId, DaycareId, FamilyId, AGE_COUNT, UNMATCHED_SCORE};
use crate::priority::RankingScope;
use crate::records::MatchingInput;

/// Attributes of a child derived from its family's preferences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedChild {
    /// One daycare per family preference position.
    pub projected_pref: Vec<DaycareId>,
    /// Distinct daycares of `projected_pref`, first-seen order.
    pub all_daycare_ids: Vec<DaycareId>,
}

impl DerivedChild {
    /// Every position at which the projected preference names `daycare`.
    pub fn positions_of(&self, daycare: DaycareId) -> Vec<usize> {
        self.projected_pref
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == daycare)
            .map(|(p, _)| p)
            .collect()
    }

    pub fn applies_to(&self, daycare: DaycareId) -> bool {
        self.all_daycare_ids.contains(&daycare)
    }
}

/// Priority and capacity views of a daycare.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedDaycare {
    /// Effective priority list; synthesized for the unmatched daycare.
    pub priority: Vec<ChildId>,
    /// Scores parallel to `priority`.
    pub scores: Vec<f64>,
    /// Priority restricted to each age.
    pub priority_by_age: [Vec<ChildId>; AGE_COUNT],
    /// Priority per age, with children cross-listed into every age of their pooling group.
    pub pooled_priority_by_age: [Vec<ChildId>; AGE_COUNT],
    /// Recruiting numbers plus one seat per incumbent.
    pub capacity: [u32; AGE_COUNT],
    /// `capacity` summed over each pooling group.
    pub pooled_capacity: [u32; AGE_COUNT],
}

impl DerivedDaycare {
    /// The per-age ranking used under `scope`.
    pub fn ranking(&self, scope: RankingScope, age: Age) -> &[ChildId] {
        match scope {
            RankingScope::PerAge => &self.priority_by_age[age],
            RankingScope::Pooled => &self.pooled_priority_by_age[age],
        }
    }

    /// The effective capacity used under `scope`.
    pub fn capacity_for(&self, scope: RankingScope, age: Age) -> u32 {
        match scope {
            RankingScope::PerAge => self.capacity[age],
            RankingScope::Pooled => self.pooled_capacity[age],
        }
    }

    /// Score of the child's first occurrence in the priority list.
    pub fn score_of(&self, child: ChildId) -> Option<f64> {
        self.priority
            .iter()
            .position(|c| *c == child)
            .and_then(|i| self.scores.get(i).copied())
    }
}

/// Entities indexed by id together with their derived views.
#[derive(Debug, Clone)]
pub struct MatchingContext {
    children: Vec<Child>,
    daycares: Vec<Daycare>,
    families: Vec<Family>,
    child_index: HashMap<ChildId, usize>,
    daycare_index: HashMap<DaycareId, usize>,
    family_index: HashMap<FamilyId, usize>,
    derived_children: Vec<DerivedChild>,
    derived_daycares: Vec<DerivedDaycare>,
}

impl MatchingContext {
    /// Builds entities from records and runs the derivation pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] when a record references an unknown
    /// id, [`MatchError::InvalidInput`] for inconsistent records and
    /// [`MatchError::Config`] for negative capacities.
    pub fn from_input(input: &MatchingInput) -> Result<Self> {
        let children = input
            .children
            .iter()
            .map(Child::from_record)
            .collect::<Result<Vec<_>>>()?;
        let mut daycares = input
            .daycares
            .iter()
            .map(Daycare::from_record)
            .collect::<Result<Vec<_>>>()?;
        if daycares.iter().any(|d| d.id.is_unmatched()) {
            return Err(MatchError::InvalidInput(format!(
                "daycare id {} is reserved for the unmatched option",
                DaycareId::UNMATCHED
            )));
        }
        daycares.push(Daycare::unmatched());
        let families = input
            .families
            .iter()
            .map(Family::from_record)
            .collect::<Result<Vec<_>>>()?;

        let child_index = index_by(&children, |c| c.id, "child")?;
        let daycare_index = index_by(&daycares, |d| d.id, "daycare")?;
        let family_index = index_by(&families, |f| f.id, "family")?;

        let mut ctx = Self {
            derived_children: vec![DerivedChild::default(); children.len()],
            derived_daycares: Vec::with_capacity(daycares.len()),
            children,
            daycares,
            families,
            child_index,
            daycare_index,
            family_index,
        };
        ctx.project_preferences()?;
        let unmatched_applicants = ctx.unmatched_applicants();
        ctx.derived_daycares = ctx
            .daycares
            .iter()
            .map(|d| {
                let (priority, scores) = if d.id.is_unmatched() {
                    let scores = vec![UNMATCHED_SCORE; unmatched_applicants.len()];
                    (unmatched_applicants.clone(), scores)
                } else {
                    (d.priority.clone(), d.scores.clone())
                };
                ctx.derive_daycare(d, priority, scores)
            })
            .collect::<Result<Vec<_>>>()?;
        ctx.credit_incumbents()?;

        debug!(
            event = "context_derived",
            children = ctx.children.len(),
            daycares = ctx.daycares.len(),
            families = ctx.families.len(),
            unmatched_applicants = unmatched_applicants.len(),
        );
        Ok(ctx)
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn daycares(&self) -> &[Daycare] {
        &self.daycares
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn child(&self, id: ChildId) -> Result<&Child> {
        self.child_index
            .get(&id)
            .map(|&i| &self.children[i])
            .ok_or_else(|| MatchError::child_not_found(id))
    }

    pub fn daycare(&self, id: DaycareId) -> Result<&Daycare> {
        self.daycare_index
            .get(&id)
            .map(|&i| &self.daycares[i])
            .ok_or_else(|| MatchError::daycare_not_found(id))
    }

    pub fn family(&self, id: FamilyId) -> Result<&Family> {
        self.family_index
            .get(&id)
            .map(|&i| &self.families[i])
            .ok_or_else(|| MatchError::family_not_found(id))
    }

    pub fn derived_child(&self, id: ChildId) -> Result<&DerivedChild> {
        self.child_index
            .get(&id)
            .map(|&i| &self.derived_children[i])
            .ok_or_else(|| MatchError::child_not_found(id))
    }

    pub fn derived_daycare(&self, id: DaycareId) -> Result<&DerivedDaycare> {
        self.daycare_index
            .get(&id)
            .map(|&i| &self.derived_daycares[i])
            .ok_or_else(|| MatchError::daycare_not_found(id))
    }

    /// Returns true if any child of the family currently holds a seat.
    pub fn is_transfer_family(&self, family: &Family) -> Result<bool> {
        for &c in &family.children {
            if self.child(c)?.is_transfer() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // Stage 3: copy each family position into its children's projected preference.
    fn project_preferences(&mut self) -> Result<()> {
        for child in &self.children {
            self.family(child.family)?;
        }
        for family in &self.families {
            for &c in &family.children {
                let child = self.child(c)?;
                if child.family != family.id {
                    return Err(MatchError::InvalidInput(format!(
                        "child {} is listed by family {} but belongs to family {}",
                        c, family.id, child.family
                    )));
                }
            }
            for tuple in &family.pref {
                for (&c, &d) in family.children.iter().zip(tuple) {
                    let i = self.child_index[&c];
                    self.derived_children[i].projected_pref.push(d);
                }
            }
        }
        for derived in &mut self.derived_children {
            let mut seen = Vec::new();
            for &d in &derived.projected_pref {
                if !seen.contains(&d) {
                    seen.push(d);
                }
            }
            derived.all_daycare_ids = seen;
        }
        Ok(())
    }

    // Stage 4: every child that may end up unmatched, in child order.
    fn unmatched_applicants(&self) -> Vec<ChildId> {
        self.children
            .iter()
            .zip(&self.derived_children)
            .filter(|(_, derived)| derived.projected_pref.contains(&DaycareId::UNMATCHED))
            .map(|(c, _)| c.id)
            .collect()
    }

    // Stage 5: per-age rankings.
    fn derive_daycare(
        &self,
        daycare: &Daycare,
        priority: Vec<ChildId>,
        scores: Vec<f64>,
    ) -> Result<DerivedDaycare> {
        let mut priority_by_age: [Vec<ChildId>; AGE_COUNT] = Default::default();
        let mut pooled_priority_by_age: [Vec<ChildId>; AGE_COUNT] = Default::default();
        for &c in &priority {
            let age = self.child(c)?.age;
            push_unique(&mut priority_by_age[age], c);
            for related in daycare.related_ages(age) {
                push_unique(&mut pooled_priority_by_age[related], c);
            }
        }
        Ok(DerivedDaycare {
            priority,
            scores,
            priority_by_age,
            pooled_priority_by_age,
            capacity: daycare.recruiting_numbers,
            pooled_capacity: daycare.recruiting_numbers,
        })
    }

    // Stage 6: incumbents keep a seat at their current daycare until they move.
    fn credit_incumbents(&mut self) -> Result<()> {
        for child in &self.children {
            let i = *self
                .daycare_index
                .get(&child.initial_daycare)
                .ok_or_else(|| MatchError::daycare_not_found(child.initial_daycare))?;
            let slot = &mut self.derived_daycares[i].capacity[child.age];
            *slot = slot
                .checked_add(1)
                .ok_or_else(|| capacity_overflow(child.initial_daycare, child.age))?;
        }
        for (daycare, derived) in self.daycares.iter().zip(&mut self.derived_daycares) {
            derived.pooled_capacity = derived.capacity;
            for group in &daycare.share_ages {
                let mut pooled: u32 = 0;
                for &age in group {
                    pooled = pooled
                        .checked_add(derived.capacity[age])
                        .ok_or_else(|| capacity_overflow(daycare.id, age))?;
                }
                for &age in group {
                    derived.pooled_capacity[age] = pooled;
                }
            }
        }
        Ok(())
    }
}

fn capacity_overflow(daycare: DaycareId, age: Age) -> MatchError {
    MatchError::Config(format!(
        "effective capacity of daycare {daycare} at age {age} exceeds {}",
        u32::MAX
    ))
}

fn push_unique(list: &mut Vec<ChildId>, child: ChildId) {
    if !list.contains(&child) {
        list.push(child);
    }
}

fn index_by<T, K, F>(items: &[T], key: F, what: &str) -> Result<HashMap<K, usize>>
where
    K: Eq + Hash + std::fmt::Display + Copy,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let k = key(item);
        if index.insert(k, i).is_some() {
            return Err(MatchError::InvalidInput(format!("duplicate {} id {}", what, k)));
        }
    }
    Ok(index)
}
