//! Priority queries over the derived rankings.
//!
//! All queries are read-only over a [`MatchingContext`]. The ranking they
//! consult is selected by [`RankingScope`] and whether siblings of the target
//! are reported is selected by [`SiblingPolicy`].

use serde::{Deserialize, Serialize};

use crate::context::MatchingContext;
use crate::domain::Family;
use crate::error::{MatchError, Result};
use crate::ids::{Age, ChildId, DaycareId, FamilyId};

/// Relative tolerance under which two priority scores count as tied.
///
/// Scores `s` and `t` are tied when `|s / t - 1| <= TIE_TOLERANCE`. When the
/// target score is zero only an exact zero ties with it.
pub const TIE_TOLERANCE: f64 = 1e-5;

/// Which per-age ranking and capacity a query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingScope {
    /// Each age is ranked and counted on its own.
    #[default]
    PerAge,
    /// Ages in one pooling group share a ranking and a capacity.
    Pooled,
}

impl RankingScope {
    pub fn from_sharing(share_capacity: bool) -> Self {
        if share_capacity {
            RankingScope::Pooled
        } else {
            RankingScope::PerAge
        }
    }
}

/// Whether siblings of the target child appear in "better" sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiblingPolicy {
    #[default]
    Exclude,
    Include,
}

impl SiblingPolicy {
    pub fn from_exclusion(exclude_siblings: bool) -> Self {
        if exclude_siblings {
            SiblingPolicy::Exclude
        } else {
            SiblingPolicy::Include
        }
    }
}

/// Which "better" set decides whether a sibling group fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// Only children ranked strictly ahead.
    Strict,
    /// Children ranked ahead plus near-tied children shortly after.
    #[default]
    WeakWithTies,
}

/// Priority queries bound to a context, scope and sibling policy.
#[derive(Debug, Clone, Copy)]
pub struct PriorityQuery<'a> {
    ctx: &'a MatchingContext,
    scope: RankingScope,
    siblings: SiblingPolicy,
    tie_tolerance: f64,
}

impl<'a> PriorityQuery<'a> {
    pub fn new(ctx: &'a MatchingContext, scope: RankingScope, siblings: SiblingPolicy) -> Self {
        Self {
            ctx,
            scope,
            siblings,
            tie_tolerance: TIE_TOLERANCE,
        }
    }

    pub fn with_tie_tolerance(mut self, tie_tolerance: f64) -> Self {
        self.tie_tolerance = tie_tolerance;
        self
    }

    pub fn scope(&self) -> RankingScope {
        self.scope
    }

    /// Children ranked strictly ahead of `child` at `daycare` for the child's age.
    ///
    /// # Errors
    ///
    /// [`MatchError::NotRanked`] if the daycare does not rank the child.
    pub fn strictly_better(&self, child: ChildId, daycare: DaycareId) -> Result<Vec<ChildId>> {
        let (ranking, pos) = self.locate(child, daycare)?;
        let target = self.ctx.child(child)?;
        let mut better = Vec::with_capacity(pos);
        for &other in &ranking[..pos] {
            if self.admits(target.family, other)? && !better.contains(&other) {
                better.push(other);
            }
        }
        Ok(better)
    }

    /// Children ranked ahead of `child`, plus children in the `search_depth`
    /// slots starting at the child whose score ties with the child's.
    pub fn weakly_better_or_tied(
        &self,
        child: ChildId,
        daycare: DaycareId,
        search_depth: usize,
    ) -> Result<Vec<ChildId>> {
        let mut better = self.strictly_better(child, daycare)?;
        let (ranking, pos) = self.locate(child, daycare)?;
        let target = self.ctx.child(child)?;
        let derived = self.ctx.derived_daycare(daycare)?;
        let target_score = derived
            .score_of(child)
            .ok_or(MatchError::NotRanked { child, daycare })?;

        let end = pos.saturating_add(search_depth).min(ranking.len());
        for &other in &ranking[pos..end] {
            if other == child || better.contains(&other) || !self.admits(target.family, other)? {
                continue;
            }
            let tied = derived
                .score_of(other)
                .is_some_and(|score| is_tied(score, target_score, self.tie_tolerance));
            if tied {
                better.push(other);
            }
        }
        Ok(better)
    }

    /// Dispatches to the strict or weak query.
    pub fn better(
        &self,
        child: ChildId,
        daycare: DaycareId,
        mode: ComparisonMode,
        search_depth: usize,
    ) -> Result<Vec<ChildId>> {
        match mode {
            ComparisonMode::Strict => self.strictly_better(child, daycare),
            ComparisonMode::WeakWithTies => self.weakly_better_or_tied(child, daycare, search_depth),
        }
    }

    /// The pooling group of `age` at `daycare`, or `[age]`.
    pub fn related_ages(&self, daycare: DaycareId, age: Age) -> Result<Vec<Age>> {
        Ok(self.ctx.daycare(daycare)?.related_ages(age))
    }

    /// Children of the family applying to `daycare` at `position`.
    pub fn applicants_at(&self, family: &Family, position: usize, daycare: DaycareId) -> Vec<ChildId> {
        family.children_at(position, daycare)
    }

    /// Applicants at (`position`, `daycare`) whose age is `age`, or in its
    /// pooling group when the scope is pooled.
    pub fn siblings_in_age_group(
        &self,
        family: &Family,
        position: usize,
        daycare: DaycareId,
        age: Age,
    ) -> Result<Vec<ChildId>> {
        let ages = match self.scope {
            RankingScope::Pooled => self.related_ages(daycare, age)?,
            RankingScope::PerAge => vec![age],
        };
        let mut group = Vec::new();
        for c in self.applicants_at(family, position, daycare) {
            if ages.contains(&self.ctx.child(c)?.age) && !group.contains(&c) {
                group.push(c);
            }
        }
        Ok(group)
    }

    /// The lowest-ranked child of [`Self::siblings_in_age_group`], if any.
    pub fn worst_sibling(
        &self,
        family: &Family,
        position: usize,
        daycare: DaycareId,
        age: Age,
    ) -> Result<Option<ChildId>> {
        let ranking = self.ctx.derived_daycare(daycare)?.ranking(self.scope, age);
        let mut worst: Option<(usize, ChildId)> = None;
        for c in self.siblings_in_age_group(family, position, daycare, age)? {
            let index = ranking
                .iter()
                .position(|r| *r == c)
                .ok_or(MatchError::NotRanked { child: c, daycare })?;
            if worst.map_or(true, |(w, _)| index > w) {
                worst = Some((index, c));
            }
        }
        Ok(worst.map(|(_, c)| c))
    }

    fn locate(&self, child: ChildId, daycare: DaycareId) -> Result<(&'a [ChildId], usize)> {
        let ctx: &'a MatchingContext = self.ctx;
        let age = ctx.child(child)?.age;
        let ranking = ctx.derived_daycare(daycare)?.ranking(self.scope, age);
        let pos = ranking
            .iter()
            .position(|c| *c == child)
            .ok_or(MatchError::NotRanked { child, daycare })?;
        Ok((ranking, pos))
    }

    fn admits(&self, family: FamilyId, other: ChildId) -> Result<bool> {
        Ok(match self.siblings {
            SiblingPolicy::Include => true,
            SiblingPolicy::Exclude => self.ctx.child(other)?.family != family,
        })
    }
}

fn is_tied(score: f64, target: f64, tolerance: f64) -> bool {
    if target == 0.0 {
        score == 0.0
    } else {
        (score / target - 1.0).abs() <= tolerance
    }
}
