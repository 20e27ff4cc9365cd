//! Translation of a matching context into a [`BoolModel`].
//!
//! Variables, in creation order:
//!
//! - `xfp[f,p]`: family `f` is assigned its position `p`
//! - `xcd[c,d]`: child `c` ends up at daycare `d`
//! - `alpha[f,p]`: family `f` is assigned at some position `<= p`
//! - `gamma[f,p,d,g]`: the age group `g` of `f` applying to `d` at `p` fits
//! - `gamma[f,p,d]`: every age group of `f` at (`p`, `d`) fits
//! - `gamma[f,p]`: every daycare of position `p` admits `f`
//! - `beta[f,p]`: `f` blocks at `p`
//!
//! Since a family takes at most one position, every disjunction over its
//! `xfp` variables is stated as a sum.

use std::collections::BTreeMap;

use daycare_match_core::{
    Age, ChildId, DaycareId, Family, FamilyId, MatchingContext, Result, AGE_COUNT,
};
use tracing::{info, trace};

use crate::eligibility::{sibling_groups, SiblingGroup};
use crate::expr::{BoolVar, LinearExpr};
use crate::model::BoolModel;
use crate::settings::ModelSettings;

/// A built model together with the handles of its variables.
#[derive(Debug, Clone)]
pub struct MatchingModel {
    model: BoolModel,
    settings: ModelSettings,
    xfp: BTreeMap<(FamilyId, usize), BoolVar>,
    xcd: BTreeMap<(ChildId, DaycareId), BoolVar>,
    alpha: BTreeMap<(FamilyId, usize), BoolVar>,
    gamma_fpdg: BTreeMap<(FamilyId, usize, DaycareId, Age), BoolVar>,
    gamma_fpd: BTreeMap<(FamilyId, usize, DaycareId), BoolVar>,
    gamma_fp: BTreeMap<(FamilyId, usize), BoolVar>,
    beta: BTreeMap<(FamilyId, usize), BoolVar>,
}

impl MatchingModel {
    pub fn model(&self) -> &BoolModel {
        &self.model
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn xfp(&self, family: FamilyId, position: usize) -> Option<BoolVar> {
        self.xfp.get(&(family, position)).copied()
    }

    pub fn xcd(&self, child: ChildId, daycare: DaycareId) -> Option<BoolVar> {
        self.xcd.get(&(child, daycare)).copied()
    }

    pub fn alpha(&self, family: FamilyId, position: usize) -> Option<BoolVar> {
        self.alpha.get(&(family, position)).copied()
    }

    pub fn gamma_group(
        &self,
        family: FamilyId,
        position: usize,
        daycare: DaycareId,
        age: Age,
    ) -> Option<BoolVar> {
        self.gamma_fpdg
            .get(&(family, position, daycare, age))
            .copied()
    }

    pub fn gamma_daycare(
        &self,
        family: FamilyId,
        position: usize,
        daycare: DaycareId,
    ) -> Option<BoolVar> {
        self.gamma_fpd.get(&(family, position, daycare)).copied()
    }

    pub fn gamma(&self, family: FamilyId, position: usize) -> Option<BoolVar> {
        self.gamma_fp.get(&(family, position)).copied()
    }

    pub fn beta(&self, family: FamilyId, position: usize) -> Option<BoolVar> {
        self.beta.get(&(family, position)).copied()
    }

    /// Every `xfp` variable keyed by (family, position).
    pub fn positions(&self) -> impl Iterator<Item = ((FamilyId, usize), BoolVar)> + '_ {
        self.xfp.iter().map(|(k, v)| (*k, *v))
    }

    /// Every `beta` variable keyed by (family, position).
    pub fn blocking_vars(&self) -> impl Iterator<Item = ((FamilyId, usize), BoolVar)> + '_ {
        self.beta.iter().map(|(k, v)| (*k, *v))
    }
}

/// Builds a [`MatchingModel`] from a derived context.
///
/// # Example
///
/// ```
/// use daycare_match_core::{
///     ChildRecord, DaycareRecord, FamilyId, FamilyPreference, FamilyRecord, MatchingContext,
///     MatchingInput,
/// };
/// use daycare_match_model::{MatchingModelBuilder, ModelSettings};
///
/// let input = MatchingInput {
///     children: vec![ChildRecord::new(1, 0).with_preferences([Some(10), None])],
///     daycares: vec![DaycareRecord::new(10, [1, 0, 0, 0, 0, 0]).with_priority([(1, 50.0)])],
///     families: vec![FamilyRecord::new(1, [1]).with_preferences([
///         FamilyPreference::single(Some(10)),
///         FamilyPreference::single(None),
///     ])],
/// };
/// let ctx = MatchingContext::from_input(&input).unwrap();
/// let built = MatchingModelBuilder::new(&ctx, ModelSettings::default()).build().unwrap();
///
/// assert_eq!(built.positions().count(), 2);
/// assert!(built.beta(FamilyId(1), 0).is_some());
/// ```
pub struct MatchingModelBuilder<'a> {
    ctx: &'a MatchingContext,
    settings: ModelSettings,
    built: MatchingModel,
}

impl<'a> MatchingModelBuilder<'a> {
    pub fn new(ctx: &'a MatchingContext, settings: ModelSettings) -> Self {
        Self {
            ctx,
            settings,
            built: MatchingModel {
                model: BoolModel::new(),
                settings,
                xfp: BTreeMap::new(),
                xcd: BTreeMap::new(),
                alpha: BTreeMap::new(),
                gamma_fpdg: BTreeMap::new(),
                gamma_fpd: BTreeMap::new(),
                gamma_fp: BTreeMap::new(),
                beta: BTreeMap::new(),
            },
        }
    }

    /// Creates every variable and constraint.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures from the context, including
    /// [`MatchError::NotRanked`](daycare_match_core::MatchError::NotRanked)
    /// when a daycare's priority list omits one of its applicants.
    pub fn build(mut self) -> Result<MatchingModel> {
        let ctx = self.ctx;

        for family in ctx.families() {
            self.add_position_vars(family);
        }
        for child in ctx.children() {
            self.add_assignment_vars(child.id)?;
        }
        for family in ctx.families() {
            self.add_prefix_vars(family);
        }
        for family in ctx.families() {
            self.add_eligibility_vars(family)?;
        }
        for family in ctx.families() {
            self.add_blocking_vars(family);
        }
        for family in ctx.families() {
            self.add_family_feasibility(family)?;
        }
        self.add_daycare_feasibility()?;
        self.add_blocking_budget();
        self.add_objective();

        let model = &self.built.model;
        info!(
            event = "model_built",
            families = ctx.families().len(),
            children = ctx.children().len(),
            variables = model.var_count(),
            constraints = model.constraints().len(),
            blocking_budget = self.settings.blocking_budget,
        );
        Ok(self.built)
    }

    fn add_position_vars(&mut self, family: &Family) {
        for p in 0..family.position_count() {
            let var = self
                .built
                .model
                .new_bool_var(format!("xfp[{},{}]", family.id, p));
            self.built.xfp.insert((family.id, p), var);
        }
    }

    // xcd[c,d] == Σ_{p in P(c,d)} xfp[f,p]
    fn add_assignment_vars(&mut self, child: ChildId) -> Result<()> {
        let family = self.ctx.child(child)?.family;
        let derived = self.ctx.derived_child(child)?;
        for &d in &derived.all_daycare_ids {
            let var = self.built.model.new_bool_var(format!("xcd[{},{}]", child, d));
            self.built.xcd.insert((child, d), var);

            let mut channel = LinearExpr::from(var);
            for p in derived.positions_of(d) {
                if let Some(x) = self.built.xfp(family, p) {
                    channel.add_term(x, -1);
                }
            }
            self.built.model.add_eq(channel, 0);
        }
        Ok(())
    }

    // alpha[f,p] == Σ_{q <= p} xfp[f,q]
    fn add_prefix_vars(&mut self, family: &Family) {
        for p in 0..family.position_count() {
            let var = self
                .built
                .model
                .new_bool_var(format!("alpha[{},{}]", family.id, p));
            self.built.alpha.insert((family.id, p), var);

            let mut channel = LinearExpr::from(var);
            for q in 0..=p {
                if let Some(x) = self.built.xfp(family.id, q) {
                    channel.add_term(x, -1);
                }
            }
            self.built.model.add_eq(channel, 0);
        }
    }

    fn add_eligibility_vars(&mut self, family: &Family) -> Result<()> {
        for p in 0..family.position_count() {
            let mut daycare_vars = Vec::new();
            for d in family.daycares_at(p) {
                let groups = sibling_groups(self.ctx, &self.settings, family, p, d)?;
                let mut group_vars = Vec::with_capacity(groups.len());
                for group in &groups {
                    group_vars.push(self.add_group_var(family.id, p, group));
                }
                let var = self
                    .built
                    .model
                    .new_bool_var(format!("gamma[{},{},{}]", family.id, p, d));
                self.add_conjunction(var, &group_vars);
                self.built.gamma_fpd.insert((family.id, p, d), var);
                daycare_vars.push(var);
            }
            let var = self
                .built
                .model
                .new_bool_var(format!("gamma[{},{}]", family.id, p));
            self.add_conjunction(var, &daycare_vars);
            self.built.gamma_fp.insert((family.id, p), var);
        }
        Ok(())
    }

    fn add_group_var(&mut self, family: FamilyId, position: usize, group: &SiblingGroup) -> BoolVar {
        let var = self.built.model.new_bool_var(format!(
            "gamma[{},{},{},{}]",
            family, position, group.daycare, group.age
        ));
        self.built
            .gamma_fpdg
            .insert((family, position, group.daycare, group.age), var);

        trace!(
            event = "group_eligibility",
            family = %family,
            position,
            daycare = %group.daycare,
            age = group.age,
            size = group.size(),
            better = group.better.len(),
            capacity = group.capacity,
        );

        if group.better.is_empty() {
            self.built.model.fix(var, group.fits_with(0));
            return var;
        }

        let occupied: LinearExpr = group
            .better
            .iter()
            .filter_map(|&b| self.built.xcd(b, group.daycare))
            .collect();
        self.built
            .model
            .add_le(occupied.clone(), group.slack())
            .only_enforce_if(var);
        self.built
            .model
            .add_ge(occupied, group.slack() + 1)
            .only_enforce_if(!var);
        var
    }

    // var == AND(parts)
    fn add_conjunction(&mut self, var: BoolVar, parts: &[BoolVar]) {
        if parts.is_empty() {
            self.built.model.fix(var, true);
            return;
        }
        let k = parts.len() as i64;
        let all = LinearExpr::sum(parts.iter().copied());
        self.built.model.add_eq(all.clone(), k).only_enforce_if(var);
        self.built.model.add_le(all, k - 1).only_enforce_if(!var);
    }

    // beta == 0 once matched, beta == gamma while still unmatched.
    fn add_blocking_vars(&mut self, family: &Family) {
        for p in 0..family.position_count() {
            let var = self
                .built
                .model
                .new_bool_var(format!("beta[{},{}]", family.id, p));
            self.built.beta.insert((family.id, p), var);

            let (Some(alpha), Some(gamma)) =
                (self.built.alpha(family.id, p), self.built.gamma(family.id, p))
            else {
                continue;
            };
            self.built
                .model
                .add_eq(LinearExpr::from(var), 0)
                .only_enforce_if(alpha);
            self.built
                .model
                .add_eq(LinearExpr::from(var).term(gamma, -1), 0)
                .only_enforce_if(!alpha);
        }
    }

    fn add_family_feasibility(&mut self, family: &Family) -> Result<()> {
        let chosen: LinearExpr = (0..family.position_count())
            .filter_map(|p| self.built.xfp(family.id, p))
            .collect();
        if self.ctx.is_transfer_family(family)? {
            self.built.model.add_eq(chosen, 1);
        } else {
            self.built.model.add_le(chosen, 1);
        }
        Ok(())
    }

    fn add_daycare_feasibility(&mut self) -> Result<()> {
        for daycare in self.ctx.daycares() {
            let derived = self.ctx.derived_daycare(daycare.id)?;
            for age in 0..AGE_COUNT {
                let seated: LinearExpr = derived
                    .ranking(self.settings.scope, age)
                    .iter()
                    .filter_map(|&c| self.built.xcd(c, daycare.id))
                    .collect();
                if seated.is_empty() {
                    continue;
                }
                let capacity = i64::from(derived.capacity_for(self.settings.scope, age));
                self.built.model.add_le(seated, capacity);
            }
        }
        Ok(())
    }

    fn add_blocking_budget(&mut self) {
        let blocking: LinearExpr = self.built.beta.values().copied().collect();
        if !blocking.is_empty() {
            self.built
                .model
                .add_le(blocking, i64::from(self.settings.blocking_budget));
        }
    }

    fn add_objective(&mut self) {
        let matched: LinearExpr = self
            .built
            .xcd
            .iter()
            .filter(|((_, d), _)| !d.is_unmatched())
            .map(|(_, v)| *v)
            .collect();
        self.built.model.maximize(matched);
    }
}

#[cfg(test)]
mod tests;
