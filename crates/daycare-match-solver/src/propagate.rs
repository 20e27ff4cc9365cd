//! Bounds propagation with a trail for backtracking.

use std::collections::VecDeque;

use daycare_match_model::{BoolModel, Comparison, LinearConstraint, LinearExpr, Literal};

/// Propagation found a constraint that cannot be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Conflict;

/// Partial assignment of a [`BoolModel`] kept consistent with its
/// constraints' bounds.
#[derive(Debug)]
pub(crate) struct Propagator<'m> {
    model: &'m BoolModel,
    watches: Vec<Vec<usize>>,
    values: Vec<Option<bool>>,
    trail: Vec<usize>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
    fixed: u64,
}

impl<'m> Propagator<'m> {
    pub(crate) fn new(model: &'m BoolModel) -> Self {
        let mut watches = vec![Vec::new(); model.var_count()];
        for (index, constraint) in model.constraints().iter().enumerate() {
            let vars = constraint
                .terms()
                .iter()
                .map(|(v, _)| *v)
                .chain(constraint.enforcement().iter().map(|l| l.var()));
            for var in vars {
                let watch = &mut watches[var.index()];
                if watch.last() != Some(&index) {
                    watch.push(index);
                }
            }
        }
        Self {
            model,
            watches,
            values: vec![None; model.var_count()],
            trail: Vec::new(),
            queue: VecDeque::new(),
            queued: vec![false; model.constraints().len()],
            fixed: 0,
        }
    }

    pub(crate) fn value(&self, var: usize) -> Option<bool> {
        self.values[var]
    }

    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Variables fixed by propagation so far.
    pub(crate) fn fixed_count(&self) -> u64 {
        self.fixed
    }

    /// First unassigned variable at or after `from`.
    pub(crate) fn next_unassigned(&self, from: usize) -> Option<usize> {
        (from..self.values.len()).find(|&i| self.values[i].is_none())
    }

    /// The assignment, with unassigned variables read as false.
    pub(crate) fn snapshot(&self) -> Vec<bool> {
        self.values.iter().map(|v| v.unwrap_or(false)).collect()
    }

    /// Examines every constraint once and propagates to a fixpoint.
    pub(crate) fn propagate_all(&mut self) -> Result<(), Conflict> {
        for index in 0..self.queued.len() {
            self.enqueue(index);
        }
        self.propagate()
    }

    /// Assigns a branching decision and propagates its consequences.
    pub(crate) fn decide(&mut self, var: usize, value: bool) -> Result<(), Conflict> {
        self.assign(var, value)?;
        self.propagate()
    }

    /// Unassigns everything set after the trail had length `len`.
    pub(crate) fn undo_to(&mut self, len: usize) {
        while self.trail.len() > len {
            if let Some(var) = self.trail.pop() {
                self.values[var] = None;
            }
        }
    }

    /// Largest value `objective` can still reach.
    pub(crate) fn optimistic_bound(&self, objective: &LinearExpr) -> i64 {
        objective.constant()
            + objective
                .terms()
                .iter()
                .map(|&(v, a)| match self.values[v.index()] {
                    Some(true) => a,
                    Some(false) => 0,
                    None => a.max(0),
                })
                .sum::<i64>()
    }

    fn propagate(&mut self) -> Result<(), Conflict> {
        while let Some(index) = self.queue.pop_front() {
            self.queued[index] = false;
            if let Err(conflict) = self.examine(index) {
                self.clear_queue();
                return Err(conflict);
            }
        }
        Ok(())
    }

    fn assign(&mut self, var: usize, value: bool) -> Result<(), Conflict> {
        match self.values[var] {
            Some(current) if current == value => Ok(()),
            Some(_) => Err(Conflict),
            None => {
                self.values[var] = Some(value);
                self.trail.push(var);
                for i in 0..self.watches[var].len() {
                    let index = self.watches[var][i];
                    self.enqueue(index);
                }
                Ok(())
            }
        }
    }

    fn implied(&mut self, var: usize, value: bool) -> Result<(), Conflict> {
        if self.values[var].is_none() {
            self.fixed += 1;
        }
        self.assign(var, value)
    }

    fn enqueue(&mut self, index: usize) {
        if !self.queued[index] {
            self.queued[index] = true;
            self.queue.push_back(index);
        }
    }

    fn clear_queue(&mut self) {
        for index in self.queue.drain(..) {
            self.queued[index] = false;
        }
    }

    fn examine(&mut self, index: usize) -> Result<(), Conflict> {
        let model = self.model;
        let constraint = &model.constraints()[index];

        let mut open: Option<Literal> = None;
        let mut open_count = 0;
        for &literal in constraint.enforcement() {
            match self.values[literal.var().index()] {
                Some(value) if !literal.holds(value) => return Ok(()),
                Some(_) => {}
                None => {
                    open = Some(literal);
                    open_count += 1;
                }
            }
        }

        let (min, max) = self.bounds(constraint);
        let rhs = constraint.rhs();
        let violated = match constraint.comparison() {
            Comparison::Le => min > rhs,
            Comparison::Ge => max < rhs,
            Comparison::Eq => min > rhs || max < rhs,
        };

        match (open_count, open) {
            (0, _) if violated => Err(Conflict),
            (0, _) => self.tighten(constraint, min, max),
            (1, Some(literal)) if violated => {
                self.implied(literal.var().index(), !literal.satisfying_value())
            }
            _ => Ok(()),
        }
    }

    // Smallest and largest left-hand side reachable from the current assignment.
    fn bounds(&self, constraint: &LinearConstraint) -> (i64, i64) {
        let mut min = 0;
        let mut max = 0;
        for &(var, a) in constraint.terms() {
            match self.values[var.index()] {
                Some(true) => {
                    min += a;
                    max += a;
                }
                Some(false) => {}
                None if a > 0 => max += a,
                None => min += a,
            }
        }
        (min, max)
    }

    // Fixes every open term whose other value would violate the constraint.
    fn tighten(&mut self, constraint: &LinearConstraint, min: i64, max: i64) -> Result<(), Conflict> {
        let rhs = constraint.rhs();
        let upper = matches!(constraint.comparison(), Comparison::Le | Comparison::Eq);
        let lower = matches!(constraint.comparison(), Comparison::Ge | Comparison::Eq);

        for &(var, a) in constraint.terms() {
            let i = var.index();
            if self.values[i].is_some() {
                continue;
            }
            let forced = if upper && a > 0 && min + a > rhs {
                Some(false)
            } else if upper && a < 0 && min - a > rhs {
                Some(true)
            } else if lower && a > 0 && max - a < rhs {
                Some(true)
            } else if lower && a < 0 && max + a < rhs {
                Some(false)
            } else {
                None
            };
            if let Some(value) = forced {
                self.implied(i, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
