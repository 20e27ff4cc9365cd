//! Boolean variables with linear constraints and a maximization objective.

use std::fmt;

use crate::expr::{BoolVar, LinearExpr, Literal};

/// Relation between a constraint's left-hand side and its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Le,
    Ge,
    Eq,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::Le => write!(f, "<="),
            Comparison::Ge => write!(f, ">="),
            Comparison::Eq => write!(f, "=="),
        }
    }
}

/// `Σ coefficient·var (comparison) rhs`, enforced only while every
/// enforcement literal holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    terms: Vec<(BoolVar, i64)>,
    comparison: Comparison,
    rhs: i64,
    enforcement: Vec<Literal>,
}

impl LinearConstraint {
    fn new(expr: LinearExpr, comparison: Comparison, rhs: i64) -> Self {
        let (terms, constant) = expr.into_parts();
        Self {
            terms,
            comparison,
            rhs: rhs - constant,
            enforcement: Vec::new(),
        }
    }

    /// Enforces the constraint only while `literal` holds.
    pub fn only_enforce_if(&mut self, literal: impl Into<Literal>) -> &mut Self {
        self.enforcement.push(literal.into());
        self
    }

    pub fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    pub fn enforcement(&self) -> &[Literal] {
        &self.enforcement
    }

    /// Whether every enforcement literal holds under `values`.
    pub fn is_active(&self, values: &[bool]) -> bool {
        self.enforcement
            .iter()
            .all(|l| l.holds(values.get(l.var().index()).copied().unwrap_or(false)))
    }

    /// Whether a full assignment satisfies the constraint.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        if !self.is_active(values) {
            return true;
        }
        let lhs: i64 = self
            .terms
            .iter()
            .filter(|(v, _)| values.get(v.index()).copied().unwrap_or(false))
            .map(|(_, c)| c)
            .sum();
        match self.comparison {
            Comparison::Le => lhs <= self.rhs,
            Comparison::Ge => lhs >= self.rhs,
            Comparison::Eq => lhs == self.rhs,
        }
    }
}

/// A set of boolean variables, linear constraints over them and a linear
/// objective to maximize.
///
/// # Example
///
/// ```
/// use daycare_match_model::{BoolModel, LinearExpr};
///
/// let mut model = BoolModel::new();
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_le(LinearExpr::sum([a, b]), 1);
/// model.add_eq(LinearExpr::from(b), 0).only_enforce_if(a);
/// model.maximize(LinearExpr::sum([a, b]));
///
/// assert!(model.is_feasible(&[true, false]));
/// assert!(!model.is_feasible(&[true, true]));
/// assert_eq!(model.objective_value(&[true, false]), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoolModel {
    names: Vec<String>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl BoolModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        self.names.push(name.into());
        BoolVar::new(self.names.len() - 1)
    }

    pub fn var_count(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, var: BoolVar) -> &str {
        self.names.get(var.index()).map(String::as_str).unwrap_or("")
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn add_le(&mut self, expr: LinearExpr, rhs: i64) -> &mut LinearConstraint {
        self.push(LinearConstraint::new(expr, Comparison::Le, rhs))
    }

    pub fn add_ge(&mut self, expr: LinearExpr, rhs: i64) -> &mut LinearConstraint {
        self.push(LinearConstraint::new(expr, Comparison::Ge, rhs))
    }

    pub fn add_eq(&mut self, expr: LinearExpr, rhs: i64) -> &mut LinearConstraint {
        self.push(LinearConstraint::new(expr, Comparison::Eq, rhs))
    }

    /// `expr < rhs`, stated as `expr <= rhs - 1` over integers.
    pub fn add_lt(&mut self, expr: LinearExpr, rhs: i64) -> &mut LinearConstraint {
        self.add_le(expr, rhs - 1)
    }

    /// `expr > rhs`, stated as `expr >= rhs + 1` over integers.
    pub fn add_gt(&mut self, expr: LinearExpr, rhs: i64) -> &mut LinearConstraint {
        self.add_ge(expr, rhs + 1)
    }

    /// Fixes `var` to `value`.
    pub fn fix(&mut self, var: BoolVar, value: bool) -> &mut LinearConstraint {
        self.add_eq(LinearExpr::from(var), i64::from(value))
    }

    /// Replaces the objective; solvers maximize it.
    pub fn maximize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Index of the first constraint a full assignment violates.
    pub fn first_violation(&self, values: &[bool]) -> Option<usize> {
        self.constraints.iter().position(|c| !c.is_satisfied(values))
    }

    pub fn is_feasible(&self, values: &[bool]) -> bool {
        values.len() == self.var_count() && self.first_violation(values).is_none()
    }

    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective.evaluate(values)
    }

    fn push(&mut self, constraint: LinearConstraint) -> &mut LinearConstraint {
        self.constraints.push(constraint);
        let last = self.constraints.len() - 1;
        &mut self.constraints[last]
    }
}

#[cfg(test)]
mod tests;
