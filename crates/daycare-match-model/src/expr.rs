//! Boolean variables, literals and linear expressions.

use std::ops::Not;

/// Handle to a boolean variable of a [`BoolModel`](crate::BoolModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(usize);

impl BoolVar {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the variable in the model and in solver value vectors.
    pub fn index(self) -> usize {
        self.0
    }
}

impl Not for BoolVar {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal::negative(self)
    }
}

/// A variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: BoolVar,
    negated: bool,
}

impl Literal {
    pub fn positive(var: BoolVar) -> Self {
        Self {
            var,
            negated: false,
        }
    }

    pub fn negative(var: BoolVar) -> Self {
        Self { var, negated: true }
    }

    pub fn var(self) -> BoolVar {
        self.var
    }

    pub fn is_negated(self) -> bool {
        self.negated
    }

    /// Whether the literal is true when its variable takes `value`.
    pub fn holds(self, value: bool) -> bool {
        value != self.negated
    }

    /// The variable value that makes this literal true.
    pub fn satisfying_value(self) -> bool {
        !self.negated
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Literal::positive(var)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            negated: !self.negated,
        }
    }
}

/// An integer linear combination of boolean variables plus a constant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(BoolVar, i64)>,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sum of `vars`, each with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = BoolVar>) -> Self {
        vars.into_iter().collect()
    }

    pub fn term(mut self, var: BoolVar, coefficient: i64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn plus(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn add_term(&mut self, var: BoolVar, coefficient: i64) {
        if coefficient != 0 {
            self.terms.push((var, coefficient));
        }
    }

    pub fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under a full assignment indexed by variable.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.constant
            + self
                .terms
                .iter()
                .filter(|(v, _)| values.get(v.index()).copied().unwrap_or(false))
                .map(|(_, c)| c)
                .sum::<i64>()
    }

    pub(crate) fn into_parts(self) -> (Vec<(BoolVar, i64)>, i64) {
        (self.terms, self.constant)
    }
}

impl FromIterator<BoolVar> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = BoolVar>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(|v| (v, 1)).collect(),
            constant: 0,
        }
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        LinearExpr::new().term(var, 1)
    }
}
