use crate::sampleset::Sample;

/// Enum for the type of constraint a group of binary variables is under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    AtMostOne,
    ExactlyOne,
}

/// A counting constraint over a group of variable indices, used to check that a decoded sample
/// respects the structure its encoding penalises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    vars: Vec<usize>,
    constr_type: ConstraintType,
}

impl Constraint {
    /// Creates a new constraint with the given indices and type
    pub const fn new(vars: Vec<usize>, constraint_type: ConstraintType) -> Self {
        Self {
            vars,
            constr_type: constraint_type,
        }
    }

    /// One-hot constraint, exactly one of the variables is set
    pub const fn one_hot(vars: Vec<usize>) -> Self {
        Self::new(vars, ConstraintType::ExactlyOne)
    }

    /// Checks if the sample abides by the constraint
    pub fn check(&self, sample: &Sample) -> bool {
        let set = self.how_many_set(sample);

        match self.constr_type {
            ConstraintType::AtMostOne => Self::at_most_one(set),
            ConstraintType::ExactlyOne => Self::exactly_one(set),
        }
    }

    /// Position within the group of the first set variable, if any
    pub fn first_set(&self, sample: &Sample) -> Option<usize> {
        self.vars.iter().position(|&i| sample.is_set(i))
    }

    pub fn how_many_set(&self, sample: &Sample) -> usize {
        self.vars.iter().filter(|&&i| sample.is_set(i)).count()
    }

    pub const fn at_most_one(set: usize) -> bool {
        set <= 1
    }

    pub const fn exactly_one(set: usize) -> bool {
        set == 1
    }
}
