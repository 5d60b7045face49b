use std::fmt::{self, Display};

use milner_location::Origin;

use crate::{
    subst::{Substitutable, Substitution},
    types::Type,
};

/// Two types that must be equal, and the node that asked for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
    pub origin: Origin,
}

impl Constraint {
    pub const fn new(left: Type, right: Type, origin: Origin) -> Self {
        Self {
            left,
            right,
            origin,
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.left, self.right)
    }
}

impl Substitutable for Constraint {
    fn apply(&self, subst: &Substitution) -> Self {
        Self {
            left: self.left.apply(subst),
            right: self.right.apply(subst),
            origin: self.origin,
        }
    }
}
