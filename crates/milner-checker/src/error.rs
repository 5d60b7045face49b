//! Errors of the checker. Every error knows the node it came from so whoever embeds the checker
//! can render it, see [TypeError::to_diagnostic].

use milner_location::Origin;
use thiserror::Error;

use crate::types::{Type, TypeVar};

/// Failure of a single unification. It does not know where the types came from, the solver adds
/// that when it turns it into a [TypeError].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnifyError {
    #[error("type mismatch between '{0}' and '{1}'")]
    Mismatch(Type, Type),

    #[error("found cyclic type of infinite size: {0} = {1}")]
    InfiniteType(TypeVar, Type),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("unbound variable '{name}'")]
    UnboundVariable { name: String, origin: Origin },

    #[error("type mismatch between '{left}' and '{right}'")]
    TypeMismatch {
        left: Type,
        right: Type,
        origin: Origin,
    },

    #[error("found cyclic type of infinite size: {var} = {typ}")]
    InfiniteType {
        var: TypeVar,
        typ: Type,
        origin: Origin,
    },

    #[error("there is no typing rule for '{name}'")]
    UnsupportedConstruct { name: String, origin: Origin },

    #[error("ran out of fresh type variables")]
    TypeVariablesExhausted { origin: Origin },
}

impl TypeError {
    pub fn from_unify(err: UnifyError, origin: Origin) -> Self {
        match err {
            UnifyError::Mismatch(left, right) => Self::TypeMismatch {
                left,
                right,
                origin,
            },
            UnifyError::InfiniteType(var, typ) => Self::InfiniteType { var, typ, origin },
        }
    }

    pub const fn origin(&self) -> Origin {
        match self {
            Self::UnboundVariable { origin, .. }
            | Self::TypeMismatch { origin, .. }
            | Self::InfiniteType { origin, .. }
            | Self::UnsupportedConstruct { origin, .. }
            | Self::TypeVariablesExhausted { origin } => *origin,
        }
    }

    /// Converts the error into something that can be rendered for humans. Messages that mention
    /// types are only printed when the diagnostic is.
    pub fn to_diagnostic(&self) -> milner_error::Error {
        use milner_error::Error;

        match self {
            Self::UnboundVariable { .. } => Error::new(self.to_string(), self.origin()),
            Self::TypeMismatch { .. } => Error::new_dyn(self.clone(), self.origin()),
            Self::InfiniteType { .. } => Error::new_dyn(self.clone(), self.origin())
                .with_note("a type variable cannot be unified with a type that contains it"),
            Self::UnsupportedConstruct { .. } => Error::new(self.to_string(), self.origin())
                .with_note("the construct has to be desugared before type checking"),
            Self::TypeVariablesExhausted { .. } => Error::new(self.to_string(), self.origin())
                .with_note("the base environment mentions the largest type variable"),
        }
    }
}
