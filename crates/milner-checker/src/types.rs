use std::{
    fmt::{self, Display},
    rc::Rc,
};

use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

use crate::{
    context::{Ctx, Env},
    subst::{Substitutable, Substitution},
    util::format_radix,
};

pub const INT: &str = "Int";
pub const BOOL: &str = "Bool";
pub const UNIT: &str = "Unit";
pub const STRING: &str = "String";
pub const TUPLE: &str = "Tuple";

/// An unknown type. Identifiers are handed out by the [Ctx] of one inference run and are never
/// shared between runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeVar(pub u32);

impl Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_radix(self.0 as usize))
    }
}

pub type Type = Rc<MonoType>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MonoType {
    Var(TypeVar),
    /// A nullary type constructor such as `Int`.
    Con(String),
    Arrow(Type, Type),
    /// A type constructor applied to arguments such as `List[Int]`.
    App(String, Vec<Type>),
}

impl Display for MonoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(var) => write!(f, "{var}"),
            Self::Con(name) => write!(f, "{name}"),
            Self::Arrow(from, to) if matches!(**from, Self::Arrow(..)) => {
                write!(f, "({from}) -> {to}")
            }
            Self::Arrow(from, to) => write!(f, "{from} -> {to}"),
            Self::App(name, args) if name == TUPLE => write!(f, "({})", args.iter().join(", ")),
            Self::App(name, args) => write!(f, "{name}[{}]", args.iter().join(", ")),
        }
    }
}

impl MonoType {
    pub fn var(var: TypeVar) -> Type {
        Rc::new(Self::Var(var))
    }

    pub fn con(name: impl Into<String>) -> Type {
        Rc::new(Self::Con(name.into()))
    }

    pub fn arrow(from: Type, to: Type) -> Type {
        Rc::new(Self::Arrow(from, to))
    }

    pub fn app(name: impl Into<String>, args: Vec<Type>) -> Type {
        Rc::new(Self::App(name.into(), args))
    }

    pub fn tuple(items: Vec<Type>) -> Type {
        Self::app(TUPLE, items)
    }

    pub fn int() -> Type {
        Self::con(INT)
    }

    pub fn bool() -> Type {
        Self::con(BOOL)
    }

    pub fn unit() -> Type {
        Self::con(UNIT)
    }

    pub fn string() -> Type {
        Self::con(STRING)
    }

    /// Wraps a type into a scheme that quantifies nothing.
    pub fn to_poly(self: &Rc<Self>) -> Rc<TypeScheme> {
        Rc::new(TypeScheme {
            vars: vec![],
            mono: self.clone(),
        })
    }

    /// Free type variables in the order they first appear from left to right.
    pub fn free_vars(&self) -> IndexSet<TypeVar> {
        let mut vars = IndexSet::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, vars: &mut IndexSet<TypeVar>) {
        match self {
            Self::Var(var) => {
                vars.insert(*var);
            }
            Self::Con(_) => {}
            Self::Arrow(from, to) => {
                from.collect_vars(vars);
                to.collect_vars(vars);
            }
            Self::App(_, args) => args.iter().for_each(|arg| arg.collect_vars(vars)),
        }
    }

    /// Checks if a variable occurs anywhere inside of the type.
    pub fn occurs(&self, var: TypeVar) -> bool {
        match self {
            Self::Var(other) => *other == var,
            Self::Con(_) => false,
            Self::Arrow(from, to) => from.occurs(var) || to.occurs(var),
            Self::App(_, args) => args.iter().any(|arg| arg.occurs(var)),
        }
    }

    /// Quantifies every variable of the type that is not constrained by the environment.
    pub fn generalize(self: &Rc<Self>, env: &Env) -> TypeScheme {
        let bound = env.free_vars();

        TypeScheme {
            vars: self
                .free_vars()
                .into_iter()
                .filter(|var| !bound.contains(var))
                .collect(),
            mono: self.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    #[error("the quantified variable {0} does not occur in the type")]
    Vacuous(TypeVar),
}

/// A polymorphic type, the variables in [TypeScheme::vars] can be replaced by any type at each use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub mono: Type,
}

impl TypeScheme {
    /// Builds a scheme rejecting quantified variables that do not occur in the body.
    pub fn new(vars: Vec<TypeVar>, mono: Type) -> Result<Self, SchemeError> {
        let free = mono.free_vars();

        match vars.iter().find(|var| !free.contains(*var)) {
            Some(var) => Err(SchemeError::Vacuous(*var)),
            None => Ok(Self {
                vars: vars.into_iter().unique().collect(),
                mono,
            }),
        }
    }

    /// Builds a scheme silently dropping quantified variables that do not occur in the body.
    pub fn lenient(vars: Vec<TypeVar>, mono: Type) -> Self {
        let free = mono.free_vars();

        Self {
            vars: vars
                .into_iter()
                .filter(|var| free.contains(var))
                .unique()
                .collect(),
            mono,
        }
    }

    pub fn free_vars(&self) -> IndexSet<TypeVar> {
        let mut free = self.mono.free_vars();
        free.retain(|var| !self.vars.contains(var));
        free
    }

    /// Every variable mentioned by the scheme, bound or not.
    pub(crate) fn max_var(&self) -> Option<TypeVar> {
        self.mono
            .free_vars()
            .into_iter()
            .chain(self.vars.iter().copied())
            .max()
    }

    /// Replaces each quantified variable by a fresh one. Returns the new type and the types used
    /// for each quantified variable in order.
    pub fn instantiate(&self, ctx: &Ctx) -> (Type, Vec<Type>) {
        let inst_types: Vec<Type> = self.vars.iter().map(|_| ctx.fresh()).collect();

        let subst = self
            .vars
            .iter()
            .copied()
            .zip(inst_types.iter().cloned())
            .collect::<Substitution>();

        (self.mono.apply(&subst), inst_types)
    }

    /// Renames quantified variables to `'a`, `'b`, ... in order of appearance, skipping the names
    /// of the variables that stay free.
    pub fn normalize(&self) -> Self {
        let free = self.free_vars();
        let mut names = (0..).map(TypeVar).filter(|var| !free.contains(var));

        let order: Vec<TypeVar> = self
            .mono
            .free_vars()
            .into_iter()
            .filter(|var| self.vars.contains(var))
            .collect();

        let renaming: Vec<(TypeVar, TypeVar)> = order
            .iter()
            .map(|var| (*var, names.next().unwrap_or(*var)))
            .collect();

        let subst = renaming
            .iter()
            .map(|(from, to)| (*from, MonoType::var(*to)))
            .collect::<Substitution>();

        Self {
            vars: renaming.into_iter().map(|(_, to)| to).collect(),
            mono: self.mono.apply(&subst),
        }
    }
}

impl Display for TypeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vars.is_empty() {
            return write!(f, "{}", self.mono);
        }

        write!(f, "forall {}. {}", self.vars.iter().join(" "), self.mono)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: TypeVar = TypeVar(0);
    const B: TypeVar = TypeVar(1);

    fn v(var: TypeVar) -> Type {
        MonoType::var(var)
    }

    #[test]
    fn arrows_associate_to_the_right() {
        let curried = MonoType::arrow(MonoType::int(), MonoType::arrow(v(A), v(B)));
        let higher = MonoType::arrow(MonoType::arrow(v(A), v(B)), MonoType::bool());

        assert_eq!(curried.to_string(), "Int -> 'a -> 'b");
        assert_eq!(higher.to_string(), "('a -> 'b) -> Bool");
    }

    #[test]
    fn tuples_and_applications_render_differently() {
        let pair = MonoType::tuple(vec![MonoType::int(), MonoType::bool()]);
        let list = MonoType::app("List", vec![v(A)]);

        assert_eq!(pair.to_string(), "(Int, Bool)");
        assert_eq!(list.to_string(), "List['a]");
    }

    #[test]
    fn free_vars_follow_first_appearance() {
        let typ = MonoType::arrow(v(B), MonoType::arrow(v(A), v(B)));
        assert_eq!(typ.free_vars().into_iter().collect::<Vec<_>>(), vec![B, A]);
    }

    #[test]
    fn strict_schemes_reject_vacuous_quantifiers() {
        let result = TypeScheme::new(vec![A, B], MonoType::arrow(v(A), v(A)));
        assert_eq!(result, Err(SchemeError::Vacuous(B)));
    }

    #[test]
    fn lenient_schemes_drop_vacuous_quantifiers() {
        let scheme = TypeScheme::lenient(vec![A, B, A], MonoType::arrow(v(A), v(A)));
        assert_eq!(scheme.vars, vec![A]);
        assert_eq!(scheme.to_string(), "forall 'a. 'a -> 'a");
    }

    #[test]
    fn normalizing_avoids_names_that_stay_free() {
        let scheme = TypeScheme {
            vars: vec![TypeVar(7)],
            mono: MonoType::arrow(v(TypeVar(7)), v(A)),
        };

        let normalized = scheme.normalize();
        assert_eq!(normalized.vars, vec![B]);
        assert_eq!(normalized.to_string(), "forall 'b. 'b -> 'a");
    }

    #[test]
    fn instantiation_uses_fresh_variables_each_time() {
        let ctx = Ctx::new(Env::default(), Default::default());
        let scheme = TypeScheme::new(vec![A], MonoType::arrow(v(A), v(A))).unwrap();

        let (first, first_inst) = scheme.instantiate(&ctx);
        let (second, second_inst) = scheme.instantiate(&ctx);

        assert_ne!(first, second);
        assert_ne!(first_inst, second_inst);
        assert!(!first.occurs(A));
    }
}
