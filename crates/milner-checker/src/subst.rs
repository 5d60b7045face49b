//! Substitutions map type variables to types. They are the only way the checker learns anything
//! about an unknown: unification produces them, the solver composes them and the driver applies
//! the final one to everything that was generated.

use std::{
    fmt::{self, Display},
    rc::Rc,
};

use itertools::Itertools;
use milner_tree::typed::Typed;

use crate::{
    context::Env,
    types::{MonoType, Type, TypeScheme, TypeVar},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution(im_rc::HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(var: TypeVar, typ: Type) -> Self {
        Self(im_rc::HashMap::unit(var, typ))
    }

    pub fn get(&self, var: TypeVar) -> Option<&Type> {
        self.0.get(&var)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies the substitution to anything that contains types.
    pub fn apply<T: Substitutable>(&self, target: &T) -> T {
        target.apply(self)
    }

    /// Composes two substitutions, the result is the same as applying `earlier` and then `self`.
    /// Every binding of `earlier` goes through `self` and the bindings of `self` that `earlier`
    /// does not mention are carried over unchanged. Only the bindings of `earlier` that mention a
    /// variable of `self` are rebuilt, the rest are shared with `earlier`.
    pub fn compose(&self, earlier: &Self) -> Self {
        let mut result = earlier.0.clone();

        for (var, typ) in earlier.0.iter() {
            let applied = typ.apply(self);
            if !Rc::ptr_eq(&applied, typ) {
                result.insert(*var, applied);
            }
        }

        for (var, typ) in self.0.iter() {
            if !result.contains_key(var) {
                result.insert(*var, typ.clone());
            }
        }

        Self(result)
    }

    fn without(&self, vars: &[TypeVar]) -> Self {
        Self(vars.iter().fold(self.0.clone(), |map, var| map.without(var)))
    }
}

impl FromIterator<(TypeVar, Type)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (TypeVar, Type)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self
            .0
            .iter()
            .sorted_by_key(|(var, _)| **var)
            .map(|(var, typ)| format!("{var} := {typ}"))
            .join(", ");

        write!(f, "{{{bindings}}}")
    }
}

/// Anything that has type variables inside of it that can be replaced.
pub trait Substitutable: Sized {
    fn apply(&self, subst: &Substitution) -> Self;
}

impl Substitutable for Type {
    /// Subtrees without replaced variables are shared with the original type.
    fn apply(&self, subst: &Substitution) -> Self {
        if subst.is_empty() {
            return self.clone();
        }

        match &**self {
            MonoType::Var(var) => subst.get(*var).cloned().unwrap_or_else(|| self.clone()),
            MonoType::Con(_) => self.clone(),
            MonoType::Arrow(from, to) => {
                let (new_from, new_to) = (from.apply(subst), to.apply(subst));
                if Rc::ptr_eq(from, &new_from) && Rc::ptr_eq(to, &new_to) {
                    self.clone()
                } else {
                    MonoType::arrow(new_from, new_to)
                }
            }
            MonoType::App(name, args) => {
                let new_args = args.apply(subst);
                if args.iter().zip(&new_args).all(|(old, new)| Rc::ptr_eq(old, new)) {
                    self.clone()
                } else {
                    MonoType::app(name.clone(), new_args)
                }
            }
        }
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    fn apply(&self, subst: &Substitution) -> Self {
        self.iter().map(|item| item.apply(subst)).collect()
    }
}

impl Substitutable for TypeScheme {
    /// Quantified variables are local to the scheme so they are never replaced.
    fn apply(&self, subst: &Substitution) -> Self {
        Self {
            vars: self.vars.clone(),
            mono: self.mono.apply(&subst.without(&self.vars)),
        }
    }
}

impl Substitutable for Rc<TypeScheme> {
    fn apply(&self, subst: &Substitution) -> Self {
        let applied = (**self).apply(subst);
        if Rc::ptr_eq(&applied.mono, &self.mono) {
            self.clone()
        } else {
            Rc::new(applied)
        }
    }
}

impl Substitutable for Env {
    fn apply(&self, subst: &Substitution) -> Self {
        self.map_schemes(|scheme| scheme.apply(subst))
    }
}

impl Substitutable for Typed<Type> {
    fn apply(&self, subst: &Substitution) -> Self {
        self.clone().map(&|typ: Type| typ.apply(subst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: TypeVar = TypeVar(0);
    const B: TypeVar = TypeVar(1);
    const C: TypeVar = TypeVar(2);

    fn v(var: TypeVar) -> Type {
        MonoType::var(var)
    }

    #[test]
    fn apply_leaves_unknown_variables_alone() {
        let subst = Substitution::singleton(A, MonoType::int());
        let typ = MonoType::arrow(v(A), v(B));
        assert_eq!(typ.apply(&subst), MonoType::arrow(MonoType::int(), v(B)));
    }

    #[test]
    fn apply_reaches_constructor_arguments() {
        let subst = Substitution::singleton(A, MonoType::bool());
        let typ = MonoType::app("List", vec![MonoType::tuple(vec![v(A), v(B)])]);
        assert_eq!(typ.apply(&subst).to_string(), "List[(Bool, 'b)]");
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let subst = Substitution::singleton(C, MonoType::int());
        let left = MonoType::tuple(vec![v(A), v(B)]);
        let typ = MonoType::arrow(left.clone(), v(C));

        let applied = typ.apply(&subst);
        match &*applied {
            MonoType::Arrow(from, _) => assert!(Rc::ptr_eq(from, &left)),
            other => panic!("expected an arrow, found {other}"),
        }
        assert!(Rc::ptr_eq(&left.apply(&subst), &left));
    }

    #[test]
    fn compose_applies_the_earlier_substitution_first() {
        let earlier = Substitution::singleton(A, v(B));
        let later = Substitution::singleton(B, MonoType::int());

        let composed = later.compose(&earlier);
        assert_eq!(v(A).apply(&composed), MonoType::int());
        assert_eq!(v(B).apply(&composed), MonoType::int());

        // The other order is a different substitution: `A` only reaches `B`.
        let reversed = earlier.compose(&later);
        assert_eq!(v(A).apply(&reversed), v(B));
    }

    #[test]
    fn compose_keeps_bindings_of_both_sides() {
        let earlier = Substitution::singleton(A, v(C));
        let later = Substitution::singleton(B, MonoType::unit());

        let composed = later.compose(&earlier);
        assert_eq!(composed.len(), 2);
        assert_eq!(composed.get(A), Some(&v(C)));
        assert_eq!(composed.get(B), Some(&MonoType::unit()));
    }

    #[test]
    fn schemes_protect_their_quantified_variables() {
        let scheme = TypeScheme::new(vec![A], MonoType::arrow(v(A), v(B))).unwrap();
        let subst: Substitution = [(A, MonoType::int()), (B, MonoType::bool())]
            .into_iter()
            .collect();

        assert_eq!(scheme.apply(&subst).to_string(), "forall 'a. 'a -> Bool");
    }

    #[test]
    fn display_is_sorted() {
        let subst: Substitution = [(B, MonoType::int()), (A, v(B))].into_iter().collect();
        assert_eq!(subst.to_string(), "{'a := 'b, 'b := Int}");
    }
}
