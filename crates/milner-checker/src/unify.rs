//! This module exposes [unify], which computes the most general substitution that makes two types
//! equal. It is all-or-nothing: on failure no partial substitution escapes.

use crate::{
    error::UnifyError,
    subst::{Substitutable, Substitution},
    types::{MonoType, Type, TypeVar},
};

/// Tries to find a most general unifier for two types, it fails if these two types can not be
/// made equal.
pub fn unify(left: &Type, right: &Type) -> Result<Substitution, UnifyError> {
    match (&**left, &**right) {
        (MonoType::Var(x), MonoType::Var(y)) if x == y => Ok(Substitution::empty()),

        (MonoType::Var(var), _) => bind(*var, right),

        (_, MonoType::Var(var)) => bind(*var, left),

        (MonoType::Con(x), MonoType::Con(y)) if x == y => Ok(Substitution::empty()),

        (MonoType::Arrow(l, r), MonoType::Arrow(l1, r1)) => {
            let arg = unify(l, l1)?;
            let ret = unify(&r.apply(&arg), &r1.apply(&arg))?;
            Ok(ret.compose(&arg))
        }

        (MonoType::App(x, args), MonoType::App(y, args1))
            if x == y && args.len() == args1.len() =>
        {
            unify_many(args, args1)
        }

        _ => Err(UnifyError::Mismatch(left.clone(), right.clone())),
    }
}

/// Unifies two lists pairwise from left to right, every pair sees what the previous ones found.
pub fn unify_many(left: &[Type], right: &[Type]) -> Result<Substitution, UnifyError> {
    left.iter()
        .zip(right)
        .try_fold(Substitution::empty(), |subst, (l, r)| {
            unify(&l.apply(&subst), &r.apply(&subst)).map(|next| next.compose(&subst))
        })
}

/// Binds a variable to a type unless the variable occurs inside of it, that would need a type
/// of infinite size.
fn bind(var: TypeVar, typ: &Type) -> Result<Substitution, UnifyError> {
    if typ.occurs(var) {
        Err(UnifyError::InfiniteType(var, typ.clone()))
    } else {
        Ok(Substitution::singleton(var, typ.clone()))
    }
}
