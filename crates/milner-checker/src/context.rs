//! The context is primarily a map from variable names to type schemes that is on the left side of
//! a type judgment. It also owns the state of one inference run: the supply of fresh type variables
//! and the constraints generated so far together with the part of them that is already solved.
//! Cloning a context shares that state, extending it only changes the bindings.

use std::{
    cell::{Cell, RefCell},
    fmt::{self, Display},
    rc::Rc,
};

use indexmap::IndexSet;
use itertools::Itertools;
use milner_location::Origin;
use tracing::{debug, trace, warn};

use crate::{
    config::{Config, SolveMode},
    constraint::Constraint,
    error::TypeError,
    solve,
    subst::{Substitutable, Substitution},
    types::{MonoType, Type, TypeScheme, TypeVar},
};

/// Bindings from program identifiers to their schemes. Extending an environment creates a new one
/// that shadows the old bindings and leaves the original untouched.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Env {
    map: im_rc::HashMap<String, Rc<TypeScheme>>,
}

impl Env {
    /// Extends an environment with a new binding.
    pub fn extend(&self, name: String, scheme: Rc<TypeScheme>) -> Self {
        Self {
            map: self.map.update(name, scheme),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<TypeScheme>> {
        self.map.get(name).cloned()
    }

    /// Union of the free variables of every scheme in the environment. These variables belong to
    /// an enclosing scope so they can not be quantified.
    pub fn free_vars(&self) -> IndexSet<TypeVar> {
        self.map
            .values()
            .flat_map(|scheme| scheme.free_vars())
            .collect()
    }

    pub(crate) fn max_var(&self) -> Option<TypeVar> {
        self.map.values().filter_map(|scheme| scheme.max_var()).max()
    }

    /// Maps every scheme, bindings that come back unchanged stay shared with `self`.
    pub(crate) fn map_schemes(&self, f: impl Fn(&Rc<TypeScheme>) -> Rc<TypeScheme>) -> Self {
        let mut map = self.map.clone();

        for (name, scheme) in self.map.iter() {
            let mapped = f(scheme);
            if !Rc::ptr_eq(&mapped, scheme) {
                map.insert(name.clone(), mapped);
            }
        }

        Self { map }
    }
}

impl FromIterator<(String, TypeScheme)> for Env {
    fn from_iter<I: IntoIterator<Item = (String, TypeScheme)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(name, scheme)| (name, Rc::new(scheme)))
                .collect(),
        }
    }
}

impl Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self
            .map
            .iter()
            .sorted_by(|(l, _), (r, _)| l.cmp(r))
            .map(|(name, scheme)| format!("{name} : {scheme}"))
            .join("\n");

        write!(f, "{bindings}")
    }
}

/// Constraints before `solved` are already unified into `substitution`.
#[derive(Default)]
struct Progress {
    solved: usize,
    substitution: Substitution,
}

/// State of one inference run, see the module documentation.
#[derive(Clone)]
pub struct Ctx {
    /// Next identifier to hand out, `None` once all of them were used.
    counter: Rc<Cell<Option<u32>>>,
    constraints: Rc<RefCell<Vec<Constraint>>>,
    progress: Rc<RefCell<Progress>>,
    errors: Rc<RefCell<Vec<TypeError>>>,
    pub env: Env,
    pub origin: Origin,
    pub config: Config,
}

impl Ctx {
    /// Starts a new run. Fresh variables start after every variable mentioned in the environment
    /// so they never alias the ones the caller wrote.
    pub fn new(env: Env, config: Config) -> Self {
        let start = env.max_var().map_or(Some(0), |TypeVar(n)| n.checked_add(1));

        Self {
            counter: Rc::new(Cell::new(start)),
            constraints: Default::default(),
            progress: Default::default(),
            errors: Default::default(),
            env,
            origin: Origin::default(),
            config,
        }
    }

    /// Extends a context with a new binding.
    pub fn extend(&self, name: String, scheme: Rc<TypeScheme>) -> Self {
        Self {
            env: self.env.extend(name, scheme),
            ..self.clone()
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<TypeScheme>> {
        self.env.lookup(name)
    }

    /// Sets the node that we are type checking, constraints and errors point to it.
    pub fn set_position(&mut self, origin: Origin) {
        self.origin = origin;
    }

    /// Hands out the next identifier. When there are none left the run is marked as failed with
    /// [TypeError::TypeVariablesExhausted] and the last identifier is repeated, the run can keep
    /// going but its result is never used.
    pub fn new_var(&self) -> TypeVar {
        match self.counter.get() {
            Some(n) => {
                self.counter.set(n.checked_add(1));
                TypeVar(n)
            }
            None => {
                let mut errors = self.errors.borrow_mut();
                if !errors
                    .iter()
                    .any(|err| matches!(err, TypeError::TypeVariablesExhausted { .. }))
                {
                    warn!(origin = %self.origin, "ran out of type variables");
                    errors.push(TypeError::TypeVariablesExhausted {
                        origin: self.origin,
                    });
                }
                TypeVar(u32::MAX)
            }
        }
    }

    /// Creates a new type variable that was never seen in this run.
    pub fn fresh(&self) -> Type {
        MonoType::var(self.new_var())
    }

    /// Records that two types must be equal because of the current node.
    pub fn constrain(&self, left: Type, right: Type) {
        let constraint = Constraint::new(left, right, self.origin);
        trace!(%constraint, origin = %self.origin, "new constraint");
        self.constraints.borrow_mut().push(constraint);
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.borrow().len()
    }

    pub fn take_constraints(&self) -> Vec<Constraint> {
        self.progress.take();
        self.constraints.take()
    }

    pub fn take_errors(&self) -> Vec<TypeError> {
        self.errors.take()
    }

    /// Unifies the constraints added since the last call, starting from the substitution found
    /// for the ones before them, and returns the substitution for everything so far.
    ///
    /// When failing fast the first error is returned. Otherwise failed constraints are removed
    /// from the sequence and their errors are recorded, so later calls never see them again.
    pub fn solve_pending(&self) -> Result<Substitution, TypeError> {
        let mut progress = self.progress.borrow_mut();
        let mut constraints = self.constraints.borrow_mut();

        let start = progress.solved;
        let solution = solve::resume(
            progress.substitution.clone(),
            &constraints[start..],
            self.config.mode,
        );

        if let (SolveMode::FailFast, Some((_, err))) = (self.config.mode, solution.errors.first()) {
            return Err(err.clone());
        }

        for (index, _) in solution.errors.iter().rev() {
            constraints.remove(start + index);
        }

        let failed = solution.errors.into_iter().map(|(_, err)| err);
        self.errors.borrow_mut().extend(failed);

        trace!(from = start, to = constraints.len(), "solved pending constraints");
        progress.solved = constraints.len();
        progress.substitution = solution.substitution;

        Ok(progress.substitution.clone())
    }

    /// Generalizes the type of a let bound value. The constraints collected up to now are solved
    /// first so that only the variables that are really unknown get quantified.
    pub fn generalize(&self, typ: &Type) -> Result<Rc<TypeScheme>, TypeError> {
        let substitution = self.solve_pending()?;

        let env = self.env.apply(&substitution);
        let scheme = typ.apply(&substitution).generalize(&env);

        debug!(%scheme, origin = %self.origin, "generalized let binding");
        Ok(Rc::new(scheme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extending_leaves_the_parent_untouched() {
        let parent = Env::default().extend("x".into(), MonoType::int().to_poly());
        let child = parent.extend("x".into(), MonoType::bool().to_poly());

        assert_eq!(parent.lookup("x").unwrap().mono, MonoType::int());
        assert_eq!(child.lookup("x").unwrap().mono, MonoType::bool());
    }

    #[test]
    fn free_vars_skip_quantified_variables() {
        let a = TypeVar(0);
        let b = TypeVar(1);
        let env = Env::default()
            .extend(
                "id".into(),
                Rc::new(
                    TypeScheme::new(vec![a], MonoType::arrow(MonoType::var(a), MonoType::var(a)))
                        .unwrap(),
                ),
            )
            .extend("y".into(), MonoType::var(b).to_poly());

        assert_eq!(env.free_vars().into_iter().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn fresh_variables_start_after_the_environment() {
        let env = Env::default().extend("y".into(), MonoType::var(TypeVar(41)).to_poly());
        let ctx = Ctx::new(env, Config::default());

        assert_eq!(ctx.new_var(), TypeVar(42));
        assert_eq!(ctx.clone().new_var(), TypeVar(43));
    }

    #[test]
    fn runs_do_not_share_state() {
        let first = Ctx::new(Env::default(), Config::default());
        let second = Ctx::new(Env::default(), Config::default());

        first.constrain(MonoType::int(), MonoType::int());

        assert_eq!(first.new_var(), second.new_var());
        assert_eq!(first.constraint_count(), 1);
        assert_eq!(second.constraint_count(), 0);
    }

    #[test]
    fn generalize_solves_before_quantifying() {
        let ctx = Ctx::new(Env::default(), Config::default());
        let a = ctx.fresh();
        let b = ctx.fresh();

        ctx.constrain(a.clone(), MonoType::int());
        let scheme = ctx.generalize(&MonoType::arrow(a, b)).unwrap();

        assert_eq!(scheme.to_string(), "forall 'b. Int -> 'b");
    }

    #[test]
    fn generalize_keeps_variables_of_the_environment() {
        let ctx = Ctx::new(Env::default(), Config::default());
        let a = ctx.fresh();
        let ctx = ctx.extend("x".into(), a.to_poly());

        let scheme = ctx.generalize(&MonoType::arrow(a, MonoType::int())).unwrap();
        assert!(scheme.vars.is_empty());
    }

    #[test]
    fn collecting_generalize_drops_failed_constraints() {
        let ctx = Ctx::new(Env::default(), Config::default().collect_all());
        ctx.constrain(MonoType::int(), MonoType::bool());
        ctx.constrain(MonoType::unit(), MonoType::unit());

        ctx.generalize(&MonoType::int()).unwrap();

        assert_eq!(ctx.constraint_count(), 1);
        assert_eq!(ctx.take_errors().len(), 1);
    }

    #[test]
    fn solved_constraints_are_not_solved_again() {
        let ctx = Ctx::new(Env::default(), Config::default());
        let a = ctx.fresh();
        ctx.constrain(a.clone(), MonoType::int());
        ctx.generalize(&a).unwrap();
        assert_eq!(ctx.progress.borrow().solved, 1);

        let b = ctx.fresh();
        ctx.constrain(b.clone(), MonoType::arrow(a.clone(), a));
        let scheme = ctx.generalize(&b).unwrap();

        assert_eq!(ctx.progress.borrow().solved, 2);
        assert_eq!(scheme.to_string(), "Int -> Int");
    }

    #[test]
    fn collecting_keeps_the_solved_prefix_in_sync_with_removals() {
        let ctx = Ctx::new(Env::default(), Config::default().collect_all());
        ctx.constrain(MonoType::int(), MonoType::bool());
        ctx.generalize(&MonoType::int()).unwrap();

        ctx.constrain(MonoType::unit(), MonoType::unit());
        ctx.constrain(MonoType::string(), MonoType::int());
        ctx.generalize(&MonoType::int()).unwrap();

        assert_eq!(ctx.progress.borrow().solved, 1);
        assert_eq!(ctx.constraint_count(), 1);
        assert_eq!(ctx.take_errors().len(), 2);

        ctx.solve_pending().unwrap();
        assert!(ctx.take_errors().is_empty());
    }

    #[test]
    fn running_out_of_variables_is_an_error() {
        let last_but_one = MonoType::var(TypeVar(u32::MAX - 1));
        let env = Env::default().extend("y".into(), last_but_one.to_poly());
        let ctx = Ctx::new(env, Config::default());

        assert_eq!(ctx.new_var(), TypeVar(u32::MAX));
        assert!(ctx.take_errors().is_empty());

        ctx.new_var();
        ctx.new_var();
        let errors = ctx.take_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], TypeError::TypeVariablesExhausted { .. }));
    }

    #[test]
    fn failing_fast_generalize_returns_the_error() {
        let ctx = Ctx::new(Env::default(), Config::default());
        ctx.constrain(MonoType::int(), MonoType::bool());

        assert!(matches!(
            ctx.generalize(&MonoType::int()),
            Err(TypeError::TypeMismatch { .. })
        ));
    }
}
