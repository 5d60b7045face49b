//! This crate infers types for [Expr] trees using the hindley-milner type system with
//! let-polymorphism. Inference is split in two phases: the generator walks the tree producing a
//! typed tree and a sequence of equality constraints, then the solver unifies those constraints
//! into a substitution that is applied to everything that was generated.
//!
//! ```md
//! Expr --infer--> (Type, Typed, [Constraint]) --solve--> Substitution --apply--> Inferred
//! ```
//!
//! Each call to [infer] is an independent run with its own supply of type variables and its own
//! constraints, so different runs can happen on different threads.

use milner_tree::r#abstract::Expr;
use tracing::{debug, debug_span};

pub mod config;
pub mod constraint;
pub mod context;
pub mod error;
pub mod infer;
pub mod solve;
pub mod subst;
pub mod types;
pub mod unify;

mod util;

pub use config::{Config, SolveMode};
pub use context::{Ctx, Env};
pub use error::TypeError;
pub use infer::expr::TypedExpr;

use constraint::Constraint;
use infer::Infer;
use subst::{Substitutable, Substitution};
use types::{Type, TypeScheme};

/// Everything that a successful run found out about an expression.
#[derive(Debug, Clone)]
pub struct Inferred {
    /// The principal type, its free variables are implicitly quantified.
    pub typ: Type,
    /// The principal type generalized over the base environment with variables renamed in order
    /// of appearance.
    pub scheme: TypeScheme,
    /// The tree with the final substitution applied to every node.
    pub tree: TypedExpr,
    pub constraints: Vec<Constraint>,
    pub substitution: Substitution,
}

/// Infers the principal type of an expression under a base environment.
///
/// In [SolveMode::FailFast] the error list has exactly one element, in [SolveMode::CollectAll] it
/// has every error that was found.
pub fn infer(env: &Env, expr: &Expr, config: Config) -> Result<Inferred, Vec<TypeError>> {
    let _span = debug_span!("infer", root = %expr.id(), mode = ?config.mode).entered();

    let ctx = Ctx::new(env.clone(), config);

    let generated = expr.infer(ctx.clone()).and_then(|(typ, tree)| {
        debug!(constraints = ctx.constraint_count(), %typ, "generated");
        let substitution = ctx.solve_pending()?;
        Ok((typ, tree, substitution))
    });

    let mut errors = ctx.take_errors();
    let (typ, tree, substitution) = match generated {
        Ok(solved) if errors.is_empty() => solved,
        Ok(_) => return Err(reported(errors, config.mode)),
        Err(err) => {
            errors.push(err);
            return Err(reported(errors, config.mode));
        }
    };

    let constraints = ctx.take_constraints();
    let typ = typ.apply(&substitution);
    let scheme = typ.generalize(&env.apply(&substitution)).normalize();

    debug!(%scheme, "inferred");

    Ok(Inferred {
        tree: tree.apply(&substitution),
        typ,
        scheme,
        constraints,
        substitution,
    })
}

fn reported(mut errors: Vec<TypeError>, mode: SolveMode) -> Vec<TypeError> {
    if mode == SolveMode::FailFast {
        errors.truncate(1);
    }

    debug!(errors = errors.len(), "inference failed");
    errors
}

/// Holds a base environment and a configuration to check many expressions with them.
#[derive(Clone, Default)]
pub struct Checker {
    pub env: Env,
    pub config: Config,
}

impl Checker {
    pub fn new(env: Env, config: Config) -> Self {
        Self { env, config }
    }

    pub fn infer(&self, expr: &Expr) -> Result<Inferred, Vec<TypeError>> {
        infer(&self.env, expr, self.config)
    }

    /// Infers and returns only the first error, which is what an interactive caller reports.
    pub fn principal(&self, expr: &Expr) -> Result<TypeScheme, TypeError> {
        self.infer(expr).map(|inferred| inferred.scheme).map_err(|mut errors| errors.remove(0))
    }
}
