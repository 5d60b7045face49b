//! Solving of the constraints produced by the generator. Constraints are unified from left to
//! right and each one sees the substitution found by the previous ones.

use tracing::{debug, trace};

use crate::{
    config::SolveMode,
    constraint::Constraint,
    error::TypeError,
    subst::{Substitutable, Substitution},
    unify::unify,
};

#[derive(Debug, Clone, Default)]
pub struct Solution {
    pub substitution: Substitution,
    /// Errors together with the index of the constraint that caused them.
    pub errors: Vec<(usize, TypeError)>,
}

/// Solves a whole constraint sequence from scratch.
pub fn solve(constraints: &[Constraint], mode: SolveMode) -> Solution {
    resume(Substitution::empty(), constraints, mode)
}

/// Continues solving from the substitution found for the constraints that came before
/// `constraints`. Error indexes are relative to the slice.
pub fn resume(substitution: Substitution, constraints: &[Constraint], mode: SolveMode) -> Solution {
    let mut solution = Solution {
        substitution,
        errors: Vec::new(),
    };

    for (index, constraint) in constraints.iter().enumerate() {
        let current = constraint.apply(&solution.substitution);
        trace!(index, constraint = %current, "solving");

        match unify(&current.left, &current.right) {
            Ok(subst) => solution.substitution = subst.compose(&solution.substitution),
            Err(err) => {
                let err = TypeError::from_unify(err, constraint.origin);
                debug!(index, %err, "constraint failed");
                solution.errors.push((index, err));

                if mode == SolveMode::FailFast {
                    break;
                }
            }
        }
    }

    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MonoType, Type, TypeVar};
    use milner_location::{NodeId, Origin};

    fn v(n: u32) -> Type {
        MonoType::var(TypeVar(n))
    }

    fn solve_fail_fast(constraints: &[Constraint]) -> Result<Substitution, TypeError> {
        let mut solution = solve(constraints, SolveMode::FailFast);
        match solution.errors.pop() {
            Some((_, err)) => Err(err),
            None => Ok(solution.substitution),
        }
    }

    fn at(id: u32, left: Type, right: Type) -> Constraint {
        let origin = Origin {
            id: NodeId(id),
            ..Default::default()
        };
        Constraint::new(left, right, origin)
    }

    #[test]
    fn later_constraints_see_earlier_bindings() {
        let constraints = [
            at(0, v(0), MonoType::arrow(v(1), v(2))),
            at(1, v(0), MonoType::arrow(MonoType::int(), MonoType::bool())),
        ];

        let subst = solve_fail_fast(&constraints).unwrap();
        assert_eq!(v(0).apply(&subst).to_string(), "Int -> Bool");
        assert_eq!(v(2).apply(&subst), MonoType::bool());
    }

    #[test]
    fn fail_fast_reports_the_first_failure_only() {
        let constraints = [
            at(0, MonoType::int(), MonoType::bool()),
            at(1, MonoType::unit(), MonoType::string()),
        ];

        let err = solve_fail_fast(&constraints).unwrap_err();
        assert_eq!(err.origin().id, NodeId(0));

        let solution = solve(&constraints, SolveMode::FailFast);
        assert_eq!(solution.errors.len(), 1);
    }

    #[test]
    fn collect_all_skips_failures_and_keeps_going() {
        let constraints = [
            at(0, v(0), MonoType::int()),
            at(1, v(0), MonoType::bool()),
            at(2, v(1), v(0)),
            at(3, v(1), MonoType::unit()),
        ];

        let solution = solve(&constraints, SolveMode::CollectAll);
        let failed: Vec<usize> = solution.errors.iter().map(|(index, _)| *index).collect();

        assert_eq!(failed, vec![1, 3]);
        assert_eq!(v(1).apply(&solution.substitution), MonoType::int());
    }

    #[test]
    fn final_substitution_is_idempotent() {
        let constraints = [
            at(0, v(0), MonoType::arrow(v(1), v(2))),
            at(1, v(1), v(2)),
            at(2, v(2), MonoType::tuple(vec![v(3), v(3)])),
            at(3, v(3), MonoType::int()),
        ];

        let subst = solve_fail_fast(&constraints).unwrap();
        for n in 0..4 {
            let once = v(n).apply(&subst);
            assert_eq!(once.apply(&subst), once);
        }
        assert_eq!(v(0).apply(&subst).to_string(), "(Int, Int) -> (Int, Int)");
    }

    #[test]
    fn resuming_matches_solving_everything_at_once() {
        let constraints = [
            at(0, v(0), MonoType::arrow(v(1), v(2))),
            at(1, v(1), MonoType::int()),
            at(2, v(2), MonoType::bool()),
            at(3, v(1), MonoType::unit()),
        ];

        let prefix = solve(&constraints[..2], SolveMode::CollectAll);
        let resumed = resume(prefix.substitution, &constraints[2..], SolveMode::CollectAll);
        let whole = solve(&constraints, SolveMode::CollectAll);

        assert_eq!(resumed.substitution, whole.substitution);
        assert_eq!(resumed.errors.len(), 1);
        assert_eq!(resumed.errors[0].0, 1);
        assert_eq!(whole.errors[0].0, 3);
    }

    #[test]
    fn errors_carry_the_origin_of_their_constraint() {
        let constraints = [at(9, v(0), MonoType::arrow(v(0), v(0)))];

        let err = solve_fail_fast(&constraints).unwrap_err();
        assert!(matches!(err, TypeError::InfiniteType { .. }));
        assert_eq!(err.origin().id, NodeId(9));
    }
}
