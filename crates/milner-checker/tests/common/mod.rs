#![allow(dead_code)]

use milner_checker::types::{MonoType, Type, TypeScheme, TypeVar};
use milner_checker::Env;

pub const A: TypeVar = TypeVar(0);
pub const B: TypeVar = TypeVar(1);

pub fn v(var: TypeVar) -> Type {
    MonoType::var(var)
}

pub fn arrows(types: impl IntoIterator<Item = Type>) -> Type {
    let mut types: Vec<Type> = types.into_iter().collect();
    let last = types.pop().expect("at least one type");
    types
        .into_iter()
        .rev()
        .fold(last, |acc, typ| MonoType::arrow(typ, acc))
}

fn scheme(vars: Vec<TypeVar>, mono: Type) -> TypeScheme {
    TypeScheme::new(vars, mono).expect("prelude schemes quantify used variables")
}

/// A small base environment, the checker itself knows nothing about these names.
pub fn prelude() -> Env {
    let int = MonoType::int;
    let boolean = MonoType::bool;
    let list = |t: Type| MonoType::app("List", vec![t]);

    [
        ("add", scheme(vec![], arrows([int(), int(), int()]))),
        ("sub", scheme(vec![], arrows([int(), int(), int()]))),
        ("mul", scheme(vec![], arrows([int(), int(), int()]))),
        ("not", scheme(vec![], arrows([boolean(), boolean()]))),
        ("eq", scheme(vec![A], arrows([v(A), v(A), boolean()]))),
        (
            "pair",
            scheme(
                vec![A, B],
                arrows([v(A), v(B), MonoType::tuple(vec![v(A), v(B)])]),
            ),
        ),
        (
            "fst",
            scheme(vec![A, B], arrows([MonoType::tuple(vec![v(A), v(B)]), v(A)])),
        ),
        ("nil", scheme(vec![A], list(v(A)))),
        ("cons", scheme(vec![A], arrows([v(A), list(v(A)), list(v(A))]))),
    ]
    .into_iter()
    .map(|(name, scheme)| (name.to_string(), scheme))
    .collect()
}
