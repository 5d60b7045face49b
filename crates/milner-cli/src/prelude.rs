use milner_checker::types::{MonoType, SchemeError, Type, TypeScheme, TypeVar};
use milner_checker::Env;

fn binary(operand: Type) -> Type {
    MonoType::arrow(operand.clone(), MonoType::arrow(operand.clone(), operand))
}

/// The names every demo program can use.
pub fn prelude() -> Result<Env, SchemeError> {
    let a = TypeVar(0);
    let b = TypeVar(1);
    let va = || MonoType::var(a);
    let vb = || MonoType::var(b);
    let pair = || MonoType::tuple(vec![va(), vb()]);
    let list = || MonoType::app("List", vec![va()]);

    let entries = [
        ("add", vec![], binary(MonoType::int())),
        ("sub", vec![], binary(MonoType::int())),
        ("mul", vec![], binary(MonoType::int())),
        ("not", vec![], MonoType::arrow(MonoType::bool(), MonoType::bool())),
        ("eq", vec![a], MonoType::arrow(va(), MonoType::arrow(va(), MonoType::bool()))),
        ("pair", vec![a, b], MonoType::arrow(va(), MonoType::arrow(vb(), pair()))),
        ("fst", vec![a, b], MonoType::arrow(pair(), va())),
        ("snd", vec![a, b], MonoType::arrow(pair(), vb())),
        ("nil", vec![a], list()),
        ("cons", vec![a], MonoType::arrow(va(), MonoType::arrow(list(), list()))),
        ("show", vec![], MonoType::arrow(MonoType::int(), MonoType::string())),
    ];

    entries
        .into_iter()
        .map(|(name, vars, mono)| Ok((name.to_string(), TypeScheme::new(vars, mono)?)))
        .collect()
}
