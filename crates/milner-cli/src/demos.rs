//! Small programs that show what the checker accepts and how it reports what it rejects.

use milner_tree::r#abstract::Expr;
use milner_tree::Builder;

pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    pub build: fn(&Builder) -> Expr,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "compose",
        summary: "function composition",
        build: |b| {
            let body = b.app(b.var("g"), b.app(b.var("f"), b.var("x")));
            b.lambdas(["f", "g", "x"], body)
        },
    },
    Demo {
        name: "identity",
        summary: "the identity function",
        build: |b| b.lambda("x", b.var("x")),
    },
    Demo {
        name: "let-poly",
        summary: "a let bound identity used at two types",
        build: |b| {
            let id = b.lambda("x", b.var("x"));
            let body = b.tuple([b.app(b.var("id"), b.int(1)), b.app(b.var("id"), b.bool(true))]);
            b.let_in("id", id, body)
        },
    },
    Demo {
        name: "pairs",
        summary: "polymorphic builtins from the prelude",
        build: |b| {
            let pair = b.call(b.var("pair"), [b.int(1), b.string("one")]);
            let list = b.call(b.var("cons"), [b.unit(), b.var("nil")]);
            b.tuple([b.app(b.var("snd"), pair), list])
        },
    },
    Demo {
        name: "count",
        summary: "a recursive function",
        build: |b| {
            let is_zero = b.call(b.var("eq"), [b.var("n"), b.int(0)]);
            let recurse = b.app(b.var("count"), b.call(b.var("sub"), [b.var("n"), b.int(1)]));
            let step = b.call(b.var("add"), [b.int(1), recurse]);
            let body = b.lambda("n", b.if_then_else(is_zero, b.int(0), step));
            b.let_rec("count", body, b.var("count"))
        },
    },
    Demo {
        name: "annotated",
        summary: "an annotation narrowing the identity",
        build: |b| {
            let int = || b.con_type("Int");
            b.annotate(b.lambda("x", b.var("x")), b.arrow_type(int(), int()))
        },
    },
    Demo {
        name: "mismatch",
        summary: "a lambda bound variable used at two types",
        build: |b| {
            let uses = b.tuple([b.app(b.var("x"), b.int(1)), b.app(b.var("x"), b.bool(true))]);
            b.lambda("x", uses)
        },
    },
    Demo {
        name: "unbound",
        summary: "a name that is not in scope",
        build: |b| b.call(b.var("add"), [b.var("y"), b.int(1)]),
    },
    Demo {
        name: "infinite",
        summary: "self application",
        build: |b| b.lambda("x", b.app(b.var("x"), b.var("x"))),
    },
    Demo {
        name: "branches",
        summary: "two unrelated errors, run with --collect to see both",
        build: |b| {
            let branches = b.if_then_else(b.bool(true), b.int(1), b.string("one"));
            let condition = b.if_then_else(b.int(0), b.unit(), b.unit());
            b.tuple([branches, condition])
        },
    },
    Demo {
        name: "quote",
        summary: "a construct the checker does not know",
        build: |b| b.extension("quote", [b.var("x")]),
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}
