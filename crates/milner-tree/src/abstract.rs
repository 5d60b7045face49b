//! This module describes the tree that the checker consumes. It contains pure syntactic
//! information. The main types of this file are [Expr] and [Type].

use std::fmt::{self, Display};

use itertools::Itertools;
use milner_location::Located;

/// Literal values, each one of them has a fixed base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Unit,
    Int(i64),
    Bool(bool),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Expressions are language constructions that intrinsically contain a value. E.g
///
/// ```md
/// let id = |x| x; (id 1, id true)
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(String),
    Abstraction(String, Box<Expr>),
    Application(Box<Expr>, Box<Expr>),
    Let(String, Box<Expr>, Box<Expr>),
    LetRec(String, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Tuple(Vec<Expr>),
    Annotation(Box<Expr>, Box<Type>),

    /// A construction added by the embedding language that has no typing rule in the checker.
    Extension(String, Vec<Expr>),
}

impl Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(l) => write!(f, "{l}"),
            Self::Variable(x) => write!(f, "{x}"),
            Self::Abstraction(p, e) => write!(f, "(|{p}| {e})"),
            Self::Application(fu, a) => write!(f, "({fu} {a})"),
            Self::Let(n, v, next) => write!(f, "(let {n} = {v}; {next})"),
            Self::LetRec(n, v, next) => write!(f, "(let rec {n} = {v}; {next})"),
            Self::If(c, t, e) => write!(f, "(if {c} then {t} else {e})"),
            Self::Tuple(t) => write!(f, "({})", t.iter().join(", ")),
            Self::Annotation(e, t) => write!(f, "({e} : {t})"),
            Self::Extension(name, args) if args.is_empty() => write!(f, "{name}!"),
            Self::Extension(name, args) => write!(f, "{name}!({})", args.iter().join(", ")),
        }
    }
}

impl ExprKind {
    /// Name of the construction, used to describe nodes that the checker does not support.
    pub fn construct_name(&self) -> &str {
        match self {
            Self::Literal(_) => "literal",
            Self::Variable(_) => "variable",
            Self::Abstraction(..) => "abstraction",
            Self::Application(..) => "application",
            Self::Let(..) => "let",
            Self::LetRec(..) => "let rec",
            Self::If(..) => "if",
            Self::Tuple(_) => "tuple",
            Self::Annotation(..) => "annotation",
            Self::Extension(name, _) => name,
        }
    }
}

/// A milner expression is some syntactic element that intrinsically has a value. It can be a
/// literal value, a variable, a function call, a function definition and etc.
pub type Expr = Located<ExprKind>;

/// The syntax of types written by the programmer inside of annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A nullary type constructor like `Int`.
    Constructor(String),
    /// A named type variable like `'a`. The same name inside one annotation is the same variable.
    Variable(String),
    Arrow(Box<Type>, Box<Type>),
    Application(String, Vec<Type>),
    Tuple(Vec<Type>),
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "'{name}"),
            Self::Arrow(left, right) => write!(f, "({left} -> {right})"),
            Self::Application(name, args) => write!(f, "{name}[{}]", args.iter().join(", ")),
            Self::Tuple(types) => write!(f, "({})", types.iter().join(", ")),
        }
    }
}

pub type Type = Located<TypeKind>;
