//! This module defines the tree that the checker produces. It has the shape of the abstract tree
//! but every node carries its type, so later phases never have to infer anything again.

use std::fmt::{Display, Formatter};

use milner_location::Origin;

use crate::r#abstract::Literal;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub String);

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type Labeled<T> = (Symbol, T);

/// A variable occurrence together with the types its scheme was instantiated with.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNode<T> {
    pub name: Symbol,
    pub inst_types: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<T> {
    Literal(Literal),
    Variable(VariableNode<T>),
    Abstraction(Labeled<T>, Box<Typed<T>>),
    Application(Box<Typed<T>>, Box<Typed<T>>),
    Let(Symbol, Box<Typed<T>>, Box<Typed<T>>),
    LetRec(Symbol, Box<Typed<T>>, Box<Typed<T>>),
    If(Box<Typed<T>>, Box<Typed<T>>, Box<Typed<T>>),
    Tuple(Vec<Typed<T>>),
    Annotation(Box<Typed<T>>),
}

/// A node of the typed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Typed<T> {
    pub origin: Origin,
    pub typ: T,
    pub data: Expr<T>,
}

impl<T> Typed<T> {
    pub const fn new(origin: Origin, typ: T, data: Expr<T>) -> Self {
        Self { origin, typ, data }
    }

    /// Rebuilds the tree changing every type inside of it, including the types of parameters and
    /// of instantiations.
    pub fn map<U>(self, f: &impl Fn(T) -> U) -> Typed<U> {
        let boxed = |node: Box<Self>| Box::new(node.map(f));

        let data = match self.data {
            Expr::Literal(lit) => Expr::Literal(lit),
            Expr::Variable(VariableNode { name, inst_types }) => Expr::Variable(VariableNode {
                name,
                inst_types: inst_types.into_iter().map(f).collect(),
            }),
            Expr::Abstraction((param, typ), body) => {
                Expr::Abstraction((param, f(typ)), boxed(body))
            }
            Expr::Application(fun, arg) => Expr::Application(boxed(fun), boxed(arg)),
            Expr::Let(name, value, body) => Expr::Let(name, boxed(value), boxed(body)),
            Expr::LetRec(name, value, body) => Expr::LetRec(name, boxed(value), boxed(body)),
            Expr::If(cond, then, otherwise) => Expr::If(boxed(cond), boxed(then), boxed(otherwise)),
            Expr::Tuple(items) => Expr::Tuple(items.into_iter().map(|item| item.map(f)).collect()),
            Expr::Annotation(expr) => Expr::Annotation(boxed(expr)),
        };

        Typed {
            origin: self.origin,
            typ: f(self.typ),
            data,
        }
    }

    /// Visits every node of the tree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match &self.data {
            Expr::Literal(_) | Expr::Variable(_) => {}
            Expr::Abstraction(_, body) | Expr::Annotation(body) => body.walk(visit),
            Expr::Application(a, b) | Expr::Let(_, a, b) | Expr::LetRec(_, a, b) => {
                a.walk(visit);
                b.walk(visit);
            }
            Expr::If(a, b, c) => {
                a.walk(visit);
                b.walk(visit);
                c.walk(visit);
            }
            Expr::Tuple(items) => items.iter().for_each(|item| item.walk(visit)),
        }
    }
}

impl<T: Display> Typed<T> {
    pub fn render_indented(&self, f: &mut Formatter<'_>, indent: usize) -> std::fmt::Result {
        let children: Vec<&Self> = match &self.data {
            Expr::Literal(lit) => {
                writeln!(f, "{:indent$}{lit} : {}", "", self.typ)?;
                vec![]
            }
            Expr::Variable(node) => {
                writeln!(f, "{:indent$}{} : {}", "", node.name, self.typ)?;
                vec![]
            }
            Expr::Abstraction((param, typ), body) => {
                writeln!(f, "{:indent$}|{param}: {typ}| : {}", "", self.typ)?;
                vec![body.as_ref()]
            }
            Expr::Application(fun, arg) => {
                writeln!(f, "{:indent$}app : {}", "", self.typ)?;
                vec![fun.as_ref(), arg.as_ref()]
            }
            Expr::Let(name, value, body) => {
                writeln!(f, "{:indent$}let {name} : {}", "", self.typ)?;
                vec![value.as_ref(), body.as_ref()]
            }
            Expr::LetRec(name, value, body) => {
                writeln!(f, "{:indent$}let rec {name} : {}", "", self.typ)?;
                vec![value.as_ref(), body.as_ref()]
            }
            Expr::If(cond, then, otherwise) => {
                writeln!(f, "{:indent$}if : {}", "", self.typ)?;
                vec![cond.as_ref(), then.as_ref(), otherwise.as_ref()]
            }
            Expr::Tuple(items) => {
                writeln!(f, "{:indent$}tuple : {}", "", self.typ)?;
                items.iter().collect()
            }
            Expr::Annotation(expr) => {
                writeln!(f, "{:indent$}annotation : {}", "", self.typ)?;
                vec![expr.as_ref()]
            }
        };

        for child in children {
            child.render_indented(f, indent + 2)?;
        }

        Ok(())
    }
}

impl<T: Display> Display for Typed<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.render_indented(f, 0)
    }
}
