//! Construction of [Expr] trees without a parser. Each node receives a fresh [NodeId] so errors
//! can point back at it.

use std::cell::Cell;

use milner_location::{ByteRange, NodeId, Origin};

use crate::r#abstract::{Expr, ExprKind, Literal, Type, TypeKind};

#[derive(Default)]
pub struct Builder {
    next: Cell<u32>,
    location: Cell<ByteRange>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the span given to the nodes built from now on.
    pub fn at(&self, location: ByteRange) -> &Self {
        self.location.set(location);
        self
    }

    fn origin(&self) -> Origin {
        let id = self.next.get();
        self.next.set(id + 1);
        Origin {
            id: NodeId(id),
            location: self.location.get(),
        }
    }

    pub fn node(&self, kind: ExprKind) -> Expr {
        Expr::new(self.origin(), kind)
    }

    pub fn unit(&self) -> Expr {
        self.node(ExprKind::Literal(Literal::Unit))
    }

    pub fn int(&self, n: i64) -> Expr {
        self.node(ExprKind::Literal(Literal::Int(n)))
    }

    pub fn bool(&self, b: bool) -> Expr {
        self.node(ExprKind::Literal(Literal::Bool(b)))
    }

    pub fn string(&self, s: impl Into<String>) -> Expr {
        self.node(ExprKind::Literal(Literal::String(s.into())))
    }

    pub fn var(&self, name: impl Into<String>) -> Expr {
        self.node(ExprKind::Variable(name.into()))
    }

    pub fn lambda(&self, param: impl Into<String>, body: Expr) -> Expr {
        self.node(ExprKind::Abstraction(param.into(), Box::new(body)))
    }

    /// Curried abstraction over many parameters, `|a b c| e` is `|a| |b| |c| e`.
    pub fn lambdas<S: Into<String>>(
        &self,
        params: impl IntoIterator<Item = S>,
        body: Expr,
    ) -> Expr {
        let params: Vec<String> = params.into_iter().map(Into::into).collect();
        params
            .into_iter()
            .rev()
            .fold(body, |body, param| self.lambda(param, body))
    }

    pub fn app(&self, fun: Expr, arg: Expr) -> Expr {
        self.node(ExprKind::Application(Box::new(fun), Box::new(arg)))
    }

    /// Left nested application, `f a b` is `((f a) b)`.
    pub fn call(&self, fun: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
        args.into_iter().fold(fun, |fun, arg| self.app(fun, arg))
    }

    pub fn let_in(&self, name: impl Into<String>, value: Expr, body: Expr) -> Expr {
        self.node(ExprKind::Let(name.into(), Box::new(value), Box::new(body)))
    }

    pub fn let_rec(&self, name: impl Into<String>, value: Expr, body: Expr) -> Expr {
        self.node(ExprKind::LetRec(name.into(), Box::new(value), Box::new(body)))
    }

    pub fn if_then_else(&self, cond: Expr, then: Expr, otherwise: Expr) -> Expr {
        self.node(ExprKind::If(
            Box::new(cond),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    pub fn tuple(&self, items: impl IntoIterator<Item = Expr>) -> Expr {
        self.node(ExprKind::Tuple(items.into_iter().collect()))
    }

    pub fn annotate(&self, expr: Expr, typ: Type) -> Expr {
        self.node(ExprKind::Annotation(Box::new(expr), Box::new(typ)))
    }

    pub fn extension(&self, name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
        self.node(ExprKind::Extension(name.into(), args.into_iter().collect()))
    }

    pub fn typ(&self, kind: TypeKind) -> Type {
        Type::new(self.origin(), kind)
    }

    pub fn con_type(&self, name: impl Into<String>) -> Type {
        self.typ(TypeKind::Constructor(name.into()))
    }

    pub fn var_type(&self, name: impl Into<String>) -> Type {
        self.typ(TypeKind::Variable(name.into()))
    }

    pub fn arrow_type(&self, left: Type, right: Type) -> Type {
        self.typ(TypeKind::Arrow(Box::new(left), Box::new(right)))
    }

    pub fn app_type(&self, name: impl Into<String>, args: impl IntoIterator<Item = Type>) -> Type {
        self.typ(TypeKind::Application(name.into(), args.into_iter().collect()))
    }

    pub fn tuple_type(&self, items: impl IntoIterator<Item = Type>) -> Type {
        self.typ(TypeKind::Tuple(items.into_iter().collect()))
    }
}
