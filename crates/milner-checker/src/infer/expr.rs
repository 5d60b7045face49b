//! Constraint generation for expressions.

use std::collections::HashMap;

use milner_tree::r#abstract::{Expr, ExprKind, Literal};
use milner_tree::typed::{self, Symbol, Typed, VariableNode};
use tracing::trace;

use super::Infer;
use crate::{
    context::Ctx,
    error::TypeError,
    types::{MonoType, Type},
};

pub type TypedExpr = Typed<Type>;

pub fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::Unit => MonoType::unit(),
        Literal::Int(_) => MonoType::int(),
        Literal::Bool(_) => MonoType::bool(),
        Literal::String(_) => MonoType::string(),
    }
}

impl Infer for &Expr {
    type Context<'a> = Ctx;
    type Return = Result<(Type, TypedExpr), TypeError>;

    fn infer(self, mut ctx: Self::Context<'_>) -> Self::Return {
        use ExprKind::*;
        ctx.set_position(self.origin);
        trace!(origin = %self.origin, construct = self.data.construct_name(), "inferring");

        let with_type = |typ: Type, data: typed::Expr<Type>| {
            (typ.clone(), Typed::new(self.origin, typ, data))
        };

        match &self.data {
            Literal(lit) => Ok(with_type(literal_type(lit), typed::Expr::Literal(lit.clone()))),

            Variable(x) => match ctx.lookup(x) {
                Some(sigma) => {
                    let (inst, inst_types) = sigma.instantiate(&ctx);

                    let node = VariableNode {
                        name: Symbol(x.to_owned()),
                        inst_types,
                    };

                    Ok(with_type(inst, typed::Expr::Variable(node)))
                }

                None => Err(TypeError::UnboundVariable {
                    name: x.to_owned(),
                    origin: self.origin,
                }),
            },

            Abstraction(param, body) => {
                // Lambda bound names are never generalized inside of their own body.
                let t = ctx.fresh();
                let new_ctx = ctx.extend(param.to_owned(), t.to_poly());
                let (t_body, body) = body.as_ref().infer(new_ctx)?;

                let param = (Symbol(param.to_owned()), t.clone());
                let abs = typed::Expr::Abstraction(param, Box::new(body));
                Ok(with_type(MonoType::arrow(t, t_body), abs))
            }

            Application(fun, arg) => {
                let (t0, fun) = fun.as_ref().infer(ctx.clone())?;
                let (t1, arg) = arg.as_ref().infer(ctx.clone())?;

                let t_ret = ctx.fresh();
                ctx.constrain(t0, MonoType::arrow(t1, t_ret.clone()));

                let node = typed::Expr::Application(Box::new(fun), Box::new(arg));
                Ok(with_type(t_ret, node))
            }

            Let(x, e0, e1) => {
                let (t, value) = e0.as_ref().infer(ctx.clone())?;
                let t_generalized = ctx.generalize(&t)?;

                let new_ctx = ctx.extend(x.to_owned(), t_generalized);
                let (t_body, body) = e1.as_ref().infer(new_ctx)?;

                let node = typed::Expr::Let(Symbol(x.to_owned()), Box::new(value), Box::new(body));
                Ok(with_type(t_body, node))
            }

            LetRec(x, e0, e1) => {
                let t_rec = ctx.fresh();
                let rec_ctx = ctx.extend(x.to_owned(), t_rec.to_poly());

                let (t, value) = e0.as_ref().infer(rec_ctx)?;
                ctx.constrain(t_rec, t.clone());
                let t_generalized = ctx.generalize(&t)?;

                let new_ctx = ctx.extend(x.to_owned(), t_generalized);
                let (t_body, body) = e1.as_ref().infer(new_ctx)?;

                let node =
                    typed::Expr::LetRec(Symbol(x.to_owned()), Box::new(value), Box::new(body));
                Ok(with_type(t_body, node))
            }

            If(cond, then, otherwise) => {
                let (t_cond, cond_node) = cond.as_ref().infer(ctx.clone())?;
                let mut cond_ctx = ctx.clone();
                cond_ctx.set_position(cond.origin);
                cond_ctx.constrain(t_cond, MonoType::bool());

                let (t_then, then) = then.as_ref().infer(ctx.clone())?;
                let (t_else, otherwise) = otherwise.as_ref().infer(ctx.clone())?;
                ctx.constrain(t_then.clone(), t_else);

                let node =
                    typed::Expr::If(Box::new(cond_node), Box::new(then), Box::new(otherwise));
                Ok(with_type(t_then, node))
            }

            Tuple(items) => {
                let (types, nodes): (Vec<_>, Vec<_>) = items
                    .iter()
                    .map(|item| item.infer(ctx.clone()))
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .unzip();

                Ok(with_type(MonoType::tuple(types), typed::Expr::Tuple(nodes)))
            }

            Annotation(expr, typ) => {
                let (t_expr, expr) = expr.as_ref().infer(ctx.clone())?;
                let t_annot = typ.as_ref().infer((&ctx, &mut HashMap::new()));
                ctx.constrain(t_expr, t_annot.clone());

                Ok(with_type(t_annot, typed::Expr::Annotation(Box::new(expr))))
            }

            Extension(..) => Err(TypeError::UnsupportedConstruct {
                name: self.data.construct_name().to_owned(),
                origin: self.origin,
            }),
        }
    }
}
