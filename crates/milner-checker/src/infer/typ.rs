//! Conversion of the types written in annotations.

use std::collections::HashMap;

use milner_tree::r#abstract::{Type as Syntax, TypeKind};

use super::Infer;
use crate::{
    context::Ctx,
    types::{MonoType, Type},
};

impl Infer for &Syntax {
    /// Type variables that were already named inside the same annotation.
    type Context<'a> = (&'a Ctx, &'a mut HashMap<String, Type>);
    type Return = Type;

    fn infer(self, (ctx, names): Self::Context<'_>) -> Self::Return {
        match &self.data {
            TypeKind::Constructor(name) => MonoType::con(name.clone()),

            TypeKind::Variable(name) => names
                .entry(name.clone())
                .or_insert_with(|| ctx.fresh())
                .clone(),

            TypeKind::Arrow(left, right) => {
                let left = left.as_ref().infer((ctx, &mut *names));
                let right = right.as_ref().infer((ctx, names));
                MonoType::arrow(left, right)
            }

            TypeKind::Application(name, args) => {
                let args = args.iter().map(|arg| arg.infer((ctx, &mut *names))).collect();
                MonoType::app(name.clone(), args)
            }

            TypeKind::Tuple(items) => {
                let items = items.iter().map(|item| item.infer((ctx, &mut *names))).collect();
                MonoType::tuple(items)
            }
        }
    }
}
