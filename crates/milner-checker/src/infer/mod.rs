//! Exposes an interface to generate the type and the constraints of expressions and of the types
//! written inside annotations. The main construction of this module is the [Infer] trait.

pub mod expr;
pub mod typ;

/// This trait exposes a function called [Infer::infer] that discovers a type for a node, leaving
/// behind in the context the equalities that still have to hold. A type rule that expresses this
/// is:
///
/// ```md
///    'a = fresh     G, x: 'a |- e => 'b | C
/// ----------------------------------------
///         G |- |x| e => 'a -> 'b | C
/// ```
///
pub trait Infer {
    type Context<'a>;
    type Return;

    /// Infers the type of a node.
    fn infer(self, ctx: Self::Context<'_>) -> Self::Return;
}
