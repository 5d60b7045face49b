//! This module joins the trees that go in and out of the type checker. It does not depend on the
//! checker, only on milner-location that provides constructions to localize nodes.
//!
//! The trees available in this module are:
//!
//! - Abstract: a purely syntactic tree without semantic information. Whoever embeds the checker
//!   produces it, usually a parser, or the [Builder] when there is no source text.
//! - Typed: the same shape as the abstract tree where every node carries the type that was
//!   inferred for it.
//!

pub mod r#abstract;
pub mod builder;
pub mod typed;

pub use builder::Builder;
