//! WFE IR - workflow expression syntax trees
//!
//! Syntax trees for the `${{ ... }}` expressions embedded in workflow
//! files, and the two queries every analyzer over them needs:
//! - [`visit`]: depth-first walk with enter/leave callbacks
//! - [`find_parent`]: nearest enclosing node matching a predicate
//!
//! Lexing and parsing happen elsewhere. A parser feeds tokens into an
//! [`ExprArena`], building nodes bottom-up, and freezes the result into an
//! [`ExprTree`]. Type checkers and untrusted-input checkers then read the
//! tree through [`NodeRef`] handles.
//!
//! # Design Philosophy
//!
//! - **Closed variants**: [`ExprKind`] is an enum; analyzers match on it
//!   exhaustively.
//! - **Flat storage**: children and parents are [`ExprId`] indices, never
//!   boxes or shared pointers, so the back-link to a parent owns nothing.
//! - **Immutable after build**: [`ExprTree`] has no mutating API and is
//!   `Send + Sync`.
//!
//! Floats are stored as u64 bits so every node type can derive `Eq` and
//! `Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod display;
mod error;
mod expr_id;
mod name;
mod node;
mod span;
#[cfg(test)]
mod test_helpers;
mod token;
mod traits;
pub mod visitor;

pub use arena::{ExprArena, ExprTree, SharedTree};
pub use ast::{CompareOpKind, Expr, ExprKind, LogicalOpKind, TokenSource};
pub use error::BuildError;
pub use expr_id::{ExprId, ExprRange, TokenId};
pub use name::{Name, NamePool};
pub use node::{
    Ancestors, ArrayDerefRef, Children, CompareOpRef, FuncCallRef, IndexAccessRef, LogicalOpRef,
    NodeRef, NotOpRef, ObjectDerefRef,
};
pub use span::{Position, Span};
pub use token::{Token, TokenKind};
pub use traits::Spanned;
pub use visitor::{find_parent, visit, walk, Visitor};
