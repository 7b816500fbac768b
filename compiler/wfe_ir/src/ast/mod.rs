//! Expression syntax tree node types.
//!
//! - [`operators`]: comparison and logical operator kinds
//! - [`expr`]: the node record and its closed set of variants
//!
//! Child links are [`ExprId`](crate::ExprId) indices, strings are
//! [`Name`](crate::Name) handles, so every node is a small `Copy` value.

mod expr;
mod operators;

pub use expr::{Expr, ExprKind, TokenSource};
pub use operators::{CompareOpKind, LogicalOpKind};
