//! Tree construction errors.
//!
//! A malformed expression is rejected by the parser before any node exists,
//! so the only failures left are producer bugs, such as reusing a subtree
//! or handing over a token with no source location. The arena rejects
//! these eagerly, which keeps the finished tree acyclic and every parent
//! link consistent. Walks over a finished tree cannot fail.

use crate::{ExprId, Position, TokenKind};

/// Invariant violation detected while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A child id that this arena never allocated.
    #[error("expression {id} does not belong to this arena")]
    UnknownExpr { id: ExprId },

    /// A subtree attached to a second parent.
    #[error("expression {child} is already a child of {parent}")]
    AlreadyAttached { child: ExprId, parent: ExprId },

    /// `finish` called on a node that is itself a child.
    #[error("expression {root} cannot be the root: its parent is {parent}")]
    RootHasParent { root: ExprId, parent: ExprId },

    /// A token with a zero line or column. Every node must report a real
    /// source location.
    #[error("{kind} token at {position} has no source location")]
    InvalidPosition { kind: TokenKind, position: Position },

    /// A non-root node that was never attached to a parent.
    #[error("expression {id} is not reachable from the root")]
    Detached { id: ExprId },

    /// An index space ran out of `u32`/`u16` room.
    #[error("too many {what}: {count} exceeds the limit of {max}")]
    CapacityExceeded {
        what: &'static str,
        count: usize,
        max: usize,
    },
}
