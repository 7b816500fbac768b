//! Expression nodes.
//!
//! # Design Notes
//! - The variant set is closed. Analyzers `match` on [`ExprKind`] and the
//!   compiler flags every site that misses a new variant.
//! - Children are `ExprId` indices into the owning tree; a node never owns
//!   its parent and never points at it with anything but an index.
//! - Floats are stored as bits so `ExprKind` can derive `Eq` and `Hash`.

use std::fmt;

use super::operators::{CompareOpKind, LogicalOpKind};
use crate::{ExprId, ExprRange, Name, TokenId};

/// A node record: its variant plus the back-link to the enclosing node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    /// `ExprId::INVALID` until the node is attached as a child.
    pub(crate) parent: ExprId,
}

impl Expr {
    pub(crate) fn new(kind: ExprKind) -> Self {
        Expr {
            kind,
            parent: ExprId::INVALID,
        }
    }

    /// Enclosing node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<ExprId> {
        self.parent.to_option()
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ^ {:?}", self.kind, self.parent)
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Context or variable access: `github`, `env`, `matrix`
    Variable { name: Name, token: TokenId },

    /// `null`
    Null { token: TokenId },

    /// `true`, `false`
    Bool { value: bool, token: TokenId },

    /// Integer literal: `42`, `0xff`, `-1`
    Int { value: i64, token: TokenId },

    /// Float literal: `1.5`, `-2.0e3` (stored as bits for Hash)
    Float { bits: u64, token: TokenId },

    /// String literal, quotes stripped and `''` escapes resolved
    String { value: Name, token: TokenId },

    /// Property dereference: `receiver.property`
    ObjectDeref { receiver: ExprId, property: Name },

    /// Array element dereference: `receiver.*`
    ArrayDeref { receiver: ExprId },

    /// Index access: `operand[index]`
    IndexAccess { operand: ExprId, index: ExprId },

    /// `!operand`, token is the `!`
    NotOp { operand: ExprId, token: TokenId },

    /// `left <op> right` with a comparison operator
    CompareOp {
        kind: CompareOpKind,
        left: ExprId,
        right: ExprId,
    },

    /// `left && right`, `left || right`
    LogicalOp {
        kind: LogicalOpKind,
        left: ExprId,
        right: ExprId,
    },

    /// Builtin function call: `callee(args...)`, token is the callee name
    FuncCall {
        callee: Name,
        args: ExprRange,
        token: TokenId,
    },
}

/// Result of [`ExprKind::token_source`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenSource {
    /// Stored on the node itself.
    Own(TokenId),
    /// Reported by this child.
    Child(ExprId),
}

impl ExprKind {
    /// Where this node's first token comes from.
    ///
    /// Nodes without a token of their own delegate to the receiver, operand
    /// or left operand.
    #[inline]
    pub const fn token_source(&self) -> TokenSource {
        match *self {
            Self::Variable { token, .. }
            | Self::Null { token }
            | Self::Bool { token, .. }
            | Self::Int { token, .. }
            | Self::Float { token, .. }
            | Self::String { token, .. }
            | Self::NotOp { token, .. }
            | Self::FuncCall { token, .. } => TokenSource::Own(token),
            Self::ObjectDeref { receiver, .. } | Self::ArrayDeref { receiver } => {
                TokenSource::Child(receiver)
            }
            Self::IndexAccess { operand, .. } => TokenSource::Child(operand),
            Self::CompareOp { left, .. } | Self::LogicalOp { left, .. } => TokenSource::Child(left),
        }
    }

    /// Float literal value.
    #[inline]
    pub fn float_value(&self) -> Option<f64> {
        match *self {
            Self::Float { bits, .. } => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// Null, bool, int, float or string literal.
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Null { .. }
                | Self::Bool { .. }
                | Self::Int { .. }
                | Self::Float { .. }
                | Self::String { .. }
        )
    }

    /// No child nodes.
    pub const fn is_leaf(&self) -> bool {
        self.is_literal() || matches!(self, Self::Variable { .. })
    }

    /// Binding strength of the node's outermost operator, lower binds
    /// tighter. See [`CompareOpKind::precedence`].
    pub const fn precedence(&self) -> u8 {
        match *self {
            Self::NotOp { .. } => 1,
            Self::CompareOp { kind, .. } => kind.precedence(),
            Self::LogicalOp { kind, .. } => kind.precedence(),
            _ => 0,
        }
    }

    /// Short label for messages: "index access", "function call", ...
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Variable { .. } => "variable",
            Self::Null { .. } => "null",
            Self::Bool { .. } => "boolean",
            Self::Int { .. } => "integer",
            Self::Float { .. } => "float",
            Self::String { .. } => "string",
            Self::ObjectDeref { .. } => "object property dereference",
            Self::ArrayDeref { .. } => "array elements dereference",
            Self::IndexAccess { .. } => "index access",
            Self::NotOp { .. } => "! operator",
            Self::CompareOp { .. } => "comparison",
            Self::LogicalOp { .. } => "logical operator",
            Self::FuncCall { .. } => "function call",
        }
    }
}
