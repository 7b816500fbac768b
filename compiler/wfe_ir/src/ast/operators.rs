//! Binary operator kinds.
//!
//! The expression language has no arithmetic: its only binary operators are
//! the six comparisons and the two short-circuiting logical operators.

use std::fmt;

use crate::TokenKind;

/// Comparison operators: `<`, `<=`, `>`, `>=`, `==`, `!=`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOpKind {
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
}

impl CompareOpKind {
    /// Source-level symbol, used in messages.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
        }
    }

    /// Binding strength, shared by all six comparisons.
    ///
    /// Higher number = lower precedence (binds less tightly):
    /// - 0: primaries and postfix (`.`, `.*`, `[]`, calls)
    /// - 1: `!`
    /// - 3: comparisons
    /// - 4: `&&`
    /// - 5: `||`
    pub const fn precedence(self) -> u8 {
        3
    }

    /// True for `==` and `!=`.
    ///
    /// Null-comparison lints only look at equality-class comparisons.
    pub const fn is_equality_op(self) -> bool {
        matches!(self, Self::Eq | Self::NotEq)
    }

    /// Operator kind for a comparison token, `None` for any other token.
    pub const fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Less => Some(Self::Less),
            TokenKind::LessEq => Some(Self::LessEq),
            TokenKind::Greater => Some(Self::Greater),
            TokenKind::GreaterEq => Some(Self::GreaterEq),
            TokenKind::Eq => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            _ => None,
        }
    }
}

impl fmt::Display for CompareOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Logical operators: `&&` and `||`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum LogicalOpKind {
    And,
    Or,
}

impl LogicalOpKind {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// See [`CompareOpKind::precedence`].
    pub const fn precedence(self) -> u8 {
        match self {
            Self::And => 4,
            Self::Or => 5,
        }
    }

    pub const fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(Self::And),
            TokenKind::Or => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for LogicalOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
