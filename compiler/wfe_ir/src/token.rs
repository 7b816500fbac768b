//! Tokens produced by the expression lexer.
//!
//! The lexer itself lives outside this crate. Tree construction consumes its
//! tokens: leaf nodes, `!` and function calls keep the token that starts them,
//! and every other node reports the token of a designated child.

use std::fmt;

use super::{Position, Span};

/// Lexical class of a token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// Unrecognized input.
    Unknown,
    /// End of the expression (`}}`).
    End,
    /// Identifier: `github`, `contains`, `null`, `true`.
    Ident,
    /// Single-quoted string literal.
    String,
    /// Integer literal, decimal or `0x` hex.
    Int,
    /// Float literal: `1.5`, `-2e3`.
    Float,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Not,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Eq,
    NotEq,
    And,
    Or,
    /// `*` in array dereference, `foo.*.bar`.
    Star,
    Comma,
}

impl TokenKind {
    /// Short description for messages, the symbol for punctuation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::End => "END",
            Self::Ident => "IDENT",
            Self::String => "STRING",
            Self::Int => "INTEGER",
            Self::Float => "FLOAT",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Dot => ".",
            Self::Not => "!",
            Self::Less => "<",
            Self::LessEq => "<=",
            Self::Greater => ">",
            Self::GreaterEq => ">=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Star => "*",
            Self::Comma => ",",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its literal text and location.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token, quotes and escapes untouched.
    pub value: String,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span, pos: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            span,
            pos,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}", self.kind, self.value, self.pos)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::TokenKind;
    crate::static_assert_size!(TokenKind, 1);
}
