//! Source locations.
//!
//! Two complementary views of where a token sits:
//! - [`Span`]: byte offsets into the expression source, 8 bytes.
//! - [`Position`]: 1-based line and column, as reported to users.
//!
//! The lexer fills in both; this crate only stores and exposes them.

use std::fmt;

/// Byte range in the expression source.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from the start of the source
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line and column of a token.
///
/// Line and column are relative to the enclosing document, not to the
/// expression, so analyzers can report positions without re-mapping.
/// Zero in either field marks a token with no source location, which
/// [`ExprArena`](crate::ExprArena) refuses to store.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Whether this points at a real source location.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.line != 0 && self.column != 0
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Position, Span};
    crate::static_assert_size!(Span, 8);
    crate::static_assert_size!(Position, 8);
}
