//! Focused capability traits.

use super::{Span, Token};

/// Types that have a source location span.
pub trait Spanned {
    /// Get the source location span.
    fn span(&self) -> Span;
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
