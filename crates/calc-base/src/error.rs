//! Error types with source location tracking.
//!
//! `calc-base` sits below the lexer, parser, and resolver, so the one
//! error shape it defines is deliberately generic — a message plus the
//! [`Span`] it happened at. Tokenizing and grammar-parsing failures are
//! raised as a `SpannedError` directly; downstream crates (evaluator,
//! currency/unit conversion, formatter) define their own closed error
//! enums and only reach for this type at the syntax boundary.
//!
//! # Example
//!
//! ```
//! use calc_base::{SpannedError, Span, Result};
//!
//! fn parse_exponent(s: &str) -> Result<i32> {
//!     s.parse().map_err(|_| SpannedError::new(
//!         format!("`{}` is not a valid unit exponent", s),
//!         Span::new(0, s.len()),
//!     ))
//! }
//!
//! let err = parse_exponent("two").unwrap_err();
//! assert!(err.to_string().contains("not a valid unit exponent"));
//! ```

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location.
///
/// Implements [`std::error::Error`] and [`fmt::Display`]. The display format is:
/// `{message} at {start}..{end}`.
#[derive(Debug, Clone)]
pub struct SpannedError {
    /// Human-readable error description.
    pub message: String,
    /// Location in source where the error occurred.
    pub span: Span,
}

impl SpannedError {
    /// Creates an error with the given message and source location.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for SpannedError {}

/// Alias for `std::result::Result<T, SpannedError>`.
///
/// Used as the return type for the lexer's and parser's fallible,
/// span-carrying operations throughout this crate's callers.
pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_error_display_includes_message_and_byte_range() {
        let err = SpannedError::new("unrecognized unit `xyzzy`", Span::new(3, 8));
        let display = format!("{}", err);
        assert!(display.contains("unrecognized unit `xyzzy`"));
        assert!(display.contains("3..8"));
    }

    #[test]
    fn spanned_error_accepts_an_owned_or_borrowed_message() {
        let borrowed = SpannedError::new("bad token", Span::new(0, 1));
        let owned = SpannedError::new(String::from("bad token"), Span::new(0, 1));
        assert_eq!(borrowed.message, owned.message);
    }
}
