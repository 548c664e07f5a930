//! Formatter error taxonomy (spec §7): the `FormattingError` member of the
//! closed error kind set.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormattingError {
    UnsupportedTarget { target: &'static str, value: &'static str },
    InvalidMetadata(String),
}

impl fmt::Display for FormattingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattingError::UnsupportedTarget { target, value } => write!(f, "`{target}` is not defined for {value}"),
            FormattingError::InvalidMetadata(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FormattingError {}
