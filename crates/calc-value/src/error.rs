//! Closed error taxonomy for the value model (spec §7). Each enum is
//! exhaustively matched by callers; none of them implement `From` into one
//! another; aggregation into a single line-level error happens one layer up
//! in `calc-eval`.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    IncompatibleDimensions { left: String, right: String },
    DivisionByZero,
    Currency(CurrencyError),
    DateTime(DateTimeError),
    UndefinedVariable(String),
    UndefinedFunction(String),
    WrongArgumentCount { function: String, expected: String, got: usize },
    DomainError { function: String, detail: String },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::IncompatibleDimensions { left, right } => {
                write!(f, "incompatible dimensions: `{left}` and `{right}`")
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::Currency(e) => write!(f, "{e}"),
            RuntimeError::DateTime(e) => write!(f, "{e}"),
            RuntimeError::UndefinedVariable(name) => write!(f, "undefined variable `{name}`"),
            RuntimeError::UndefinedFunction(name) => write!(f, "undefined function `{name}`"),
            RuntimeError::WrongArgumentCount { function, expected, got } => {
                write!(f, "`{function}` expects {expected} argument(s), got {got}")
            }
            RuntimeError::DomainError { function, detail } => write!(f, "`{function}`: {detail}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyError {
    UnknownCurrency(String),
    MissingExchangeRate { from: String, to: String },
    AmbiguousSymbol(AmbiguousCurrencyError),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCurrency(code) => write!(f, "unknown currency `{code}`"),
            CurrencyError::MissingExchangeRate { from, to } => {
                write!(f, "no exchange rate from `{from}` to `{to}`")
            }
            CurrencyError::AmbiguousSymbol(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CurrencyError {}

/// A currency symbol (`$`, `£`, `¥`) that never disambiguates to a single
/// ISO code by context; any arithmetic or conversion that would require
/// knowing which currency it denotes is rejected (spec §4.6). Same-symbol
/// arithmetic is unaffected — it never needs to resolve the symbol at all.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbiguousCurrencyError {
    pub symbol: String,
}

impl fmt::Display for AmbiguousCurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is an ambiguous currency symbol and cannot be converted", self.symbol)
    }
}

impl std::error::Error for AmbiguousCurrencyError {}

#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeError {
    InvalidDate { year: i32, month: u32, day: u32 },
    InvalidTime { hour: u32, minute: u32, second: u32 },
    UnknownTimeZone(String),
    IncompatibleOperands { left: &'static str, right: &'static str },
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate { year, month, day } => write!(f, "invalid date {year:04}-{month:02}-{day:02}"),
            DateTimeError::InvalidTime { hour, minute, second } => write!(f, "invalid time {hour:02}:{minute:02}:{second:02}"),
            DateTimeError::UnknownTimeZone(name) => write!(f, "unknown time zone `{name}`"),
            DateTimeError::IncompatibleOperands { left, right } => write!(f, "cannot combine {left} with {right}"),
        }
    }
}

impl std::error::Error for DateTimeError {}
