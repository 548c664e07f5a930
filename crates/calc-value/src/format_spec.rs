//! The value-layer mirror of `calc_lang::ast::PresentationFormat` (spec
//! §4.10). Kept as a separate type, rather than a shared dependency on
//! `calc-lang`, so the value model has no syntax-layer dependency: the
//! evaluator translates one into the other when it builds a
//! [`crate::Value::PresentationWrapped`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationFormat {
    Base(u32),
    Fraction,
    Scientific(Option<u32>),
    Percentage,
    Ordinal,
    Iso8601,
    Rfc9557,
    Rfc2822,
    Unix,
    UnixMillis,
    SigFigs(u32),
    Decimals(u32),
}
