//! The runtime value model (spec §3.1): every expression evaluates to
//! exactly one [`Value`] variant. Values are plain data — arithmetic,
//! conversion, and comparison live in [`crate::dimension`], [`crate::unit`],
//! [`crate::currency`], and `calc-eval`'s evaluator, never as `Value`
//! methods, so this module stays a pure description of "what a result
//! looks like" rather than "how to compute one".
//!
//! ## Invariants
//!
//! 1. A [`Value::Quantity`]'s `magnitude` is always expressed in its
//!    dimension's canonical unit; `unit_id` is retained only as a display
//!    hint for the formatter and is never re-read to interpret `magnitude`.
//!    `dimension` is always [`dimension::normalize`]d; no caller constructs
//!    one with un-merged or zero-exponent terms.
//! 2. A bare [`Value::Number`] is dimensionless; a quantity that reduces to
//!    dimensionless (e.g. `10 m / 5 m`) becomes `Number`, never a
//!    `Quantity` with empty `dimension`.
//! 3. [`Value::Currency`] amounts are never rounded to `minor_unit_digits`
//!    internally; rounding is a formatting concern applied on display.
//! 4. [`Value::Duration`] is signed; `Value::Instant` and the plain
//!    date/time variants are not.
//! 5. [`Value::Error`] never appears nested inside another variant — an
//!    operation over an `Error` operand short-circuits to `Error`, it does
//!    not wrap it.

use crate::calendar::{Duration, PlainDate, PlainDateTime, PlainTime, ZonedDateTime};
use crate::dimension::Terms;
use crate::format_spec::PresentationFormat;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Quantity { magnitude: f64, unit_id: String, dimension: Terms },
    Currency { amount: f64, code: String },
    Boolean(bool),
    PlainDate(PlainDate),
    PlainTime(PlainTime),
    PlainDateTime(PlainDateTime),
    ZonedDateTime(ZonedDateTime),
    Instant(i64),
    Duration(Duration),
    PresentationWrapped { inner: Box<Value>, format: PresentationFormat },
    Error(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Quantity { .. } => "quantity",
            Value::Currency { .. } => "currency",
            Value::Boolean(_) => "boolean",
            Value::PlainDate(_) => "date",
            Value::PlainTime(_) => "time",
            Value::PlainDateTime(_) => "datetime",
            Value::ZonedDateTime(_) => "zoned datetime",
            Value::Instant(_) => "instant",
            Value::Duration(_) => "duration",
            Value::PresentationWrapped { .. } => "formatted value",
            Value::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Strips presentation wrapping to get at the underlying numeric/value
    /// content, as evaluation (not formatting) needs to.
    pub fn unwrap_presentation(&self) -> &Value {
        match self {
            Value::PresentationWrapped { inner, .. } => inner.unwrap_presentation(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension;

    #[test]
    fn type_name_is_distinct_per_variant() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::Boolean(true).type_name(), "boolean");
        assert_eq!(Value::Error("x".into()).type_name(), "error");
    }

    #[test]
    fn unwrap_presentation_reaches_through_nesting() {
        let wrapped = Value::PresentationWrapped {
            inner: Box::new(Value::PresentationWrapped { inner: Box::new(Value::Number(5.0)), format: PresentationFormat::Percentage }),
            format: PresentationFormat::Fraction,
        };
        assert_eq!(wrapped.unwrap_presentation(), &Value::Number(5.0));
    }

    #[test]
    fn quantity_carries_normalized_dimension() {
        let q = Value::Quantity { magnitude: 5.0, unit_id: "meter".into(), dimension: dimension::single("length") };
        assert!(matches!(q, Value::Quantity { dimension, .. } if dimension == vec![("length".to_string(), 1)]));
    }
}
