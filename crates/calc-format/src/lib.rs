#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-format
//!
//! Renders a [`calc_value::Value`] to its final display string (spec
//! §4.10): numeric precision selection, decimal separator and digit
//! grouping, unit rendering, date/time templates, and the presentation
//! -format conversions a `Conversion` node may target.
//!
//! ```
//! use calc_catalog::BuiltinCatalog;
//! use calc_format::{format_value, FormatSettings};
//! use calc_value::calendar::PlainDate;
//! use calc_value::Value;
//!
//! let catalog = BuiltinCatalog::new();
//! let settings = FormatSettings::default();
//! let today = PlainDate::new(2024, 1, 1).unwrap();
//! let rendered = format_value(&Value::Number(2.5), &settings, &catalog, today).unwrap();
//! assert_eq!(rendered, "2.5");
//! ```

pub mod datetime;
pub mod error;
pub mod numeric;
pub mod presentation;
pub mod settings;
pub mod units;

pub use error::FormattingError;
pub use settings::FormatSettings;

use calc_catalog::Catalog;
use calc_value::calendar::PlainDate;
use calc_value::Value;

/// Renders any value to its display string, following the target named by
/// a `PresentationWrapped` value when present, or the plain-rendering
/// rules otherwise.
pub fn format_value(value: &Value, settings: &FormatSettings, catalog: &dyn Catalog, today: PlainDate) -> Result<String, FormattingError> {
    if let Value::PresentationWrapped { inner, format } = value {
        return presentation::render_presentation(inner, format, settings, today);
    }
    match value {
        Value::Number(n) => Ok(numeric::render_number(*n, settings)),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Quantity { magnitude, unit_id, dimension } => Ok(format_quantity(*magnitude, unit_id, dimension, settings, catalog)),
        Value::Currency { amount, code } => Ok(format_currency(*amount, code, settings, catalog)),
        Value::PlainDate(date) => Ok(datetime::render_date(*date, &settings.date_template)),
        Value::PlainTime(time) => Ok(datetime::render_time(*time, settings.time_format)),
        Value::PlainDateTime(dt) => Ok(datetime::render_datetime(*dt, settings)),
        Value::ZonedDateTime(zdt) => Ok(datetime::render_zoned(zdt, settings, today)),
        Value::Instant(nanos) => Ok(datetime::render_instant(nanos / 1_000_000, settings)),
        Value::Duration(duration) => Ok(format_duration(*duration, settings)),
        Value::Error(message) => Ok(format!("Error: {message}")),
        Value::PresentationWrapped { .. } => unreachable!("handled above"),
    }
}

fn format_quantity(magnitude: f64, unit_id: &str, dimension: &calc_value::dimension::Terms, settings: &FormatSettings, catalog: &dyn Catalog) -> String {
    // A quantity whose sole dimension term is a currency code formats under
    // the currency path even if it was never wrapped in `Value::Currency`
    // (e.g. produced by unit multiplication rather than a literal).
    if let [(dim_id, 1)] = dimension.as_slice() {
        if let Some(code) = dim_id.strip_prefix("currency_") {
            return format_currency(magnitude, code, settings, catalog);
        }
    }
    let rendered_unit = units::render_unit(catalog, unit_id, settings.unit_display);
    let number = numeric::render_number(magnitude, settings);
    let sep = units::magnitude_unit_separator(&rendered_unit);
    format!("{number}{sep}{rendered_unit}")
}

fn format_currency(amount: f64, code: &str, settings: &FormatSettings, catalog: &dyn Catalog) -> String {
    // An ambiguous symbol never resolved to an ISO code (spec §4.6) renders
    // under its bare symbol rather than its internal `currency_symbol_*` id.
    if let Some(symbol) = code.strip_prefix("currency_symbol_") {
        let number = numeric::render_currency_amount(amount, 2, settings);
        return format!("{number} {symbol}");
    }
    let minor_digits = catalog.currency_by_code(code).map(|c| c.minor_unit_digits).unwrap_or(2);
    let number = numeric::render_currency_amount(amount, minor_digits, settings);
    format!("{number} {code}")
}

fn format_duration(duration: calc_value::calendar::Duration, settings: &FormatSettings) -> String {
    let seconds = duration.as_seconds();
    format!("{} s", numeric::render_number(seconds, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_catalog::BuiltinCatalog;
    use calc_value::dimension;

    fn today() -> PlainDate {
        PlainDate::new(2024, 1, 1).unwrap()
    }

    #[test]
    fn formats_plain_number() {
        let catalog = BuiltinCatalog::new();
        let settings = FormatSettings::default();
        assert_eq!(format_value(&Value::Number(2.5), &settings, &catalog, today()).unwrap(), "2.5");
    }

    #[test]
    fn formats_quantity_with_symbol_unit() {
        let catalog = BuiltinCatalog::new();
        let settings = FormatSettings::default();
        let value = Value::Quantity { magnitude: 5000.0, unit_id: "meter".to_string(), dimension: dimension::single("length") };
        assert_eq!(format_value(&value, &settings, &catalog, today()).unwrap(), "5\u{202f}000 m");
    }

    #[test]
    fn formats_currency_with_minor_unit_precision() {
        let catalog = BuiltinCatalog::new();
        let settings = FormatSettings::default();
        let value = Value::Currency { amount: 9.5, code: "USD".to_string() };
        assert_eq!(format_value(&value, &settings, &catalog, today()).unwrap(), "9.50 USD");
    }

    #[test]
    fn formats_error_with_prefix() {
        let catalog = BuiltinCatalog::new();
        let settings = FormatSettings::default();
        let value = Value::Error("division by zero".to_string());
        assert_eq!(format_value(&value, &settings, &catalog, today()).unwrap(), "Error: division by zero");
    }
}
