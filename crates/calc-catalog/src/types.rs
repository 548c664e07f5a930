//! Catalog data shapes: units, currencies, constants, and math functions.
//!
//! These are plain data — the catalog crate never computes with them, it
//! only looks them up. Dimension identifiers and unit ids are opaque
//! owned strings; the catalog is a single shared, long-lived instance,
//! so there's no scoped arena or interner to key against instead.

use std::fmt;

/// Display forms for a unit, used by the formatter's symbol/name style switch.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitName {
    pub singular: String,
    pub plural: String,
    /// Absent for units that are only ever spelled out (rare).
    pub symbol: Option<String>,
}

impl UnitName {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>, symbol: Option<&str>) -> Self {
        UnitName {
            singular: singular.into(),
            plural: plural.into(),
            symbol: symbol.map(str::to_string),
        }
    }
}

/// A catalog unit: a name within a dimension, convertible to that
/// dimension's canonical unit via `factor` and `offset`.
///
/// Conversion to the canonical unit is `canonical = value * factor + offset`
/// (see `calc-value::convert` for the full A→B formula this feeds).
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: String,
    pub dimension_id: String,
    pub display_name: UnitName,
    pub factor_to_canonical: f64,
    pub offset_to_canonical: f64,
}

impl Unit {
    pub fn simple(id: &str, dimension_id: &str, name: UnitName, factor: f64) -> Self {
        Unit {
            id: id.to_string(),
            dimension_id: dimension_id.to_string(),
            display_name: name,
            factor_to_canonical: factor,
            offset_to_canonical: 0.0,
        }
    }

    pub fn with_offset(id: &str, dimension_id: &str, name: UnitName, factor: f64, offset: f64) -> Self {
        Unit {
            id: id.to_string(),
            dimension_id: dimension_id.to_string(),
            display_name: name,
            factor_to_canonical: factor,
            offset_to_canonical: offset,
        }
    }

    /// An offset-bearing unit (e.g. Celsius, Fahrenheit) cannot legally
    /// appear in a derived (multi-term or non-unit-exponent) position; see
    /// spec §4.5.
    pub fn has_offset(&self) -> bool {
        self.offset_to_canonical != 0.0
    }
}

/// An ISO-4217-style currency. `minor_unit_digits` drives both default
/// display precision and the `AmbiguousCurrencyError` vs ordinary
/// conversion split (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub minor_unit_digits: u8,
}

/// Currency symbols whose meaning is context-dependent (`$`, `£`, `¥`, …).
///
/// `symbol_adjacent` lists symbols the tokenizer fuses directly onto a
/// following digit (`$5`); `symbol_spaced` lists symbols that additionally
/// appear with a space (`£ 5`, rare but catalog-declared). Both lists hold
/// the bare symbols themselves (`"$"`, not an ISO code or a dimension id) —
/// [`dimension::currency_symbol`] is what turns one into the dimension id a
/// value built from it actually carries.
#[derive(Debug, Clone, Default)]
pub struct AmbiguousCurrencies {
    pub symbol_adjacent: Vec<String>,
    pub symbol_spaced: Vec<String>,
}

/// A named mathematical constant with its accepted spellings.
#[derive(Debug, Clone)]
pub struct Constant {
    pub name: String,
    pub aliases: Vec<String>,
    pub value: f64,
}

/// A catalog math function: fixed arity is not enforced here, callers
/// validate argument count against [`MathFunction::arity`] before calling.
#[derive(Clone, Copy)]
pub struct MathFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub call: fn(&[f64]) -> Option<f64>,
}

impl fmt::Debug for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathFunction").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match *self {
            Arity::Exact(k) => n == k,
            Arity::Range(lo, hi) => n >= lo && n <= hi,
        }
    }
}

/// Canonical dimension ids for the builtin catalog's physical quantities.
/// Downstream crates match on these strings rather than re-deriving them.
pub mod dimension {
    pub const LENGTH: &str = "length";
    pub const MASS: &str = "mass";
    pub const TIME: &str = "time";
    pub const TEMPERATURE: &str = "temperature";
    pub const VOLUME: &str = "volume";
    pub const DATA: &str = "data";
    pub const ANGLE: &str = "angle";
    pub const DIMENSIONLESS: &str = "dimensionless";

    /// Dimension id for an unambiguous currency code, e.g. `currency_USD`.
    pub fn currency(code: &str) -> String {
        format!("currency_{code}")
    }

    /// Dimension id for an ambiguous currency symbol, e.g. `currency_symbol_$`.
    pub fn currency_symbol(symbol: &str) -> String {
        format!("currency_symbol_{symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_exact_accepts_only_matching_count() {
        let a = Arity::Exact(2);
        assert!(a.accepts(2));
        assert!(!a.accepts(1));
    }

    #[test]
    fn arity_range_accepts_inclusive_bounds() {
        let a = Arity::Range(1, 2);
        assert!(a.accepts(1));
        assert!(a.accepts(2));
        assert!(!a.accepts(3));
    }

    #[test]
    fn offset_bearing_unit_is_detected() {
        let celsius = Unit::with_offset("celsius", dimension::TEMPERATURE, UnitName::new("celsius", "celsius", Some("°C")), 1.0, 273.15);
        assert!(celsius.has_offset());
        let meter = Unit::simple("meter", dimension::LENGTH, UnitName::new("meter", "meters", Some("m")), 1.0);
        assert!(!meter.has_offset());
    }

    #[test]
    fn currency_dimension_ids_are_namespaced() {
        assert_eq!(dimension::currency("USD"), "currency_USD");
        assert_eq!(dimension::currency_symbol("$"), "currency_symbol_$");
    }
}
