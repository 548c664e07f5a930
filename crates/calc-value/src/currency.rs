//! Currency converter (spec §4.6): cross-rate conversion through a base
//! currency. An ambiguous currency symbol (`$`, `£`, `¥`, …) never resolves
//! to one of the codes it could denote — it keeps its own dimension id
//! (`currency_symbol_<sym>`, see [`calc_catalog::types::dimension::currency_symbol`])
//! for its whole lifetime, so same-symbol arithmetic type-checks like any
//! other currency while every conversion attempt involving it is rejected
//! outright.

use std::collections::HashMap;

use crate::error::{AmbiguousCurrencyError, CurrencyError};

/// An immutable snapshot of exchange rates relative to `base`, published
/// atomically by the orchestrator (spec §5, §6.4). Rates are read-only once
/// built; callers swap in a whole new snapshot rather than mutating rates
/// in place.
#[derive(Debug, Clone)]
pub struct ExchangeRates {
    pub base: String,
    /// Units of `code` per one unit of `base`.
    pub rates: HashMap<String, f64>,
}

impl ExchangeRates {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let mut rates = HashMap::new();
        rates.insert(base.clone(), 1.0);
        ExchangeRates { base, rates }
    }

    pub fn with_rate(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(code.into(), rate);
        self
    }

    fn rate_for(&self, code: &str) -> Result<f64, CurrencyError> {
        self.rates.get(code).copied().ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }
}

/// Converts `amount` of `from` into `to` by passing through the snapshot's
/// base currency: `to_amount = amount / rate(from) * rate(to)`.
pub fn convert(amount: f64, from: &str, to: &str, rates: &ExchangeRates) -> Result<f64, CurrencyError> {
    if from == to {
        return Ok(amount);
    }
    let from_rate = rates.rate_for(from)?;
    let to_rate = rates.rate_for(to)?;
    if from_rate == 0.0 {
        return Err(CurrencyError::MissingExchangeRate { from: from.to_string(), to: to.to_string() });
    }
    Ok(amount / from_rate * to_rate)
}

/// True for the dimension/code string an ambiguous currency symbol carries
/// as its [`calc_value::Value::Currency`] `code` (spec §4.6), as opposed to
/// an ordinary ISO-4217-style code such as `USD`.
pub fn is_ambiguous_code(code: &str) -> bool {
    code.starts_with("currency_symbol_")
}

/// Builds the unconditional rejection for any conversion or cross-symbol
/// arithmetic that touches an ambiguous currency code (spec §4.6: these
/// never disambiguate by context, only same-symbol arithmetic type-checks).
pub fn ambiguous_error(code_a: &str, code_b: &str) -> CurrencyError {
    let ambiguous = if is_ambiguous_code(code_a) { code_a } else { code_b };
    let symbol = ambiguous.strip_prefix("currency_symbol_").unwrap_or(ambiguous);
    CurrencyError::AmbiguousSymbol(AmbiguousCurrencyError { symbol: symbol.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> ExchangeRates {
        ExchangeRates::new("USD").with_rate("EUR", 0.92).with_rate("GBP", 0.79)
    }

    #[test]
    fn converts_through_base_currency() {
        let result = convert(100.0, "EUR", "GBP", &rates()).unwrap();
        assert!((result - 100.0 / 0.92 * 0.79).abs() < 1e-9);
    }

    #[test]
    fn same_currency_is_identity() {
        assert_eq!(convert(42.0, "USD", "USD", &rates()).unwrap(), 42.0);
    }

    #[test]
    fn unknown_currency_errors() {
        assert!(convert(1.0, "ZZZ", "USD", &rates()).is_err());
    }

    #[test]
    fn ambiguous_currency_code_is_recognized_by_its_dimension_prefix() {
        assert!(is_ambiguous_code("currency_symbol_$"));
        assert!(!is_ambiguous_code("USD"));
    }

    #[test]
    fn ambiguous_error_names_the_bare_symbol() {
        let err = ambiguous_error("currency_symbol_$", "USD");
        assert_eq!(err.to_string(), "`$` is an ambiguous currency symbol and cannot be converted");
    }
}
