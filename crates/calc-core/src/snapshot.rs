//! Exchange-rate snapshot format (spec §6.4): `{date, base, rates}`, loaded
//! via `load_exchange_rates` and published as an immutable
//! [`calc_value::currency::ExchangeRates`] the evaluator borrows for the
//! lifetime of one `calculate` call (spec §9: copy-on-write publish).

use std::collections::HashMap;

use calc_value::currency::ExchangeRates;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExchangeRateSnapshot {
    /// ISO date the rates were published for; not consulted by conversion
    /// itself, carried through for the caller's provenance.
    pub date: String,
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl ExchangeRateSnapshot {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn into_exchange_rates(self) -> ExchangeRates {
        let mut rates = ExchangeRates::new(self.base);
        for (code, rate) in self.rates {
            rates = rates.with_rate(code, rate);
        }
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_snapshot_document() {
        let json = r#"{"date":"2024-01-01","base":"USD","rates":{"EUR":0.85,"GBP":0.77}}"#;
        let snapshot = ExchangeRateSnapshot::parse(json).unwrap();
        assert_eq!(snapshot.base, "USD");
        assert_eq!(snapshot.rates.get("EUR"), Some(&0.85));
    }

    #[test]
    fn base_entry_is_implicit_one_after_conversion() {
        let snapshot = ExchangeRateSnapshot { date: "2024-01-01".to_string(), base: "USD".to_string(), rates: HashMap::from([("EUR".to_string(), 0.85)]) };
        let rates = snapshot.into_exchange_rates();
        assert_eq!(rates.rates.get("USD"), Some(&1.0));
    }
}
