//! An in-memory [`Catalog`] implementation over a representative slab of
//! SI + imperial units, the currencies named in spec §8, the ambiguous
//! symbols named in spec §4.4, and the constant/function tables the
//! evaluator dispatches against (spec §4.8).
//!
//! This is intentionally not an exhaustive registry — the trait in
//! [`crate::catalog`] is the contract; this is one small conforming
//! dataset sufficient to drive the end-to-end scenarios in spec §8.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::types::{dimension, AmbiguousCurrencies, Arity, Constant, Currency, MathFunction, Unit, UnitName};

pub struct BuiltinCatalog {
    units_by_id: HashMap<String, Unit>,
    name_index: HashMap<String, String>,
    currencies: HashMap<String, Currency>,
    ambiguous: AmbiguousCurrencies,
    timezones: HashMap<String, String>,
    constants: Vec<Constant>,
    functions: HashMap<&'static str, MathFunction>,
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut cat = BuiltinCatalog {
            units_by_id: HashMap::new(),
            name_index: HashMap::new(),
            currencies: HashMap::new(),
            ambiguous: AmbiguousCurrencies::default(),
            timezones: HashMap::new(),
            constants: Vec::new(),
            functions: HashMap::new(),
        };
        cat.install_units();
        cat.install_currencies();
        cat.install_timezones();
        cat.install_constants();
        cat.install_functions();
        cat
    }

    fn add_unit(&mut self, unit: Unit) {
        self.index_name(&unit.display_name.singular, &unit.id);
        self.index_name(&unit.display_name.plural, &unit.id);
        if let Some(sym) = &unit.display_name.symbol {
            self.index_name(sym, &unit.id);
        }
        self.units_by_id.insert(unit.id.clone(), unit);
    }

    fn index_name(&mut self, name: &str, id: &str) {
        self.name_index.entry(name.to_string()).or_insert_with(|| id.to_string());
        self.name_index.entry(name.to_lowercase()).or_insert_with(|| id.to_string());
    }

    fn install_units(&mut self) {
        use dimension::*;

        // Length, canonical = meter.
        self.add_unit(Unit::simple("meter", LENGTH, UnitName::new("meter", "meters", Some("m")), 1.0));
        self.add_unit(Unit::simple("kilometer", LENGTH, UnitName::new("kilometer", "kilometers", Some("km")), 1_000.0));
        self.add_unit(Unit::simple("centimeter", LENGTH, UnitName::new("centimeter", "centimeters", Some("cm")), 0.01));
        self.add_unit(Unit::simple("millimeter", LENGTH, UnitName::new("millimeter", "millimeters", Some("mm")), 0.001));
        self.add_unit(Unit::simple("inch", LENGTH, UnitName::new("inch", "inches", Some("in")), 0.0254));
        self.add_unit(Unit::simple("foot", LENGTH, UnitName::new("foot", "feet", Some("ft")), 0.3048));
        self.add_unit(Unit::simple("yard", LENGTH, UnitName::new("yard", "yards", Some("yd")), 0.9144));
        self.add_unit(Unit::simple("mile", LENGTH, UnitName::new("mile", "miles", Some("mi")), 1_609.344));

        // Mass, canonical = kilogram.
        self.add_unit(Unit::simple("kilogram", MASS, UnitName::new("kilogram", "kilograms", Some("kg")), 1.0));
        self.add_unit(Unit::simple("gram", MASS, UnitName::new("gram", "grams", Some("g")), 0.001));
        self.add_unit(Unit::simple("pound", MASS, UnitName::new("pound", "pounds", Some("lb")), 0.453_592_37));
        self.add_unit(Unit::simple("ounce", MASS, UnitName::new("ounce", "ounces", Some("oz")), 0.028_349_523_125));

        // Time, canonical = second.
        self.add_unit(Unit::simple("second", TIME, UnitName::new("second", "seconds", Some("s")), 1.0));
        self.add_unit(Unit::simple("minute", TIME, UnitName::new("minute", "minutes", Some("min")), 60.0));
        self.add_unit(Unit::simple("hour", TIME, UnitName::new("hour", "hours", Some("h")), 3_600.0));
        self.add_unit(Unit::simple("day", TIME, UnitName::new("day", "days", Some("d")), 86_400.0));
        self.add_unit(Unit::simple("week", TIME, UnitName::new("week", "weeks", Some("wk")), 604_800.0));

        // Temperature, canonical = kelvin. Offset-bearing units can never
        // validly appear in a derived position (spec §4.5).
        self.add_unit(Unit::simple("kelvin", TEMPERATURE, UnitName::new("kelvin", "kelvin", Some("K")), 1.0));
        self.add_unit(Unit::with_offset("celsius", TEMPERATURE, UnitName::new("celsius", "celsius", Some("°C")), 1.0, 273.15));
        self.add_unit(Unit::with_offset("fahrenheit", TEMPERATURE, UnitName::new("fahrenheit", "fahrenheit", Some("°F")), 5.0 / 9.0, 255.372_222_222_222_2));

        // Volume, canonical = liter.
        self.add_unit(Unit::simple("liter", VOLUME, UnitName::new("liter", "liters", Some("L")), 1.0));
        self.add_unit(Unit::simple("milliliter", VOLUME, UnitName::new("milliliter", "milliliters", Some("mL")), 0.001));
        self.add_unit(Unit::simple("gallon", VOLUME, UnitName::new("gallon", "gallons", Some("gal")), 3.785_411_784));

        // Data, canonical = byte.
        self.add_unit(Unit::simple("byte", DATA, UnitName::new("byte", "bytes", Some("B")), 1.0));
        self.add_unit(Unit::simple("kilobyte", DATA, UnitName::new("kilobyte", "kilobytes", Some("KB")), 1_000.0));
        self.add_unit(Unit::simple("megabyte", DATA, UnitName::new("megabyte", "megabytes", Some("MB")), 1_000_000.0));
        self.add_unit(Unit::simple("gigabyte", DATA, UnitName::new("gigabyte", "gigabytes", Some("GB")), 1_000_000_000.0));

        // Angle, canonical = radian.
        self.add_unit(Unit::simple("radian", ANGLE, UnitName::new("radian", "radians", Some("rad")), 1.0));
        self.add_unit(Unit::simple("degree", ANGLE, UnitName::new("degree", "degrees", Some("°")), std::f64::consts::PI / 180.0));
    }

    fn install_currencies(&mut self) {
        let table: &[(&str, u8)] = &[
            ("USD", 2), ("EUR", 2), ("GBP", 2), ("JPY", 0), ("KRW", 0),
            ("KWD", 3), ("VND", 0), ("CHF", 2), ("CNY", 2), ("CAD", 2),
        ];
        for (code, digits) in table {
            self.currencies.insert((*code).to_string(), Currency { minor_unit_digits: *digits });
        }
        self.ambiguous = AmbiguousCurrencies {
            symbol_adjacent: vec!["$".to_string(), "£".to_string(), "¥".to_string()],
            symbol_spaced: vec!["$".to_string()],
        };
    }

    fn install_timezones(&mut self) {
        let table: &[(&str, &str)] = &[
            ("UTC", "UTC"),
            ("America/New_York", "America/New_York"),
            ("America/Los_Angeles", "America/Los_Angeles"),
            ("Europe/London", "Europe/London"),
            ("Europe/Paris", "Europe/Paris"),
            ("Asia/Tokyo", "Asia/Tokyo"),
            ("Asia/Seoul", "Asia/Seoul"),
            // city / abbreviation aliases
            ("New York", "America/New_York"),
            ("NYC", "America/New_York"),
            ("EST", "America/New_York"),
            ("London", "Europe/London"),
            ("GMT", "UTC"),
            ("Tokyo", "Asia/Tokyo"),
            ("JST", "Asia/Tokyo"),
        ];
        for (alias, iana) in table {
            self.timezones.insert(alias.to_string(), iana.to_string());
            self.timezones.insert(alias.to_lowercase(), iana.to_string());
        }
    }

    fn install_constants(&mut self) {
        self.constants.push(Constant { name: "pi".into(), aliases: vec!["π".into()], value: std::f64::consts::PI });
        self.constants.push(Constant { name: "e".into(), aliases: vec![], value: std::f64::consts::E });
        self.constants.push(Constant { name: "phi".into(), aliases: vec!["φ".into()], value: 1.618_033_988_749_895 });
        self.constants.push(Constant { name: "tau".into(), aliases: vec!["τ".into()], value: std::f64::consts::TAU });
        self.constants.push(Constant { name: "infinity".into(), aliases: vec!["∞".into()], value: f64::INFINITY });
    }

    fn install_functions(&mut self) {
        macro_rules! unary {
            ($name:literal, $f:expr) => {
                self.functions.insert($name, MathFunction { name: $name, arity: Arity::Exact(1), call: $f });
            };
        }
        macro_rules! binary {
            ($name:literal, $f:expr) => {
                self.functions.insert($name, MathFunction { name: $name, arity: Arity::Exact(2), call: $f });
            };
        }

        unary!("sin", |a| Some(a[0].sin()));
        unary!("cos", |a| Some(a[0].cos()));
        unary!("tan", |a| Some(a[0].tan()));
        unary!("asin", |a| Some(a[0].asin()));
        unary!("acos", |a| Some(a[0].acos()));
        unary!("atan", |a| Some(a[0].atan()));
        unary!("sqrt", |a| Some(a[0].sqrt()));
        unary!("cbrt", |a| Some(a[0].cbrt()));
        unary!("abs", |a| Some(a[0].abs()));
        unary!("round", |a| Some(a[0].round()));
        unary!("floor", |a| Some(a[0].floor()));
        unary!("ceil", |a| Some(a[0].ceil()));
        unary!("trunc", |a| Some(a[0].trunc()));
        unary!("frac", |a| Some(a[0].fract()));
        unary!("ln", |a| Some(a[0].ln()));
        unary!("log10", |a| Some(a[0].log10()));
        unary!("log2", |a| Some(a[0].log2()));
        unary!("exp", |a| Some(a[0].exp()));
        binary!("atan2", |a| Some(a[0].atan2(a[1])));
        binary!("pow", |a| Some(a[0].powf(a[1])));
        binary!("min", |a| Some(a[0].min(a[1])));
        binary!("max", |a| Some(a[0].max(a[1])));
    }
}

impl Catalog for BuiltinCatalog {
    fn unit_by_id(&self, id: &str) -> Option<&Unit> {
        self.units_by_id.get(id)
    }

    fn unit_by_name(&self, name: &str) -> Option<&Unit> {
        self.name_index
            .get(name)
            .or_else(|| self.name_index.get(&name.to_lowercase()))
            .and_then(|id| self.units_by_id.get(id))
    }

    fn currency_by_code(&self, code: &str) -> Option<&Currency> {
        self.currencies.get(code)
    }

    fn all_ambiguous_currencies(&self) -> &AmbiguousCurrencies {
        &self.ambiguous
    }

    fn resolve_timezone(&self, name: &str) -> Option<&str> {
        self.timezones.get(name).or_else(|| self.timezones.get(&name.to_lowercase())).map(String::as_str)
    }

    fn constants(&self) -> &[Constant] {
        &self.constants
    }

    fn math_function(&self, name: &str) -> Option<MathFunction> {
        self.functions.get(name.to_lowercase().as_str()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_unit_by_symbol_and_name() {
        let cat = BuiltinCatalog::new();
        assert_eq!(cat.unit_by_name("km").unwrap().id, "kilometer");
        assert_eq!(cat.unit_by_name("kilometers").unwrap().id, "kilometer");
        assert_eq!(cat.unit_by_name("Meter").unwrap().id, "meter");
    }

    #[test]
    fn currency_minor_units_match_spec_examples() {
        let cat = BuiltinCatalog::new();
        assert_eq!(cat.currency_by_code("JPY").unwrap().minor_unit_digits, 0);
        assert_eq!(cat.currency_by_code("KWD").unwrap().minor_unit_digits, 3);
        assert_eq!(cat.currency_by_code("USD").unwrap().minor_unit_digits, 2);
    }

    #[test]
    fn dollar_sign_is_ambiguous() {
        let cat = BuiltinCatalog::new();
        assert!(cat.is_ambiguous_currency_symbol("$"));
        assert!(!cat.is_ambiguous_currency_symbol("USD"));
    }

    #[test]
    fn timezone_aliases_resolve_to_iana_ids() {
        let cat = BuiltinCatalog::new();
        assert_eq!(cat.resolve_timezone("NYC"), Some("America/New_York"));
        assert_eq!(cat.resolve_timezone("America/New_York"), Some("America/New_York"));
    }

    #[test]
    fn math_function_dispatch_round_trips() {
        let cat = BuiltinCatalog::new();
        let sqrt = cat.math_function("sqrt").unwrap();
        assert_eq!((sqrt.call)(&[4.0]), Some(2.0));
        assert!(sqrt.arity.accepts(1));
        assert!(!sqrt.arity.accepts(2));
    }
}
