//! Unit rendering (spec §4.10): derived units as `num / denom`, exponents
//! as Unicode superscripts, and the unit-to-number spacing rule.

use calc_catalog::Catalog;

use crate::settings::UnitDisplay;

const SUPERSCRIPT_DIGITS: [char; 10] = ['\u{2070}', '\u{b9}', '\u{b2}', '\u{b3}', '\u{2074}', '\u{2075}', '\u{2076}', '\u{2077}', '\u{2078}', '\u{2079}'];

fn superscript(n: i32) -> String {
    if n == 1 {
        return String::new();
    }
    let mut out = String::new();
    if n < 0 {
        out.push('\u{207b}');
    }
    for digit in n.unsigned_abs().to_string().chars() {
        let idx = digit.to_digit(10).unwrap() as usize;
        out.push(SUPERSCRIPT_DIGITS[idx]);
    }
    out
}

/// Splits a synthesized unit id like `meter^2\u{b7}second/second^2` into
/// its numerator terms (as written, each optionally carrying `^N`) and
/// denominator terms.
fn split_unit_id(unit_id: &str) -> (Vec<&str>, Vec<&str>) {
    let (num, den) = unit_id.split_once('/').unwrap_or((unit_id, ""));
    let numerator = if num.is_empty() { Vec::new() } else { num.split('\u{b7}').collect() };
    let denominator = if den.is_empty() { Vec::new() } else { den.split('\u{b7}').collect() };
    (numerator, denominator)
}

fn render_term(catalog: &dyn Catalog, term: &str, style: UnitDisplay) -> String {
    let (base, exponent) = match term.split_once('^') {
        Some((base, exp)) => (base, exp.parse::<i32>().unwrap_or(1)),
        None => (term, 1),
    };
    let name = catalog
        .unit_by_id(base)
        .map(|u| match style {
            UnitDisplay::Symbol => u.display_name.symbol.clone().unwrap_or_else(|| u.display_name.singular.clone()),
            UnitDisplay::Name => u.display_name.singular.clone(),
        })
        .unwrap_or_else(|| base.trim_start_matches("user:").to_string());
    format!("{name}{}", superscript(exponent))
}

/// Renders a unit id produced by `calc-eval::unit_resolve` for display,
/// e.g. `meter/second` → `m/s`, `meter^2` → `m²`.
pub fn render_unit(catalog: &dyn Catalog, unit_id: &str, style: UnitDisplay) -> String {
    if unit_id.is_empty() {
        return String::new();
    }
    let (numerator, denominator) = split_unit_id(unit_id);
    let num_str = numerator.iter().map(|t| render_term(catalog, t, style)).collect::<Vec<_>>().join("\u{b7}");
    if denominator.is_empty() {
        return num_str;
    }
    let den_str = denominator.iter().map(|t| render_term(catalog, t, style)).collect::<Vec<_>>().join("\u{b7}");
    if denominator.len() > 1 {
        format!("{num_str}/({den_str})")
    } else {
        format!("{num_str}/{den_str}")
    }
}

/// A single space between magnitude and unit iff the unit's first
/// character is a letter, otherwise no space (e.g. `5°` vs `5 m`).
pub fn magnitude_unit_separator(rendered_unit: &str) -> &'static str {
    match rendered_unit.chars().next() {
        Some(c) if c.is_alphabetic() => " ",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_catalog::BuiltinCatalog;

    #[test]
    fn simple_unit_renders_its_symbol() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(render_unit(&catalog, "meter", UnitDisplay::Symbol), "m");
    }

    #[test]
    fn squared_exponent_renders_as_superscript() {
        assert_eq!(superscript(2), "\u{b2}");
        assert_eq!(superscript(-1), "\u{207b}\u{b9}");
    }

    #[test]
    fn derived_unit_renders_numerator_over_denominator() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(render_unit(&catalog, "meter/second", UnitDisplay::Symbol), "m/s");
    }

    #[test]
    fn unrecognized_unit_falls_back_to_its_bare_name() {
        let catalog = BuiltinCatalog::new();
        assert_eq!(render_unit(&catalog, "user:widgets", UnitDisplay::Symbol), "widgets");
    }

    #[test]
    fn symbol_unit_has_no_leading_space() {
        assert_eq!(magnitude_unit_separator("°"), "");
        assert_eq!(magnitude_unit_separator("m"), " ");
    }
}
