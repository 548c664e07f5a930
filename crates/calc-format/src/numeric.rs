//! Numeric rendering (spec §4.10): precision selection, then
//! decimal-separator substitution and digit grouping applied to the
//! mantissa only.

use crate::settings::{FormatSettings, Precision};

/// `{mode, count}` precision overriding the settings' default, as named at
/// a conversion site (`round to 2 decimals`, `3 sigfigs`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionOverride {
    Decimals(u32),
    SigFigs(u32),
}

/// Renders a plain (unitless, non-currency) number under the auto/fixed
/// precision rules, decimal separator, and digit grouping.
pub fn render_number(value: f64, settings: &FormatSettings) -> String {
    render_with_precision(value, settings, None)
}

/// Renders a number that carries exactly one positive-exponent currency
/// term: auto precision defers to the currency's minor-unit digit count.
pub fn render_currency_amount(value: f64, minor_unit_digits: u8, settings: &FormatSettings) -> String {
    match settings.precision {
        Precision::Auto => render_fixed(value, minor_unit_digits as u32, settings),
        _ => render_with_precision(value, settings, None),
    }
}

pub fn render_with_precision(value: f64, settings: &FormatSettings, override_precision: Option<PrecisionOverride>) -> String {
    match override_precision {
        Some(PrecisionOverride::Decimals(n)) => render_fixed(value, n, settings),
        Some(PrecisionOverride::SigFigs(n)) => render_sigfigs(value, n, settings),
        None => match settings.precision {
            Precision::Auto => render_auto(value, settings),
            Precision::Fixed(n) => render_fixed(value, n, settings),
        },
    }
}

fn render_auto(value: f64, settings: &FormatSettings) -> String {
    if value == 0.0 {
        return apply_mantissa_formatting("0", settings);
    }
    let magnitude = value.abs();
    if magnitude >= 1e10 {
        let digits = format_sigfigs(value, 16);
        return apply_mantissa_formatting(&digits, settings);
    }
    if magnitude < 1e-6 {
        return format_scientific(value, Some(9), settings);
    }
    let digits = format_sigfigs(value, 10);
    apply_mantissa_formatting(&digits, settings)
}

fn render_fixed(value: f64, n: u32, settings: &FormatSettings) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e10 || (magnitude < 1e-6 && value != 0.0) {
        return format_scientific(value, Some(n), settings);
    }
    let digits = format!("{value:.*}", n as usize);
    apply_mantissa_formatting(&digits, settings)
}

fn render_sigfigs(value: f64, n: u32, settings: &FormatSettings) -> String {
    if value == 0.0 {
        return apply_mantissa_formatting("0", settings);
    }
    let exponent = value.abs().log10().floor() as i32;
    // Sig-figs converts scientific notation back to regular form when the
    // resulting magnitude is still representable without exponent notation.
    if !(-6..10).contains(&exponent) {
        return format_scientific(value, Some(n.saturating_sub(1)), settings);
    }
    let digits = format_sigfigs(value, n);
    apply_mantissa_formatting(&digits, settings)
}

/// Renders `value` to `sig_figs` significant figures in plain (non-
/// exponential) decimal form, stripping trailing fractional zeros.
fn format_sigfigs(value: f64, sig_figs: u32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let exponent = value.abs().log10().floor() as i32;
    let decimals = (sig_figs as i32 - exponent - 1).max(0) as usize;
    let mut s = format!("{value:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

fn format_scientific(value: f64, precision: Option<u32>, settings: &FormatSettings) -> String {
    let formatted = match precision {
        Some(p) => format!("{value:.*e}", p as usize),
        None => format!("{value:e}"),
    };
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let mantissa = apply_mantissa_formatting(mantissa, settings);
    let exponent: i32 = exponent.parse().unwrap_or(0);
    format!("{mantissa}e{}{}", if exponent >= 0 { "+" } else { "" }, exponent)
}

/// Applies decimal-separator substitution and digit grouping to a plain
/// (non-exponential) digit string's integer part.
fn apply_mantissa_formatting(digits: &str, settings: &FormatSettings) -> String {
    let (sign, rest) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int_part, frac_part) = rest.split_once('.').unwrap_or((rest, ""));
    let grouped = settings.grouping_separator.apply(settings.grouping_style, int_part);
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac_part}", settings.decimal_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GroupingSeparator, GroupingStyle};

    #[test]
    fn auto_precision_strips_trailing_zeros() {
        let settings = FormatSettings { grouping_separator: GroupingSeparator::None, ..FormatSettings::default() };
        assert_eq!(render_number(2.5, &settings), "2.5");
    }

    #[test]
    fn auto_precision_uses_exponential_below_threshold() {
        let settings = FormatSettings { grouping_separator: GroupingSeparator::None, ..FormatSettings::default() };
        assert!(render_number(0.0000001, &settings).contains('e'));
    }

    #[test]
    fn fixed_precision_pads_with_zeros() {
        let settings = FormatSettings { grouping_separator: GroupingSeparator::None, precision: Precision::Fixed(2), ..FormatSettings::default() };
        assert_eq!(render_number(3.0, &settings), "3.00");
    }

    #[test]
    fn grouping_applies_only_to_integer_part() {
        let settings = FormatSettings { grouping_separator: GroupingSeparator::Comma, grouping_style: GroupingStyle::Triples, precision: Precision::Fixed(2), ..FormatSettings::default() };
        assert_eq!(render_number(1234567.5, &settings), "1,234,567.50");
    }

    #[test]
    fn currency_precision_falls_back_to_minor_unit_digits() {
        let settings = FormatSettings::default();
        assert_eq!(render_currency_amount(9.5, 2, &settings), "9.50");
    }
}
