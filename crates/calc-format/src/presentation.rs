//! Presentation-format conversions (spec §4.10): base N, fraction,
//! scientific, percentage, ordinal, and the ISO 8601/RFC 9557/RFC 2822/Unix
//! targets.

use calc_value::calendar::{PlainDateTime, ZonedDateTime};
use calc_value::format_spec::PresentationFormat;
use calc_value::Value;

use crate::datetime::{render_datetime, render_zoned};
use crate::error::FormattingError;
use crate::numeric::{render_with_precision, PrecisionOverride};
use crate::settings::FormatSettings;

pub fn render_presentation(value: &Value, format: &PresentationFormat, settings: &FormatSettings, today: calc_value::calendar::PlainDate) -> Result<String, FormattingError> {
    match format {
        PresentationFormat::Base(10) => Ok(render_with_precision(numeric_of(value)?, settings, None)),
        PresentationFormat::Base(n) => render_base(value, *n),
        PresentationFormat::Fraction => render_fraction(value),
        PresentationFormat::Scientific(precision) => render_scientific(value, *precision, settings),
        PresentationFormat::Percentage => render_percentage(value, settings),
        PresentationFormat::Ordinal => render_ordinal(value),
        PresentationFormat::Iso8601 => render_iso8601(value, settings, today),
        PresentationFormat::Rfc9557 => render_rfc9557(value, settings, today),
        PresentationFormat::Rfc2822 => render_rfc2822(value, settings, today),
        PresentationFormat::Unix => render_unix(value, false),
        PresentationFormat::UnixMillis => render_unix(value, true),
        PresentationFormat::SigFigs(n) => Ok(render_with_precision(numeric_of(value)?, settings, Some(PrecisionOverride::SigFigs(*n)))),
        PresentationFormat::Decimals(n) => Ok(render_with_precision(numeric_of(value)?, settings, Some(PrecisionOverride::Decimals(*n)))),
    }
}

fn numeric_of(value: &Value) -> Result<f64, FormattingError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Quantity { magnitude, .. } => Ok(*magnitude),
        Value::Currency { amount, .. } => Ok(*amount),
        other => Err(FormattingError::UnsupportedTarget { target: "numeric presentation", value: other.type_name() }),
    }
}

fn render_base(value: &Value, base: u32) -> Result<String, FormattingError> {
    let n = numeric_of(value)?;
    let negative = n < 0.0;
    let int_part = n.abs().trunc() as u64;
    let digits = to_radix(int_part, base);
    let digits = if base == 16 { digits.to_uppercase() } else { digits };
    let frac = n.abs().fract();
    let body = if frac > 0.0 { format!("{digits}.{}", fractional_radix(frac, base, 10)) } else { digits };
    let prefixed = match base {
        2 => format!("0b{body}"),
        8 => format!("0o{body}"),
        16 => format!("0x{body}"),
        3..=36 => format!("{body} (base {base})"),
        _ => return Err(FormattingError::InvalidMetadata(format!("base {base} is not supported"))),
    };
    if !negative {
        return Ok(prefixed);
    }
    // Sign follows the radix prefix: `0x-A`, not `-0xA`.
    Ok(match base {
        2 | 8 | 16 => {
            let (prefix, rest) = prefixed.split_at(2);
            format!("{prefix}-{rest}")
        }
        _ => format!("-{prefixed}"),
    })
}

fn to_radix(mut n: u64, base: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let digit = (n % base as u64) as u32;
        digits.push(std::char::from_digit(digit, base).unwrap());
        n /= base as u64;
    }
    digits.iter().rev().collect()
}

fn fractional_radix(mut frac: f64, base: u32, max_digits: usize) -> String {
    let mut out = String::new();
    for _ in 0..max_digits {
        if frac <= 0.0 {
            break;
        }
        frac *= base as f64;
        let digit = frac.trunc() as u32;
        out.push(std::char::from_digit(digit, base).unwrap());
        frac -= digit as f64;
    }
    out
}

/// Continued-fraction best rational approximation capped at a denominator
/// of 1000.
fn render_fraction(value: &Value) -> Result<String, FormattingError> {
    let n = numeric_of(value)?;
    let negative = n < 0.0;
    let magnitude = n.abs();
    let whole = magnitude.trunc() as i64;
    let frac = magnitude.fract();
    if frac.abs() < 1e-12 {
        return Ok(format!("{}{whole}", if negative { "-" } else { "" }));
    }
    let (mut num, mut den) = best_rational(frac, 1000);
    if num == den {
        return Ok(format!("{}{}", if negative { "-" } else { "" }, whole + 1));
    }
    if num == 0 {
        den = 1;
        num = 0;
    }
    let sign = if negative { "-" } else { "" };
    Ok(if whole == 0 {
        format!("{sign}{num}\u{2044}{den}")
    } else {
        format!("{sign}{whole} {num}\u{2044}{den}")
    })
}

fn best_rational(x: f64, max_den: u64) -> (i64, i64) {
    let (mut h_prev, mut h_curr) = (0i64, 1i64);
    let (mut k_prev, mut k_curr) = (1i64, 0i64);
    let mut value = x;
    for _ in 0..32 {
        let a = value.floor();
        let h_next = a as i64 * h_curr + h_prev;
        let k_next = a as i64 * k_curr + k_prev;
        if k_next as u64 > max_den || k_next == 0 {
            break;
        }
        h_prev = h_curr;
        h_curr = h_next;
        k_prev = k_curr;
        k_curr = k_next;
        let fraction = value - a;
        if fraction.abs() < 1e-10 {
            break;
        }
        value = 1.0 / fraction;
    }
    (h_curr, k_curr)
}

fn render_scientific(value: &Value, precision: Option<u32>, settings: &FormatSettings) -> Result<String, FormattingError> {
    let n = numeric_of(value)?;
    let precision = precision.unwrap_or(6);
    let formatted = format!("{n:.*e}", precision as usize);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mantissa = mantissa.replace('.', &settings.decimal_separator.to_string());
    Ok(format!("{mantissa}e{}{exponent}", if exponent >= 0 { "+" } else { "" }))
}

fn render_percentage(value: &Value, settings: &FormatSettings) -> Result<String, FormattingError> {
    let n = numeric_of(value)? * 100.0;
    Ok(format!("{}%", render_with_precision(n, settings, None)))
}

fn render_ordinal(value: &Value) -> Result<String, FormattingError> {
    let n = numeric_of(value)?;
    let int = n.round() as i64;
    let suffix = match (int.unsigned_abs() % 100, int.unsigned_abs() % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    Ok(format!("{int}{suffix}"))
}

fn to_zoned(value: &Value) -> Result<ZonedDateTime, FormattingError> {
    match value {
        Value::ZonedDateTime(z) => Ok(z.clone()),
        Value::PlainDateTime(dt) => Ok(ZonedDateTime { datetime: *dt, zone: "UTC".to_string(), offset_minutes: 0 }),
        Value::PlainDate(d) => Ok(ZonedDateTime { datetime: PlainDateTime { date: *d, time: calc_value::calendar::PlainTime { hour: 0, minute: 0, second: 0, millisecond: 0 } }, zone: "UTC".to_string(), offset_minutes: 0 }),
        Value::Instant(nanos) => Ok(ZonedDateTime { datetime: PlainDateTime::from_epoch_millis(*nanos / 1_000_000), zone: "UTC".to_string(), offset_minutes: 0 }),
        other => Err(FormattingError::UnsupportedTarget { target: "datetime presentation", value: other.type_name() }),
    }
}

fn render_iso8601(value: &Value, _settings: &FormatSettings, _today: calc_value::calendar::PlainDate) -> Result<String, FormattingError> {
    let zdt = to_zoned(value)?;
    let date = zdt.datetime.date;
    let time = zdt.datetime.time;
    let offset = offset_suffix(zdt.offset_minutes);
    Ok(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}",
        date.year, date.month, date.day, time.hour, time.minute, time.second, offset
    ))
}

fn render_rfc9557(value: &Value, settings: &FormatSettings, today: calc_value::calendar::PlainDate) -> Result<String, FormattingError> {
    let zdt = to_zoned(value)?;
    let base = render_iso8601(value, settings, today)?;
    Ok(format!("{base}[{}]", zdt.zone))
}

fn offset_suffix(offset_minutes: i32) -> String {
    if offset_minutes == 0 {
        return "Z".to_string();
    }
    let sign = if offset_minutes < 0 { "-" } else { "+" };
    format!("{sign}{:02}:{:02}", offset_minutes.abs() / 60, offset_minutes.abs() % 60)
}

fn render_rfc2822(value: &Value, _settings: &FormatSettings, _today: calc_value::calendar::PlainDate) -> Result<String, FormattingError> {
    let zdt = to_zoned(value)?;
    let date = zdt.datetime.date;
    let time = zdt.datetime.time;
    let weekday = crate::datetime::render_date(date, "DDD");
    let month = crate::datetime::render_date(date, "MMM");
    let sign = if zdt.offset_minutes < 0 { "-" } else { "+" };
    let offset = format!("{sign}{:02}{:02}", zdt.offset_minutes.abs() / 60, zdt.offset_minutes.abs() % 60);
    Ok(format!("{weekday}, {:02} {month} {:04} {:02}:{:02}:{:02} {offset}", date.day, date.year, time.hour, time.minute, time.second))
}

fn render_unix(value: &Value, millis: bool) -> Result<String, FormattingError> {
    let epoch_millis = match value {
        Value::Instant(nanos) => *nanos / 1_000_000,
        Value::PlainDateTime(dt) => dt.to_epoch_millis(),
        Value::ZonedDateTime(z) => z.to_instant_millis(),
        other => return Err(FormattingError::UnsupportedTarget { target: if millis { "unix millis" } else { "unix" }, value: other.type_name() }),
    };
    Ok(if millis { epoch_millis.to_string() } else { (epoch_millis / 1000).to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_value::calendar::PlainDate;

    fn today() -> PlainDate {
        PlainDate::new(2024, 1, 1).unwrap()
    }

    #[test]
    fn base_two_uses_binary_prefix() {
        assert_eq!(render_base(&Value::Number(5.0), 2).unwrap(), "0b101");
    }

    #[test]
    fn base_sixteen_uses_uppercase_digits() {
        assert_eq!(render_base(&Value::Number(255.0), 16).unwrap(), "0xFF");
    }

    #[test]
    fn negative_base_value_places_sign_after_prefix() {
        assert_eq!(render_base(&Value::Number(-10.0), 16).unwrap(), "0x-A");
    }

    #[test]
    fn fraction_renders_mixed_number() {
        assert_eq!(render_fraction(&Value::Number(1.5)).unwrap(), "1 1\u{2044}2");
    }

    #[test]
    fn ordinal_handles_teen_exception() {
        assert_eq!(render_ordinal(&Value::Number(11.0)).unwrap(), "11th");
        assert_eq!(render_ordinal(&Value::Number(21.0)).unwrap(), "21st");
    }

    #[test]
    fn unix_on_non_datetime_is_an_error() {
        assert!(render_unix(&Value::Number(1.0), false).is_err());
    }

    #[test]
    fn iso8601_renders_utc_instant_with_z_suffix() {
        let settings = FormatSettings::default();
        let rendered = render_iso8601(&Value::Instant(0), &settings, today()).unwrap();
        assert_eq!(rendered, "1970-01-01T00:00:00Z");
    }
}
