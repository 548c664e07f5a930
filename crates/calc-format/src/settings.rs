//! Format-relevant settings (spec §6.3). `calc-core::Settings` carries the
//! full recognized-option set (including the angle-unit policy the
//! evaluator consumes); this is the subset the formatter itself needs,
//! mirroring the `calc-value`/`calc-lang` `PresentationFormat` split so
//! this crate never depends on `calc-core`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Precision {
    Auto,
    Fixed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GroupingSeparator {
    None,
    NarrowNoBreakSpace,
    Comma,
    Period,
    PrimeMark,
}

impl GroupingSeparator {
    fn as_char(self) -> Option<char> {
        match self {
            GroupingSeparator::None => None,
            GroupingSeparator::NarrowNoBreakSpace => Some('\u{202f}'),
            GroupingSeparator::Comma => Some(','),
            GroupingSeparator::Period => Some('.'),
            GroupingSeparator::PrimeMark => Some('\u{2032}'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GroupingStyle {
    /// Groups of three from the right: `1,234,567`.
    Triples,
    /// South Asian lakh/crore grouping: `12,34,567`.
    SouthAsian,
    /// Groups of four (common for hexadecimal/binary digit strings).
    Quads,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TimeFormat {
    Hour12,
    Hour24,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DateTimeOrder {
    DateThenTime,
    TimeThenDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImperialVariant {
    Us,
    Uk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnitDisplay {
    Symbol,
    Name,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    pub precision: Precision,
    pub decimal_separator: char,
    pub grouping_separator: GroupingSeparator,
    pub grouping_style: GroupingStyle,
    pub date_template: String,
    pub time_format: TimeFormat,
    pub datetime_order: DateTimeOrder,
    pub imperial_variant: ImperialVariant,
    pub unit_display: UnitDisplay,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            precision: Precision::Auto,
            decimal_separator: '.',
            grouping_separator: GroupingSeparator::NarrowNoBreakSpace,
            grouping_style: GroupingStyle::Triples,
            date_template: "YYYY-MM-DD".to_string(),
            time_format: TimeFormat::Hour24,
            datetime_order: DateTimeOrder::DateThenTime,
            imperial_variant: ImperialVariant::Us,
            unit_display: UnitDisplay::Symbol,
        }
    }
}

impl GroupingSeparator {
    pub fn apply(self, style: GroupingStyle, integer_digits: &str) -> String {
        let Some(sep) = self.as_char() else { return integer_digits.to_string() };
        if style == GroupingStyle::Off {
            return integer_digits.to_string();
        }
        let digits: Vec<char> = integer_digits.chars().collect();
        let groups = group_sizes(style, digits.len());
        let mut out = String::new();
        let mut idx = 0;
        for (i, size) in groups.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.extend(&digits[idx..idx + size]);
            idx += size;
        }
        out
    }
}

/// Splits `len` digits into group sizes from the most significant end,
/// per the requested style.
fn group_sizes(style: GroupingStyle, len: usize) -> Vec<usize> {
    match style {
        GroupingStyle::Off => vec![len],
        GroupingStyle::Triples => chunk_from_right(len, &[3]),
        GroupingStyle::Quads => chunk_from_right(len, &[4]),
        GroupingStyle::SouthAsian => {
            // Rightmost group is 3, every group after that is 2.
            if len <= 3 {
                return vec![len];
            }
            let mut rest = len - 3;
            let mut groups = Vec::new();
            while rest > 2 {
                groups.push(2);
                rest -= 2;
            }
            groups.push(rest);
            groups.reverse();
            groups.push(3);
            groups
        }
    }
}

fn chunk_from_right(len: usize, sizes: &[usize]) -> Vec<usize> {
    let chunk = sizes[0];
    if len <= chunk {
        return vec![len];
    }
    let mut rest = len;
    let mut groups = Vec::new();
    while rest > chunk {
        groups.push(chunk);
        rest -= chunk;
    }
    groups.push(rest);
    groups.reverse();
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_grouping_matches_western_convention() {
        assert_eq!(GroupingSeparator::Comma.apply(GroupingStyle::Triples, "1234567"), "1,234,567");
    }

    #[test]
    fn south_asian_grouping_groups_in_twos_after_the_first_three() {
        assert_eq!(GroupingSeparator::Comma.apply(GroupingStyle::SouthAsian, "1234567"), "12,34,567");
    }

    #[test]
    fn off_style_is_a_no_op() {
        assert_eq!(GroupingSeparator::Comma.apply(GroupingStyle::Off, "1234567"), "1234567");
    }

    #[test]
    fn short_integer_part_is_not_grouped() {
        assert_eq!(GroupingSeparator::Comma.apply(GroupingStyle::Triples, "12"), "12");
    }
}
