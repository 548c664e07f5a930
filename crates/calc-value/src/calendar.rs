//! Proleptic Gregorian calendar arithmetic (spec §4.7, §4.9).
//!
//! `civil_from_days`/`days_from_civil` are Howard Hinnant's algorithm
//! (<https://howardhinnant.github.io/date_algorithms.html>), carried over
//! from the kernel's `Literal::Date` display routine and extended here with
//! the inverse transform and the arithmetic the calculator's date/time
//! operations need.

use crate::error::DateTimeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlainDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl PlainDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateTimeError> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(DateTimeError::InvalidDate { year, month, day });
        }
        Ok(PlainDate { year, month, day })
    }

    pub fn to_epoch_days(self) -> i64 {
        days_from_civil(self.year as i64, self.month as u32, self.day as u32)
    }

    pub fn from_epoch_days(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days);
        PlainDate { year: year as i32, month, day }
    }

    /// Adds whole days.
    pub fn add_days(self, days: i64) -> Self {
        Self::from_epoch_days(self.to_epoch_days() + days)
    }

    /// Adds whole months, clamping the day to the resulting month's length
    /// (spec §4.9: `2024-01-31 + 1 month = 2024-02-29`, not an overflow into
    /// March).
    pub fn add_months(self, months: i64) -> Self {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) + months;
        let year = total.div_euclid(12) as i32;
        let month = (total.rem_euclid(12) + 1) as u32;
        let day = self.day.min(days_in_month(year, month));
        PlainDate { year, month, day }
    }

    pub fn add_years(self, years: i64) -> Self {
        self.add_months(years * 12)
    }

    pub fn days_since(self, other: PlainDate) -> i64 {
        self.to_epoch_days() - other.to_epoch_days()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

/// Days since the Unix epoch (1970-01-01 = day 0) for a civil date.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y / 400 } else { (y - 399) / 400 };
    let yoe = (y - era * 400) as i64;
    let mp = ((month as i64 + 9) % 12) as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

/// Inverse of [`days_from_civil`].
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = if z >= 0 { z / 146097 } else { (z - 146096) / 146097 };
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };
    (year, m as u32, d as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl PlainTime {
    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self, DateTimeError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(DateTimeError::InvalidTime { hour, minute, second });
        }
        Ok(PlainTime { hour, minute, second, millisecond })
    }

    pub fn to_millis_of_day(self) -> i64 {
        ((self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64) * 1000) + self.millisecond as i64
    }

    pub fn from_millis_of_day(millis: i64) -> Self {
        let rem = millis.rem_euclid(86_400_000);
        let millisecond = (rem % 1000) as u32;
        let total_sec = rem / 1000;
        let second = (total_sec % 60) as u32;
        let minute = ((total_sec / 60) % 60) as u32;
        let hour = (total_sec / 3600) as u32;
        PlainTime { hour, minute, second, millisecond }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainDateTime {
    pub date: PlainDate,
    pub time: PlainTime,
}

impl PlainDateTime {
    pub fn to_epoch_millis(self) -> i64 {
        self.date.to_epoch_days() * 86_400_000 + self.time.to_millis_of_day()
    }

    pub fn from_epoch_millis(millis: i64) -> Self {
        let days = millis.div_euclid(86_400_000);
        let millis_of_day = millis.rem_euclid(86_400_000);
        PlainDateTime { date: PlainDate::from_epoch_days(days), time: PlainTime::from_millis_of_day(millis_of_day) }
    }

    /// Adds a signed duration, carrying into the date when the time of day
    /// overflows a day boundary.
    pub fn add_millis(self, millis: i64) -> Self {
        Self::from_epoch_millis(self.to_epoch_millis() + millis)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZonedDateTime {
    pub datetime: PlainDateTime,
    /// Canonical IANA zone id (spec §6.1's `resolve_timezone`), or `"UTC"`.
    pub zone: String,
    /// Offset from UTC in minutes for this instant, resolved at
    /// construction time; the value model does not re-resolve on demand.
    pub offset_minutes: i32,
}

impl ZonedDateTime {
    pub fn to_instant_millis(&self) -> i64 {
        self.datetime.to_epoch_millis() - self.offset_minutes as i64 * 60_000
    }
}

/// A signed duration at nanosecond precision; the smallest unit the
/// catalog's time dimension distinguishes (spec §4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    pub nanos: i64,
}

impl Duration {
    pub fn from_seconds(seconds: f64) -> Self {
        Duration { nanos: (seconds * 1_000_000_000.0).round() as i64 }
    }

    pub fn as_seconds(self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    pub fn negate(self) -> Self {
        Duration { nanos: -self.nanos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_from_civil_round_trips_through_civil_from_days() {
        for (y, m, d) in [(1970, 1, 1), (2024, 2, 29), (1999, 12, 31), (1, 1, 1), (2100, 3, 1)] {
            let days = days_from_civil(y, m, d);
            assert_eq!(civil_from_days(days), (y, m, d));
        }
    }

    #[test]
    fn epoch_day_zero_is_unix_epoch() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
    }

    #[test]
    fn month_end_addition_clamps_instead_of_overflowing() {
        let date = PlainDate::new(2024, 1, 31).unwrap();
        let next = date.add_months(1);
        assert_eq!(next, PlainDate::new(2024, 2, 29).unwrap());
    }

    #[test]
    fn leap_year_detection() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(PlainDate::new(2023, 2, 30).is_err());
    }

    #[test]
    fn plain_time_wraps_past_midnight() {
        let t = PlainTime::from_millis_of_day(86_400_000 + 1000);
        assert_eq!(t, PlainTime { hour: 0, minute: 0, second: 1, millisecond: 0 });
    }
}
