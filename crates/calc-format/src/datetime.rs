//! Date/time rendering (spec §4.10): user templates for plain dates,
//! 12h/24h adaptive-precision plain times, and zoned-datetime rendering
//! with the today/yesterday/tomorrow anchor substitution.

use calc_value::calendar::{PlainDate, PlainDateTime, PlainTime, ZonedDateTime};

use crate::settings::{DateTimeOrder, FormatSettings, TimeFormat};

const WEEKDAYS: [&str; 7] = ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"];
const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

fn weekday_abbrev(date: PlainDate) -> &'static str {
    // Epoch day 0 (1970-01-01) was a Thursday.
    let day = date.to_epoch_days().rem_euclid(7) as usize;
    WEEKDAYS[day]
}

pub fn render_date(date: PlainDate, template: &str) -> String {
    template
        .replace("YYYY", &format!("{:04}", date.year))
        .replace("MMM", MONTHS[(date.month - 1) as usize])
        .replace("MM", &format!("{:02}", date.month))
        .replace("DDD", weekday_abbrev(date))
        .replace("DD", &format!("{:02}", date.day))
}

pub fn render_time(time: PlainTime, format: TimeFormat) -> String {
    let (hour, suffix) = match format {
        TimeFormat::Hour24 => (time.hour, String::new()),
        TimeFormat::Hour12 => {
            let h12 = match time.hour % 12 {
                0 => 12,
                h => h,
            };
            (h12, if time.hour < 12 { " AM".to_string() } else { " PM".to_string() })
        }
    };
    let mut rendered = format!("{hour:02}:{:02}", time.minute);
    if time.second != 0 || time.millisecond != 0 {
        rendered.push_str(&format!(":{:02}", time.second));
    }
    if time.millisecond != 0 {
        rendered.push_str(&format!(".{:03}", time.millisecond));
    }
    rendered.push_str(&suffix);
    rendered
}

pub fn render_datetime(dt: PlainDateTime, settings: &FormatSettings) -> String {
    let date = render_date(dt.date, &settings.date_template);
    let time = render_time(dt.time, settings.time_format);
    match settings.datetime_order {
        DateTimeOrder::DateThenTime => format!("{date} {time}"),
        DateTimeOrder::TimeThenDate => format!("{time} {date}"),
    }
}

/// Renders an instant in the local zone without an offset annotation.
pub fn render_instant(epoch_millis: i64, settings: &FormatSettings) -> String {
    render_datetime(PlainDateTime::from_epoch_millis(epoch_millis), settings)
}

/// `[date ]time UTC±H[:MM]`, with the date prefix swapped for
/// `today `/`yesterday `/`tomorrow ` when the zone's wall-clock date
/// matches the system's for that anchor.
pub fn render_zoned(zdt: &ZonedDateTime, settings: &FormatSettings, system_today: PlainDate) -> String {
    let time = render_time(zdt.datetime.time, settings.time_format);
    let offset_hours = zdt.offset_minutes / 60;
    let offset_rem_minutes = zdt.offset_minutes.abs() % 60;
    let sign = if zdt.offset_minutes < 0 { "-" } else { "+" };
    let offset = if offset_rem_minutes == 0 {
        format!("UTC{sign}{}", offset_hours.abs())
    } else {
        format!("UTC{sign}{}:{:02}", offset_hours.abs(), offset_rem_minutes)
    };
    let date_prefix = match zdt.datetime.date.days_since(system_today) {
        0 => "today ".to_string(),
        -1 => "yesterday ".to_string(),
        1 => "tomorrow ".to_string(),
        _ => format!("{} ", render_date(zdt.datetime.date, &settings.date_template)),
    };
    format!("{date_prefix}{time} {offset}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_template_substitutes_all_tokens() {
        let date = PlainDate::new(2024, 3, 4).unwrap();
        assert_eq!(render_date(date, "YYYY-MM-DD (DDD)"), "2024-03-04 (Mon)");
    }

    #[test]
    fn time_omits_seconds_and_millis_when_zero() {
        let time = PlainTime::new(14, 30, 0, 0).unwrap();
        assert_eq!(render_time(time, TimeFormat::Hour24), "14:30");
    }

    #[test]
    fn time_emits_seconds_and_millis_when_nonzero() {
        let time = PlainTime::new(14, 30, 5, 250).unwrap();
        assert_eq!(render_time(time, TimeFormat::Hour24), "14:30:05.250");
    }

    #[test]
    fn twelve_hour_format_wraps_midnight_to_twelve_am() {
        let time = PlainTime::new(0, 0, 0, 0).unwrap();
        assert_eq!(render_time(time, TimeFormat::Hour12), "12:00 AM");
    }

    #[test]
    fn zoned_render_uses_today_prefix_when_dates_match() {
        let date = PlainDate::new(2024, 3, 4).unwrap();
        let zdt = ZonedDateTime {
            datetime: PlainDateTime { date, time: PlainTime::new(9, 0, 0, 0).unwrap() },
            zone: "America/New_York".to_string(),
            offset_minutes: -240,
        };
        let rendered = render_zoned(&zdt, &FormatSettings::default(), date);
        assert!(rendered.starts_with("today 09:00 UTC-4"));
    }
}
