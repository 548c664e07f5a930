//! Exercises config/rate-file loading against real temp files rather than
//! in-memory strings, the way manifest-loading integration tests do.

use std::io::Write;

use calc_cli::config::{load_rates_json, load_settings};

#[test]
fn settings_file_overrides_the_decimal_separator() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        angle_unit = "Radian"

        [format]
        precision = "Auto"
        decimal_separator = ","
        grouping_separator = "Period"
        grouping_style = "Triples"
        date_template = "YYYY-MM-DD"
        time_format = "Hour12"
        datetime_order = "TimeThenDate"
        imperial_variant = "Uk"
        unit_display = "Name"
        "#
    )
    .unwrap();
    let settings = load_settings(file.path()).unwrap();
    assert_eq!(settings.format.decimal_separator, ',');
}

#[test]
fn rate_snapshot_file_round_trips_through_the_orchestrator() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"date":"2024-01-01","base":"USD","rates":{{"EUR":0.9}}}}"#).unwrap();
    let json = load_rates_json(file.path()).unwrap();

    let mut orchestrator = calc_core::Orchestrator::new();
    orchestrator.load_exchange_rates(&json).unwrap();
    let result = orchestrator.calculate("100 USD + 10 EUR");
    assert!(!result.lines[0].has_error);
}
