//! End-to-end scenarios (spec §8) driven through the public orchestrator
//! API rather than any internal evaluator/formatter call.

use calc_core::Orchestrator;

fn formatted(input: &str) -> Vec<Option<String>> {
    Orchestrator::new().calculate(input).lines.into_iter().map(|l| l.formatted).collect()
}

#[test]
fn currency_addition_converts_the_second_operand() {
    let mut orchestrator = Orchestrator::new();
    orchestrator.load_exchange_rates(r#"{"date":"2024-01-01","base":"USD","rates":{"EUR":0.85}}"#).unwrap();
    let result = orchestrator.calculate("100 USD + 50 EUR");
    assert!(!result.lines[0].has_error);
    assert!(result.lines[0].formatted.as_deref().unwrap().ends_with("USD"));
}

#[test]
fn unit_conversion_chain_ends_in_the_final_unit() {
    assert_eq!(formatted("5 km to m to cm"), vec![Some("500\u{202f}000 cm".to_string())]);
}

#[test]
fn composite_imperial_measurement_converts_to_a_single_metric_unit() {
    let result = formatted("5 ft 3 in to cm");
    let rendered = result[0].clone().unwrap();
    assert!(rendered.starts_with("160.0"), "got {rendered}");
    assert!(rendered.ends_with("cm"));
}

#[test]
fn zoned_datetime_literal_renders_with_offset() {
    let result = formatted("2023 Jan 01 14:00 America/New_York");
    let rendered = result[0].clone().unwrap();
    assert!(rendered.contains("2023-01-01"));
    assert!(rendered.contains("UTC-5"));
}

#[test]
fn base_conversion_preserves_a_unit_suffix() {
    assert_eq!(formatted("255 to hex"), vec![Some("0xFF".to_string())]);
    assert_eq!(formatted("255 meters to hex"), vec![Some("0xFF m".to_string())]);
}

#[test]
fn assignment_is_visible_to_a_later_line() {
    assert_eq!(formatted("x = 10 m\nx + 20 cm"), vec![Some("10 m".to_string()), Some("10.2 m".to_string())]);
}

#[test]
fn shift_then_binary_presentation_round_trips() {
    assert_eq!(formatted("0b1010 << 2 to binary"), vec![Some("0b101000".to_string())]);
}

#[test]
fn percentage_literal_scales_a_multiplication() {
    assert_eq!(formatted("100 * 25%"), vec![Some("25".to_string())]);
}

#[test]
fn currency_with_three_minor_digits_pads_accordingly() {
    assert_eq!(formatted("10 KWD"), vec![Some("10.000 KWD".to_string())]);
}

#[test]
fn currency_with_no_minor_digits_groups_the_whole_amount() {
    assert_eq!(formatted("10000 KRW"), vec![Some("10\u{202f}000 KRW".to_string())]);
}

#[test]
fn ordinal_presentation_appends_the_english_suffix() {
    assert_eq!(formatted("3 to ordinal"), vec![Some("3rd".to_string())]);
}

#[test]
fn parse_reports_structure_without_evaluating() {
    let result = Orchestrator::new().parse("2 + 2");
    assert!(result.lines[0].formatted.is_none());
    assert!(!result.lines[0].has_error);
}
