//! Document-level orchestrator (spec §6.2): tokenizes and parses each line
//! independently, runs the ambiguity resolver with the document's
//! accumulated variable bindings as context, evaluates, and formats.

use std::time::{SystemTime, UNIX_EPOCH};

use calc_catalog::{BuiltinCatalog, Catalog};
use calc_eval::{Environment, Evaluator};
use calc_lang::ast::Line;
use calc_lang::lexer::Lexer;
use calc_lang::parser::resolver::{self, Candidate};
use calc_lang::parser::parse_line_candidates;
use calc_value::calendar::PlainDate;
use calc_value::currency::ExchangeRates;

use crate::error::{lexer_errors, DocumentErrors, SpannedErrorRecord};
use crate::line_result::{LineKind, LineResult};
use crate::settings::Settings;
use crate::snapshot::ExchangeRateSnapshot;

pub struct DocumentResult {
    pub lines: Vec<LineResult>,
    pub errors: DocumentErrors,
}

pub struct Orchestrator {
    catalog: Box<dyn Catalog>,
    pub settings: Settings,
    rates: Option<ExchangeRates>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Orchestrator::new()
    }
}

impl Orchestrator {
    pub fn new() -> Self {
        Orchestrator { catalog: Box::new(BuiltinCatalog::new()), settings: Settings::default(), rates: None }
    }

    pub fn with_catalog(catalog: Box<dyn Catalog>) -> Self {
        Orchestrator { catalog, settings: Settings::default(), rates: None }
    }

    pub fn load_exchange_rates(&mut self, snapshot_json: &str) -> Result<(), serde_json::Error> {
        let snapshot = ExchangeRateSnapshot::parse(snapshot_json)?;
        self.rates = Some(snapshot.into_exchange_rates());
        Ok(())
    }

    pub fn set_user_locale(&mut self, region: impl Into<String>) {
        self.settings.locale = Some(region.into());
    }

    /// Parses and evaluates every line, producing formatted results and
    /// aggregated errors per phase.
    pub fn calculate(&self, input: &str) -> DocumentResult {
        self.run(input, true)
    }

    /// Parses every line without evaluating (spec §6.2's `parse`).
    pub fn parse(&self, input: &str) -> DocumentResult {
        self.run(input, false)
    }

    fn run(&self, input: &str, evaluate: bool) -> DocumentResult {
        let mut env = Environment::new();
        let evaluator = match &self.rates {
            Some(rates) => Evaluator::with_rates(self.catalog.as_ref(), rates),
            None => Evaluator::new(self.catalog.as_ref()),
        }
        .with_angle_unit(self.settings.angle_unit());

        let mut lines = Vec::new();
        let mut errors = DocumentErrors::default();
        let today = today();

        for (idx, raw_line) in input.lines().enumerate() {
            let line_number = idx + 1;
            let tokens = Lexer::new(raw_line).tokenize();
            let mut line_lexer_errors = lexer_errors(line_number, &tokens);
            let had_lexer_errors = !line_lexer_errors.is_empty();
            errors.lexer.append(&mut line_lexer_errors);

            let (line, candidates, parse_errors) = parse_line_candidates(&tokens, self.catalog.as_ref());
            for e in &parse_errors {
                errors.parser.push(SpannedErrorRecord::new(line_number, e));
            }

            let Some(line) = line else {
                lines.push(error_line_result(line_number, had_lexer_errors || !parse_errors.is_empty()));
                continue;
            };

            let resolved = self.resolve(line, candidates, &env);
            let Some(resolved) = resolved else {
                errors.parser.push(SpannedErrorRecord::runtime(line_number, "no candidate parse survived pruning"));
                lines.push(error_line_result(line_number, true));
                continue;
            };

            let kind = match &resolved {
                Line::Heading { .. } => LineKind::Heading,
                Line::Empty => LineKind::Empty,
                Line::PlainText(_) => LineKind::PlainText,
                Line::Assignment { .. } => LineKind::Assignment,
                Line::Expression(_) => LineKind::Expression,
            };

            let mut result = LineResult::plain(line_number, kind);
            if !evaluate {
                lines.push(result);
                continue;
            }

            let value = evaluator.evaluate_line(&resolved, &mut env);
            if let Some(value) = &value {
                if let calc_value::Value::Error(message) = value {
                    result.has_error = true;
                    errors.runtime.push(SpannedErrorRecord::runtime(line_number, message.clone()));
                    result.formatted = Some(format!("Error: {message}"));
                } else {
                    match calc_format::format_value(value, &self.settings.format, self.catalog.as_ref(), today) {
                        Ok(rendered) => result.formatted = Some(rendered),
                        Err(e) => {
                            result.has_error = true;
                            errors.runtime.push(SpannedErrorRecord::runtime(line_number, format!("Formatting Error: {e}")));
                            result.formatted = Some(format!("Formatting Error: {e}"));
                        }
                    }
                }
            }
            result.raw_value = value;
            lines.push(result);
        }

        DocumentResult { lines, errors }
    }

    fn resolve(&self, line: Line, candidates: Vec<calc_lang::ast::Expr>, env: &Environment) -> Option<Line> {
        if candidates.is_empty() {
            return Some(line);
        }
        // A sole candidate still has to survive pruning (spec §4.3's three
        // criteria reject a structurally-invalid reading unconditionally,
        // not just when there's a rival candidate to prefer over it);
        // scoring and the tie-break are no-ops with only one survivor.
        let defined: std::collections::HashSet<String> = env.bound_names().cloned().collect();
        let ranked: Vec<Candidate> = candidates.into_iter().enumerate().map(|(order, expr)| Candidate { expr, order }).collect();
        let chosen = resolver::select(ranked, self.catalog.as_ref(), &defined)?;
        Some(match line {
            Line::Assignment { name, .. } => Line::Assignment { name, value: chosen },
            _ => Line::Expression(chosen),
        })
    }
}

fn error_line_result(line_number: usize, has_error: bool) -> LineResult {
    let mut result = LineResult::plain(line_number, LineKind::Error);
    result.has_error = has_error;
    result.formatted = Some("Parsing Error: no grammar candidate survived".to_string());
    result
}

fn today() -> PlainDate {
    let epoch_millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as i64).unwrap_or(0);
    PlainDate::from_epoch_days(epoch_millis / 86_400_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_a_simple_expression() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.calculate("2 + 2");
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].formatted.as_deref(), Some("4"));
        assert!(!result.lines[0].has_error);
    }

    #[test]
    fn assignment_carries_its_value_to_a_later_line() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.calculate("x = 10 m\nx + 20 cm");
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[1].formatted.as_deref(), Some("10.2 m"));
    }

    #[test]
    fn unit_conversion_chain_renders_final_unit() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.calculate("5 km to m to cm");
        assert_eq!(result.lines[0].formatted.as_deref(), Some("500\u{202f}000 cm"));
    }

    /// Ambiguity #1 only matters for an identifier the catalog doesn't
    /// recognize as a unit (spec §4.3's pruning criterion (a)); an
    /// undefined, uncatalogued name still reads as a user-defined unit
    /// rather than a phantom variable multiplication.
    #[test]
    fn undefined_uncatalogued_identifier_still_resolves_as_a_user_defined_unit() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.calculate("5 widgets");
        assert_eq!(result.lines[0].formatted.as_deref(), Some("5 widgets"));
    }

    #[test]
    fn unrecognized_character_is_a_lexer_error() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.calculate("5 @ 3");
        assert!(!result.errors.lexer.is_empty());
    }

    #[test]
    fn parse_skips_evaluation() {
        let orchestrator = Orchestrator::new();
        let result = orchestrator.parse("2 + 2");
        assert!(result.lines[0].formatted.is_none());
        assert!(result.lines[0].raw_value.is_none());
    }

    #[test]
    fn loading_exchange_rates_enables_currency_addition() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.load_exchange_rates(r#"{"date":"2024-01-01","base":"USD","rates":{"EUR":0.85}}"#).unwrap();
        let result = orchestrator.calculate("100 USD + 50 EUR");
        assert!(!result.lines[0].has_error);
    }
}
