//! Error aggregation (spec §7): the closed taxonomy is realized by phase
//! rather than by one flat enum — a line fails at the lexer, parser, or
//! runtime stage, and downstream phases are skipped once an earlier one
//! fails for that line. `calc-lang` has no standalone lexer-error type
//! (an unrecognized character surfaces as `TokenKind::Unknown`), so the
//! lexer phase here is synthesized by scanning the token stream.

use calc_base::{Span, SpannedError};
use calc_lang::token::{Token, TokenKind};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentErrors {
    pub lexer: Vec<SpannedErrorRecord>,
    pub parser: Vec<SpannedErrorRecord>,
    pub runtime: Vec<SpannedErrorRecord>,
}

/// A serializable mirror of [`calc_base::SpannedError`], which carries no
/// serde derive of its own.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpannedErrorRecord {
    pub line_number: usize,
    pub message: String,
    pub span_start: usize,
    pub span_end: usize,
}

impl SpannedErrorRecord {
    pub fn new(line_number: usize, error: &SpannedError) -> Self {
        SpannedErrorRecord { line_number, message: error.message.clone(), span_start: error.span.start, span_end: error.span.end }
    }

    pub fn runtime(line_number: usize, message: impl Into<String>) -> Self {
        SpannedErrorRecord { line_number, message: message.into(), span_start: 0, span_end: 0 }
    }
}

/// Scans a line's token stream for `TokenKind::Unknown` tokens, the
/// lexer's sole recoverable-failure signal, and reports each as a
/// lexer-phase error for `line_number`.
pub fn lexer_errors(line_number: usize, tokens: &[Token]) -> Vec<SpannedErrorRecord> {
    tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Unknown(c) => Some(SpannedErrorRecord::new(line_number, &SpannedError::new(format!("unrecognized character `{c}`"), Span::new(t.span.start, t.span.end)))),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_lang::lexer::Lexer;

    #[test]
    fn unknown_token_becomes_a_lexer_error() {
        let tokens = Lexer::new("5 @ 3").tokenize();
        let errors = lexer_errors(1, &tokens);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains('@'));
    }

    #[test]
    fn clean_line_has_no_lexer_errors() {
        let tokens = Lexer::new("5 + 3").tokenize();
        assert!(lexer_errors(1, &tokens).is_empty());
    }
}
