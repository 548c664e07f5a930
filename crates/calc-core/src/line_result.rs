//! Per-line result shape returned by `calculate`/`parse` (spec §6.2).

use calc_lang::ast::Expr;
use calc_value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LineKind {
    Expression,
    Assignment,
    Heading,
    Empty,
    PlainText,
    Error,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineResult {
    /// One-based (spec §6.2).
    pub line_number: usize,
    pub kind: LineKind,
    pub formatted: Option<String>,
    pub has_error: bool,
    /// The tree the resolver chose for this line, when one survived
    /// parsing. `None` for heading/empty/plain-text lines and for lines
    /// no candidate parsed for.
    #[serde(skip)]
    pub chosen_tree: Option<Expr>,
    /// The raw evaluated value, when evaluation ran (absent for `parse`,
    /// which skips evaluation entirely).
    #[serde(skip)]
    pub raw_value: Option<Value>,
}

impl LineResult {
    pub fn plain(line_number: usize, kind: LineKind) -> Self {
        LineResult { line_number, kind, formatted: None, has_error: false, chosen_tree: None, raw_value: None }
    }
}
