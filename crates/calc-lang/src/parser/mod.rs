//! Grammar parser (spec §4.2): consumes a token stream for one logical
//! line and produces the set of syntactically valid candidate trees.
//!
//! The grammar is ambiguous at five recurrent points (spec §4.2). Rather
//! than a general parse-forest generator, this parser runs a bounded
//! two-strategy parse — [`Strategy::Merge`] (prefer multi-word units,
//! composite measurements, composite conversion targets) and
//! [`Strategy::Split`] (prefer variable references, separate unit terms,
//! nested conversions) — producing up to two full candidate trees per
//! line. The ambiguity resolver (see [`crate::resolver`]) then prunes and
//! scores whatever candidates parsed successfully; ties and single-
//! candidate lines fall out naturally. This keeps every one of spec
//! §4.2's five ambiguities representable without requiring a full
//! Earley/GLR parser for a line-oriented calculator.

pub mod resolver;

use calc_base::{Span, SpannedError};
use calc_catalog::Catalog;

use crate::ast::{
    BinaryOp, ConversionOp, ConversionTarget, Expr, ExprKind, KeywordInstant, Line,
    MeasuredLiteralValue, NumericBase as AstNumericBase, PostfixOp, PresentationFormat,
    RelativeDirection, UnaryOp, UnitExpr,
};
use crate::token::{NumericBase, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Merge,
    Split,
}

pub type ParseResult<T> = Result<T, SpannedError>;

/// Parses one logical line's token stream into its classified [`Line`]
/// form. `catalog` lets `Strategy::Split` tell a genuine variable
/// reference apart from a catalog unit name while generating candidates
/// (see [`Parser::with_catalog`]); the resolver in [`resolver`] still does
/// the actual catalog-aware pruning/scoring once both candidates exist.
pub fn parse_line_candidates<'t>(tokens: &'t [Token], catalog: &'t dyn Catalog) -> (Option<Line>, Vec<Expr>, Vec<SpannedError>) {
    if let Some(heading) = classify_heading(tokens) {
        return (Some(heading), Vec::new(), Vec::new());
    }
    if is_blank(tokens) {
        return (Some(Line::Empty), Vec::new(), Vec::new());
    }

    let assignment_name = detect_assignment(tokens);
    let expr_tokens: &[Token] = if let Some((_, rest_start)) = &assignment_name {
        &tokens[*rest_start..]
    } else {
        tokens
    };

    let mut candidates = Vec::new();
    let mut errors = Vec::new();
    for strategy in [Strategy::Merge, Strategy::Split] {
        match Parser::new(expr_tokens, strategy).with_catalog(catalog).parse_expr_to_end() {
            Ok(expr) => {
                if !candidates.contains(&expr) {
                    candidates.push(expr);
                }
            }
            Err(e) => errors.push(e),
        }
    }

    if candidates.is_empty() {
        return (None, Vec::new(), errors);
    }

    let line = if let Some((name, _)) = assignment_name {
        // Assignment candidates are reconstructed per-expression by the caller.
        Line::Assignment { name, value: candidates[0].clone() }
    } else {
        Line::Expression(candidates[0].clone())
    };
    (Some(line), candidates, Vec::new())
}

fn is_blank(tokens: &[Token]) -> bool {
    matches!(tokens, [Token { kind: TokenKind::Eof, .. }])
}

fn classify_heading(tokens: &[Token]) -> Option<Line> {
    let (level, rest) = match tokens.first()?.kind {
        TokenKind::Hash => (1, &tokens[1..]),
        TokenKind::HeadingMarker(n) => (n, &tokens[1..]),
        _ => return None,
    };
    let text: String = rest
        .iter()
        .take_while(|t| t.kind != TokenKind::Eof)
        .map(token_text)
        .collect::<Vec<_>>()
        .join(" ");
    Some(Line::Heading { level, text: text.trim().to_string() })
}

fn token_text(t: &Token) -> String {
    match &t.kind {
        TokenKind::Identifier(s) => s.clone(),
        TokenKind::Number { raw, .. } => raw.clone(),
        TokenKind::StringLiteral(s) => s.clone(),
        _ => String::new(),
    }
}

/// `identifier =` at the start of the line, not followed by `=` (which
/// would make it `==`) — spec §4.2 line-kind prefilter.
fn detect_assignment(tokens: &[Token]) -> Option<(String, usize)> {
    if let [Token { kind: TokenKind::Identifier(name), .. }, Token { kind: TokenKind::Eq, .. }, rest @ ..] = tokens {
        if !rest.is_empty() {
            return Some((name.clone(), 2));
        }
    }
    None
}

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    strategy: Strategy,
    catalog: Option<&'t dyn Catalog>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], strategy: Strategy) -> Self {
        Parser { tokens, pos: 0, strategy, catalog: None }
    }

    /// Lets `Strategy::Split` check candidate unit words against a real
    /// catalog instead of treating every identifier as equally plausible
    /// either way. Without one, the parser falls back to its structural
    /// default (every identifier is a plausible unit word, matching
    /// `Strategy::Merge`'s own catalog-blind unit consumption).
    pub fn with_catalog(mut self, catalog: &'t dyn Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].kind
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos.min(self.tokens.len() - 1)].span
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        t
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            Err(SpannedError::new(format!("expected {kind:?}, found {:?}", self.peek()), self.peek_span()))
        }
    }

    pub fn parse_expr_to_end(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_ternary()?;
        if !self.at_eof() {
            return Err(SpannedError::new(format!("unexpected trailing token {:?}", self.peek()), self.peek_span()));
        }
        Ok(expr)
    }

    // Level 1: if/then/else, right-associative.
    fn parse_ternary(&mut self) -> ParseResult<Expr> {
        if matches!(self.peek(), TokenKind::If) {
            let start = self.peek_span();
            self.advance();
            let cond = self.parse_ternary()?;
            self.expect(&TokenKind::Then)?;
            let then_branch = self.parse_ternary()?;
            self.expect(&TokenKind::Else)?;
            let else_branch = self.parse_ternary()?;
            let span = Span::new(start.start, else_branch.span.end);
            return Ok(Expr::new(
                ExprKind::Conditional { cond: Box::new(cond), then_branch: Box::new(then_branch), else_branch: Box::new(else_branch) },
                span,
            ));
        }
        self.parse_conversion()
    }

    // Level 2: conversion operators, left-associative, ambiguity #5.
    fn parse_conversion(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_or()?;
        loop {
            let op = match self.peek() {
                TokenKind::To => ConversionOp::To,
                TokenKind::In => ConversionOp::In,
                TokenKind::As => ConversionOp::As,
                TokenKind::Arrow => ConversionOp::To,
                _ => break,
            };
            let start = left.span.start;
            self.advance();
            let target = self.parse_conversion_target()?;
            let mut end = self.tokens[self.pos].span.start;

            if self.strategy == Strategy::Merge {
                // Try to merge a following `in TARGET` into a composite target.
                if matches!(self.peek(), TokenKind::In) && matches!(target, ConversionTarget::Unit(_)) {
                    self.advance();
                    let second = self.parse_conversion_target()?;
                    if let (ConversionTarget::Unit(a), ConversionTarget::Unit(b)) = (target.clone(), second.clone()) {
                        end = self.tokens[self.pos].span.start;
                        left = Expr::new(
                            ExprKind::Conversion { source: Box::new(left), operator: op, target: ConversionTarget::Composite(vec![a, b]) },
                            Span::new(start, end),
                        );
                        continue;
                    }
                }
            }

            left = Expr::new(ExprKind::Conversion { source: Box::new(left), operator: op, target }, Span::new(start, end));
        }
        Ok(left)
    }

    fn parse_conversion_target(&mut self) -> ParseResult<ConversionTarget> {
        if let Some(fmt) = self.try_parse_presentation_format()? {
            return Ok(ConversionTarget::Format(fmt));
        }
        if matches!(self.peek(), TokenKind::LBracket) {
            self.advance();
            let mut units = Vec::new();
            loop {
                units.push(self.parse_unit_expr()?);
                if matches!(self.peek(), TokenKind::Comma) {
                    self.advance();
                    continue;
                }
                break;
            }
            self.expect(&TokenKind::RBracket)?;
            return Ok(ConversionTarget::Composite(units));
        }
        Ok(ConversionTarget::Unit(self.parse_unit_expr()?))
    }

    fn try_parse_presentation_format(&mut self) -> ParseResult<Option<PresentationFormat>> {
        let fmt = match self.peek() {
            TokenKind::Hexadecimal => PresentationFormat::Base(16),
            TokenKind::Octal => PresentationFormat::Base(8),
            TokenKind::Binary => PresentationFormat::Base(2),
            TokenKind::Decimal => PresentationFormat::Base(10),
            TokenKind::Fraction => PresentationFormat::Fraction,
            TokenKind::Scientific => PresentationFormat::Scientific(None),
            TokenKind::Percentage => PresentationFormat::Percentage,
            TokenKind::Ordinal => PresentationFormat::Ordinal,
            TokenKind::Iso8601 => PresentationFormat::Iso8601,
            TokenKind::Rfc9557 => PresentationFormat::Rfc9557,
            TokenKind::Rfc2822 => PresentationFormat::Rfc2822,
            TokenKind::Unix => PresentationFormat::Unix,
            TokenKind::Base => {
                self.advance();
                let n = self.expect_integer()?;
                return Ok(Some(PresentationFormat::Base(n as u32)));
            }
            TokenKind::Identifier(word) if word == "hex" => PresentationFormat::Base(16),
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(fmt))
    }

    fn expect_integer(&mut self) -> ParseResult<i64> {
        match self.peek().clone() {
            TokenKind::Number { value, .. } => {
                self.advance();
                Ok(value as i64)
            }
            other => Err(SpannedError::new(format!("expected integer, found {other:?}"), self.peek_span())),
        }
    }

    /// Parses a possibly multi-word, possibly derived unit name (ambiguity
    /// #2 and #4). `Strategy::Merge` fuses consecutive bare words into one
    /// multi-word unit name; `Strategy::Split` keeps each word a separate
    /// numerator term (an implicit product).
    ///
    /// A following `/`/`per` is only a denominator separator if a unit word
    /// actually follows it (`10 m/s`); otherwise it's ordinary division
    /// between two values (`10 m / 5 m`, `10 m / 2`), so the position is
    /// backtracked and left for `parse_multiplicative` (ambiguity #4).
    fn parse_unit_expr(&mut self) -> ParseResult<UnitExpr> {
        let mut numerator = vec![self.parse_unit_word()?];
        if self.strategy == Strategy::Merge {
            while let Some(word) = self.peek_bare_word() {
                let last = numerator.last_mut().unwrap();
                last.0 = format!("{} {}", last.0, word);
                self.advance();
            }
        }
        let mut denominator = Vec::new();
        if matches!(self.peek(), TokenKind::Slash | TokenKind::Per) {
            let checkpoint = self.pos;
            self.advance();
            match self.parse_unit_word() {
                Ok(word) => denominator.push(word),
                Err(_) => self.pos = checkpoint,
            }
        }
        Ok(UnitExpr { numerator, denominator })
    }

    fn parse_unit_word(&mut self) -> ParseResult<(String, i32)> {
        let name = match self.peek().clone() {
            TokenKind::Identifier(w) => {
                self.advance();
                w
            }
            TokenKind::Degree => {
                self.advance();
                "degree".to_string()
            }
            other => return Err(SpannedError::new(format!("expected unit name, found {other:?}"), self.peek_span())),
        };
        let exponent = self.parse_unit_exponent();
        Ok((name, exponent))
    }

    fn parse_unit_exponent(&mut self) -> i32 {
        match self.peek().clone() {
            TokenKind::SuperscriptExponent(n) => {
                self.advance();
                n
            }
            TokenKind::Caret => {
                self.advance();
                if let TokenKind::Number { value, .. } = self.peek().clone() {
                    self.advance();
                    value as i32
                } else {
                    1
                }
            }
            TokenKind::Squared => {
                self.advance();
                2
            }
            TokenKind::Cubed => {
                self.advance();
                3
            }
            _ => 1,
        }
    }

    fn peek_bare_word(&self) -> Option<String> {
        if let TokenKind::Identifier(w) = self.peek() {
            Some(w.clone())
        } else {
            None
        }
    }

    // Level 3-10: binary chains from logical-or down to shift.
    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_logical_and, &[(TokenKind::OrOr, BinaryOp::Or)])
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_bit_or, &[(TokenKind::AndAnd, BinaryOp::And)])
    }

    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_xor, &[(TokenKind::Pipe, BinaryOp::BitOr)])
    }

    fn parse_xor(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_bit_and, &[(TokenKind::Xor, BinaryOp::Xor)])
    }

    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_equality, &[(TokenKind::Amp, BinaryOp::BitAnd)])
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_relational, &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::NotEq)])
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(
            Self::parse_shift,
            &[(TokenKind::Lt, BinaryOp::Lt), (TokenKind::LtEq, BinaryOp::LtEq), (TokenKind::Gt, BinaryOp::Gt), (TokenKind::GtEq, BinaryOp::GtEq)],
        )
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_additive, &[(TokenKind::Shl, BinaryOp::Shl), (TokenKind::Shr, BinaryOp::Shr)])
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc(Self::parse_multiplicative, &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)])
    }

    // Level 12, plus ambiguity #3/#4: number-unit sequences and number/unit division.
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent | TokenKind::Mod => BinaryOp::Mod,
                TokenKind::Per => BinaryOp::Per,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = Span::new(left.span.start, right.span.end);
            left = Expr::new(ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span);
        }
        Ok(left)
    }

    fn parse_left_assoc(&mut self, next: fn(&mut Self) -> ParseResult<Expr>, ops: &[(TokenKind, BinaryOp)]) -> ParseResult<Expr> {
        let mut left = next(self)?;
        loop {
            let matched = ops.iter().find(|(k, _)| k == self.peek()).cloned();
            let Some((_, op)) = matched else { break };
            self.advance();
            let right = next(self)?;
            let span = Span::new(left.span.start, right.span.end);
            left = Expr::new(ExprKind::Binary { op, left: Box::new(left), right: Box::new(right) }, span);
        }
        Ok(left)
    }

    // Level 13: prefix unary, right-associative.
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            let start = self.peek_span();
            self.advance();
            let operand = self.parse_unary()?;
            let span = Span::new(start.start, operand.span.end);
            return Ok(Expr::new(ExprKind::Unary { op, operand: Box::new(operand) }, span));
        }
        self.parse_power()
    }

    // Level 14: exponent, right-associative.
    fn parse_power(&mut self) -> ParseResult<Expr> {
        let base = self.parse_postfix()?;
        if matches!(self.peek(), TokenKind::Caret) {
            self.advance();
            let exponent = self.parse_unary()?; // right-assoc: binds tighter than another `^`
            let span = Span::new(base.span.start, exponent.span.end);
            return Ok(Expr::new(ExprKind::Binary { op: BinaryOp::Pow, left: Box::new(base), right: Box::new(exponent) }, span));
        }
        Ok(base)
    }

    // Level 15: postfix factorial.
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_measured_primary()?;
        while matches!(self.peek(), TokenKind::Bang) {
            let end = self.peek_span().end;
            self.advance();
            let span = Span::new(expr.span.start, end);
            expr = Expr::new(ExprKind::Postfix { op: PostfixOp::Factorial, operand: Box::new(expr) }, span);
        }
        Ok(expr)
    }

    /// Parses `number`, then consumes following unit/identifier tokens
    /// according to the active strategy (ambiguities #1 and #3).
    fn parse_measured_primary(&mut self) -> ParseResult<Expr> {
        let primary = self.parse_primary()?;

        let is_number = matches!(primary.kind, ExprKind::NumericLiteral { .. });
        if !is_number {
            return Ok(primary);
        }

        // Ambiguity #1: `Split` prefers reading a bare trailing identifier
        // as a variable reference, combined by implicit multiplication,
        // leaving the unit reading to the `Merge` candidate — but only
        // when a catalog is available and doesn't already recognize the
        // identifier as a unit name. Without that check every "number
        // unit" pair in the language (`10 m`, `5 km`) would generate a
        // variable-multiplication rival that spec §4.3 Rule 1 always
        // scores higher than the unit reading, since it has zero unit
        // terms; the catalog lookup keeps ambiguity #1 scoped to genuinely
        // ambiguous identifiers instead. A `Degree` token has no
        // variable-name ambiguity, so it still falls through to the
        // unit-consuming loop below under either strategy.
        if self.strategy == Strategy::Split {
            if let TokenKind::Identifier(name) = self.peek().clone() {
                let is_catalog_unit = self.catalog.is_some_and(|c| c.unit_by_name(&name).is_some());
                if !is_catalog_unit {
                    let var_span = self.peek_span();
                    self.advance();
                    let var = Expr::new(ExprKind::VariableRef(name), var_span);
                    let span = Span::new(primary.span.start, var_span.end);
                    return Ok(Expr::new(ExprKind::Binary { op: BinaryOp::Mul, left: Box::new(primary), right: Box::new(var) }, span));
                }
            }
        }

        let mut components = Vec::new();
        let mut current = primary.clone();
        loop {
            match self.peek().clone() {
                TokenKind::Identifier(_) | TokenKind::Degree => {
                    let unit = self.parse_unit_expr()?;
                    let magnitude = match &current.kind {
                        ExprKind::NumericLiteral { value, .. } => *value,
                        _ => break,
                    };
                    components.push(MeasuredLiteralValue { magnitude, unit: unit.clone() });
                    let span = Span::new(current.span.start, self.tokens[self.pos].span.start);
                    current = Expr::new(ExprKind::MeasuredLiteral { magnitude: Box::new(primary.clone()), unit }, span);

                    if self.strategy == Strategy::Merge {
                        if let TokenKind::Number { .. } = self.peek() {
                            let next_num = self.parse_primary()?;
                            current = next_num;
                            continue;
                        }
                    }
                    break;
                }
                _ => break,
            }
        }

        if components.len() > 1 {
            let span = Span::new(primary.span.start, self.tokens[self.pos].span.start);
            return Ok(Expr::new(ExprKind::CompositeLiteral(components), span));
        }
        if components.len() == 1 {
            let span = Span::new(primary.span.start, self.tokens[self.pos].span.start);
            return Ok(Expr::new(
                ExprKind::MeasuredLiteral { magnitude: Box::new(primary), unit: components.into_iter().next().unwrap().unit },
                span,
            ));
        }

        Ok(primary)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.peek_span();
        match self.peek().clone() {
            TokenKind::Number { value, base, raw } => {
                self.advance();
                Ok(Expr::new(ExprKind::NumericLiteral { value, base: convert_base(base), raw }, span))
            }
            TokenKind::CurrencyAdjacent(symbol) => {
                self.advance();
                let amount = self.parse_primary()?;
                let amt_span = Span::new(span.start, amount.span.end);
                Ok(Expr::new(
                    ExprKind::MeasuredLiteral { magnitude: Box::new(amount), unit: UnitExpr::single(symbol) },
                    amt_span,
                ))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(ExprKind::BooleanLiteral(true), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(ExprKind::BooleanLiteral(false), span))
            }
            TokenKind::Constant(name) => {
                self.advance();
                Ok(Expr::new(ExprKind::ConstantRef(name), span))
            }
            TokenKind::Now => {
                self.advance();
                Ok(Expr::new(ExprKind::KeywordInstant(KeywordInstant::Now), span))
            }
            TokenKind::Today => {
                self.advance();
                Ok(Expr::new(ExprKind::KeywordInstant(KeywordInstant::Today), span))
            }
            TokenKind::Yesterday => {
                self.advance();
                Ok(Expr::new(ExprKind::KeywordInstant(KeywordInstant::Yesterday), span))
            }
            TokenKind::Tomorrow => {
                self.advance();
                Ok(Expr::new(ExprKind::KeywordInstant(KeywordInstant::Tomorrow), span))
            }
            TokenKind::PlainTime { hour, minute, second } => {
                self.advance();
                Ok(Expr::new(ExprKind::PlainTimeLiteral { hour, minute, second, millisecond: 0 }, span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_ternary()?;
                self.expect(&TokenKind::RParen)?;
                let end = self.tokens[self.pos.saturating_sub(1)].span.end;
                Ok(Expr::new(ExprKind::Grouped(Box::new(inner)), Span::new(span.start, end)))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if matches!(self.peek(), TokenKind::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if !matches!(self.peek(), TokenKind::RParen) {
                        loop {
                            args.push(self.parse_ternary()?);
                            if matches!(self.peek(), TokenKind::Comma) {
                                self.advance();
                                continue;
                            }
                            break;
                        }
                    }
                    self.expect(&TokenKind::RParen)?;
                    let end = self.tokens[self.pos.saturating_sub(1)].span.end;
                    return Ok(Expr::new(ExprKind::FunctionCall { name, args }, Span::new(span.start, end)));
                }
                if matches!(self.peek(), TokenKind::Ago) && self.strategy == Strategy::Split {
                    self.advance();
                    let amount = name.parse::<f64>().unwrap_or(1.0);
                    return Ok(Expr::new(ExprKind::RelativeInstant { amount, unit: "unit".into(), direction: RelativeDirection::Ago }, span));
                }
                Ok(Expr::new(ExprKind::VariableRef(name), span))
            }
            other => Err(SpannedError::new(format!("unexpected token {other:?}"), span)),
        }
    }
}

fn convert_base(b: NumericBase) -> AstNumericBase {
    match b {
        NumericBase::Decimal => AstNumericBase::Decimal,
        NumericBase::Hex => AstNumericBase::Hex,
        NumericBase::Octal => AstNumericBase::Octal,
        NumericBase::Binary => AstNumericBase::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse_one(src: &str) -> Expr {
        let tokens = Lexer::new(src).tokenize();
        Parser::new(&tokens, Strategy::Merge).parse_expr_to_end().unwrap()
    }

    #[test]
    fn parses_simple_addition() {
        let expr = parse_one("1 + 2");
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn parses_measured_literal() {
        let expr = parse_one("5 meters");
        assert!(matches!(expr.kind, ExprKind::MeasuredLiteral { .. }));
    }

    #[test]
    fn parses_composite_literal() {
        let expr = parse_one("5 ft 3 in");
        assert!(matches!(expr.kind, ExprKind::CompositeLiteral(ref parts) if parts.len() == 2));
    }

    #[test]
    fn parses_conversion_chain() {
        let expr = parse_one("5 km to m");
        assert!(matches!(expr.kind, ExprKind::Conversion { .. }));
    }

    #[test]
    fn split_strategy_treats_trailing_identifier_as_implicit_multiplication() {
        let tokens = Lexer::new("5 x").tokenize();
        let expr = Parser::new(&tokens, Strategy::Split).parse_expr_to_end().unwrap();
        match expr.kind {
            ExprKind::Binary { op: BinaryOp::Mul, ref left, ref right } => {
                assert!(matches!(left.kind, ExprKind::NumericLiteral { .. }));
                assert!(matches!(right.kind, ExprKind::VariableRef(ref name) if name == "x"));
            }
            other => panic!("expected implicit multiplication, got {other:?}"),
        }
    }

    #[test]
    fn merge_strategy_still_treats_trailing_identifier_as_a_unit() {
        let tokens = Lexer::new("5 x").tokenize();
        let expr = Parser::new(&tokens, Strategy::Merge).parse_expr_to_end().unwrap();
        assert!(matches!(expr.kind, ExprKind::MeasuredLiteral { .. }));
    }

    #[test]
    fn division_of_two_measured_quantities_parses_under_both_strategies() {
        for strategy in [Strategy::Merge, Strategy::Split] {
            let tokens = Lexer::new("10 m / 5 m").tokenize();
            let expr = Parser::new(&tokens, strategy).parse_expr_to_end().unwrap();
            assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::Div, .. }), "{strategy:?} candidate: {expr:?}");
        }
    }

    #[test]
    fn division_of_a_measured_quantity_by_a_plain_number_parses() {
        let expr = parse_one("10 m / 2");
        assert!(matches!(expr.kind, ExprKind::Binary { op: BinaryOp::Div, .. }));
    }

    #[test]
    fn unit_with_denominator_still_parses_as_a_single_unit_expr() {
        let expr = parse_one("10 m / s");
        match expr.kind {
            ExprKind::MeasuredLiteral { ref unit, .. } => {
                assert_eq!(unit.numerator, vec![("m".to_string(), 1)]);
                assert_eq!(unit.denominator, vec![("s".to_string(), 1)]);
            }
            other => panic!("expected a derived-unit measured literal, got {other:?}"),
        }
    }

    #[test]
    fn parses_ternary_conditional() {
        let expr = parse_one("if true then 1 else 2");
        assert!(matches!(expr.kind, ExprKind::Conditional { .. }));
    }

    #[test]
    fn parses_function_call() {
        let expr = parse_one("sqrt(4)");
        assert!(matches!(expr.kind, ExprKind::FunctionCall { ref name, ref args } if name == "sqrt" && args.len() == 1));
    }
}
