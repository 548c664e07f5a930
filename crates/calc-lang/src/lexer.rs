//! Tokenizer (spec §4.1): a single pass over one logical line, producing a
//! flat token stream with source offsets. Deterministic, never rewrites;
//! an unrecognized character produces [`TokenKind::Unknown`] rather than
//! aborting, so the grammar parser can still emit a located error.

use std::iter::Peekable;
use std::str::CharIndices;

use calc_base::Span;

use crate::token::{NumericBase, Token, TokenKind};

const CURRENCY_SYMBOLS: &[char] = &['$', '£', '¥', '€'];

fn superscript_digit(c: char) -> Option<i8> {
    Some(match c {
        '⁰' => 0, '¹' => 1, '²' => 2, '³' => 3, '⁴' => 4,
        '⁵' => 5, '⁶' => 6, '⁷' => 7, '⁸' => 8, '⁹' => 9,
        _ => return None,
    })
}

pub struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer { src, chars: src.char_indices().peekable() }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_str(&self, from: usize, len: usize) -> &'a str {
        let end = (from + len).min(self.src.len());
        &self.src[from..end]
    }

    /// Tokenizes the entire line. Always ends with a single `Eof` token.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(&(start, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            let token = self.next_token(start, c);
            tokens.push(token);
        }
        let end = self.src.len();
        tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
        merge_keyword_phrases(tokens)
    }

    fn next_token(&mut self, start: usize, c: char) -> Token {
        if c == '#' {
            return self.lex_heading_or_hash(start);
        }
        if c.is_ascii_digit() {
            if let Some(tok) = self.try_lex_plain_time(start) {
                return tok;
            }
            return self.lex_number(start);
        }
        if CURRENCY_SYMBOLS.contains(&c) {
            self.chars.next();
            return Token::new(TokenKind::CurrencyAdjacent(c.to_string()), Span::new(start, start + c.len_utf8()));
        }
        if superscript_digit(c).is_some() || c == '⁻' {
            return self.lex_superscript(start);
        }
        if is_ident_start(c) {
            return self.lex_identifier(start);
        }
        if c == '"' {
            return self.lex_string(start);
        }
        self.lex_operator(start, c)
    }

    fn lex_heading_or_hash(&mut self, start: usize) -> Token {
        let mut level = 0u32;
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if c == '#' {
                level += 1;
                end = pos + 1;
                self.chars.next();
            } else {
                break;
            }
        }
        if level == 1 {
            Token::new(TokenKind::Hash, Span::new(start, end))
        } else {
            Token::new(TokenKind::HeadingMarker(level), Span::new(start, end))
        }
    }

    /// Greedy lookahead for `HH:MM(:SS)?`; falls back to a plain number if
    /// the digits don't fit the 24-hour range constraint (spec §4.1).
    fn try_lex_plain_time(&mut self, start: usize) -> Option<Token> {
        let rest = &self.src[start..];
        let bytes = rest.as_bytes();
        if bytes.len() < 5 {
            return None;
        }
        let is_digit = |b: u8| b.is_ascii_digit();
        if !(is_digit(bytes[0]) && is_digit(bytes[1]) && bytes[2] == b':' && is_digit(bytes[3]) && is_digit(bytes[4])) {
            return None;
        }
        let hour: u32 = rest[0..2].parse().ok()?;
        let minute: u32 = rest[3..5].parse().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        let mut consumed = 5;
        let mut second = 0u32;
        if rest.len() >= 8 && rest.as_bytes()[5] == b':' && is_digit(rest.as_bytes()[6]) && is_digit(rest.as_bytes()[7]) {
            let maybe_sec: u32 = rest[6..8].parse().ok()?;
            if maybe_sec <= 59 {
                second = maybe_sec;
                consumed = 8;
            }
        }
        if rest.as_bytes().get(consumed).is_some_and(|b| b.is_ascii_digit()) {
            return None;
        }
        for _ in 0..consumed {
            self.chars.next();
        }
        Some(Token::new(TokenKind::PlainTime { hour, minute, second }, Span::new(start, start + consumed)))
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let mut end = start;
        let mut base = NumericBase::Decimal;
        let rest = &self.src[start..];

        if rest.starts_with("0x") || rest.starts_with("0X") {
            base = NumericBase::Hex;
            self.advance_n(2);
            end += 2;
        } else if rest.starts_with("0o") || rest.starts_with("0O") {
            base = NumericBase::Octal;
            self.advance_n(2);
            end += 2;
        } else if rest.starts_with("0b") || rest.starts_with("0B") {
            base = NumericBase::Binary;
            self.advance_n(2);
            end += 2;
        }

        let digit_ok: fn(char) -> bool = match base {
            NumericBase::Decimal => |c| c.is_ascii_digit(),
            NumericBase::Hex => |c| c.is_ascii_hexdigit(),
            NumericBase::Octal => |c| ('0'..='7').contains(&c),
            NumericBase::Binary => |c| c == '0' || c == '1',
        };

        end = self.consume_digit_run(end, digit_ok);

        if base == NumericBase::Decimal {
            if self.peek_char() == Some('.') {
                let save = end;
                self.chars.next();
                let after_dot = self.consume_digit_run(save + 1, digit_ok);
                if after_dot > save + 1 {
                    end = after_dot;
                } else {
                    end = save;
                }
            }
            if matches!(self.peek_char(), Some('e') | Some('E')) {
                let mut offset = 1;
                let mut probe = self.src[end + 1..].chars();
                if let Some(sign) = probe.next() {
                    if sign == '+' || sign == '-' {
                        offset += 1;
                    }
                }
                let exp_start = end + offset;
                let exp_end = self.scan_digit_run(exp_start, digit_ok);
                if exp_end > exp_start {
                    for _ in 0..(exp_end - end) {
                        self.chars.next();
                    }
                    end = exp_end;
                }
            }
        }

        let raw = self.src[start..end].to_string();
        let value = parse_numeric(&raw, base).unwrap_or(f64::NAN);
        Token::new(TokenKind::Number { value, base, raw }, Span::new(start, end))
    }

    fn consume_digit_run(&mut self, mut pos: usize, digit_ok: fn(char) -> bool) -> usize {
        loop {
            match self.peek_char() {
                Some(c) if digit_ok(c) => {
                    pos += c.len_utf8();
                    self.chars.next();
                }
                Some('_') => {
                    let next_is_digit = self.src[pos + 1..].chars().next().map(digit_ok).unwrap_or(false);
                    if next_is_digit {
                        pos += 1;
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        pos
    }

    /// Non-consuming scan used to decide whether an `e`/`E` really starts
    /// an exponent before committing to consuming it.
    fn scan_digit_run(&self, mut pos: usize, digit_ok: fn(char) -> bool) -> usize {
        let chars = self.src[pos..].chars();
        for c in chars {
            if digit_ok(c) {
                pos += c.len_utf8();
            } else {
                break;
            }
        }
        pos
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.chars.next();
        }
    }

    fn lex_superscript(&mut self, start: usize) -> Token {
        let mut end = start;
        let mut negative = false;
        let mut digits = String::new();
        if self.peek_char() == Some('⁻') {
            negative = true;
            end += '⁻'.len_utf8();
            self.chars.next();
        }
        while let Some(c) = self.peek_char() {
            if let Some(d) = superscript_digit(c) {
                digits.push((b'0' + d as u8) as char);
                end += c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let magnitude: i32 = digits.parse().unwrap_or(0);
        let value = if negative { -magnitude } else { magnitude };
        Token::new(TokenKind::SuperscriptExponent(value), Span::new(start, end))
    }

    fn lex_identifier(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(c) = self.peek_char() {
            if is_ident_continue(c) {
                end += c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let word = &self.src[start..end];
        let span = Span::new(start, end);
        if let Some(constant) = constant_symbol(word) {
            return Token::new(TokenKind::Constant(constant.to_string()), span);
        }
        if let Some(kw) = TokenKind::keyword_from_identifier(word) {
            return Token::new(kw, span);
        }
        Token::new(TokenKind::Identifier(word.to_string()), span)
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.chars.next(); // opening quote
        let mut end = start + 1;
        let mut content = String::new();
        while let Some(c) = self.peek_char() {
            end += c.len_utf8();
            self.chars.next();
            if c == '"' {
                break;
            }
            content.push(c);
        }
        Token::new(TokenKind::StringLiteral(content), Span::new(start, end))
    }

    fn lex_operator(&mut self, start: usize, c: char) -> Token {
        let two = self.peek_str(start, 2);
        let (kind, len) = match two {
            "==" => (TokenKind::EqEq, 2),
            "!=" => (TokenKind::NotEq, 2),
            "<=" => (TokenKind::LtEq, 2),
            ">=" => (TokenKind::GtEq, 2),
            "<<" => (TokenKind::Shl, 2),
            ">>" => (TokenKind::Shr, 2),
            "&&" => (TokenKind::AndAnd, 2),
            "||" => (TokenKind::OrOr, 2),
            "->" => (TokenKind::Arrow, 2),
            "''" => (TokenKind::DoublePrime, 2),
            _ => match c {
                '→' => (TokenKind::Arrow, c.len_utf8()),
                '″' => (TokenKind::DoublePrime, c.len_utf8()),
                '+' => (TokenKind::Plus, 1),
                '-' => (TokenKind::Minus, 1),
                '*' | '·' | '×' => (TokenKind::Star, c.len_utf8()),
                '/' | '÷' => (TokenKind::Slash, c.len_utf8()),
                '^' => (TokenKind::Caret, 1),
                '!' => (TokenKind::Bang, 1),
                '~' => (TokenKind::Tilde, 1),
                '&' => (TokenKind::Amp, 1),
                '|' => (TokenKind::Pipe, 1),
                '(' => (TokenKind::LParen, 1),
                ')' => (TokenKind::RParen, 1),
                '[' => (TokenKind::LBracket, 1),
                ']' => (TokenKind::RBracket, 1),
                ',' => (TokenKind::Comma, 1),
                ':' => (TokenKind::Colon, 1),
                '.' => (TokenKind::Dot, 1),
                '=' => (TokenKind::Eq, 1),
                '%' => (TokenKind::Percent, 1),
                '‰' => (TokenKind::PerMille, c.len_utf8()),
                '\'' | '′' => (TokenKind::Prime, c.len_utf8()),
                '°' | 'º' | '˚' => (TokenKind::Degree, c.len_utf8()),
                '<' => (TokenKind::Lt, 1),
                '>' => (TokenKind::Gt, 1),
                other => {
                    self.chars.next();
                    return Token::new(TokenKind::Unknown(other), Span::new(start, start + other.len_utf8()));
                }
            },
        };
        let char_count = if len == 2 { 2 } else { 1 };
        for _ in 0..char_count {
            self.chars.next();
        }
        Token::new(kind, Span::new(start, start + len))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn constant_symbol(word: &str) -> Option<&'static str> {
    Some(match word {
        "π" => "pi",
        "φ" => "phi",
        "∞" => "infinity",
        "τ" => "tau",
        _ => return None,
    })
}

fn parse_numeric(raw: &str, base: NumericBase) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    match base {
        NumericBase::Decimal => cleaned.parse::<f64>().ok(),
        NumericBase::Hex => i64::from_str_radix(cleaned.trim_start_matches("0x").trim_start_matches("0X"), 16).ok().map(|v| v as f64),
        NumericBase::Octal => i64::from_str_radix(cleaned.trim_start_matches("0o").trim_start_matches("0O"), 8).ok().map(|v| v as f64),
        NumericBase::Binary => i64::from_str_radix(cleaned.trim_start_matches("0b").trim_start_matches("0B"), 2).ok().map(|v| v as f64),
    }
}

/// Second pass: merges adjacent identifier/number tokens that spell a
/// multi-word keyword phrase (spec §4.1) into a single token, preserving
/// the merged span.
fn merge_keyword_phrases(tokens: Vec<Token>) -> Vec<Token> {
    use TokenKind::*;

    let phrase_kind = |words: &[&str]| -> Option<TokenKind> {
        Some(match words {
            ["sig", "figs"] | ["significant", "figures"] => SigFigs,
            ["ISO", "8601"] => Iso8601,
            ["RFC", "9557"] => Rfc9557,
            ["RFC", "2822"] => Rfc2822,
            ["days", "of", "year"] => DaysOfYear,
            ["weeks", "of", "year"] => WeeksOfYear,
            _ => return None,
        })
    };

    let word_of = |t: &Token| -> Option<String> {
        match &t.kind {
            Identifier(w) => Some(w.clone()),
            Number { raw, .. } => Some(raw.clone()),
            _ => None,
        }
    };

    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let mut matched = None;
        for window in [3usize, 2usize] {
            if i + window > tokens.len() {
                continue;
            }
            let words: Vec<String> = tokens[i..i + window].iter().filter_map(word_of).collect();
            if words.len() != window {
                continue;
            }
            let refs: Vec<&str> = words.iter().map(String::as_str).collect();
            if let Some(kind) = phrase_kind(&refs) {
                let span = Span::new(tokens[i].span.start, tokens[i + window - 1].span.end);
                matched = Some((kind, span, window));
                break;
            }
        }
        if let Some((kind, span, window)) = matched {
            out.push(Token::new(kind, span));
            i += window;
        } else {
            out.push(tokens[i].clone());
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_decimal_and_hex_numbers() {
        assert!(matches!(kinds("42")[0], TokenKind::Number { base: NumericBase::Decimal, .. }));
        assert!(matches!(kinds("0xFF")[0], TokenKind::Number { base: NumericBase::Hex, value, .. } if value == 255.0));
        assert!(matches!(kinds("0b1010")[0], TokenKind::Number { base: NumericBase::Binary, value, .. } if value == 10.0));
    }

    #[test]
    fn underscore_separators_are_stripped() {
        let k = kinds("1_000_000");
        assert!(matches!(k[0], TokenKind::Number { value, .. } if value == 1_000_000.0));
    }

    #[test]
    fn scientific_notation_parses() {
        let k = kinds("3.14e-2");
        assert!(matches!(k[0], TokenKind::Number { value, .. } if (value - 0.0314).abs() < 1e-12));
    }

    #[test]
    fn plain_time_token_respects_24_hour_range() {
        assert!(matches!(kinds("14:30")[0], TokenKind::PlainTime { hour: 14, minute: 30, second: 0 }));
        let k = kinds("25:00");
        assert!(matches!(k[0], TokenKind::Number { .. }));
        assert_eq!(k[1], TokenKind::Colon);
    }

    #[test]
    fn currency_adjacent_symbol_is_its_own_token() {
        let k = kinds("$5");
        assert_eq!(k[0], TokenKind::CurrencyAdjacent("$".to_string()));
        assert!(matches!(k[1], TokenKind::Number { .. }));
    }

    #[test]
    fn two_character_operators_tokenize_as_one() {
        assert_eq!(kinds("<=")[0], TokenKind::LtEq);
        assert_eq!(kinds("==")[0], TokenKind::EqEq);
        assert_eq!(kinds("->")[0], TokenKind::Arrow);
    }

    #[test]
    fn superscript_exponent_with_leading_negative() {
        assert_eq!(kinds("⁻¹")[0], TokenKind::SuperscriptExponent(-1));
        assert_eq!(kinds("²")[0], TokenKind::SuperscriptExponent(2));
    }

    #[test]
    fn multi_word_keyword_phrases_merge() {
        assert_eq!(kinds("sig figs")[0], TokenKind::SigFigs);
        assert_eq!(kinds("ISO 8601")[0], TokenKind::Iso8601);
        assert_eq!(kinds("RFC 9557")[0], TokenKind::Rfc9557);
    }

    #[test]
    fn constant_symbols_recognized() {
        assert_eq!(kinds("π")[0], TokenKind::Constant("pi".to_string()));
    }

    #[test]
    fn unknown_character_is_recoverable() {
        let k = kinds("@");
        assert_eq!(k[0], TokenKind::Unknown('@'));
    }
}
