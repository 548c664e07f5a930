#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-lang
//!
//! Surface syntax front end for the calculator pipeline: tokenizer,
//! grammar parser, and ambiguity resolver.
//!
//! ## Pipeline
//!
//! 1. **Lexer** ([`lexer`]) tokenizes one input line into a [`token::Token`]
//!    stream, handling numeric literals in four bases, plain times,
//!    currency-adjacent amounts, constant symbols, and multi-word keyword
//!    phrases such as `sig figs` or `ISO 8601`.
//!
//! 2. **Parser** ([`parser`]) classifies the line (`heading`, `empty`,
//!    `assignment`, `expression`) and runs a 16-level precedence-climbing
//!    recursive descent over the token stream twice, once per disambiguation
//!    strategy, to produce the candidate [`ast::Expr`] trees the grammar
//!    allows at that line.
//!
//! 3. **Resolver** ([`parser::resolver`]) prunes structurally invalid
//!    candidates and scores the survivors against catalog and
//!    variable-binding context to select the single tree that the
//!    evaluator downstream will run.
//!
//! Everything in this crate operates purely on syntax: it has no notion of
//! runtime values, unit conversion factors, or evaluation order. Those
//! belong to `calc-value` and `calc-eval`.
//!
//! ```
//! use calc_lang::lexer::Lexer;
//! use calc_lang::parser::{Parser, Strategy};
//!
//! let tokens = Lexer::new("5 km to m").tokenize();
//! let expr = Parser::new(&tokens, Strategy::Merge).parse_expr_to_end().unwrap();
//! assert!(matches!(expr.kind, calc_lang::ast::ExprKind::Conversion { .. }));
//! ```

pub use calc_base::Span;

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Expr, ExprKind, Line};
pub use parser::{parse_line_candidates, Parser, Strategy};
pub use token::{Token, TokenKind};
