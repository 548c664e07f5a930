#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-eval
//!
//! A single-pass, post-order tree-walking evaluator over the calculator's
//! surface syntax, plus the runtime state a document carries across its
//! lines: variable bindings and the currently loaded exchange-rate
//! snapshot.
//!
//! ```
//! use calc_catalog::BuiltinCatalog;
//! use calc_eval::{Environment, Evaluator};
//! use calc_lang::{parse_line_candidates, Strategy};
//! use calc_lang::lexer::Lexer;
//!
//! let catalog = BuiltinCatalog::new();
//! let mut env = Environment::new();
//! let evaluator = Evaluator::new(&catalog);
//!
//! let tokens = Lexer::new("2 + 2").tokenize();
//! let (line, _candidates, _errors) = parse_line_candidates(&tokens, &catalog);
//! let result = evaluator.evaluate_line(&line.unwrap(), &mut env);
//! assert_eq!(result, Some(calc_value::Value::Number(4.0)));
//! ```

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod unit_resolve;

pub use environment::Environment;
pub use error::{EvalError, TypeError};
pub use evaluator::{AngleUnit, Evaluator};
pub use unit_resolve::{resolve_unit_expr, ResolvedUnit};
