#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-base
//!
//! Pure structural atoms shared across the calc workspace.
//!
//! This crate provides the foundational types used by the tokenizer,
//! parser, evaluator, and formatter:
//!
//! - [`Span`] — Source location tracking (byte offsets)
//! - [`SpannedError`]/[`Result`] — Errors with source positions
//!
//! # Design Principles
//!
//! This crate has **no knowledge of units, currencies, or dates**. It
//! provides only generic, reusable infrastructure that the domain crates
//! build upon.
//!
//! # Example
//!
//! ```
//! use calc_base::Span;
//!
//! let span = Span::new(0, 5);
//! assert_eq!(span.end - span.start, 5);
//! ```

pub mod span;
pub mod error;

pub use span::Span;
pub use error::{SpannedError, Result};
