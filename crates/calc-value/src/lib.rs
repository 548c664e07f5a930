#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-value
//!
//! The runtime value model: dimensional algebra over catalog units,
//! unit and currency conversion, and proleptic Gregorian calendar
//! arithmetic (spec §3.1, §4.4-§4.7).
//!
//! This crate has no notion of syntax — it never sees a token or an AST
//! node. `calc-eval` is the only consumer that bridges `calc-lang`'s parsed
//! trees to the [`Value`] variants and operations defined here.
//!
//! ```
//! use calc_value::{dimension, Value};
//!
//! // A kilometer quantity's magnitude is always expressed canonically
//! // (meters); only the display unit id changes on conversion.
//! let result = Value::Quantity { magnitude: 5000.0, unit_id: "meter".into(), dimension: dimension::single("length") };
//! assert!(matches!(result, Value::Quantity { magnitude, .. } if magnitude == 5000.0));
//! ```

pub mod calendar;
pub mod currency;
pub mod dimension;
pub mod error;
pub mod format_spec;
pub mod value;

pub use calendar::{Duration, PlainDate, PlainDateTime, PlainTime, ZonedDateTime};
pub use error::{AmbiguousCurrencyError, CurrencyError, DateTimeError, RuntimeError};
pub use format_spec::PresentationFormat;
pub use value::Value;
