#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-core
//!
//! Document-level orchestrator (spec §6): parses and evaluates a whole
//! multi-line input, carrying the settings (§6.3) and exchange-rate
//! snapshot (§6.4) a document's lines share, and aggregating per-line
//! results and errors by phase (§7).
//!
//! ```
//! use calc_core::Orchestrator;
//!
//! let orchestrator = Orchestrator::new();
//! let result = orchestrator.calculate("x = 10 m\nx + 20 cm");
//! assert_eq!(result.lines[1].formatted.as_deref(), Some("10.2 m"));
//! ```

pub mod error;
pub mod line_result;
pub mod orchestrator;
pub mod settings;
pub mod snapshot;

pub use error::DocumentErrors;
pub use line_result::{LineKind, LineResult};
pub use orchestrator::{DocumentResult, Orchestrator};
pub use settings::Settings;
pub use snapshot::ExchangeRateSnapshot;
