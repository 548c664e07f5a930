//! calc-cli
//!
//! Command-line front end for the line-oriented calculator. Reads a
//! document, drives it through [`calc_core::Orchestrator`], and prints
//! each line's formatted result (or its error, rendered per spec §7's
//! three-phase prefixes).
//!
//! # Commands
//!
//! The binary takes an optional input file (stdin otherwise) plus flags
//! for config and exchange-rate overrides; see [`cli::run_cli`].

pub mod cli;
pub mod config;

pub use cli::run_cli;
