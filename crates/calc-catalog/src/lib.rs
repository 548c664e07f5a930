#![cfg_attr(docsrs, feature(doc_cfg))]

//! # calc-catalog
//!
//! Read-only lookup of units, currencies, timezones, constants, and math
//! functions. This crate defines the contract ([`Catalog`]) the rest of
//! the workspace is written against plus one conforming in-memory
//! implementation ([`BuiltinCatalog`]); loading a fuller data bundle is a
//! concern for whoever assembles the final application.
//!
//! ```
//! use calc_catalog::{BuiltinCatalog, Catalog};
//!
//! let catalog = BuiltinCatalog::new();
//! let km = catalog.unit_by_name("km").unwrap();
//! assert_eq!(km.id, "kilometer");
//! ```

pub mod builtin;
pub mod catalog;
pub mod types;

pub use builtin::BuiltinCatalog;
pub use catalog::Catalog;
pub use types::{dimension, AmbiguousCurrencies, Arity, Constant, Currency, MathFunction, Unit, UnitName};
