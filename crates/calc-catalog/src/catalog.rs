//! The `Catalog` trait: the read-only contract the rest of the workspace
//! consumes (spec §6.1). Loading the underlying data bundle is out of
//! scope for this crate — [`BuiltinCatalog`][crate::builtin::BuiltinCatalog]
//! is one conforming, in-memory implementation.

use crate::types::{AmbiguousCurrencies, Constant, Currency, MathFunction, Unit};

/// Read-only lookup of units, currencies, timezones, constants, and math
/// functions. A single instance is shared across an orchestrator's
/// lifetime (spec §5); nothing here ever mutates the catalog.
pub trait Catalog {
    fn unit_by_id(&self, id: &str) -> Option<&Unit>;

    /// Case-sensitive exact match first, falling back to a case-insensitive
    /// match on the singular/plural/symbol display forms (spec §6.1).
    fn unit_by_name(&self, name: &str) -> Option<&Unit>;

    fn currency_by_code(&self, code: &str) -> Option<&Currency>;

    fn all_ambiguous_currencies(&self) -> &AmbiguousCurrencies;

    /// Resolves an IANA id, city alias, or short abbreviation to a
    /// canonical IANA identifier.
    fn resolve_timezone(&self, name: &str) -> Option<&str>;

    fn constants(&self) -> &[Constant];

    fn math_function(&self, name: &str) -> Option<MathFunction>;

    /// True when `symbol` (e.g. `"$"`) is a catalog-declared ambiguous
    /// currency symbol rather than a code.
    fn is_ambiguous_currency_symbol(&self, symbol: &str) -> bool {
        let amb = self.all_ambiguous_currencies();
        amb.symbol_adjacent.iter().any(|s| s == symbol) || amb.symbol_spaced.iter().any(|s| s == symbol)
    }
}
