//! Resolves a surface [`UnitExpr`] (possibly multi-word, possibly derived)
//! to the canonical-conversion factor/offset pair and dimension term list
//! the evaluator needs (spec §4.4). A name the catalog doesn't recognize is
//! treated as a user-defined unit in its own singleton dimension (factor 1,
//! no offset) rather than an error — the resolver already prefers readings
//! where such names match a bound variable (spec §4.3 rule 3); evaluation
//! itself stays permissive.

use calc_catalog::Catalog;
use calc_value::dimension::{self, Terms};

pub struct ResolvedUnit {
    pub id: String,
    pub dimension: Terms,
    pub factor: f64,
    pub offset: f64,
}

impl ResolvedUnit {
    pub fn to_canonical(&self, raw: f64) -> f64 {
        raw * self.factor + self.offset
    }

    pub fn from_canonical(&self, canonical: f64) -> f64 {
        (canonical - self.offset) / self.factor
    }
}

fn resolve_term(catalog: &dyn Catalog, name: &str, exponent: i32) -> Result<ResolvedUnit, String> {
    if let Some(unit) = catalog.unit_by_name(name) {
        if exponent == 1 {
            return Ok(ResolvedUnit { id: unit.id.clone(), dimension: dimension::single(unit.dimension_id.clone()), factor: unit.factor_to_canonical, offset: unit.offset_to_canonical });
        }
        if unit.has_offset() {
            return Err(format!("`{}` cannot appear in a derived unit position", unit.id));
        }
        return Ok(ResolvedUnit {
            id: format!("{}^{}", unit.id, exponent),
            dimension: dimension::pow(&dimension::single(unit.dimension_id.clone()), exponent),
            factor: unit.factor_to_canonical.powi(exponent),
            offset: 0.0,
        });
    }
    let dim_id = format!("user:{name}");
    Ok(ResolvedUnit { id: name.to_string(), dimension: dimension::pow(&dimension::single(dim_id), exponent), factor: 1.0, offset: 0.0 })
}

pub fn resolve_unit_expr(catalog: &dyn Catalog, unit: &calc_lang::ast::UnitExpr) -> Result<ResolvedUnit, String> {
    if unit.numerator.len() == 1 && unit.denominator.is_empty() {
        let (name, exp) = &unit.numerator[0];
        return resolve_term(catalog, name, *exp);
    }

    let mut dimension = dimension::dimensionless();
    let mut factor = 1.0;
    let mut id_parts_num = Vec::new();
    for (name, exp) in &unit.numerator {
        let resolved = resolve_term(catalog, name, *exp)?;
        dimension = dimension::multiply(&dimension, &resolved.dimension);
        factor *= resolved.factor;
        id_parts_num.push(resolved.id);
    }
    let mut id_parts_den = Vec::new();
    for (name, exp) in &unit.denominator {
        let resolved = resolve_term(catalog, name, *exp)?;
        dimension = dimension::divide(&dimension, &resolved.dimension);
        factor /= resolved.factor;
        id_parts_den.push(resolved.id);
    }
    let id = if id_parts_den.is_empty() {
        id_parts_num.join("\u{b7}")
    } else {
        format!("{}/{}", id_parts_num.join("\u{b7}"), id_parts_den.join("\u{b7}"))
    };
    Ok(ResolvedUnit { id, dimension, factor, offset: 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_catalog::BuiltinCatalog;
    use calc_lang::ast::UnitExpr;

    #[test]
    fn resolves_catalog_unit() {
        let catalog = BuiltinCatalog::new();
        let resolved = resolve_unit_expr(&catalog, &UnitExpr::single("meter")).unwrap();
        assert_eq!(resolved.factor, 1.0);
    }

    #[test]
    fn unrecognized_unit_becomes_its_own_dimension() {
        let catalog = BuiltinCatalog::new();
        let resolved = resolve_unit_expr(&catalog, &UnitExpr::single("widgets")).unwrap();
        assert_eq!(resolved.dimension, vec![("user:widgets".to_string(), 1)]);
        assert_eq!(resolved.factor, 1.0);
    }

    #[test]
    fn derived_unit_combines_dimensions() {
        let catalog = BuiltinCatalog::new();
        let unit = UnitExpr { numerator: vec![("meter".to_string(), 1)], denominator: vec![("second".to_string(), 1)] };
        let resolved = resolve_unit_expr(&catalog, &unit).unwrap();
        assert_eq!(resolved.dimension, vec![("length".to_string(), 1), ("time".to_string(), -1)]);
    }
}
