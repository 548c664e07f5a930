//! Ambiguity resolver (spec §4.3): pure pruning and scoring over the
//! candidate trees a [`super::Parser`] produces for one line.
//!
//! Pruning and scoring are kept as free functions over plain data, each
//! taking a `&dyn Catalog` and the document's currently bound variable
//! names, so they can be unit tested independently of tokenizing.

use std::collections::HashSet;

use calc_catalog::Catalog;

use crate::ast::{ConversionTarget, Expr, ExprKind};

#[derive(Debug, Clone)]
pub struct Candidate {
    pub expr: Expr,
    pub order: usize,
}

/// Discards structurally invalid candidates per spec §4.3's three pruning
/// criteria:
///
/// (a) it references an identifier as a variable that is not in the
///     current environment *and* the same identifier has no plausible unit
///     interpretation anywhere in the catalog;
/// (b) a unit expression has a dimensionally-impossible construction the
///     evaluator would reject unconditionally — here, a composite
///     measurement (`5 ft 3 in`) whose parts resolve to different
///     dimensions when the catalog can resolve all of them (spec §3's data
///     model invariant: "a composite measurement's components are all in
///     the same dimension"), or one whose magnitudes aren't in
///     monotonically decreasing order (the same invariant's
///     "non-negative-sign-consistent sum" requirement);
/// (c) a conversion target is structurally invalid for its source value
///     kind (e.g. `to ISO 8601` applied to a boolean), including an empty
///     composite target list.
pub fn prune(candidates: Vec<Candidate>, catalog: &dyn Catalog, defined_variables: &HashSet<String>) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| {
            !has_undefined_variable_without_unit(&c.expr, catalog, defined_variables)
                && !has_dimensionally_impossible_composite(&c.expr, catalog)
                && !has_invalid_conversion_target(&c.expr)
        })
        .collect()
}

/// Criterion (a): an identifier read as a variable reference that is
/// neither bound in the document nor resolvable as a catalog unit name.
fn has_undefined_variable_without_unit(expr: &Expr, catalog: &dyn Catalog, defined_variables: &HashSet<String>) -> bool {
    let own = match &expr.kind {
        ExprKind::VariableRef(name) => !defined_variables.contains(name.as_str()) && catalog.unit_by_name(name).is_none(),
        _ => false,
    };
    own || any_child(expr, |c| has_undefined_variable_without_unit(c, catalog, defined_variables))
}

/// Criterion (b): a composite measurement whose parts don't share one
/// dimension, or aren't in monotonically decreasing magnitude order —
/// only flagged when the catalog can resolve every part's unit, since an
/// unresolvable part means the catalog can't disambiguate.
fn has_dimensionally_impossible_composite(expr: &Expr, catalog: &dyn Catalog) -> bool {
    let own = if let ExprKind::CompositeLiteral(parts) = &expr.kind {
        let dims: Option<Vec<&str>> =
            parts.iter().map(|p| p.unit.numerator.first().and_then(|(name, _)| catalog.unit_by_name(name)).map(|u| u.dimension_id.as_str())).collect();
        let spans_multiple_dimensions = dims.is_some_and(|ds| ds.windows(2).any(|w| w[0] != w[1]));
        let magnitudes: Vec<f64> = parts.iter().map(|p| p.magnitude).collect();
        let non_monotonic = magnitudes.windows(2).any(|w| w[1] > w[0]);
        spans_multiple_dimensions || non_monotonic
    } else {
        false
    };
    own || any_child(expr, |c| has_dimensionally_impossible_composite(c, catalog))
}

/// Value kinds a conversion source can structurally be classified as,
/// without full type inference — enough to rule out nonsensical pairings
/// like converting a boolean literal to ISO 8601.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StructuralKind {
    Boolean,
    Numeric,
    DateTime,
}

fn classify_source(expr: &Expr) -> Option<StructuralKind> {
    match &expr.kind {
        ExprKind::BooleanLiteral(_) => Some(StructuralKind::Boolean),
        ExprKind::NumericLiteral { .. } | ExprKind::MeasuredLiteral { .. } | ExprKind::CompositeLiteral(_) | ExprKind::ConstantRef(_) => {
            Some(StructuralKind::Numeric)
        }
        ExprKind::PlainDateLiteral { .. }
        | ExprKind::PlainTimeLiteral { .. }
        | ExprKind::PlainDateTimeLiteral { .. }
        | ExprKind::ZonedDateTimeLiteral { .. }
        | ExprKind::InstantLiteral(_)
        | ExprKind::KeywordInstant(_)
        | ExprKind::RelativeInstant { .. } => Some(StructuralKind::DateTime),
        ExprKind::Grouped(inner) => classify_source(inner),
        _ => None,
    }
}

fn format_kind(format: &crate::ast::PresentationFormat) -> StructuralKind {
    use crate::ast::PresentationFormat;
    match format {
        PresentationFormat::Iso8601 | PresentationFormat::Rfc9557 | PresentationFormat::Rfc2822 | PresentationFormat::Unix | PresentationFormat::UnixMillis => {
            StructuralKind::DateTime
        }
        PresentationFormat::Base(_)
        | PresentationFormat::Fraction
        | PresentationFormat::Scientific(_)
        | PresentationFormat::Percentage
        | PresentationFormat::Ordinal
        | PresentationFormat::SigFigs(_)
        | PresentationFormat::Decimals(_) => StructuralKind::Numeric,
    }
}

/// Criterion (c): a conversion whose target can't possibly apply to its
/// source's structural kind, or whose composite target list is empty.
fn has_invalid_conversion_target(expr: &Expr) -> bool {
    let own = match &expr.kind {
        ExprKind::Conversion { source, target: ConversionTarget::Composite(list), .. } => list.is_empty() || mismatched_unit_target(source),
        ExprKind::Conversion { source, target: ConversionTarget::Unit(_), .. } => mismatched_unit_target(source),
        ExprKind::Conversion { source, target: ConversionTarget::Format(format), .. } => {
            classify_source(source).is_some_and(|kind| kind != format_kind(format))
        }
        _ => false,
    };
    own || any_child(expr, has_invalid_conversion_target)
}

/// A unit/composite-unit conversion target only makes sense for a numeric
/// source; boolean and date/time sources never convert to a unit.
fn mismatched_unit_target(source: &Expr) -> bool {
    matches!(classify_source(source), Some(StructuralKind::Boolean) | Some(StructuralKind::DateTime))
}

fn any_child(expr: &Expr, f: impl Fn(&Expr) -> bool + Copy) -> bool {
    children_of(expr).into_iter().any(f)
}

fn children_of(expr: &Expr) -> Vec<&Expr> {
    match &expr.kind {
        ExprKind::MeasuredLiteral { magnitude, .. } => vec![magnitude.as_ref()],
        ExprKind::PlainDateTimeLiteral { date, time } => vec![date.as_ref(), time.as_ref()],
        ExprKind::ZonedDateTimeLiteral { datetime, .. } => vec![datetime.as_ref()],
        ExprKind::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        ExprKind::Unary { operand, .. } => vec![operand.as_ref()],
        ExprKind::Postfix { operand, .. } => vec![operand.as_ref()],
        ExprKind::Conditional { cond, then_branch, else_branch } => vec![cond.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
        ExprKind::FunctionCall { args, .. } => args.iter().collect(),
        ExprKind::Conversion { source, .. } => vec![source.as_ref()],
        ExprKind::Grouped(inner) => vec![inner.as_ref()],
        _ => vec![],
    }
}

/// Computes a candidate's score per spec §4.3's five weighted rules.
/// Higher scores win; ties fall back to parser output order (the
/// candidate with the lower `order` value).
pub fn score(candidate: &Candidate, catalog: &dyn Catalog, defined_variables: &HashSet<String>) -> f64 {
    let expr = &candidate.expr;
    let total_units = expr.total_unit_terms();

    // Rule 1: fewer total unit terms scores higher (prefers the simpler
    // reading when a sequence of words could be one unit or several).
    let rule1 = 1000.0 / (1.0 + total_units as f64);

    // Rule 2: prefer unit names the catalog actually recognizes.
    let names = expr.all_unit_names();
    let rule2 = if names.is_empty() {
        500.0
    } else {
        let recognized = names.iter().filter(|n| catalog.unit_by_name(n).is_some()).count();
        500.0 * (recognized as f64 / names.len() as f64)
    };

    // Rule 3: among unit names the catalog does NOT recognize, prefer ones
    // that match a variable already bound in this document (they were
    // probably meant as variable references, not invented unit names).
    let unrecognized: Vec<&String> = names.iter().filter(|n| catalog.unit_by_name(n).is_none()).collect();
    let rule3 = if unrecognized.is_empty() {
        0.0
    } else {
        let bound = unrecognized.iter().filter(|n| defined_variables.contains(n.as_str())).count();
        300.0 * (bound as f64 / unrecognized.len() as f64)
    };

    // Rule 4: fewer total nodes scores higher (prefers the less convoluted
    // parse when both are otherwise equally plausible).
    let rule4 = 100.0 / (1.0 + expr.node_count() as f64);

    // Rule 5: a nonzero number of conversions is rewarded, decreasing with
    // how many are chained (a single conversion is the common case; long
    // chains are rarer and usually indicate an over-eager merge).
    let k = expr.conversion_count();
    let rule5 = if k >= 1 { 2000.0 / k as f64 } else { 0.0 };

    rule1 + rule2 + rule3 + rule4 + rule5
}

/// Applies prune, then score, then tie-break (first in parser output
/// order) to pick a single winning candidate for a line. Returns `None`
/// if pruning removes every candidate.
pub fn select(candidates: Vec<Candidate>, catalog: &dyn Catalog, defined_variables: &HashSet<String>) -> Option<Expr> {
    let survivors = prune(candidates, catalog, defined_variables);
    survivors
        .into_iter()
        .map(|c| {
            let s = score(&c, catalog, defined_variables);
            (c, s)
        })
        .fold(None, |best: Option<(Candidate, f64)>, (c, s)| match best {
            None => Some((c, s)),
            Some((bc, bs)) => {
                if s > bs || (s == bs && c.order < bc.order) {
                    Some((c, s))
                } else {
                    Some((bc, bs))
                }
            }
        })
        .map(|(c, _)| c.expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{MeasuredLiteralValue, NumericBase, UnitExpr};
    use calc_base::Span;
    use calc_catalog::BuiltinCatalog;

    fn leaf(n: f64) -> Expr {
        Expr::new(ExprKind::NumericLiteral { value: n, base: NumericBase::Decimal, raw: n.to_string() }, Span::new(0, 0))
    }

    #[test]
    fn prune_drops_undefined_variable_with_no_unit_interpretation() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let expr = Expr::new(ExprKind::VariableRef("zorpnorp".to_string()), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert!(prune(candidates, &catalog, &vars).is_empty());
    }

    #[test]
    fn prune_keeps_variable_that_is_bound() {
        let catalog = BuiltinCatalog::new();
        let mut vars = HashSet::new();
        vars.insert("x".to_string());
        let expr = Expr::new(ExprKind::VariableRef("x".to_string()), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert_eq!(prune(candidates, &catalog, &vars).len(), 1);
    }

    #[test]
    fn prune_keeps_unbound_identifier_that_is_a_catalog_unit() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let expr = Expr::new(ExprKind::VariableRef("meter".to_string()), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert_eq!(prune(candidates, &catalog, &vars).len(), 1);
    }

    #[test]
    fn prune_drops_composite_spanning_multiple_dimensions() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let parts = vec![
            MeasuredLiteralValue { magnitude: 5.0, unit: UnitExpr::single("meter") },
            MeasuredLiteralValue { magnitude: 3.0, unit: UnitExpr::single("second") },
        ];
        let expr = Expr::new(ExprKind::CompositeLiteral(parts), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert!(prune(candidates, &catalog, &vars).is_empty());
    }

    #[test]
    fn prune_drops_non_monotonic_composite() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let parts = vec![
            MeasuredLiteralValue { magnitude: 3.0, unit: UnitExpr::single("in") },
            MeasuredLiteralValue { magnitude: 5.0, unit: UnitExpr::single("ft") },
        ];
        let expr = Expr::new(ExprKind::CompositeLiteral(parts), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert!(prune(candidates, &catalog, &vars).is_empty());
    }

    #[test]
    fn prune_keeps_monotonic_composite() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let parts = vec![
            MeasuredLiteralValue { magnitude: 5.0, unit: UnitExpr::single("ft") },
            MeasuredLiteralValue { magnitude: 3.0, unit: UnitExpr::single("in") },
        ];
        let expr = Expr::new(ExprKind::CompositeLiteral(parts), Span::new(0, 0));
        let candidates = vec![Candidate { expr, order: 0 }];
        assert_eq!(prune(candidates, &catalog, &vars).len(), 1);
    }

    #[test]
    fn prune_drops_conversion_of_boolean_to_a_numeric_format() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let expr = Expr::new(
            ExprKind::Conversion {
                source: Box::new(Expr::new(ExprKind::BooleanLiteral(true), Span::new(0, 0))),
                operator: crate::ast::ConversionOp::To,
                target: ConversionTarget::Format(crate::ast::PresentationFormat::Percentage),
            },
            Span::new(0, 0),
        );
        let candidates = vec![Candidate { expr, order: 0 }];
        assert!(prune(candidates, &catalog, &vars).is_empty());
    }

    #[test]
    fn prune_drops_numeric_source_converted_to_a_datetime_format() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let expr = Expr::new(
            ExprKind::Conversion {
                source: Box::new(leaf(5.0)),
                operator: crate::ast::ConversionOp::To,
                target: ConversionTarget::Format(crate::ast::PresentationFormat::Iso8601),
            },
            Span::new(0, 0),
        );
        let candidates = vec![Candidate { expr, order: 0 }];
        assert!(prune(candidates, &catalog, &vars).is_empty());
    }

    #[test]
    fn prune_keeps_numeric_source_converted_to_a_numeric_format() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let expr = Expr::new(
            ExprKind::Conversion {
                source: Box::new(leaf(5.0)),
                operator: crate::ast::ConversionOp::To,
                target: ConversionTarget::Format(crate::ast::PresentationFormat::Percentage),
            },
            Span::new(0, 0),
        );
        let candidates = vec![Candidate { expr, order: 0 }];
        assert_eq!(prune(candidates, &catalog, &vars).len(), 1);
    }

    #[test]
    fn score_rewards_catalog_recognized_units() {
        let catalog = BuiltinCatalog::new();
        let recognized = Expr::new(
            ExprKind::MeasuredLiteral { magnitude: Box::new(leaf(5.0)), unit: UnitExpr::single("meter") },
            Span::new(0, 0),
        );
        let unrecognized = Expr::new(
            ExprKind::MeasuredLiteral { magnitude: Box::new(leaf(5.0)), unit: UnitExpr::single("zorpnorp") },
            Span::new(0, 0),
        );
        let vars = HashSet::new();
        let s1 = score(&Candidate { expr: recognized, order: 0 }, &catalog, &vars);
        let s2 = score(&Candidate { expr: unrecognized, order: 0 }, &catalog, &vars);
        assert!(s1 > s2);
    }

    #[test]
    fn score_rewards_variable_bound_unrecognized_units_over_unbound() {
        let catalog = BuiltinCatalog::new();
        let expr = Expr::new(
            ExprKind::MeasuredLiteral { magnitude: Box::new(leaf(5.0)), unit: UnitExpr::single("widgets") },
            Span::new(0, 0),
        );
        let mut bound = HashSet::new();
        bound.insert("widgets".to_string());
        let unbound = HashSet::new();
        let s_bound = score(&Candidate { expr: expr.clone(), order: 0 }, &catalog, &bound);
        let s_unbound = score(&Candidate { expr, order: 0 }, &catalog, &unbound);
        assert!(s_bound > s_unbound);
    }

    #[test]
    fn select_breaks_ties_by_parser_order() {
        let catalog = BuiltinCatalog::new();
        let vars = HashSet::new();
        let a = Candidate { expr: leaf(1.0), order: 0 };
        let b = Candidate { expr: leaf(1.0), order: 1 };
        let chosen = select(vec![b, a], &catalog, &vars).unwrap();
        assert_eq!(chosen, leaf(1.0));
    }
}
