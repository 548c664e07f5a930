//! Normalized dimensional term lists (spec §4.4): a quantity's dimension is
//! represented as a sorted, zero-exponent-pruned list of `(dimension id,
//! signed exponent)` pairs, e.g. `m/s^2` is `[("length", 1), ("time", -2)]`.
//!
//! Two quantities add/subtract only when their term lists are identical;
//! multiplication and division combine term lists by summing exponents.

pub type Terms = Vec<(String, i32)>;

/// Sorts by dimension id and merges duplicate ids by summing their
/// exponents, dropping any that cancel to zero. The canonical form two
/// term lists are compared against for dimensional compatibility.
pub fn normalize(mut terms: Terms) -> Terms {
    terms.sort_by(|a, b| a.0.cmp(&b.0));
    let mut out: Terms = Vec::with_capacity(terms.len());
    for (id, exp) in terms {
        if let Some(last) = out.last_mut() {
            if last.0 == id {
                last.1 += exp;
                continue;
            }
        }
        out.push((id, exp));
    }
    out.retain(|(_, exp)| *exp != 0);
    out
}

pub fn single(dimension_id: impl Into<String>) -> Terms {
    normalize(vec![(dimension_id.into(), 1)])
}

pub fn dimensionless() -> Terms {
    Vec::new()
}

pub fn is_dimensionless(terms: &Terms) -> bool {
    terms.is_empty()
}

pub fn multiply(a: &Terms, b: &Terms) -> Terms {
    let mut combined = a.clone();
    combined.extend(b.iter().cloned());
    normalize(combined)
}

pub fn divide(a: &Terms, b: &Terms) -> Terms {
    let mut combined = a.clone();
    combined.extend(b.iter().map(|(id, exp)| (id.clone(), -exp)));
    normalize(combined)
}

pub fn pow(a: &Terms, exponent: i32) -> Terms {
    normalize(a.iter().map(|(id, exp)| (id.clone(), exp * exponent)).collect())
}

pub fn compatible(a: &Terms, b: &Terms) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_merges_and_drops_zero_exponents() {
        let terms = normalize(vec![("length".into(), 1), ("time".into(), -1), ("length".into(), -1)]);
        assert_eq!(terms, vec![("time".to_string(), -1)]);
    }

    #[test]
    fn multiply_combines_exponents() {
        let speed = single("length");
        let per_time = normalize(vec![("time".into(), -1)]);
        let combined = multiply(&speed, &per_time);
        assert_eq!(combined, vec![("length".to_string(), 1), ("time".to_string(), -1)]);
    }

    #[test]
    fn divide_is_inverse_of_multiply() {
        let a = single("mass");
        let b = single("mass");
        assert!(is_dimensionless(&divide(&a, &b)));
    }

    #[test]
    fn pow_scales_all_exponents() {
        let length = single("length");
        let area = pow(&length, 2);
        assert_eq!(area, vec![("length".to_string(), 2)]);
    }

    #[test]
    fn compatible_requires_identical_term_lists() {
        assert!(compatible(&single("length"), &single("length")));
        assert!(!compatible(&single("length"), &single("mass")));
    }
}
