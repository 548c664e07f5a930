//! Per-document variable bindings (spec §5). A document's `Environment`
//! accumulates one binding per assignment line, evaluated top to bottom; a
//! line that merely references a variable never mutates it.
//!
//! [`Environment::trial_clone`] gives the resolver's catalog-aware scoring
//! (spec §4.3 rule 3) a non-mutating view of what's bound so far without
//! letting a discarded candidate's evaluation leak a binding into the real
//! document state.

use std::collections::HashMap;

use calc_value::Value;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn bound_names(&self) -> impl Iterator<Item = &String> {
        self.bindings.keys()
    }

    /// A cheap snapshot for speculative evaluation (e.g. scoring a
    /// candidate parse) that must not be allowed to mutate the document's
    /// real bindings.
    pub fn trial_clone(&self) -> Environment {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_round_trip() {
        let mut env = Environment::new();
        env.bind("x", Value::Number(5.0));
        assert_eq!(env.get("x"), Some(&Value::Number(5.0)));
        assert!(env.is_bound("x"));
        assert!(!env.is_bound("y"));
    }

    #[test]
    fn trial_clone_does_not_affect_original() {
        let mut env = Environment::new();
        env.bind("x", Value::Number(1.0));
        let mut trial = env.trial_clone();
        trial.bind("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
    }
}
