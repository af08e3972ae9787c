//! Continuation registry
//!
//! Maps pass names to the rule that halts assembly at that pass. The caller
//! fills it before building; assembly drains it, one lookup per candidate.

use std::collections::HashMap;

use stencil_config::ContinuationRule;

#[derive(Debug, Clone, Default)]
pub struct ContinuationRegistry {
    rules: HashMap<String, ContinuationRule>,
}

impl ContinuationRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, replacing any earlier rule for the same pass
    pub fn insert(&mut self, pass_name: impl Into<String>, rule: ContinuationRule) {
        self.rules.insert(pass_name.into(), rule);
    }

    /// Remove and return the rule registered for `pass_name`
    pub fn take(&mut self, pass_name: &str) -> Option<ContinuationRule> {
        self.rules.remove(pass_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Registered pass names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    /// `{A=STOP_AFTER_PASS, B=STOP_BEFORE_PASS}`, sorted by name
    pub fn describe(&self) -> String {
        let entries: Vec<String> = self
            .names()
            .into_iter()
            .map(|name| {
                let rule = self.rules[&name];
                format!("{name}={rule}")
            })
            .collect();
        format!("{{{}}}", entries.join(", "))
    }
}

impl<S: Into<String>> FromIterator<(S, ContinuationRule)> for ContinuationRegistry {
    fn from_iter<I: IntoIterator<Item = (S, ContinuationRule)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (name, rule) in iter {
            registry.insert(name, rule);
        }
        registry
    }
}
