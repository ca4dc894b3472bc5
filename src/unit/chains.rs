//! Dependency and processing-chain mutators for units.

use super::Unit;
use crate::filters::Filter;
use crate::validators::{self, Validator};

impl Unit {
    /// Record that another unit must be satisfied before this one may run.
    ///
    /// The name is trimmed and the list kept sorted for deterministic
    /// display. Idempotent; self-references and blank names are ignored.
    pub fn add_dependency(&mut self, name: &str) -> &mut Self {
        let name = name.trim();
        if name.is_empty() || name == self.name {
            return self;
        }
        if !self.dependencies.iter().any(|d| d == name) {
            self.dependencies.push(name.to_string());
            self.dependencies.sort();
        }
        self
    }

    /// Remove a dependency. No-op when absent.
    pub fn remove_dependency(&mut self, name: &str) -> &mut Self {
        let name = name.trim();
        self.dependencies.retain(|d| d != name);
        self
    }

    /// Append a filter to the chain. Duplicate handles (same identity) are
    /// ignored.
    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
        self
    }

    /// Remove a filter by identity. No-op when absent.
    pub fn remove_filter(&mut self, filter: &Filter) -> &mut Self {
        self.filters.retain(|f| f != filter);
        self
    }

    /// Append a validator to the chain. Duplicate handles are ignored.
    pub fn add_validator(&mut self, validator: Validator) -> &mut Self {
        if !self.validators.contains(&validator) {
            self.validators.push(validator);
        }
        self
    }

    /// Remove a validator by identity. No-op when absent.
    pub fn remove_validator(&mut self, validator: &Validator) -> &mut Self {
        self.validators.retain(|v| v != validator);
        self
    }

    /// Allow or reject blank answers by removing or re-adding the seeded
    /// blank-rejection validator. Blank answers are rejected by default.
    pub fn set_allow_blank(&mut self, allow: bool) -> &mut Self {
        if allow {
            self.remove_validator(&validators::non_blank())
        } else {
            self.add_validator(validators::non_blank())
        }
    }
}
