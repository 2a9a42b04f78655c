//! Dynamic translation key detection rule.
//!
//! Flags translator calls whose key (or hook namespace) is not a string
//! literal, so the key cannot be checked against the message document.

use crate::{
    core::resolve::Resolution,
    issues::{DynamicKeyIssue, Issue, Rule},
    rules::LintRule,
};

#[derive(Debug, Clone, Default)]
pub struct DynamicKeyRule;

impl DynamicKeyRule {
    pub fn new() -> Self {
        Self
    }
}

impl LintRule for DynamicKeyRule {
    fn rule(&self) -> Rule {
        Rule::DynamicKey
    }

    fn check_file(&self, file_path: &str, resolution: &Resolution) -> Vec<Issue> {
        check_dynamic_keys(file_path, resolution)
            .into_iter()
            .map(Issue::DynamicKey)
            .collect()
    }
}

/// One issue per dynamic usage in `file_path`, in source order.
pub fn check_dynamic_keys(file_path: &str, resolution: &Resolution) -> Vec<DynamicKeyIssue> {
    resolution
        .dynamic_usages_in(file_path)
        .cloned()
        .map(DynamicKeyIssue::from)
        .collect()
}
