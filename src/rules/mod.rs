//! Lint rules for keyscan.
//!
//! Each rule looks at one source file at a time and reports per-occurrence
//! issues, using the project-wide `Resolution` as input.
//!
//! ## Module Structure
//!
//! - `settings`: Rule option resolution (options, shared config, defaults)
//! - `dynamic_key`: Keys or namespaces that are not string literals
//! - `missing_key`: Keys used in code but absent from the source locale

use std::{path::Path, sync::Arc};

use enum_dispatch::enum_dispatch;

use crate::{
    config::Config,
    core::{key_cache::KeyCache, resolve::Resolution},
    issues::{Issue, Rule},
};

pub mod dynamic_key;
pub mod missing_key;
pub mod settings;

pub use dynamic_key::DynamicKeyRule;
pub use missing_key::MissingKeyRule;
pub use settings::{RuleOptions, RuleSettings};

/// A check that can be run on a single source file.
#[enum_dispatch]
pub trait LintRule {
    fn rule(&self) -> Rule;

    fn check_file(&self, file_path: &str, resolution: &Resolution) -> Vec<Issue>;
}

#[enum_dispatch(LintRule)]
pub enum AnyRule {
    DynamicKeyRule,
    MissingKeyRule,
}

/// Every rule, configured from the shared settings.
pub fn all_rules(root: &Path, shared: Option<&Config>, cache: Arc<KeyCache>) -> Vec<AnyRule> {
    let settings = RuleSettings::resolve(&RuleOptions::default(), shared);
    vec![
        DynamicKeyRule::new().into(),
        MissingKeyRule::new(settings, root, cache).into(),
    ]
}

/// Run `rules` on one file, issues sorted by location.
pub fn lint_file(rules: &[AnyRule], file_path: &str, resolution: &Resolution) -> Vec<Issue> {
    let mut issues: Vec<Issue> = rules
        .iter()
        .flat_map(|rule| rule.check_file(file_path, resolution))
        .collect();
    issues.sort();
    issues
}
