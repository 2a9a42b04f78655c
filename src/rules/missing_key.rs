//! Missing translation key detection rule.
//!
//! Detects translation keys used in a file but not defined in the source
//! locale document. The document is read through a shared `KeyCache`, so
//! linting many files parses it once per modification.

use std::{
    collections::BTreeSet,
    path::PathBuf,
    sync::Arc,
};

use tracing::warn;

use crate::{
    core::{KeyUsage, key_cache::KeyCache, resolve::Resolution},
    issues::{Issue, MissingKeyIssue, Rule},
    rules::{LintRule, settings::RuleSettings},
};

pub struct MissingKeyRule {
    settings: RuleSettings,
    root: PathBuf,
    cache: Arc<KeyCache>,
}

impl MissingKeyRule {
    pub fn new(settings: RuleSettings, root: impl Into<PathBuf>, cache: Arc<KeyCache>) -> Self {
        Self {
            settings,
            root: root.into(),
            cache,
        }
    }

    /// Keys defined in the source locale. An absent or unparsable document
    /// yields an empty set.
    fn defined_keys(&self) -> Arc<BTreeSet<String>> {
        let path = self.settings.source_document(&self.root);
        match self.cache.get_or_load(&path) {
            Ok(keys) => keys,
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{:#}", err), "source locale unavailable");
                Arc::new(BTreeSet::new())
            }
        }
    }
}

impl LintRule for MissingKeyRule {
    fn rule(&self) -> Rule {
        Rule::MissingKey
    }

    fn check_file(&self, file_path: &str, resolution: &Resolution) -> Vec<Issue> {
        let defined = self.defined_keys();
        check_missing_keys(resolution.usages_in(file_path), &defined)
            .into_iter()
            .map(Issue::MissingKey)
            .collect()
    }
}

/// One issue per usage whose key is not in `defined`.
pub fn check_missing_keys<'a>(
    usages: impl IntoIterator<Item = &'a KeyUsage>,
    defined: &BTreeSet<String>,
) -> Vec<MissingKeyIssue> {
    usages
        .into_iter()
        .filter(|usage| !defined.contains(&usage.key))
        .map(|usage| MissingKeyIssue {
            context: usage.context.clone(),
            key: usage.key.clone(),
            usages: Vec::new(),
        })
        .collect()
}
