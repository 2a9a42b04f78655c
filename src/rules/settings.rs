//! Settings shared by the lint rules.
//!
//! Each value resolves in order: rule options, then shared settings from the
//! config file, then the built-in defaults.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::parsers::json::message_file_path;

/// Per-rule overrides. Unset fields fall through to the shared settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub messages_directory: Option<String>,
    pub source_locale: Option<String>,
}

/// Fully resolved rule settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    pub messages_directory: String,
    pub source_locale: String,
}

impl RuleSettings {
    pub fn resolve(options: &RuleOptions, shared: Option<&Config>) -> Self {
        let defaults = Config::default();
        let shared = shared.unwrap_or(&defaults);

        Self {
            messages_directory: options
                .messages_directory
                .clone()
                .unwrap_or_else(|| shared.messages_directory.clone()),
            source_locale: options
                .source_locale
                .clone()
                .unwrap_or_else(|| shared.source_locale.clone()),
        }
    }

    /// The canonical document, relative to `root`.
    pub fn source_document(&self, root: &Path) -> PathBuf {
        message_file_path(&root.join(&self.messages_directory), &self.source_locale)
    }
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self::resolve(&RuleOptions::default(), None)
    }
}
