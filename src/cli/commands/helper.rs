//! Pipeline shared by every mode: configuration, file discovery, parsing,
//! resolution and reconciliation.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::Arguments,
    config::{Config, ConfigLoadResult, load_config},
    core::{
        KeyUsage, SourceLocation,
        file_scanner::{ScanOptions, scan_files},
        parsers::json::{MessageDocument, message_file_path},
        project::Project,
        reconcile::{KeyDiff, reconcile},
        resolve::{Resolution, Resolver},
    },
    issues::{DynamicKeyIssue, Issue, MissingKeyIssue, ParseErrorIssue, Severity, UnusedKeyIssue},
};

/// Source root and the effective configuration.
pub struct Workspace {
    pub config: Config,
    pub root: PathBuf,
}

impl Workspace {
    /// Load configuration. CLI flags override the config file.
    pub fn load(args: &Arguments) -> Result<Self> {
        let root = args.source_root.clone();
        if !root.is_dir() {
            bail!("Source root '{}' is not a directory", root.display());
        }

        let ConfigLoadResult {
            mut config,
            from_file,
        } = load_config(&root)?;
        if let Some(directory) = &args.directory {
            config.messages_directory = directory.clone();
        }
        if let Some(locale) = &args.source_locale {
            config.source_locale = locale.clone();
        }
        debug!(
            from_file,
            messages_directory = %config.messages_directory,
            source_locale = %config.source_locale,
            "configuration loaded"
        );

        Ok(Self { config, root })
    }

    pub fn messages_dir(&self) -> PathBuf {
        self.root.join(&self.config.messages_directory)
    }

    pub fn source_document_path(&self) -> PathBuf {
        message_file_path(&self.messages_dir(), &self.config.source_locale)
    }

    /// The canonical document. Its absence is fatal for check and fix, which
    /// open it before any source file is parsed.
    pub fn load_source_document(&self) -> Result<MessageDocument> {
        let path = self.source_document_path();
        MessageDocument::open(&path)
            .with_context(|| format!("Cannot load source locale '{}'", self.config.source_locale))
    }

    /// Scan, parse and resolve every source file under the source root.
    pub fn analyze(self) -> Analysis {
        let base_dir = self.root.to_string_lossy();
        let scan = scan_files(&ScanOptions {
            base_dir: &base_dir,
            includes: &self.config.includes,
            ignores: &self.config.ignores,
            ignore_test_files: self.config.ignore_test_files,
        });

        let project = Project::load(scan.files);
        let resolution = Resolver::new(&project, &self.config.hooks).resolve();
        debug!(
            files = project.units().len(),
            used_keys = resolution.used_keys.len(),
            dynamic = resolution.dynamic_usages.len(),
            "resolution finished"
        );

        Analysis {
            workspace: self,
            project,
            resolution,
        }
    }
}

/// Parsed and resolved project.
pub struct Analysis {
    pub workspace: Workspace,
    pub project: Project,
    pub resolution: Resolution,
}

impl Analysis {
    pub fn parse_errors(&self) -> impl Iterator<Item = Issue> + '_ {
        self.project.parse_failures().iter().map(|failure| {
            Issue::ParseError(ParseErrorIssue {
                file_path: failure.file_path.clone(),
                error: failure.error.clone(),
            })
        })
    }

    /// Compare used keys with the canonical document.
    pub fn reconcile(&self, source: &MessageDocument) -> Findings {
        let diff = reconcile(&source.keys(), &self.resolution.used_keys);
        debug!(
            missing = diff.missing.len(),
            unused = diff.unused.len(),
            "keys reconciled"
        );

        let mut issues = missing_key_issues(&self.resolution.usages, &diff);
        issues.extend(
            self.resolution
                .dynamic_usages
                .iter()
                .cloned()
                .map(|usage| Issue::DynamicKey(DynamicKeyIssue::from(usage))),
        );

        Findings { diff, issues }
    }
}

/// Missing and dynamic issues of one run, plus the raw key diff.
pub struct Findings {
    pub diff: KeyDiff,
    pub issues: Vec<Issue>,
}

impl Findings {
    /// One informational issue per unused key, located in the source document.
    pub fn unused_issues(&self, source: &MessageDocument) -> Vec<Issue> {
        self.diff
            .unused
            .iter()
            .map(|key| {
                Issue::UnusedKey(UnusedKeyIssue {
                    context: source.context_for(key),
                })
            })
            .collect()
    }
}

/// One issue per missing key, at its first usage; other usages are listed.
fn missing_key_issues(usages: &[KeyUsage], diff: &KeyDiff) -> Vec<Issue> {
    let mut by_key: BTreeMap<&str, Vec<&KeyUsage>> = BTreeMap::new();
    for usage in usages {
        if diff.missing.contains(&usage.key) {
            by_key.entry(usage.key.as_str()).or_default().push(usage);
        }
    }

    by_key
        .into_iter()
        .filter_map(|(key, usages)| {
            let (first, rest) = usages.split_first()?;
            Some(Issue::MissingKey(MissingKeyIssue {
                context: first.context.clone(),
                key: key.to_string(),
                usages: rest
                    .iter()
                    .map(|usage| usage.context.location.clone())
                    .collect::<Vec<SourceLocation>>(),
            }))
        })
        .collect()
}

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    source_files_checked: usize,
    locale_files_checked: usize,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    CommandResult {
        summary,
        issues,
        error_count,
        parse_error_count,
        source_files_checked,
        locale_files_checked,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{Namespace, SourceContext};

    fn usage(line: usize, key: &str) -> KeyUsage {
        KeyUsage {
            context: SourceContext::new(SourceLocation::new("src/a.tsx", line, 3), ""),
            key: key.to_string(),
            namespace: Namespace::Default,
        }
    }

    #[test]
    fn test_missing_key_issues_aggregate_usages() {
        let usages = [usage(1, "a"), usage(2, "b"), usage(5, "a"), usage(9, "a")];
        let diff = KeyDiff {
            missing: BTreeSet::from(["a".to_string()]),
            unused: BTreeSet::new(),
        };

        let issues = missing_key_issues(&usages, &diff);
        assert_eq!(issues.len(), 1);
        let Issue::MissingKey(issue) = &issues[0] else {
            panic!("expected a missing key issue");
        };
        assert_eq!(issue.key, "a");
        assert_eq!(issue.context.line(), 1);
        assert_eq!(
            issue.usages,
            [
                SourceLocation::new("src/a.tsx", 5, 3),
                SourceLocation::new("src/a.tsx", 9, 3)
            ]
        );
    }

    #[test]
    fn test_finish_counts_errors() {
        let issues = missing_key_issues(
            &[usage(1, "a"), usage(2, "b")],
            &KeyDiff {
                missing: BTreeSet::from(["a".to_string(), "b".to_string()]),
                unused: BTreeSet::new(),
            },
        );
        let result = finish(CommandSummary::Check, issues, 1, 1);
        assert_eq!(result.error_count, 2);
        assert_eq!(result.parse_error_count, 0);
    }
}
