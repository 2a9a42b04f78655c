//! Fix mode: delete unused keys from every locale file.
//!
//! Keys are unused when the source locale defines them and no code reaches
//! them. They are removed from each `{locale}.json` in the messages
//! directory, pruning objects left empty. A locale file that cannot be parsed
//! is reported and left untouched.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use super::{
    helper::{Workspace, finish},
    {CommandResult, CommandSummary, FileFix, FixSummary},
};
use crate::{
    cli::args::Arguments,
    core::parsers::json::{MessageDocument, locale_files},
    issues::{Issue, ParseErrorIssue},
};

pub fn fix(args: &Arguments) -> Result<CommandResult> {
    let workspace = Workspace::load(args)?;
    let source = workspace.load_source_document()?;
    let analysis = workspace.analyze();
    let findings = analysis.reconcile(&source);

    let unused_keys: Vec<String> = findings.diff.unused.iter().cloned().collect();
    let mut issues = findings.issues;
    issues.extend(analysis.parse_errors());

    let mut summary = FixSummary {
        unused_keys,
        files: Vec::new(),
    };
    let locale_paths = locale_files(&analysis.workspace.messages_dir())?;

    if !summary.unused_keys.is_empty() {
        for path in &locale_paths {
            match remove_keys(path, &summary.unused_keys) {
                Ok(Some(file_fix)) => summary.files.push(file_fix),
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), "skipping unparsable locale file");
                    issues.push(Issue::ParseError(ParseErrorIssue {
                        file_path: path.display().to_string(),
                        error: format!("{:#}", err),
                    }));
                }
            }
        }
    }

    Ok(finish(
        CommandSummary::Fix(summary),
        issues,
        analysis.project.units().len(),
        locale_paths.len(),
    ))
}

/// Delete `keys` from one locale file. Returns `None` when nothing changed.
fn remove_keys(path: &Path, keys: &[String]) -> Result<Option<FileFix>> {
    let mut document = MessageDocument::open(path)?;
    let removed = document.delete_keys(keys.iter().map(String::as_str));
    debug!(path = %path.display(), removed, "unused keys deleted");

    if removed == 0 {
        return Ok(None);
    }
    document.save()?;

    Ok(Some(FileFix {
        file_path: path.display().to_string(),
        removed,
    }))
}
