use anyhow::Result;

use super::{
    helper::{Workspace, finish},
    {CommandResult, CommandSummary},
};
use crate::cli::args::Arguments;

/// Report missing keys (errors), dynamic usages (warnings) and unused keys
/// (informational).
pub fn check(args: &Arguments) -> Result<CommandResult> {
    let workspace = Workspace::load(args)?;
    let source = workspace.load_source_document()?;
    let analysis = workspace.analyze();
    let findings = analysis.reconcile(&source);

    let mut issues = findings.unused_issues(&source);
    issues.extend(findings.issues);
    issues.extend(analysis.parse_errors());

    Ok(finish(
        CommandSummary::Check,
        issues,
        analysis.project.units().len(),
        1,
    ))
}
