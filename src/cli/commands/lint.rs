//! Lint mode: run every lint rule over every source file.
//!
//! Missing keys are reported once per occurrence. The source locale is read
//! through a shared key cache, so an absent document does not abort the run.

use std::sync::Arc;

use anyhow::Result;
use rayon::prelude::*;

use super::{
    helper::{Workspace, finish},
    {CommandResult, CommandSummary},
};
use crate::{
    cli::args::Arguments,
    core::key_cache::KeyCache,
    issues::Issue,
    rules::{all_rules, lint_file},
};

pub fn lint(args: &Arguments) -> Result<CommandResult> {
    let analysis = Workspace::load(args)?.analyze();
    let cache = Arc::new(KeyCache::new());
    let workspace = &analysis.workspace;
    let rules = all_rules(&workspace.root, Some(&workspace.config), Arc::clone(&cache));

    let paths: Vec<&str> = analysis
        .project
        .units()
        .iter()
        .map(|unit| unit.path.as_str())
        .collect();

    let mut issues: Vec<Issue> = paths
        .par_iter()
        .flat_map_iter(|path| lint_file(&rules, path, &analysis.resolution))
        .collect();
    issues.extend(analysis.parse_errors());

    Ok(finish(
        CommandSummary::Lint,
        issues,
        paths.len(),
        cache.len(),
    ))
}
