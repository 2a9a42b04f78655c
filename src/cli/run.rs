//! Dispatches to the handler for the selected mode.
//!
//! # Returns
//! - `Ok(CommandResult)` with the issues found and what was changed
//! - `Err` on fatal errors (invalid config, unreadable source locale)

use anyhow::Result;

use super::{
    args::{Arguments, Mode},
    commands::{CommandResult, check::check, fix::fix, lint::lint},
};

pub fn run(args: &Arguments) -> Result<CommandResult> {
    match args.mode() {
        Mode::Check => check(args),
        Mode::Fix => fix(args),
        Mode::Lint => lint(args),
    }
}
