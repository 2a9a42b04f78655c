//! Command-line interface layer.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: check, fix and lint handlers
//! - `exit_status`: process exit codes
//! - `report`: cargo-style output

use anyhow::Result;

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Mode};
pub use exit_status::ExitStatus;

pub fn run_cli(args: &Arguments) -> Result<ExitStatus> {
    let result = run::run(args)?;
    report::print(&result, args.verbose);
    Ok(result.exit_status())
}
