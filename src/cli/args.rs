//! CLI argument definitions using clap.
//!
//! ## Modes
//!
//! - `--check` (default): report missing, unused and dynamic keys
//! - `--fix`: like `--check`, then delete unused keys from every locale file
//! - `--lint`: run the per-file lint rules over every source file

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["check", "fix", "lint"])))]
pub struct Arguments {
    /// Messages directory, relative to the source root (overrides config file)
    #[arg(long, value_name = "DIR")]
    pub directory: Option<String>,

    /// Locale whose document defines the canonical keys (overrides config file)
    #[arg(long, value_name = "LOCALE")]
    pub source_locale: Option<String>,

    /// Report missing and unused keys (default)
    #[arg(long)]
    pub check: bool,

    /// Delete unused keys from every locale file
    #[arg(long)]
    pub fix: bool,

    /// Run the dynamic-key and missing-key rules on every source file
    #[arg(long)]
    pub lint: bool,

    /// Project root to analyze
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Check,
    Fix,
    Lint,
}

impl Arguments {
    pub fn mode(&self) -> Mode {
        if self.fix {
            Mode::Fix
        } else if self.lint {
            Mode::Lint
        } else {
            Mode::Check
        }
    }
}
