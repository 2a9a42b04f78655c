use crate::cli::exit_status::ExitStatus;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Fix(FixSummary),
    Lint,
}

/// Keys removed from one locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFix {
    pub file_path: String,
    pub removed: usize,
}

#[derive(Debug, Default)]
pub struct FixSummary {
    /// Unused keys found in the source locale.
    pub unused_keys: Vec<String>,
    /// Files that were rewritten.
    pub files: Vec<FileFix>,
}

impl FixSummary {
    pub fn removed_count(&self) -> usize {
        self.files.iter().map(|file| file.removed).sum()
    }
}

/// Result of running a keyscan mode.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Everything to report, sorted by location.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
    /// Number of source files (TS/TSX/JS/JSX) that were analyzed.
    pub source_files_checked: usize,
    /// Number of locale message files (JSON) that were read.
    pub locale_files_checked: usize,
}

impl CommandResult {
    /// Missing keys fail the run; unused and dynamic keys alone do not.
    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
