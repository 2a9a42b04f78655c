use std::process::ExitCode;

/// Exit status for the CLI.
///
/// - `Success` (0): no missing keys (unused or dynamic keys alone do not fail)
/// - `Failure` (1): at least one missing key
/// - `Error` (2): fatal error (bad config, unreadable source locale, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
