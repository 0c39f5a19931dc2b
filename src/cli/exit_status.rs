use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every target wrote its output
/// - `Failure` (1): a target was aborted or could not write its output
/// - `Error` (2): the command could not run (missing or invalid configuration)
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
