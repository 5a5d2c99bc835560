use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): every file was processed
/// - `Failure` (1): some files failed extraction (or `init` found an existing config)
/// - `Error` (2): the command could not run, or a file could not be read or written
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
