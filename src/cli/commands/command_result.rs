use std::path::PathBuf;

use crate::{cli::exit_status::ExitStatus, core::FileReport, error::ExtractError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Extract,
    Check,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Check(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug, Default)]
pub struct ExtractSummary {
    /// Successfully processed files, in path order.
    pub files: Vec<FileReport>,
    /// Whether sources were rewritten in place.
    pub write_sources: bool,
}

impl ExtractSummary {
    pub fn message_count(&self) -> usize {
        self.files.iter().map(|f| f.messages.len()).sum()
    }

    pub fn changed_count(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    /// Set when the file could not be created.
    pub error: Option<String>,
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub display_path: String,
    pub error: anyhow::Error,
}

impl FileFailure {
    /// The extraction failure behind this error, if it was one.
    pub fn extract_error(&self) -> Option<&ExtractError> {
        self.error.downcast_ref::<ExtractError>()
    }
}

/// Result of running an intl-extract command.
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    /// Failed files, in path order.
    pub failures: Vec<FileFailure>,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.failures.iter().any(|f| f.extract_error().is_none()) {
            return ExitStatus::Error;
        }
        let init_failed =
            matches!(&self.summary, CommandSummary::Init(summary) if summary.error.is_some());
        if !self.failures.is_empty() || init_failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
