//! Extraction failures.
//!
//! Every variant is fatal to the file being processed and carries the
//! position of the declaration that caused it.

use crate::core::data::SourcePosition;
use crate::core::icu::IcuSyntaxError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractError {
    #[error("[React Intl] Message must have a `defaultMessage`. ({file}:{position})")]
    MissingDefaultMessage {
        file: String,
        position: SourcePosition,
    },

    #[error("[React Intl] Message must have a `description`. ({file}:{position})")]
    MissingDescription {
        file: String,
        position: SourcePosition,
    },

    #[error("[React Intl] Message must have an `id` or a `defaultMessage`. ({file}:{position})")]
    MissingId {
        file: String,
        position: SourcePosition,
    },

    #[error("[React Intl] Message failed to parse: {source} ({file}:{position})")]
    InvalidIcuSyntax {
        file: String,
        position: SourcePosition,
        source: IcuSyntaxError,
    },

    #[error(
        "[React Intl] Duplicate message id: \"{id}\", but the description and/or defaultMessage are different. ({file}:{first} and {file}:{second})"
    )]
    ConflictingDuplicateId {
        file: String,
        id: String,
        first: SourcePosition,
        second: SourcePosition,
    },

    #[error(
        "[React Intl] Messages must be statically evaluate-able for extraction: `{field}` is not a static value. ({file}:{position})"
    )]
    UnresolvableDeclaration {
        file: String,
        field: String,
        position: SourcePosition,
    },

    #[error("Failed to parse {file}: {message}")]
    Parse {
        file: String,
        message: String,
        position: Option<SourcePosition>,
    },
}

impl ExtractError {
    /// The file the failure belongs to.
    pub fn file(&self) -> &str {
        match self {
            ExtractError::MissingDefaultMessage { file, .. }
            | ExtractError::MissingDescription { file, .. }
            | ExtractError::MissingId { file, .. }
            | ExtractError::InvalidIcuSyntax { file, .. }
            | ExtractError::ConflictingDuplicateId { file, .. }
            | ExtractError::UnresolvableDeclaration { file, .. }
            | ExtractError::Parse { file, .. } => file,
        }
    }

    /// The position the failure is attributed to.
    ///
    /// For duplicate ids this is the second (offending) declaration.
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            ExtractError::MissingDefaultMessage { position, .. }
            | ExtractError::MissingDescription { position, .. }
            | ExtractError::MissingId { position, .. }
            | ExtractError::InvalidIcuSyntax { position, .. }
            | ExtractError::UnresolvableDeclaration { position, .. } => Some(*position),
            ExtractError::ConflictingDuplicateId { second, .. } => Some(*second),
            ExtractError::Parse { position, .. } => *position,
        }
    }

    /// Short rule name used by the reporter.
    pub fn rule(&self) -> &'static str {
        match self {
            ExtractError::MissingDefaultMessage { .. } => "missing-default-message",
            ExtractError::MissingDescription { .. } => "missing-description",
            ExtractError::MissingId { .. } => "missing-id",
            ExtractError::InvalidIcuSyntax { .. } => "invalid-icu-syntax",
            ExtractError::ConflictingDuplicateId { .. } => "conflicting-duplicate-id",
            ExtractError::UnresolvableDeclaration { .. } => "unresolvable-declaration",
            ExtractError::Parse { .. } => "parse-error",
        }
    }
}
