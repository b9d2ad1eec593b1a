use thiserror::Error;

use crate::ledger::SnapshotVersion;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by the repository, index, and timeline layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Malformed or missing caller input.
    #[error("argument {index}: {reason}")]
    Validation { index: usize, reason: String },

    /// Aggregate or sub-record does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Uniqueness violation on create or list-item insertion.
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: &'static str, key: String },

    /// Optimistic-concurrency rejection from the ledger.
    #[error("conflicting write on {key} (expected {expected}, found {actual})")]
    Conflict {
        key: String,
        expected: String,
        actual: String,
    },

    /// A stored snapshot failed to decode.
    #[error("corrupt version {version} of {key}: {reason}")]
    CorruptVersion {
        key: String,
        version: SnapshotVersion,
        reason: String,
    },

    /// The ledger itself failed.
    #[error("ledger unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Encoding a record for a write failed.
    #[error("codec error: {0}")]
    Codec(String),
}

impl LedgerError {
    pub(crate) fn validation(index: usize, reason: impl Into<String>) -> Self {
        LedgerError::Validation {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        LedgerError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub(crate) fn already_exists(kind: &'static str, key: impl Into<String>) -> Self {
        LedgerError::AlreadyExists {
            kind,
            key: key.into(),
        }
    }

    /// Only write conflicts can succeed by re-reading and reapplying the same change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict { .. })
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Codec(err.to_string())
    }
}

impl From<bitcode::Error> for LedgerError {
    fn from(err: bitcode::Error) -> Self {
        LedgerError::Codec(err.to_string())
    }
}
