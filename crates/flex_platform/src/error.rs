//! Host error types

use thiserror::Error;

/// Host-related errors
///
/// None of these are fatal to callers: theme logic logs them and carries on
/// with in-memory state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The capability does not exist in this environment
    #[error("{0} is not available")]
    Unavailable(&'static str),

    /// Reading or writing persistent storage failed (quota, privacy mode, I/O)
    #[error("storage error for key `{key}`: {reason}")]
    Storage { key: String, reason: String },

    /// A document/root element operation failed
    #[error("document operation failed: {0}")]
    Dom(String),
}

impl HostError {
    pub fn storage(key: &str, reason: impl Into<String>) -> Self {
        Self::Storage {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
