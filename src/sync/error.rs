//! Sync Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("remote {operation} failed: {message}")]
    Remote { operation: String, message: String },
    #[error("failed to decode host response: {0}")]
    Decode(String),
    #[error("local storage unavailable: {0}")]
    LocalStorage(String),
    #[error("load failed: {}", .failures.join("; "))]
    Load { failures: Vec<String> },
    #[error("collection has not been loaded")]
    NotLoaded,
    #[error("{0} is no longer mounted")]
    Disposed(&'static str),
}

impl SyncError {
    pub fn remote(operation: &str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
