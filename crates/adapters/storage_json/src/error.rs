//! Storage-specific error type wrapping IO and JSON errors.

use battm_domain::error::{BattmError, ValidationError};

/// Errors originating from the JSON settings file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing or renaming the file failed.
    #[error("settings file IO error")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON, or not the expected shape.
    #[error("settings file JSON error")]
    Json(#[from] serde_json::Error),

    /// The file parsed but holds an invalid pair.
    #[error("settings file holds invalid bounds")]
    Invalid(#[from] ValidationError),
}

impl From<StorageError> for BattmError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Invalid(err) => Self::Validation(err),
            other => Self::Storage(Box::new(other)),
        }
    }
}
