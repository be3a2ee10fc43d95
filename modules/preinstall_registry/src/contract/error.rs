//! Contract error types for the pre-install registry
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Registry domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Missing or invalid form fields
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Unknown submission id on get or delete
    #[error("Submission not found: {id}")]
    NotFound { id: String },

    /// An uploaded file exceeded the configured size limit
    #[error("File '{field}' exceeds the {limit} byte upload limit")]
    UploadTooLarge { field: String, limit: usize },

    /// Persistence failure; the cause has already been logged
    #[error("{message}")]
    Storage { message: String },
}

impl RegistryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Log the underlying cause and collapse it into an operation-level message
    pub fn storage(message: &'static str, cause: anyhow::Error) -> Self {
        tracing::error!(error = ?cause, "{message}");
        Self::Storage {
            message: message.to_string(),
        }
    }
}
