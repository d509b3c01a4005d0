//! Shared error taxonomy for the Snapfeed data layer.
//!
//! Every crate in the workspace uses [`AppError`] and the [`Result`] alias.
//! Store and storage failures are surfaced verbatim from the backend client;
//! nothing in this layer retries or masks them.

use thiserror::Error;

/// Result type for all data-layer operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document does not exist where the operation requires one
    #[error("Not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// Document or blob store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Media library access denied
    #[error("Permission denied: {0}")]
    Permission(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        AppError::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn store(err: impl std::fmt::Display) -> Self {
        AppError::Store(err.to_string())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Message suitable for a user-facing alert.
    ///
    /// Validation errors explain themselves; everything that reaches the
    /// store boundary collapses into one generic retry message, with the
    /// detail left to the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Permission(_) => {
                "Permission is required to access your photo library.".to_string()
            }
            AppError::NotFound { .. } | AppError::Store(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
