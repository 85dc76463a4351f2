//! Unified error handling
//!
//! Single application error enum for the data core:
//!
//! | Category | Variants | Surfaced |
//! |----------|----------|----------|
//! | Caller mistakes | `Validation`, `Conflict`, `NotFound` | before any write |
//! | Store failures | `Store` | after the remote store rejects a write |
//! | Boot-time | `Migration` | logged, never crashes startup |
//!
//! Validation and conflict errors carry a message naming the violated
//! constraint so the UI can show it verbatim (for example
//! "Roll Number 7 already exists for Ravi"). Store errors keep the
//! underlying cause for the logs; the caller shows a generic failure
//! without losing entered data.

use thiserror::Error;

/// Application error enum
#[derive(Debug, Clone, Error)]
pub enum AppError {
    // ========== Caller errors ==========
    #[error("Validation failed: {0}")]
    /// Missing or malformed input, rejected before any write
    Validation(String),

    #[error("Conflict: {0}")]
    /// Duplicate roll number, double check-in; checked against the
    /// in-memory mirror, not a transactional guarantee
    Conflict(String),

    #[error("Resource not found: {0}")]
    /// Referenced entity absent from the mirror
    NotFound(String),

    // ========== System errors ==========
    #[error("Store error: {0}")]
    /// Write rejected by the remote store; never retried automatically
    Store(String),

    #[error("Migration error: {0}")]
    /// Legacy migration failure; flag stays unset so the next boot retries
    Migration(String),

    #[error("Serialization error: {0}")]
    /// Record failed to encode/decode against the wire schema
    Serialization(String),
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn migration(msg: impl Into<String>) -> Self {
        Self::Migration(msg.into())
    }

    /// True when the caller can fix the request (validation/conflict),
    /// false for store-side failures.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::Conflict(_) | AppError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

/// Result alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;
