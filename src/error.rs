//! Error types for the intake pipeline.
//!
//! Defined with `thiserror`, one enum per concern. The taxonomy follows
//! the propagation policy: nothing inside the pipeline aborts the
//! caller's conversation turn, so these errors surface in logs and
//! outcome values rather than bubbling to the transport layer.

use thiserror::Error;

/// Errors reported by the profile store adapter.
///
/// `Rejected` and `Unavailable` are deliberately distinct: a validation
/// rejection is terminal for the attempted fields, while a connectivity
/// failure means "try again on the next message with contact info".
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store refused the write (schema/constraint violation).
    #[error("Store rejected the write: {reason}")]
    Rejected { reason: String },

    /// Transient connectivity failure.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store call exceeded its bounded timeout. No partial write
    /// has occurred.
    #[error("Store request timed out")]
    Timeout,

    /// Authentication failed at the store boundary.
    #[error("Store authentication failed")]
    Unauthorized,

    /// The backend returned an unexpected status.
    #[error("Store error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// Failed to parse a store response.
    #[error("Store response parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has an invalid value.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl StoreError {
    /// Whether a bounded retry is worth attempting.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_) | StoreError::Timeout)
    }
}
