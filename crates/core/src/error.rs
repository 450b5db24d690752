//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// uniqueness, protected accounts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (malformed input, unbalanced entry, bad filter).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An account name or code collided with an existing account.
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A protected field of a system account was about to change, or a
    /// system account was about to be deleted.
    #[error("immutable account: {0}")]
    ImmutableAccount(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn immutable(msg: impl Into<String>) -> Self {
        Self::ImmutableAccount(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
