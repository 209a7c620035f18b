//! Account error types.

use thiserror::Error;
use vestry_shared::types::AccountId;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Child accounts must share the parent's account type.
    #[error("Account type does not match parent account {0}")]
    ParentTypeMismatch(AccountId),

    /// Account has postings and cannot be deleted; deactivate instead.
    #[error("Account {0} has journal lines and cannot be deleted")]
    HasPostings(AccountId),

    /// Account has child accounts and cannot be deleted.
    #[error("Account {0} has child accounts and cannot be deleted")]
    HasChildren(AccountId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_ACCOUNT_NOT_FOUND",
            Self::ParentTypeMismatch(_) => "PARENT_TYPE_MISMATCH",
            Self::HasPostings(_) => "ACCOUNT_HAS_POSTINGS",
            Self::HasChildren(_) => "ACCOUNT_HAS_CHILDREN",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode(_) => 409,
            Self::NotFound(_) | Self::ParentNotFound(_) => 404,
            Self::ParentTypeMismatch(_) | Self::HasPostings(_) | Self::HasChildren(_) => 422,
            Self::Database(_) => 500,
        }
    }
}
