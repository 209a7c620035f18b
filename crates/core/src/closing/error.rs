//! Year-end closing error types.

use thiserror::Error;

/// Year-end closing errors.
#[derive(Debug, Error)]
pub enum ClosingError {
    /// Not every period of the year is closed or locked.
    #[error("Cannot close year {year}: {open_count} period(s) still open")]
    PrematureClosing {
        /// Fiscal year being closed.
        year: i32,
        /// How many periods are still open.
        open_count: usize,
    },

    /// The year does not have all twelve periods.
    #[error("Cannot close year {year}: only {found} of 12 fiscal periods exist")]
    IncompleteYear {
        /// Fiscal year being closed.
        year: i32,
        /// How many periods were found.
        found: usize,
    },

    /// The year has already been closed.
    #[error("Fiscal year {0} has already been closed")]
    AlreadyClosed(i32),

    /// No retained earnings account is configured.
    #[error("Retained earnings account {0} not found")]
    RetainedEarningsNotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl ClosingError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PrematureClosing { .. } | Self::IncompleteYear { .. } => "PREMATURE_CLOSING",
            Self::AlreadyClosed(_) => "ALREADY_CLOSED",
            Self::RetainedEarningsNotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::PrematureClosing { .. } | Self::IncompleteYear { .. } => 422,
            Self::AlreadyClosed(_) => 409,
            Self::RetainedEarningsNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}
