//! Fiscal period error types.

use thiserror::Error;

use super::period::PeriodStatus;

/// Errors that can occur during fiscal period operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Month must be between 1 and 12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Fiscal period not found.
    #[error("Fiscal period not found: {month}/{year}")]
    PeriodNotFound {
        /// Month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
    },

    /// Status transition is not allowed.
    #[error("Invalid period transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: PeriodStatus,
        /// Target status.
        to: PeriodStatus,
    },

    /// Period is closed or locked, no posting allowed.
    #[error("Fiscal period {month}/{year} is {status}, no posting allowed")]
    PeriodClosed {
        /// Month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
        /// The status that blocked the posting.
        status: PeriodStatus,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl FiscalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_STATE",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidMonth(_) => 400,
            Self::PeriodNotFound { .. } => 404,
            Self::InvalidTransition { .. } | Self::PeriodClosed { .. } => 422,
            Self::Database(_) => 500,
        }
    }
}
