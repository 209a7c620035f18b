//! Journal error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use vestry_shared::types::{AccountId, JournalId};

use crate::fiscal::{FiscalError, PeriodStatus};
use crate::journal::types::JournalStatus;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Validation Errors ==========
    /// Journal must have at least 2 lines.
    #[error("Journal must have at least 2 lines")]
    InsufficientLines,

    /// Journal is not balanced (debits != credits).
    #[error("Journal is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// Journal must have both debit and credit lines.
    #[error("Journal must have both debit and credit lines")]
    SingleSided,

    /// Line must have exactly one of debit/credit nonzero.
    #[error("Line must have exactly one of debit or credit set")]
    AmbiguousLine,

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    // ========== Fiscal Period Errors ==========
    /// No fiscal period exists for the journal date.
    #[error("No fiscal period found for {month}/{year}")]
    NoFiscalPeriod {
        /// Month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
    },

    /// Fiscal period no longer accepts postings.
    #[error("Fiscal period {month}/{year} is {status}, no posting allowed")]
    PeriodClosed {
        /// Month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
        /// The status that blocked the posting.
        status: PeriodStatus,
    },

    // ========== State Errors ==========
    /// Illegal status transition (e.g. approving an approved journal).
    #[error("Journal is {status}, cannot {action}")]
    InvalidState {
        /// Current journal status.
        status: JournalStatus,
        /// The attempted action.
        action: &'static str,
    },

    /// Approved journals are immutable; only drafts can be deleted.
    #[error("Only draft journals can be deleted; reverse approved journals instead")]
    CanOnlyDeleteDraft,

    /// Journal not found.
    #[error("Journal not found: {0}")]
    NotFound(JournalId),

    // ========== Infrastructure ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<FiscalError> for JournalError {
    fn from(err: FiscalError) -> Self {
        match err {
            FiscalError::PeriodClosed {
                month,
                year,
                status,
            } => Self::PeriodClosed {
                month,
                year,
                status,
            },
            FiscalError::PeriodNotFound { month, year } => Self::NoFiscalPeriod { month, year },
            FiscalError::Database(msg) => Self::Database(msg),
            other => Self::Database(other.to_string()),
        }
    }
}

impl JournalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } | Self::SingleSided => "UNBALANCED_JOURNAL",
            Self::AmbiguousLine => "AMBIGUOUS_LINE",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::NoFiscalPeriod { .. } => "NO_FISCAL_PERIOD",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::InvalidState { .. } | Self::CanOnlyDeleteDraft => "INVALID_STATE",
            Self::NotFound(_) => "JOURNAL_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientLines
            | Self::Unbalanced { .. }
            | Self::SingleSided
            | Self::AmbiguousLine
            | Self::ZeroAmount
            | Self::NegativeAmount => 400,

            Self::AccountInactive(_)
            | Self::PeriodClosed { .. }
            | Self::InvalidState { .. }
            | Self::CanOnlyDeleteDraft => 422,

            Self::AccountNotFound(_) | Self::NoFiscalPeriod { .. } | Self::NotFound(_) => 404,

            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            JournalError::Unbalanced {
                debits: dec!(100),
                credits: dec!(50),
            }
            .error_code(),
            "UNBALANCED_JOURNAL"
        );
        assert_eq!(
            JournalError::PeriodClosed {
                month: 1,
                year: 2025,
                status: PeriodStatus::Closed,
            }
            .error_code(),
            "PERIOD_CLOSED"
        );
        assert_eq!(
            JournalError::InvalidState {
                status: JournalStatus::Approved,
                action: "approve",
            }
            .error_code(),
            "INVALID_STATE"
        );
        assert_eq!(JournalError::CanOnlyDeleteDraft.error_code(), "INVALID_STATE");
    }

    #[test]
    fn test_error_display() {
        let err = JournalError::Unbalanced {
            debits: dec!(100.00),
            credits: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal is not balanced. Debit: 100.00, Credit: 50.00"
        );

        let err = JournalError::InvalidState {
            status: JournalStatus::Approved,
            action: "approve",
        };
        assert_eq!(err.to_string(), "Journal is approved, cannot approve");
    }

    #[test]
    fn test_fiscal_error_conversion() {
        let err: JournalError = FiscalError::PeriodClosed {
            month: 3,
            year: 2025,
            status: PeriodStatus::Locked,
        }
        .into();
        assert!(matches!(err, JournalError::PeriodClosed { month: 3, .. }));
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(JournalError::InsufficientLines.http_status_code(), 400);
        assert_eq!(JournalError::CanOnlyDeleteDraft.http_status_code(), 422);
        assert_eq!(
            JournalError::NotFound(JournalId::new()).http_status_code(),
            404
        );
    }
}
