//! Budget error types.

use rust_decimal::Decimal;
use thiserror::Error;
use vestry_shared::types::{AccountId, BudgetId};

use super::types::BudgetStatus;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// A budget already exists for this fiscal year.
    #[error("A budget already exists for fiscal year {0}")]
    DuplicateYear(i32),

    /// Budget has no lines.
    #[error("Budget must have at least one line")]
    EmptyBudget,

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Duplicate account within one budget.
    #[error("Account {0} appears more than once in the budget")]
    DuplicateAccount(AccountId),

    /// Amount cannot be negative.
    #[error("Budget amounts cannot be negative")]
    NegativeAmount,

    /// Monthly breakdown does not cover months 1-12.
    #[error("Monthly breakdown must cover exactly months 1-12, got {0} entries")]
    IncompleteMonths(usize),

    /// Monthly amounts do not sum to the annual amount.
    #[error(
        "Monthly amounts for account {account_id} sum to {monthly_total}, \
         but annual amount is {annual_amount}"
    )]
    UnbalancedLine {
        /// Account whose line is unbalanced.
        account_id: AccountId,
        /// Sum of the twelve monthly amounts.
        monthly_total: Decimal,
        /// Declared annual amount.
        annual_amount: Decimal,
    },

    /// Operation not allowed in the budget's current status.
    #[error("Budget is {status}, cannot {action}")]
    InvalidState {
        /// Current budget status.
        status: BudgetStatus,
        /// Attempted action.
        action: &'static str,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl BudgetError {
    /// Returns the stable error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::AccountNotFound(_) => "NOT_FOUND",
            Self::DuplicateYear(_) | Self::DuplicateAccount(_) => "CONFLICT",
            Self::UnbalancedLine { .. } => "UNBALANCED_BUDGET",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::EmptyBudget | Self::NegativeAmount | Self::IncompleteMonths(_) => {
                "VALIDATION_ERROR"
            }
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::AccountNotFound(_) => 404,
            Self::DuplicateYear(_) | Self::DuplicateAccount(_) => 409,
            Self::UnbalancedLine { .. }
            | Self::InvalidState { .. }
            | Self::EmptyBudget
            | Self::NegativeAmount
            | Self::IncompleteMonths(_) => 422,
            Self::Database(_) => 500,
        }
    }
}
