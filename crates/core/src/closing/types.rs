//! Year-end closing data types.

use rust_decimal::Decimal;
use vestry_shared::types::AccountId;

use crate::account::AccountType;
use crate::journal::CreateJournalInput;

/// Natural-sign balance of one account over the closing year.
///
/// Income accounts carry credits minus debits, expense accounts debits
/// minus credits, so a normally-behaving account has a positive
/// balance here.
#[derive(Debug, Clone)]
pub struct AccountBalance {
    /// Account ID.
    pub account_id: AccountId,
    /// Account type.
    pub account_type: AccountType,
    /// Natural-sign balance.
    pub balance: Decimal,
}

/// Everything the closing computation needs.
#[derive(Debug, Clone)]
pub struct ClosingInput {
    /// Fiscal year being closed.
    pub year: i32,
    /// Year balances of all income and expense accounts.
    pub balances: Vec<AccountBalance>,
    /// Retained earnings (equity) account receiving the net income.
    pub retained_earnings_account_id: AccountId,
}

/// The computed outcome of a year-end closing.
#[derive(Debug, Clone)]
pub struct ClosingPlan {
    /// Fiscal year closed.
    pub year: i32,
    /// Total income for the year.
    pub total_income: Decimal,
    /// Total expense for the year.
    pub total_expense: Decimal,
    /// Net income (income minus expense, may be negative).
    pub net_income: Decimal,
    /// Closing journal, or `None` when nothing needs posting.
    pub journal: Option<CreateJournalInput>,
}
