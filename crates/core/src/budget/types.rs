//! Budget data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vestry_shared::types::{AccountId, BudgetId};

use super::variance::VarianceStatus;

/// Number of monthly buckets in an annual budget.
pub const MONTHS_PER_YEAR: usize = 12;

/// Budget lifecycle status.
///
/// A draft budget can be edited freely. Activation runs the balance
/// check (monthly amounts must sum to the annual amount on every line)
/// and freezes the budget for variance reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Editable, not yet used for reporting.
    Draft,
    /// Balanced and frozen, used for variance reporting.
    Active,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Input for one budget line: an account with its annual amount and
/// monthly breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineInput {
    /// Budgeted account.
    pub account_id: AccountId,
    /// Annual budgeted amount.
    pub annual_amount: Decimal,
    /// Monthly amounts keyed by month (1-12).
    pub monthly_amounts: BTreeMap<u32, Decimal>,
}

impl BudgetLineInput {
    /// Sum of the monthly amounts.
    #[must_use]
    pub fn monthly_total(&self) -> Decimal {
        self.monthly_amounts.values().copied().sum()
    }
}

/// Input for creating a budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Fiscal year the budget covers.
    pub fiscal_year: i32,
    /// Budget name.
    pub name: String,
    /// Budget lines.
    pub lines: Vec<BudgetLineInput>,
}

/// One row of a variance report: an account's budgeted vs actual
/// amounts for a reporting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetVarianceLine {
    /// Budgeted account.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Budgeted amount for the window.
    pub budgeted: Decimal,
    /// Actual amount from approved journals.
    pub actual: Decimal,
    /// Variance (actual - budgeted).
    pub variance: Decimal,
    /// Variance as a percentage of the budgeted amount.
    pub variance_percentage: Decimal,
    /// Variance status.
    pub status: VarianceStatus,
}

/// Variance report for a budget over a reporting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetVarianceReport {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// First month of the window (1-12).
    pub from_month: u32,
    /// Last month of the window (1-12).
    pub to_month: u32,
    /// Per-account variance rows.
    pub lines: Vec<BudgetVarianceLine>,
    /// Total budgeted across all rows.
    pub total_budgeted: Decimal,
    /// Total actual across all rows.
    pub total_actual: Decimal,
    /// Total variance across all rows.
    pub total_variance: Decimal,
}
