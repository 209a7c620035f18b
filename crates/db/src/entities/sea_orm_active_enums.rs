//! Active enums mapped to PostgreSQL enum types, with conversions to
//! and from the core domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
pub enum AccountType {
    /// Asset accounts (debit-normal).
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability accounts (credit-normal).
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity accounts (credit-normal).
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income accounts (credit-normal).
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense accounts (debit-normal).
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<vestry_core::account::AccountType> for AccountType {
    fn from(value: vestry_core::account::AccountType) -> Self {
        use vestry_core::account::AccountType as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Income => Self::Income,
            Core::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for vestry_core::account::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Journal lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_status")]
pub enum JournalStatus {
    /// Editable draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Approved and immutable.
    #[sea_orm(string_value = "approved")]
    Approved,
}

impl From<vestry_core::journal::JournalStatus> for JournalStatus {
    fn from(value: vestry_core::journal::JournalStatus) -> Self {
        use vestry_core::journal::JournalStatus as Core;
        match value {
            Core::Draft => Self::Draft,
            Core::Approved => Self::Approved,
        }
    }
}

impl From<JournalStatus> for vestry_core::journal::JournalStatus {
    fn from(value: JournalStatus) -> Self {
        match value {
            JournalStatus::Draft => Self::Draft,
            JournalStatus::Approved => Self::Approved,
        }
    }
}

/// Journal classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_type")]
pub enum JournalType {
    /// General journal.
    #[sea_orm(string_value = "general")]
    General,
    /// Quick giving entry.
    #[sea_orm(string_value = "quick_giving")]
    QuickGiving,
    /// Quick expense entry.
    #[sea_orm(string_value = "quick_expense")]
    QuickExpense,
    /// Monthly depreciation journal.
    #[sea_orm(string_value = "depreciation")]
    Depreciation,
    /// Year-end closing journal.
    #[sea_orm(string_value = "closing")]
    Closing,
    /// Opening balance journal.
    #[sea_orm(string_value = "beginning_balance")]
    BeginningBalance,
    /// Reversal of an approved journal.
    #[sea_orm(string_value = "reversal")]
    Reversal,
}

impl From<vestry_core::journal::JournalType> for JournalType {
    fn from(value: vestry_core::journal::JournalType) -> Self {
        use vestry_core::journal::JournalType as Core;
        match value {
            Core::General => Self::General,
            Core::QuickGiving => Self::QuickGiving,
            Core::QuickExpense => Self::QuickExpense,
            Core::Depreciation => Self::Depreciation,
            Core::Closing => Self::Closing,
            Core::BeginningBalance => Self::BeginningBalance,
            Core::Reversal => Self::Reversal,
        }
    }
}

impl From<JournalType> for vestry_core::journal::JournalType {
    fn from(value: JournalType) -> Self {
        match value {
            JournalType::General => Self::General,
            JournalType::QuickGiving => Self::QuickGiving,
            JournalType::QuickExpense => Self::QuickExpense,
            JournalType::Depreciation => Self::Depreciation,
            JournalType::Closing => Self::Closing,
            JournalType::BeginningBalance => Self::BeginningBalance,
            JournalType::Reversal => Self::Reversal,
        }
    }
}

/// Fiscal period status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fiscal_period_status")]
pub enum FiscalPeriodStatus {
    /// Accepts postings.
    #[sea_orm(string_value = "open")]
    Open,
    /// Closed to postings.
    #[sea_orm(string_value = "closed")]
    Closed,
    /// Locked, unlockable only back to closed.
    #[sea_orm(string_value = "locked")]
    Locked,
}

impl From<vestry_core::fiscal::PeriodStatus> for FiscalPeriodStatus {
    fn from(value: vestry_core::fiscal::PeriodStatus) -> Self {
        use vestry_core::fiscal::PeriodStatus as Core;
        match value {
            Core::Open => Self::Open,
            Core::Closed => Self::Closed,
            Core::Locked => Self::Locked,
        }
    }
}

impl From<FiscalPeriodStatus> for vestry_core::fiscal::PeriodStatus {
    fn from(value: FiscalPeriodStatus) -> Self {
        match value {
            FiscalPeriodStatus::Open => Self::Open,
            FiscalPeriodStatus::Closed => Self::Closed,
            FiscalPeriodStatus::Locked => Self::Locked,
        }
    }
}

/// Budget lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_status")]
pub enum BudgetStatus {
    /// Editable draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Balanced and frozen.
    #[sea_orm(string_value = "active")]
    Active,
}

impl From<vestry_core::budget::BudgetStatus> for BudgetStatus {
    fn from(value: vestry_core::budget::BudgetStatus) -> Self {
        use vestry_core::budget::BudgetStatus as Core;
        match value {
            Core::Draft => Self::Draft,
            Core::Active => Self::Active,
        }
    }
}

impl From<BudgetStatus> for vestry_core::budget::BudgetStatus {
    fn from(value: BudgetStatus) -> Self {
        match value {
            BudgetStatus::Draft => Self::Draft,
            BudgetStatus::Active => Self::Active,
        }
    }
}
