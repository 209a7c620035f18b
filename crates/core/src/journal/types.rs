//! Journal domain types for creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vestry_shared::types::{AccountId, ResponsibilityCenterId};

/// Journal status in the approval lifecycle.
///
/// `draft --approve--> approved` (terminal); drafts may also be
/// deleted. There are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Journal is being drafted and can be modified or deleted.
    Draft,
    /// Journal has been approved and is immutable.
    Approved,
}

impl JournalStatus {
    /// Returns true if the journal can be modified or deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Approved => write!(f, "approved"),
        }
    }
}

/// Journal type classification.
///
/// Categorizes journals by origin for reporting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    /// General journal entry.
    General,
    /// Simplified giving/offering entry.
    QuickGiving,
    /// Simplified expense entry.
    QuickExpense,
    /// Generated by the monthly depreciation run.
    Depreciation,
    /// Generated by year-end closing.
    Closing,
    /// Opening balance entry.
    BeginningBalance,
    /// Counter-journal reversing an approved journal.
    Reversal,
}

/// Input for a single journal line.
///
/// Exactly one of `debit`/`credit` must be nonzero; both are
/// non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Optional line description.
    pub description: Option<String>,
    /// Debit amount (0 if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (0 if this is a debit line).
    pub credit: Decimal,
    /// Optional responsibility center attribution.
    pub responsibility_center_id: Option<ResponsibilityCenterId>,
}

impl JournalLineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: amount,
            credit: Decimal::ZERO,
            responsibility_center_id: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            description: None,
            debit: Decimal::ZERO,
            credit: amount,
            responsibility_center_id: None,
        }
    }
}

/// Input for creating a new journal.
#[derive(Debug, Clone)]
pub struct CreateJournalInput {
    /// The journal date; determines the fiscal period.
    pub date: NaiveDate,
    /// A description of the accounting event.
    pub description: String,
    /// The type of journal.
    pub journal_type: JournalType,
    /// The journal lines (at least two, both sides represented).
    pub lines: Vec<JournalLineInput>,
}

/// Journal totals produced by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalTotals {
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
}

impl JournalTotals {
    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_editable() {
        assert!(JournalStatus::Draft.is_editable());
        assert!(!JournalStatus::Approved.is_editable());
    }

    #[test]
    fn test_line_constructors() {
        let account = AccountId::new();
        let d = JournalLineInput::debit(account, dec!(100));
        assert_eq!(d.debit, dec!(100));
        assert_eq!(d.credit, dec!(0));

        let c = JournalLineInput::credit(account, dec!(100));
        assert_eq!(c.debit, dec!(0));
        assert_eq!(c.credit, dec!(100));
    }

    #[test]
    fn test_totals_balanced() {
        let totals = JournalTotals {
            total_debit: dec!(500),
            total_credit: dec!(500),
        };
        assert!(totals.is_balanced());
        assert_eq!(totals.difference(), dec!(0));
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = JournalTotals {
            total_debit: dec!(500),
            total_credit: dec!(300),
        };
        assert!(!totals.is_balanced());
        assert_eq!(totals.difference(), dec!(200));
    }
}
