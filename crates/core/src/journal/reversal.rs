//! Reversal journal construction.
//!
//! Approved journals are immutable; to undo one, a counter-journal is
//! posted that swaps every debit and credit. The net ledger effect of
//! the pair is zero while the audit trail keeps both entries.

use chrono::NaiveDate;

use super::types::{CreateJournalInput, JournalLineInput, JournalType};

/// The approved journal being reversed, stripped to what the reversal
/// needs.
#[derive(Debug, Clone)]
pub struct ReversalInput {
    /// Journal number of the original, used in the reversal description.
    pub journal_number: String,
    /// Original journal description.
    pub description: String,
    /// Original journal lines.
    pub lines: Vec<JournalLineInput>,
}

/// Builds the counter-journal for an approved journal.
///
/// Every line keeps its account and description but has debit and
/// credit swapped; the result balances because the original did. The
/// reversal posts on `date`, which need not be the original date - the
/// original period may already be closed.
#[must_use]
pub fn build_reversal(original: &ReversalInput, date: NaiveDate) -> CreateJournalInput {
    let lines = original
        .lines
        .iter()
        .map(|line| JournalLineInput {
            account_id: line.account_id,
            description: line.description.clone(),
            debit: line.credit,
            credit: line.debit,
            responsibility_center_id: line.responsibility_center_id,
        })
        .collect();

    CreateJournalInput {
        date,
        description: format!("Reversal of {}: {}", original.journal_number, original.description),
        journal_type: JournalType::Reversal,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::validation::validate_lines;
    use rust_decimal_macros::dec;
    use vestry_shared::types::AccountId;

    fn sample_original() -> ReversalInput {
        ReversalInput {
            journal_number: "JRN-000042".to_string(),
            description: "Office supplies".to_string(),
            lines: vec![
                JournalLineInput::debit(AccountId::new(), dec!(250_000)),
                JournalLineInput::credit(AccountId::new(), dec!(250_000)),
            ],
        }
    }

    #[test]
    fn test_reversal_swaps_sides() {
        let original = sample_original();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let reversal = build_reversal(&original, date);

        assert_eq!(reversal.journal_type, JournalType::Reversal);
        assert_eq!(reversal.lines.len(), 2);
        assert_eq!(reversal.lines[0].debit, dec!(0));
        assert_eq!(reversal.lines[0].credit, dec!(250_000));
        assert_eq!(reversal.lines[1].debit, dec!(250_000));
        assert_eq!(reversal.lines[1].credit, dec!(0));
    }

    #[test]
    fn test_reversal_preserves_accounts_and_balances() {
        let original = sample_original();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let reversal = build_reversal(&original, date);

        for (orig, rev) in original.lines.iter().zip(&reversal.lines) {
            assert_eq!(orig.account_id, rev.account_id);
        }
        let totals = validate_lines(&reversal.lines).unwrap();
        assert_eq!(totals.total_debit, dec!(250_000));
        assert!(totals.is_balanced());
    }

    #[test]
    fn test_reversal_description_names_original() {
        let original = sample_original();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let reversal = build_reversal(&original, date);
        assert_eq!(reversal.description, "Reversal of JRN-000042: Office supplies");
    }
}
