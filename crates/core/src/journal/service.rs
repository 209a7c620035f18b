//! Journal service for validation against the account registry and the
//! fiscal period gate.
//!
//! This service contains pure business logic with no database
//! dependencies; the caller injects account and period lookups.

use vestry_shared::types::AccountId;

use super::error::JournalError;
use super::types::{CreateJournalInput, JournalStatus, JournalTotals};
use super::validation::validate_lines;
use crate::fiscal::{validate_posting, PeriodKey, PeriodStatus};

/// Information about an account needed for journal validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Journal service for validation and lifecycle checks.
pub struct JournalService;

impl JournalService {
    /// Validates a journal before persisting.
    ///
    /// Steps:
    /// 1. Line rules (balance, sides, positivity) via [`validate_lines`]
    /// 2. Every account exists and is active
    /// 3. The journal's fiscal period is open
    ///
    /// # Arguments
    ///
    /// * `input` - The journal to validate
    /// * `period_lookup` - Resolves the period status for a key;
    ///   `None` means no period exists for that month
    /// * `account_lookup` - Resolves account info by id
    ///
    /// # Errors
    ///
    /// Returns `JournalError` describing the first violated rule.
    pub fn validate<P, A>(
        input: &CreateJournalInput,
        period_lookup: P,
        account_lookup: A,
    ) -> Result<JournalTotals, JournalError>
    where
        P: Fn(PeriodKey) -> Option<PeriodStatus>,
        A: Fn(AccountId) -> Option<AccountInfo>,
    {
        let totals = validate_lines(&input.lines)?;

        for line in &input.lines {
            let account = account_lookup(line.account_id)
                .ok_or(JournalError::AccountNotFound(line.account_id))?;
            if !account.is_active {
                return Err(JournalError::AccountInactive(line.account_id));
            }
        }

        let key = PeriodKey::for_date(input.date);
        let status = period_lookup(key).ok_or(JournalError::NoFiscalPeriod {
            month: key.month,
            year: key.year,
        })?;
        validate_posting(key, status)?;

        Ok(totals)
    }

    /// Validates that a journal can be approved.
    ///
    /// Approval re-checks the fiscal period: a draft created while the
    /// period was open must not slip through after the period closes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if not a draft, or `PeriodClosed` if the
    /// period has since stopped accepting postings.
    pub fn validate_can_approve(
        status: JournalStatus,
        period_key: PeriodKey,
        period_status: PeriodStatus,
    ) -> Result<(), JournalError> {
        if status != JournalStatus::Draft {
            return Err(JournalError::InvalidState {
                status,
                action: "approve",
            });
        }
        validate_posting(period_key, period_status)?;
        Ok(())
    }

    /// Validates that a journal can be deleted.
    ///
    /// Approved journals are immutable; they must be reversed via a
    /// counter-journal, never deleted.
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyDeleteDraft` unless the journal is a draft.
    pub fn validate_can_delete(status: JournalStatus) -> Result<(), JournalError> {
        if status != JournalStatus::Draft {
            return Err(JournalError::CanOnlyDeleteDraft);
        }
        Ok(())
    }

    /// Validates that a journal can be reversed.
    ///
    /// Only approved journals have an effect worth undoing; drafts are
    /// simply deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the journal is approved.
    pub fn validate_can_reverse(status: JournalStatus) -> Result<(), JournalError> {
        if status != JournalStatus::Approved {
            return Err(JournalError::InvalidState {
                status,
                action: "reverse",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::types::{JournalLineInput, JournalType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn make_input(lines: Vec<JournalLineInput>) -> CreateJournalInput {
        CreateJournalInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            description: "Sunday offering".to_string(),
            journal_type: JournalType::General,
            lines,
        }
    }

    fn balanced_lines() -> Vec<JournalLineInput> {
        vec![
            JournalLineInput::debit(AccountId::new(), dec!(100_000)),
            JournalLineInput::credit(AccountId::new(), dec!(100_000)),
        ]
    }

    fn open_period(_key: PeriodKey) -> Option<PeriodStatus> {
        Some(PeriodStatus::Open)
    }

    fn active_account(id: AccountId) -> Option<AccountInfo> {
        Some(AccountInfo {
            id,
            is_active: true,
        })
    }

    #[test]
    fn test_validate_accepts_balanced_journal() {
        let input = make_input(balanced_lines());
        let totals = JournalService::validate(&input, open_period, active_account).unwrap();
        assert_eq!(totals.total_debit, dec!(100_000));
    }

    #[test]
    fn test_validate_rejects_closed_period() {
        let input = make_input(balanced_lines());
        let result = JournalService::validate(
            &input,
            |_| Some(PeriodStatus::Closed),
            active_account,
        );
        assert!(matches!(
            result,
            Err(JournalError::PeriodClosed {
                month: 3,
                year: 2025,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_locked_period() {
        let input = make_input(balanced_lines());
        let result = JournalService::validate(
            &input,
            |_| Some(PeriodStatus::Locked),
            active_account,
        );
        assert!(matches!(result, Err(JournalError::PeriodClosed { .. })));
    }

    #[test]
    fn test_validate_rejects_missing_period() {
        let input = make_input(balanced_lines());
        let result = JournalService::validate(&input, |_| None, active_account);
        assert!(matches!(result, Err(JournalError::NoFiscalPeriod { .. })));
    }

    #[test]
    fn test_validate_rejects_unknown_account() {
        let input = make_input(balanced_lines());
        let result = JournalService::validate(&input, open_period, |_| None);
        assert!(matches!(result, Err(JournalError::AccountNotFound(_))));
    }

    #[test]
    fn test_validate_rejects_inactive_account() {
        let input = make_input(balanced_lines());
        let result = JournalService::validate(&input, open_period, |id| {
            Some(AccountInfo {
                id,
                is_active: false,
            })
        });
        assert!(matches!(result, Err(JournalError::AccountInactive(_))));
    }

    #[test]
    fn test_approve_draft_in_open_period() {
        let key = PeriodKey { month: 3, year: 2025 };
        assert!(JournalService::validate_can_approve(
            JournalStatus::Draft,
            key,
            PeriodStatus::Open
        )
        .is_ok());
    }

    #[test]
    fn test_double_approve_rejected() {
        let key = PeriodKey { month: 3, year: 2025 };
        let result =
            JournalService::validate_can_approve(JournalStatus::Approved, key, PeriodStatus::Open);
        assert!(matches!(
            result,
            Err(JournalError::InvalidState {
                status: JournalStatus::Approved,
                action: "approve",
            })
        ));
    }

    #[test]
    fn test_approve_rejected_after_period_closed() {
        let key = PeriodKey { month: 3, year: 2025 };
        let result =
            JournalService::validate_can_approve(JournalStatus::Draft, key, PeriodStatus::Closed);
        assert!(matches!(result, Err(JournalError::PeriodClosed { .. })));
    }

    #[test]
    fn test_delete_draft_allowed() {
        assert!(JournalService::validate_can_delete(JournalStatus::Draft).is_ok());
    }

    #[test]
    fn test_delete_approved_rejected() {
        assert!(matches!(
            JournalService::validate_can_delete(JournalStatus::Approved),
            Err(JournalError::CanOnlyDeleteDraft)
        ));
    }

    #[test]
    fn test_reverse_requires_approved() {
        assert!(JournalService::validate_can_reverse(JournalStatus::Approved).is_ok());
        assert!(matches!(
            JournalService::validate_can_reverse(JournalStatus::Draft),
            Err(JournalError::InvalidState { .. })
        ));
    }
}
