//! Year-end closing computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ClosingError;
use super::types::{AccountBalance, ClosingInput, ClosingPlan};
use crate::account::AccountType;
use crate::fiscal::PeriodStatus;
use crate::journal::{CreateJournalInput, JournalLineInput, JournalType};

/// Year-end closing service.
pub struct ClosingService;

impl ClosingService {
    /// Validates that a fiscal year is ready to close.
    ///
    /// All twelve periods must exist and be closed or locked, and the
    /// year must not have been closed before.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed`, `IncompleteYear`, or
    /// `PrematureClosing` accordingly.
    pub fn validate_preconditions(
        year: i32,
        period_statuses: &[PeriodStatus],
        already_closed: bool,
    ) -> Result<(), ClosingError> {
        if already_closed {
            return Err(ClosingError::AlreadyClosed(year));
        }
        if period_statuses.len() != 12 {
            return Err(ClosingError::IncompleteYear {
                year,
                found: period_statuses.len(),
            });
        }
        let open_count = period_statuses
            .iter()
            .filter(|s| **s == PeriodStatus::Open)
            .count();
        if open_count > 0 {
            return Err(ClosingError::PrematureClosing { year, open_count });
        }
        Ok(())
    }

    /// Computes the closing plan for a year.
    ///
    /// Every income and expense account with a non-zero year balance
    /// gets a line bringing it to zero; the difference - the net
    /// income - lands on retained earnings. When every balance is zero
    /// no journal is produced at all.
    #[must_use]
    pub fn compute_plan(input: &ClosingInput) -> ClosingPlan {
        let total_income = Self::sum_type(&input.balances, AccountType::Income);
        let total_expense = Self::sum_type(&input.balances, AccountType::Expense);
        let net_income = total_income - total_expense;

        let mut lines = Vec::new();
        for balance in &input.balances {
            if balance.balance.is_zero() {
                continue;
            }
            lines.push(Self::zeroing_line(balance));
        }

        let journal = if lines.is_empty() {
            None
        } else {
            if !net_income.is_zero() {
                let line = if net_income > Decimal::ZERO {
                    JournalLineInput::credit(input.retained_earnings_account_id, net_income)
                } else {
                    JournalLineInput::debit(input.retained_earnings_account_id, -net_income)
                };
                lines.push(line);
            }
            let date = NaiveDate::from_ymd_opt(input.year, 12, 31)
                .unwrap_or(NaiveDate::MAX);
            Some(CreateJournalInput {
                date,
                description: format!("Year-end closing {}", input.year),
                journal_type: JournalType::Closing,
                lines,
            })
        };

        ClosingPlan {
            year: input.year,
            total_income,
            total_expense,
            net_income,
            journal,
        }
    }

    fn sum_type(balances: &[AccountBalance], account_type: AccountType) -> Decimal {
        balances
            .iter()
            .filter(|b| b.account_type == account_type)
            .map(|b| b.balance)
            .sum()
    }

    /// Builds the line that zeroes one account.
    ///
    /// Income accounts are credit-normal, so a positive balance is
    /// cleared with a debit; expense accounts the other way round. A
    /// negative natural balance flips the side.
    fn zeroing_line(balance: &AccountBalance) -> JournalLineInput {
        let amount = balance.balance.abs();
        let debit_side = match balance.account_type {
            AccountType::Income => balance.balance > Decimal::ZERO,
            _ => balance.balance < Decimal::ZERO,
        };
        if debit_side {
            JournalLineInput::debit(balance.account_id, amount)
        } else {
            JournalLineInput::credit(balance.account_id, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::validate_lines;
    use rust_decimal_macros::dec;
    use vestry_shared::types::AccountId;

    fn balance(account_type: AccountType, amount: Decimal) -> AccountBalance {
        AccountBalance {
            account_id: AccountId::new(),
            account_type,
            balance: amount,
        }
    }

    #[test]
    fn test_preconditions_require_no_open_periods() {
        let mut statuses = vec![PeriodStatus::Closed; 12];
        assert!(ClosingService::validate_preconditions(2025, &statuses, false).is_ok());

        statuses[5] = PeriodStatus::Open;
        let err = ClosingService::validate_preconditions(2025, &statuses, false).unwrap_err();
        assert!(matches!(
            err,
            ClosingError::PrematureClosing {
                year: 2025,
                open_count: 1,
            }
        ));
        assert_eq!(err.error_code(), "PREMATURE_CLOSING");
    }

    #[test]
    fn test_preconditions_accept_locked_periods() {
        let statuses = vec![PeriodStatus::Locked; 12];
        assert!(ClosingService::validate_preconditions(2025, &statuses, false).is_ok());
    }

    #[test]
    fn test_preconditions_reject_missing_periods() {
        let statuses = vec![PeriodStatus::Closed; 11];
        assert!(matches!(
            ClosingService::validate_preconditions(2025, &statuses, false),
            Err(ClosingError::IncompleteYear { found: 11, .. })
        ));
    }

    #[test]
    fn test_preconditions_reject_second_closing() {
        let statuses = vec![PeriodStatus::Locked; 12];
        let err = ClosingService::validate_preconditions(2025, &statuses, true).unwrap_err();
        assert!(matches!(err, ClosingError::AlreadyClosed(2025)));
        assert_eq!(err.error_code(), "ALREADY_CLOSED");
    }

    #[test]
    fn test_plan_with_surplus() {
        let input = ClosingInput {
            year: 2025,
            balances: vec![
                balance(AccountType::Income, dec!(500_000_000)),
                balance(AccountType::Expense, dec!(350_000_000)),
            ],
            retained_earnings_account_id: AccountId::new(),
        };
        let plan = ClosingService::compute_plan(&input);

        assert_eq!(plan.net_income, dec!(150_000_000));
        let journal = plan.journal.unwrap();
        assert_eq!(journal.journal_type, JournalType::Closing);
        assert_eq!(journal.lines.len(), 3);
        // Income debited, expense credited, retained earnings credited.
        let retained = &journal.lines[2];
        assert_eq!(retained.account_id, input.retained_earnings_account_id);
        assert_eq!(retained.credit, dec!(150_000_000));
        assert!(validate_lines(&journal.lines).unwrap().is_balanced());
    }

    #[test]
    fn test_plan_with_deficit_debits_retained_earnings() {
        let input = ClosingInput {
            year: 2025,
            balances: vec![
                balance(AccountType::Income, dec!(200_000_000)),
                balance(AccountType::Expense, dec!(260_000_000)),
            ],
            retained_earnings_account_id: AccountId::new(),
        };
        let plan = ClosingService::compute_plan(&input);

        assert_eq!(plan.net_income, dec!(-60_000_000));
        let journal = plan.journal.unwrap();
        let retained = journal.lines.last().unwrap();
        assert_eq!(retained.debit, dec!(60_000_000));
        assert!(validate_lines(&journal.lines).unwrap().is_balanced());
    }

    #[test]
    fn test_plan_skips_zero_balance_accounts() {
        let input = ClosingInput {
            year: 2025,
            balances: vec![
                balance(AccountType::Income, dec!(100_000)),
                balance(AccountType::Income, dec!(0)),
                balance(AccountType::Expense, dec!(100_000)),
            ],
            retained_earnings_account_id: AccountId::new(),
        };
        let plan = ClosingService::compute_plan(&input);

        assert_eq!(plan.net_income, dec!(0));
        let journal = plan.journal.unwrap();
        // Zero-balance account skipped, and no retained earnings line
        // when net income is zero.
        assert_eq!(journal.lines.len(), 2);
        assert!(validate_lines(&journal.lines).unwrap().is_balanced());
    }

    #[test]
    fn test_plan_with_nothing_to_close() {
        let input = ClosingInput {
            year: 2025,
            balances: vec![
                balance(AccountType::Income, dec!(0)),
                balance(AccountType::Expense, dec!(0)),
            ],
            retained_earnings_account_id: AccountId::new(),
        };
        let plan = ClosingService::compute_plan(&input);
        assert_eq!(plan.net_income, dec!(0));
        assert!(plan.journal.is_none());
    }

    #[test]
    fn test_contra_income_flips_side() {
        // A negative income balance (refunds exceeding receipts) is
        // cleared with a credit.
        let input = ClosingInput {
            year: 2025,
            balances: vec![
                balance(AccountType::Income, dec!(-50_000)),
                balance(AccountType::Expense, dec!(30_000)),
            ],
            retained_earnings_account_id: AccountId::new(),
        };
        let plan = ClosingService::compute_plan(&input);

        assert_eq!(plan.net_income, dec!(-80_000));
        let journal = plan.journal.unwrap();
        assert_eq!(journal.lines[0].credit, dec!(50_000));
        assert!(validate_lines(&journal.lines).unwrap().is_balanced());
    }
}
