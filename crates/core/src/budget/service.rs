//! Budget service for validation and activation rules.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{BudgetLineInput, BudgetStatus, CreateBudgetInput, MONTHS_PER_YEAR};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Validates a budget before persisting as a draft.
    ///
    /// Drafts may be unbalanced - the monthly/annual equality is only
    /// enforced at activation - but structural rules apply up front:
    /// at least one line, no duplicate accounts, no negative amounts,
    /// and every line's breakdown covers exactly months 1-12.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError` describing the first violated rule.
    pub fn validate_create(input: &CreateBudgetInput) -> Result<(), BudgetError> {
        if input.lines.is_empty() {
            return Err(BudgetError::EmptyBudget);
        }

        let mut seen = HashSet::new();
        for line in &input.lines {
            if !seen.insert(line.account_id) {
                return Err(BudgetError::DuplicateAccount(line.account_id));
            }
            Self::validate_line_structure(line)?;
        }

        Ok(())
    }

    /// Validates that a draft budget can be activated.
    ///
    /// Activation requires every line's monthly amounts to sum exactly
    /// to its annual amount. An active budget cannot be re-activated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the budget is not a draft, or
    /// `UnbalancedLine` for the first line whose breakdown does not
    /// sum to the annual amount.
    pub fn validate_activation(
        status: BudgetStatus,
        lines: &[BudgetLineInput],
    ) -> Result<(), BudgetError> {
        if status != BudgetStatus::Draft {
            return Err(BudgetError::InvalidState {
                status,
                action: "activate",
            });
        }

        for line in lines {
            let monthly_total = line.monthly_total();
            if monthly_total != line.annual_amount {
                return Err(BudgetError::UnbalancedLine {
                    account_id: line.account_id,
                    monthly_total,
                    annual_amount: line.annual_amount,
                });
            }
        }

        Ok(())
    }

    /// Validates that a budget can be edited or deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the budget is a draft.
    pub fn validate_can_modify(status: BudgetStatus) -> Result<(), BudgetError> {
        if status != BudgetStatus::Draft {
            return Err(BudgetError::InvalidState {
                status,
                action: "modify",
            });
        }
        Ok(())
    }

    fn validate_line_structure(line: &BudgetLineInput) -> Result<(), BudgetError> {
        if line.annual_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }

        if line.monthly_amounts.len() != MONTHS_PER_YEAR
            || !line.monthly_amounts.keys().copied().eq(1..=12)
        {
            return Err(BudgetError::IncompleteMonths(line.monthly_amounts.len()));
        }

        if line.monthly_amounts.values().any(|v| *v < Decimal::ZERO) {
            return Err(BudgetError::NegativeAmount);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use vestry_shared::types::AccountId;

    fn even_line(annual: Decimal) -> BudgetLineInput {
        // Annual split evenly across 12 months; caller picks divisible amounts.
        let monthly = annual / Decimal::from(12);
        BudgetLineInput {
            account_id: AccountId::new(),
            annual_amount: annual,
            monthly_amounts: (1..=12).map(|m| (m, monthly)).collect(),
        }
    }

    fn make_input(lines: Vec<BudgetLineInput>) -> CreateBudgetInput {
        CreateBudgetInput {
            fiscal_year: 2025,
            name: "Operating Budget 2025".to_string(),
            lines,
        }
    }

    #[test]
    fn test_create_accepts_valid_draft() {
        let input = make_input(vec![even_line(dec!(12_000_000))]);
        assert!(BudgetService::validate_create(&input).is_ok());
    }

    #[test]
    fn test_create_rejects_empty_budget() {
        let input = make_input(vec![]);
        assert!(matches!(
            BudgetService::validate_create(&input),
            Err(BudgetError::EmptyBudget)
        ));
    }

    #[test]
    fn test_create_rejects_duplicate_account() {
        let mut line_a = even_line(dec!(12_000_000));
        let line_b = even_line(dec!(6_000_000));
        line_a.account_id = line_b.account_id;
        let input = make_input(vec![line_b, line_a]);
        assert!(matches!(
            BudgetService::validate_create(&input),
            Err(BudgetError::DuplicateAccount(_))
        ));
    }

    #[test]
    fn test_create_rejects_negative_monthly() {
        let mut line = even_line(dec!(12_000_000));
        line.monthly_amounts.insert(3, dec!(-1));
        let input = make_input(vec![line]);
        assert!(matches!(
            BudgetService::validate_create(&input),
            Err(BudgetError::NegativeAmount)
        ));
    }

    #[test]
    fn test_create_rejects_missing_month() {
        let mut line = even_line(dec!(12_000_000));
        line.monthly_amounts.remove(&7);
        let input = make_input(vec![line]);
        assert!(matches!(
            BudgetService::validate_create(&input),
            Err(BudgetError::IncompleteMonths(11))
        ));
    }

    #[test]
    fn test_create_rejects_out_of_range_month() {
        let mut line = even_line(dec!(12_000_000));
        line.monthly_amounts.remove(&7);
        line.monthly_amounts.insert(13, dec!(1_000_000));
        let input = make_input(vec![line]);
        assert!(matches!(
            BudgetService::validate_create(&input),
            Err(BudgetError::IncompleteMonths(12))
        ));
    }

    #[test]
    fn test_activation_accepts_balanced_lines() {
        let lines = vec![even_line(dec!(12_000_000)), even_line(dec!(24_000_000))];
        assert!(BudgetService::validate_activation(BudgetStatus::Draft, &lines).is_ok());
    }

    #[test]
    fn test_activation_rejects_unbalanced_line() {
        let mut line = even_line(dec!(12_000_000));
        line.monthly_amounts.insert(12, dec!(999_999));
        let result = BudgetService::validate_activation(BudgetStatus::Draft, &[line]);
        let Err(BudgetError::UnbalancedLine {
            monthly_total,
            annual_amount,
            ..
        }) = result
        else {
            panic!("expected UnbalancedLine");
        };
        assert_eq!(monthly_total, dec!(11_999_999));
        assert_eq!(annual_amount, dec!(12_000_000));
    }

    #[test]
    fn test_activation_error_code() {
        let mut line = even_line(dec!(12_000_000));
        line.monthly_amounts.insert(1, dec!(0));
        let err = BudgetService::validate_activation(BudgetStatus::Draft, &[line]).unwrap_err();
        assert_eq!(err.error_code(), "UNBALANCED_BUDGET");
        assert_eq!(err.http_status_code(), 422);
    }

    #[test]
    fn test_double_activation_rejected() {
        let lines = vec![even_line(dec!(12_000_000))];
        assert!(matches!(
            BudgetService::validate_activation(BudgetStatus::Active, &lines),
            Err(BudgetError::InvalidState {
                status: BudgetStatus::Active,
                action: "activate",
            })
        ));
    }

    #[test]
    fn test_active_budget_cannot_be_modified() {
        assert!(BudgetService::validate_can_modify(BudgetStatus::Draft).is_ok());
        assert!(matches!(
            BudgetService::validate_can_modify(BudgetStatus::Active),
            Err(BudgetError::InvalidState { .. })
        ));
    }
}
