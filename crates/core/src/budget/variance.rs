//! Budget variance calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vestry_shared::types::money::round_percent;

/// Variance status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    /// Actual exceeds budget.
    Over,
    /// Actual is below budget.
    Under,
    /// Actual matches budget, or there is no budget to compare against.
    OnTrack,
}

/// Variance calculation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Actual amount.
    pub actual: Decimal,
    /// Variance amount (actual - budgeted).
    pub variance: Decimal,
    /// Variance as a percentage of the budgeted amount.
    pub variance_percentage: Decimal,
    /// Variance status.
    pub status: VarianceStatus,
}

/// Computes variance between budgeted and actual amounts.
///
/// Variance is `actual - budgeted` for every account type: positive
/// means over budget, negative means under. When the budgeted amount
/// is zero there is nothing to measure against, so the percentage is
/// zero and the status is [`VarianceStatus::OnTrack`] regardless of
/// the actual amount.
#[must_use]
pub fn compute_variance(budgeted: Decimal, actual: Decimal) -> VarianceResult {
    let variance = actual - budgeted;

    let (variance_percentage, status) = if budgeted.is_zero() {
        (Decimal::ZERO, VarianceStatus::OnTrack)
    } else {
        let pct = round_percent(variance / budgeted * Decimal::ONE_HUNDRED);
        let status = match variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => VarianceStatus::Over,
            std::cmp::Ordering::Less => VarianceStatus::Under,
            std::cmp::Ordering::Equal => VarianceStatus::OnTrack,
        };
        (pct, status)
    };

    VarianceResult {
        budgeted,
        actual,
        variance,
        variance_percentage,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_over_budget() {
        let result = compute_variance(dec!(1_000_000), dec!(1_200_000));
        assert_eq!(result.variance, dec!(200_000));
        assert_eq!(result.variance_percentage, dec!(20.00));
        assert_eq!(result.status, VarianceStatus::Over);
    }

    #[test]
    fn test_under_budget() {
        let result = compute_variance(dec!(1_000_000), dec!(750_000));
        assert_eq!(result.variance, dec!(-250_000));
        assert_eq!(result.variance_percentage, dec!(-25.00));
        assert_eq!(result.status, VarianceStatus::Under);
    }

    #[test]
    fn test_exactly_on_budget() {
        let result = compute_variance(dec!(500_000), dec!(500_000));
        assert_eq!(result.variance, dec!(0));
        assert_eq!(result.variance_percentage, dec!(0));
        assert_eq!(result.status, VarianceStatus::OnTrack);
    }

    #[test]
    fn test_zero_budget_never_divides() {
        // Unbudgeted spending must not blow up the percentage.
        let result = compute_variance(dec!(0), dec!(300_000));
        assert_eq!(result.variance, dec!(300_000));
        assert_eq!(result.variance_percentage, dec!(0));
        assert_eq!(result.status, VarianceStatus::OnTrack);
    }

    #[test]
    fn test_percentage_rounds_to_two_places() {
        let result = compute_variance(dec!(3), dec!(4));
        assert_eq!(result.variance_percentage, dec!(33.33));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Variance sign always matches the status when a budget exists.
        #[test]
        fn prop_status_matches_sign(
            budgeted in 1i64..=10_000_000,
            actual in 0i64..=10_000_000,
        ) {
            let result = compute_variance(Decimal::from(budgeted), Decimal::from(actual));
            match result.status {
                VarianceStatus::Over => prop_assert!(result.variance > Decimal::ZERO),
                VarianceStatus::Under => prop_assert!(result.variance < Decimal::ZERO),
                VarianceStatus::OnTrack => prop_assert!(result.variance.is_zero()),
            }
        }

        /// Variance is exactly actual minus budgeted.
        #[test]
        fn prop_variance_identity(
            budgeted in 0i64..=10_000_000,
            actual in 0i64..=10_000_000,
        ) {
            let result = compute_variance(Decimal::from(budgeted), Decimal::from(actual));
            prop_assert_eq!(result.variance, Decimal::from(actual) - Decimal::from(budgeted));
        }
    }
}
