//! Business rule validation for journal lines.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{JournalLineInput, JournalTotals};

/// Validates a set of journal lines and computes their totals.
///
/// Rules enforced, in order:
/// - at least two lines;
/// - every line has exactly one of debit/credit nonzero, non-negative;
/// - both debit and credit sides are represented;
/// - total debits equal total credits and the total is strictly
///   positive.
///
/// # Errors
///
/// Returns the first `JournalError` violated.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<JournalTotals, JournalError> {
    if lines.len() < 2 {
        return Err(JournalError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount);
        }

        match (line.debit.is_zero(), line.credit.is_zero()) {
            (true, true) => return Err(JournalError::ZeroAmount),
            (false, false) => return Err(JournalError::AmbiguousLine),
            (false, true) => {
                total_debit += line.debit;
                has_debit = true;
            }
            (true, false) => {
                total_credit += line.credit;
                has_credit = true;
            }
        }
    }

    if !has_debit || !has_credit {
        return Err(JournalError::SingleSided);
    }

    if total_debit != total_credit {
        return Err(JournalError::Unbalanced {
            debits: total_debit,
            credits: total_credit,
        });
    }

    // Zero-amount lines are rejected above, so a balanced journal that
    // reaches this point always has a positive total.
    debug_assert!(total_debit > Decimal::ZERO);

    Ok(JournalTotals {
        total_debit,
        total_credit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use vestry_shared::types::AccountId;

    fn debit(amount: Decimal) -> JournalLineInput {
        JournalLineInput::debit(AccountId::new(), amount)
    }

    fn credit(amount: Decimal) -> JournalLineInput {
        JournalLineInput::credit(AccountId::new(), amount)
    }

    #[test]
    fn test_balanced_journal_accepted() {
        let totals = validate_lines(&[debit(dec!(100_000)), credit(dec!(100_000))]).unwrap();
        assert_eq!(totals.total_debit, dec!(100_000));
        assert_eq!(totals.total_credit, dec!(100_000));
        assert!(totals.is_balanced());
    }

    #[test]
    fn test_multi_line_split() {
        let totals = validate_lines(&[
            debit(dec!(750)),
            debit(dec!(250)),
            credit(dec!(1000)),
        ])
        .unwrap();
        assert_eq!(totals.total_debit, dec!(1000));
    }

    #[test]
    fn test_unbalanced_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(100)), credit(dec!(50))]),
            Err(JournalError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_single_line_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(100))]),
            Err(JournalError::InsufficientLines)
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            validate_lines(&[]),
            Err(JournalError::InsufficientLines)
        ));
    }

    #[test]
    fn test_single_sided_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(100)), debit(dec!(100))]),
            Err(JournalError::SingleSided)
        ));
    }

    #[test]
    fn test_zero_line_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(0)), credit(dec!(0))]),
            Err(JournalError::ZeroAmount)
        ));
    }

    #[test]
    fn test_both_sides_on_one_line_rejected() {
        let mut line = debit(dec!(100));
        line.credit = dec!(100);
        assert!(matches!(
            validate_lines(&[line, credit(dec!(100))]),
            Err(JournalError::AmbiguousLine)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(matches!(
            validate_lines(&[debit(dec!(-100)), credit(dec!(-100))]),
            Err(JournalError::NegativeAmount)
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any journal built by mirroring debit amounts into one credit
        /// validates, and its total is the sum of the debits.
        #[test]
        fn prop_mirrored_lines_balance(amounts in prop::collection::vec(1i64..1_000_000i64, 1..10)) {
            let mut lines: Vec<JournalLineInput> = amounts
                .iter()
                .map(|&n| debit(Decimal::new(n, 2)))
                .collect();
            let total: Decimal = amounts.iter().map(|&n| Decimal::new(n, 2)).sum();
            lines.push(credit(total));

            let totals = validate_lines(&lines).unwrap();
            prop_assert_eq!(totals.total_debit, total);
            prop_assert_eq!(totals.total_credit, total);
        }

        /// Perturbing one side by any nonzero delta breaks the balance.
        #[test]
        fn prop_perturbed_journal_rejected(
            amount in 1i64..1_000_000i64,
            delta in 1i64..1_000i64,
        ) {
            let lines = [
                debit(Decimal::new(amount, 2)),
                credit(Decimal::new(amount + delta, 2)),
            ];
            prop_assert!(
                matches!(
                    validate_lines(&lines),
                    Err(JournalError::Unbalanced { .. })
                ),
                "expected Unbalanced error"
            );
        }
    }
}
