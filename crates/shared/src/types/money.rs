//! Monetary rounding helpers.
//!
//! CRITICAL: Never use floating-point for money calculations. All
//! amounts are `rust_decimal::Decimal`; wherever a division forces
//! rounding we use Banker's Rounding (round half to even) at 2 decimal
//! places so repeated postings do not drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for monetary amounts.
pub const AMOUNT_SCALE: u32 = 2;

/// Decimal places kept for percentages.
pub const PERCENT_SCALE: u32 = 2;

/// Rounds a monetary amount using Banker's Rounding.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a percentage using Banker's Rounding.
#[must_use]
pub fn round_percent(percent: Decimal) -> Decimal {
    percent.round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_amount_plain() {
        assert_eq!(round_amount(dec!(100.456)), dec!(100.46));
        assert_eq!(round_amount(dec!(100.454)), dec!(100.45));
    }

    #[test]
    fn test_round_amount_bankers_midpoint() {
        // Half to even: 0.125 -> 0.12, 0.135 -> 0.14
        assert_eq!(round_amount(dec!(0.125)), dec!(0.12));
        assert_eq!(round_amount(dec!(0.135)), dec!(0.14));
    }

    #[test]
    fn test_round_amount_no_op_on_integers() {
        assert_eq!(round_amount(dec!(1000000)), dec!(1000000));
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(dec!(33.3333)), dec!(33.33));
        assert_eq!(round_percent(dec!(66.6666)), dec!(66.67));
    }
}
