//! Account domain types and normal balance rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account type classification.
///
/// The five fundamental account types of double-entry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, buildings, equipment).
    Asset,
    /// Obligations owed.
    Liability,
    /// Net assets / fund balance.
    Equity,
    /// Giving, offerings, and other income.
    Income,
    /// Operating and ministry expenses.
    Expense,
}

/// The side on which an account type naturally increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Balance increases with debits.
    Debit,
    /// Balance increases with credits.
    Credit,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    ///
    /// Fully determined by the type: Asset/Expense are debit-normal,
    /// Liability/Equity/Income are credit-normal. Never independently
    /// settable.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Income => NormalBalance::Credit,
        }
    }

    /// Returns true if this account type is debit-normal.
    #[must_use]
    pub const fn is_debit_normal(&self) -> bool {
        matches!(self.normal_balance(), NormalBalance::Debit)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Calculates the signed balance change for a posting.
///
/// Debit-normal accounts grow with debits (`debit - credit`);
/// credit-normal accounts grow with credits (`credit - debit`).
#[must_use]
pub fn balance_change(account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
    match account_type.normal_balance() {
        NormalBalance::Debit => debit - credit,
        NormalBalance::Credit => credit - debit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normal_balance_is_derived() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Income.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_balance_change_debit_normal() {
        assert_eq!(
            balance_change(AccountType::Asset, dec!(100), dec!(0)),
            dec!(100)
        );
        assert_eq!(
            balance_change(AccountType::Expense, dec!(0), dec!(40)),
            dec!(-40)
        );
    }

    #[test]
    fn test_balance_change_credit_normal() {
        assert_eq!(
            balance_change(AccountType::Income, dec!(0), dec!(250)),
            dec!(250)
        );
        assert_eq!(
            balance_change(AccountType::Liability, dec!(60), dec!(0)),
            dec!(-60)
        );
    }

    fn account_type_strategy() -> impl Strategy<Value = AccountType> {
        prop_oneof![
            Just(AccountType::Asset),
            Just(AccountType::Liability),
            Just(AccountType::Equity),
            Just(AccountType::Income),
            Just(AccountType::Expense),
        ]
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A debit and a credit of the same amount cancel out on every
        /// account type.
        #[test]
        fn prop_equal_sides_cancel(
            account_type in account_type_strategy(),
            amount in amount_strategy(),
        ) {
            prop_assert_eq!(
                balance_change(account_type, amount, amount),
                Decimal::ZERO
            );
        }

        /// Posting on the normal side always increases the balance.
        #[test]
        fn prop_normal_side_increases(
            account_type in account_type_strategy(),
            amount in amount_strategy(),
        ) {
            prop_assume!(amount > Decimal::ZERO);
            let change = match account_type.normal_balance() {
                NormalBalance::Debit => balance_change(account_type, amount, Decimal::ZERO),
                NormalBalance::Credit => balance_change(account_type, Decimal::ZERO, amount),
            };
            prop_assert_eq!(change, amount);
        }
    }
}
