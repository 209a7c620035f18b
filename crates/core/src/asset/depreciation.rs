//! Straight-line depreciation calculation.
//!
//! monthly = (cost - salvage) / useful_life_months, rounded to cents
//! with banker's rounding. Rounding drift is absorbed by the final
//! step, which takes whatever remains so the book value lands exactly
//! on the salvage value.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use vestry_shared::types::money::round_amount;

use super::error::AssetError;
use super::types::{AssetDepreciationInput, DepreciationAccounts, DepreciationStep};
use crate::journal::{CreateJournalInput, JournalLineInput, JournalType};

/// Computes the standard monthly depreciation amount for an asset.
///
/// # Errors
///
/// Returns `InvalidUsefulLife` for a non-positive life,
/// `NegativeAmount` for negative cost or salvage, and
/// `SalvageExceedsCost` when the salvage floor is above the cost.
pub fn monthly_depreciation(
    cost: Decimal,
    salvage: Decimal,
    useful_life_months: i32,
) -> Result<Decimal, AssetError> {
    if useful_life_months < 1 {
        return Err(AssetError::InvalidUsefulLife(useful_life_months));
    }
    if cost < Decimal::ZERO || salvage < Decimal::ZERO {
        return Err(AssetError::NegativeAmount);
    }
    if salvage > cost {
        return Err(AssetError::SalvageExceedsCost { salvage, cost });
    }

    Ok(round_amount(
        (cost - salvage) / Decimal::from(useful_life_months),
    ))
}

/// Computes one month of depreciation for an asset.
///
/// Returns `None` when the asset is already fully depreciated (book
/// value at the salvage floor). The amount is the standard monthly
/// figure, capped at the remaining depreciable amount so the book
/// value never drops below salvage.
///
/// # Errors
///
/// Propagates the validation errors of [`monthly_depreciation`].
pub fn depreciation_step(
    asset: &AssetDepreciationInput,
) -> Result<Option<DepreciationStep>, AssetError> {
    let monthly = monthly_depreciation(
        asset.acquisition_cost,
        asset.salvage_value,
        asset.useful_life_months,
    )?;

    let remaining = asset.remaining_depreciable();
    if remaining <= Decimal::ZERO {
        return Ok(None);
    }

    let amount = monthly.min(remaining);
    Ok(Some(DepreciationStep {
        asset_id: asset.id,
        amount,
        book_value_after: asset.book_value() - amount,
    }))
}

/// One asset's journal for a monthly depreciation run.
#[derive(Debug, Clone)]
pub struct DepreciationJournalItem {
    /// Asset name, used in descriptions.
    pub asset_name: String,
    /// Accounts this asset posts to.
    pub accounts: DepreciationAccounts,
    /// The computed step.
    pub step: DepreciationStep,
}

/// An asset as the monthly run sees it: its figures, its accounts, and
/// whether this period already has an entry for it.
#[derive(Debug, Clone)]
pub struct RunAsset {
    /// Depreciation figures.
    pub input: AssetDepreciationInput,
    /// Accounts the asset posts to.
    pub accounts: DepreciationAccounts,
    /// An entry for the run's `(month, year)` already exists.
    pub already_posted: bool,
}

/// The computed work of one monthly run.
#[derive(Debug, Clone)]
pub struct DepreciationRunPlan {
    /// Assets to depreciate, one journal each.
    pub items: Vec<DepreciationJournalItem>,
    /// Assets skipped: already posted this period, or fully
    /// depreciated.
    pub skipped: usize,
}

/// Plans a monthly depreciation run over a set of assets.
///
/// The run is idempotent per `(asset, month, year)`: an asset whose
/// period entry already exists is skipped without recomputation, so
/// running the same month twice depreciates nothing the second time.
/// Fully depreciated assets are skipped too.
///
/// # Errors
///
/// Propagates the validation errors of [`depreciation_step`] for
/// assets that still need a step.
pub fn plan_depreciation_run(assets: &[RunAsset]) -> Result<DepreciationRunPlan, AssetError> {
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for asset in assets {
        if asset.already_posted {
            skipped += 1;
            continue;
        }
        match depreciation_step(&asset.input)? {
            Some(step) => items.push(DepreciationJournalItem {
                asset_name: asset.input.name.clone(),
                accounts: asset.accounts,
                step,
            }),
            None => skipped += 1,
        }
    }

    Ok(DepreciationRunPlan { items, skipped })
}

/// Builds the depreciation journal for one asset: a debit to its
/// expense account and a matching credit to its accumulated
/// depreciation account.
#[must_use]
pub fn build_depreciation_journal(
    item: &DepreciationJournalItem,
    date: NaiveDate,
    month: u32,
    year: i32,
) -> CreateJournalInput {
    let mut debit = JournalLineInput::debit(item.accounts.expense_account_id, item.step.amount);
    debit.description = Some(format!("Depreciation: {}", item.asset_name));
    let credit = JournalLineInput::credit(item.accounts.accumulated_account_id, item.step.amount);

    CreateJournalInput {
        date,
        description: format!("Depreciation {month}/{year}: {}", item.asset_name),
        journal_type: JournalType::Depreciation,
        lines: vec![debit, credit],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::validate_lines;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use vestry_shared::types::{AccountId, FixedAssetId};

    fn sound_system() -> AssetDepreciationInput {
        AssetDepreciationInput {
            id: FixedAssetId::new(),
            name: "Sound system".to_string(),
            acquisition_cost: dec!(60_000_000),
            salvage_value: dec!(0),
            useful_life_months: 60,
            accumulated_depreciation: dec!(0),
        }
    }

    #[test]
    fn test_monthly_amount() {
        let monthly = monthly_depreciation(dec!(60_000_000), dec!(0), 60).unwrap();
        assert_eq!(monthly, dec!(1_000_000));
    }

    #[test]
    fn test_monthly_amount_with_salvage() {
        let monthly = monthly_depreciation(dec!(10_000_000), dec!(1_000_000), 36).unwrap();
        assert_eq!(monthly, dec!(250_000));
    }

    #[test]
    fn test_monthly_amount_uses_bankers_rounding() {
        // 1000 / 3 = 333.333... -> 333.33
        let monthly = monthly_depreciation(dec!(1000), dec!(0), 3).unwrap();
        assert_eq!(monthly, dec!(333.33));
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            monthly_depreciation(dec!(1000), dec!(0), 0),
            Err(AssetError::InvalidUsefulLife(0))
        ));
        assert!(matches!(
            monthly_depreciation(dec!(1000), dec!(2000), 12),
            Err(AssetError::SalvageExceedsCost { .. })
        ));
        assert!(matches!(
            monthly_depreciation(dec!(-1), dec!(0), 12),
            Err(AssetError::NegativeAmount)
        ));
    }

    #[test]
    fn test_full_life_reaches_zero_book_value() {
        let mut asset = sound_system();
        for _ in 0..60 {
            let step = depreciation_step(&asset).unwrap().unwrap();
            assert_eq!(step.amount, dec!(1_000_000));
            asset.accumulated_depreciation += step.amount;
        }
        assert_eq!(asset.book_value(), dec!(0));
        // Month 61: nothing left to depreciate.
        assert!(depreciation_step(&asset).unwrap().is_none());
    }

    #[test]
    fn test_final_step_takes_remainder() {
        // 1000 over 3 months: 333.33, 333.33, then 333.34 to land on zero.
        let mut asset = AssetDepreciationInput {
            id: FixedAssetId::new(),
            name: "Projector".to_string(),
            acquisition_cost: dec!(1000),
            salvage_value: dec!(0),
            useful_life_months: 3,
            accumulated_depreciation: dec!(0),
        };
        let mut amounts = Vec::new();
        while let Some(step) = depreciation_step(&asset).unwrap() {
            amounts.push(step.amount);
            asset.accumulated_depreciation += step.amount;
        }
        assert_eq!(amounts, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);
        assert_eq!(asset.book_value(), dec!(0));
    }

    #[test]
    fn test_book_value_never_below_salvage() {
        let mut asset = AssetDepreciationInput {
            id: FixedAssetId::new(),
            name: "Van".to_string(),
            acquisition_cost: dec!(100_000_000),
            salvage_value: dec!(10_000_000),
            useful_life_months: 48,
            accumulated_depreciation: dec!(0),
        };
        while let Some(step) = depreciation_step(&asset).unwrap() {
            asset.accumulated_depreciation += step.amount;
            assert!(step.book_value_after >= asset.salvage_value);
        }
        assert_eq!(asset.book_value(), dec!(10_000_000));
    }

    #[test]
    fn test_asset_journal_balances() {
        let item = DepreciationJournalItem {
            asset_name: "Sound system".to_string(),
            accounts: DepreciationAccounts {
                expense_account_id: AccountId::new(),
                accumulated_account_id: AccountId::new(),
            },
            step: DepreciationStep {
                asset_id: FixedAssetId::new(),
                amount: dec!(1_000_000),
                book_value_after: dec!(59_000_000),
            },
        };
        let date = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let journal = build_depreciation_journal(&item, date, 5, 2025);

        assert_eq!(journal.journal_type, JournalType::Depreciation);
        assert_eq!(journal.lines.len(), 2);
        assert_eq!(journal.description, "Depreciation 5/2025: Sound system");
        assert_eq!(
            journal.lines[0].account_id,
            item.accounts.expense_account_id
        );
        assert_eq!(
            journal.lines[1].account_id,
            item.accounts.accumulated_account_id
        );
        let totals = validate_lines(&journal.lines).unwrap();
        assert_eq!(totals.total_debit, dec!(1_000_000));
        assert!(totals.is_balanced());
        assert_eq!(
            journal.lines[0].description.as_deref(),
            Some("Depreciation: Sound system")
        );
    }

    fn run_asset(input: AssetDepreciationInput, already_posted: bool) -> RunAsset {
        RunAsset {
            input,
            accounts: DepreciationAccounts {
                expense_account_id: AccountId::new(),
                accumulated_account_id: AccountId::new(),
            },
            already_posted,
        }
    }

    #[test]
    fn test_plan_depreciates_eligible_assets() {
        let assets = vec![
            run_asset(sound_system(), false),
            run_asset(sound_system(), false),
        ];
        let plan = plan_depreciation_run(&assets).unwrap();
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.skipped, 0);
        assert_eq!(plan.items[0].step.amount, dec!(1_000_000));
    }

    #[test]
    fn test_second_run_depreciates_nothing() {
        // First run: one step per asset.
        let assets = vec![
            run_asset(sound_system(), false),
            run_asset(sound_system(), false),
        ];
        let first = plan_depreciation_run(&assets).unwrap();
        assert_eq!(first.items.len(), 2);

        // Same month again: every asset now has its period entry.
        let again: Vec<RunAsset> = assets
            .into_iter()
            .map(|mut asset| {
                asset.already_posted = true;
                asset
            })
            .collect();
        let second = plan_depreciation_run(&again).unwrap();
        assert!(second.items.is_empty());
        assert_eq!(second.skipped, 2);
    }

    #[test]
    fn test_plan_skips_fully_depreciated() {
        let mut spent = sound_system();
        spent.accumulated_depreciation = spent.acquisition_cost;
        let assets = vec![run_asset(spent, false), run_asset(sound_system(), false)];

        let plan = plan_depreciation_run(&assets).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.skipped, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every asset is either planned or skipped, never both and
        /// never twice; already-posted assets are always skipped.
        #[test]
        fn prop_run_partitions_assets(posted_flags in prop::collection::vec(any::<bool>(), 1..20)) {
            let assets: Vec<RunAsset> = posted_flags
                .iter()
                .map(|&posted| run_asset(sound_system(), posted))
                .collect();
            let plan = plan_depreciation_run(&assets).unwrap();

            prop_assert_eq!(plan.items.len() + plan.skipped, assets.len());
            let posted_count = posted_flags.iter().filter(|&&p| p).count();
            prop_assert_eq!(plan.items.len(), assets.len() - posted_count);
        }
    }
}
