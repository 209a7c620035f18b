//! Fixed asset data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vestry_shared::types::{AccountId, FixedAssetId};

/// The figures a depreciation run needs from an asset.
#[derive(Debug, Clone)]
pub struct AssetDepreciationInput {
    /// Asset ID.
    pub id: FixedAssetId,
    /// Asset name, used in journal descriptions.
    pub name: String,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Salvage value at end of life.
    pub salvage_value: Decimal,
    /// Useful life in months.
    pub useful_life_months: i32,
    /// Depreciation already posted against this asset.
    pub accumulated_depreciation: Decimal,
}

impl AssetDepreciationInput {
    /// Book value: cost minus accumulated depreciation.
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.acquisition_cost - self.accumulated_depreciation
    }

    /// Remaining depreciable amount before the salvage floor is hit.
    #[must_use]
    pub fn remaining_depreciable(&self) -> Decimal {
        self.acquisition_cost - self.salvage_value - self.accumulated_depreciation
    }
}

/// Accounts a depreciation journal posts to.
#[derive(Debug, Clone, Copy)]
pub struct DepreciationAccounts {
    /// Depreciation expense account (debited).
    pub expense_account_id: AccountId,
    /// Accumulated depreciation contra-asset account (credited).
    pub accumulated_account_id: AccountId,
}

/// One month of depreciation for one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationStep {
    /// Asset being depreciated.
    pub asset_id: FixedAssetId,
    /// Depreciation amount for this month.
    pub amount: Decimal,
    /// Book value after applying this step.
    pub book_value_after: Decimal,
}
