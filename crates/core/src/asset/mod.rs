//! Fixed assets and straight-line depreciation.

pub mod depreciation;
pub mod error;
pub mod types;

pub use depreciation::{
    build_depreciation_journal, depreciation_step, monthly_depreciation, plan_depreciation_run,
    DepreciationJournalItem, DepreciationRunPlan, RunAsset,
};
pub use error::AssetError;
pub use types::{AssetDepreciationInput, DepreciationAccounts, DepreciationStep};
