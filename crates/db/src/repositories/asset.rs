//! Fixed asset repository and the monthly depreciation run.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use vestry_core::asset::{
    build_depreciation_journal, monthly_depreciation, plan_depreciation_run,
    AssetDepreciationInput, AssetError, DepreciationAccounts, RunAsset,
};
use vestry_core::fiscal::{validate_posting, PeriodKey};
use vestry_core::journal::JournalError;
use vestry_shared::types::{AccountId, DepreciationEntryId, FixedAssetId};

use crate::entities::{depreciation_entries, fixed_assets};
use crate::repositories::fiscal::{month_bounds, FiscalRepository};
use crate::repositories::journal::{JournalRepository, JournalWithLines};

fn db_err(e: DbErr) -> AssetError {
    AssetError::Database(e.to_string())
}

/// Input for registering a fixed asset.
#[derive(Debug, Clone)]
pub struct CreateAssetInput {
    /// Unique asset code.
    pub asset_code: String,
    /// Asset name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Salvage value at end of life.
    pub salvage_value: Decimal,
    /// Useful life in months.
    pub useful_life_months: i32,
    /// Asset account carrying the cost.
    pub asset_account_id: AccountId,
    /// Depreciation expense account.
    pub expense_account_id: AccountId,
    /// Accumulated depreciation account.
    pub accumulated_account_id: AccountId,
}

/// Outcome of a monthly depreciation run.
#[derive(Debug, Clone)]
pub struct DepreciationRunResult {
    /// Month of the run (1-12).
    pub month: u32,
    /// Year of the run.
    pub year: i32,
    /// Assets depreciated in this run.
    pub depreciated_count: usize,
    /// Assets skipped: already posted for the month or fully
    /// depreciated.
    pub skipped_count: usize,
    /// One approved journal per depreciated asset.
    pub journals: Vec<JournalWithLines>,
}

/// Errors a depreciation run can produce.
#[derive(Debug, thiserror::Error)]
pub enum DepreciationRunError {
    /// Asset validation or lookup failed.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// Posting the depreciation journal failed.
    #[error(transparent)]
    Journal(#[from] JournalError),
}

/// Fixed asset repository.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    db: DatabaseConnection,
}

impl AssetRepository {
    /// Creates a new asset repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a fixed asset.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive life, negative
    /// amounts, or salvage above cost, and `DuplicateCode` when the
    /// asset code is taken.
    pub async fn create(&self, input: CreateAssetInput) -> Result<fixed_assets::Model, AssetError> {
        // Rejects invalid cost/salvage/life combinations up front.
        monthly_depreciation(
            input.acquisition_cost,
            input.salvage_value,
            input.useful_life_months,
        )?;

        let existing = fixed_assets::Entity::find()
            .filter(fixed_assets::Column::AssetCode.eq(input.asset_code.clone()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(AssetError::DuplicateCode(input.asset_code));
        }

        let now = Utc::now().into();
        let model = fixed_assets::ActiveModel {
            id: Set(FixedAssetId::new().into_inner()),
            asset_code: Set(input.asset_code),
            name: Set(input.name),
            description: Set(input.description),
            acquisition_date: Set(input.acquisition_date),
            acquisition_cost: Set(input.acquisition_cost),
            salvage_value: Set(input.salvage_value),
            useful_life_months: Set(input.useful_life_months),
            asset_account_id: Set(input.asset_account_id.into_inner()),
            expense_account_id: Set(input.expense_account_id.into_inner()),
            accumulated_account_id: Set(input.accumulated_account_id.into_inner()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.db).await.map_err(db_err)
    }

    /// Lists all assets ordered by acquisition date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<fixed_assets::Model>, AssetError> {
        fixed_assets::Entity::find()
            .order_by_asc(fixed_assets::Column::AcquisitionDate)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets an asset by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no asset has this ID.
    pub async fn get(&self, id: FixedAssetId) -> Result<fixed_assets::Model, AssetError> {
        fixed_assets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(AssetError::NotFound(id))
    }

    /// Lists the depreciation schedule of an asset, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn schedule(
        &self,
        id: FixedAssetId,
    ) -> Result<Vec<depreciation_entries::Model>, AssetError> {
        depreciation_entries::Entity::find()
            .filter(depreciation_entries::Column::AssetId.eq(id.into_inner()))
            .order_by_asc(depreciation_entries::Column::Year)
            .order_by_asc(depreciation_entries::Column::Month)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Runs monthly depreciation for all active assets.
    ///
    /// The run is idempotent: assets that already have an entry for
    /// `(month, year)` are skipped, as are fully depreciated assets
    /// and assets acquired after the month. Each depreciated asset
    /// gets its own approved journal, posted on the last day of the
    /// month; journal and schedule entry are written in one
    /// transaction so an interrupted run never leaves an orphaned
    /// journal that a retry would double-post.
    ///
    /// # Errors
    ///
    /// Returns an error when the target period rejects postings or a
    /// database operation fails.
    pub async fn run_depreciation(
        &self,
        journals: &JournalRepository,
        month: u32,
        year: i32,
    ) -> Result<DepreciationRunResult, DepreciationRunError> {
        let (_, posting_date) = month_bounds(year, month)
            .map_err(|e| AssetError::Database(e.to_string()))?;
        let month_i16 =
            i16::try_from(month).map_err(|_| AssetError::Database(format!("month {month}")))?;

        let fiscal = FiscalRepository::new(self.db.clone());
        let period = fiscal
            .find_period_for_date(posting_date)
            .await
            .map_err(|e| DepreciationRunError::Journal(e.into()))?;
        let key = PeriodKey::for_date(posting_date);
        validate_posting(key, period.status.clone().into())
            .map_err(|e| DepreciationRunError::Journal(e.into()))?;

        let assets = fixed_assets::Entity::find()
            .filter(fixed_assets::Column::IsActive.eq(true))
            .filter(fixed_assets::Column::AcquisitionDate.lte(posting_date))
            .all(&self.db)
            .await
            .map_err(db_err)
            .map_err(DepreciationRunError::Asset)?;

        let mut run_assets = Vec::with_capacity(assets.len());
        for asset in &assets {
            let already_posted = depreciation_entries::Entity::find()
                .filter(depreciation_entries::Column::AssetId.eq(asset.id))
                .filter(depreciation_entries::Column::Month.eq(month_i16))
                .filter(depreciation_entries::Column::Year.eq(year))
                .one(&self.db)
                .await
                .map_err(db_err)
                .map_err(DepreciationRunError::Asset)?
                .is_some();

            // The plan skips posted assets before looking at figures.
            let accumulated = if already_posted {
                Decimal::ZERO
            } else {
                self.accumulated_depreciation(FixedAssetId::from_uuid(asset.id))
                    .await?
            };

            run_assets.push(RunAsset {
                input: AssetDepreciationInput {
                    id: FixedAssetId::from_uuid(asset.id),
                    name: asset.name.clone(),
                    acquisition_cost: asset.acquisition_cost,
                    salvage_value: asset.salvage_value,
                    useful_life_months: asset.useful_life_months,
                    accumulated_depreciation: accumulated,
                },
                accounts: DepreciationAccounts {
                    expense_account_id: AccountId::from_uuid(asset.expense_account_id),
                    accumulated_account_id: AccountId::from_uuid(asset.accumulated_account_id),
                },
                already_posted,
            });
        }

        let plan = plan_depreciation_run(&run_assets).map_err(DepreciationRunError::Asset)?;

        let mut posted = Vec::with_capacity(plan.items.len());
        for item in &plan.items {
            let journal_input = build_depreciation_journal(item, posting_date, month, year);

            let txn = self
                .db
                .begin()
                .await
                .map_err(db_err)
                .map_err(DepreciationRunError::Asset)?;
            let created = JournalRepository::insert_approved(
                &txn,
                &journal_input,
                period.id,
                journals.number_prefix(),
            )
            .await?;

            let entry = depreciation_entries::ActiveModel {
                id: Set(DepreciationEntryId::new().into_inner()),
                asset_id: Set(item.step.asset_id.into_inner()),
                month: Set(month_i16),
                year: Set(year),
                amount: Set(item.step.amount),
                book_value_after: Set(item.step.book_value_after),
                journal_id: Set(created.journal.id),
                created_at: Set(Utc::now().into()),
            };
            entry
                .insert(&txn)
                .await
                .map_err(db_err)
                .map_err(DepreciationRunError::Asset)?;

            txn.commit()
                .await
                .map_err(db_err)
                .map_err(DepreciationRunError::Asset)?;
            posted.push(created);
        }

        tracing::info!(
            month,
            year,
            depreciated = posted.len(),
            skipped = plan.skipped,
            "Depreciation run completed"
        );

        Ok(DepreciationRunResult {
            month,
            year,
            depreciated_count: posted.len(),
            skipped_count: plan.skipped,
            journals: posted,
        })
    }

    /// Sums the depreciation already posted against an asset.
    async fn accumulated_depreciation(
        &self,
        id: FixedAssetId,
    ) -> Result<Decimal, DepreciationRunError> {
        let entries = self.schedule(id).await?;
        Ok(entries.iter().map(|e| e.amount).sum())
    }
}
