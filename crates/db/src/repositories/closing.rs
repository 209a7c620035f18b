//! Year-end closing repository.
//!
//! The whole closing - journal, closing record, period locks - runs in
//! one database transaction. The closing journal posts on December 31
//! even though every period is already closed; it is the one journal
//! that bypasses the posting gate, so it goes straight through the
//! journal repository's transaction-scoped insert without the period
//! check.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use vestry_core::account::AccountType;
use vestry_core::closing::{AccountBalance, ClosingError, ClosingInput, ClosingService};
use vestry_core::fiscal::PeriodStatus;
use vestry_shared::types::{AccountId, ClosingId};

use crate::entities::{
    accounts, fiscal_periods, journal_lines, journals, sea_orm_active_enums, year_end_closings,
};
use crate::repositories::fiscal::month_bounds;
use crate::repositories::journal::JournalRepository;

fn db_err(e: DbErr) -> ClosingError {
    ClosingError::Database(e.to_string())
}

/// Outcome of a year-end closing.
#[derive(Debug, Clone)]
pub struct ClosingOutcome {
    /// The persisted closing record.
    pub record: year_end_closings::Model,
    /// The closing journal, absent when there was nothing to close.
    pub journal: Option<journals::Model>,
}

/// Year-end closing repository.
#[derive(Debug, Clone)]
pub struct ClosingRepository {
    db: DatabaseConnection,
    number_prefix: String,
}

impl ClosingRepository {
    /// Creates a new closing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, number_prefix: String) -> Self {
        Self { db, number_prefix }
    }

    /// Gets the closing record for a year, if the year was closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_year(
        &self,
        year: i32,
    ) -> Result<Option<year_end_closings::Model>, ClosingError> {
        year_end_closings::Entity::find()
            .filter(year_end_closings::Column::FiscalYear.eq(year))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Closes a fiscal year.
    ///
    /// Preconditions: all twelve periods exist and none is open, and
    /// the year has not been closed before. The closing sweeps every
    /// income and expense balance into retained earnings, records the
    /// net income, and locks all periods - atomically.
    ///
    /// # Errors
    ///
    /// Returns `PrematureClosing`, `AlreadyClosed`,
    /// `RetainedEarningsNotFound`, or a database error.
    pub async fn close_year(
        &self,
        year: i32,
        retained_earnings_account_id: AccountId,
    ) -> Result<ClosingOutcome, ClosingError> {
        let already_closed = self.find_by_year(year).await?.is_some();

        let periods = fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::Year.eq(year))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let statuses: Vec<PeriodStatus> =
            periods.iter().map(|p| p.status.clone().into()).collect();

        ClosingService::validate_preconditions(year, &statuses, already_closed)?;

        let retained = accounts::Entity::find_by_id(retained_earnings_account_id.into_inner())
            .filter(
                accounts::Column::AccountType.eq(sea_orm_active_enums::AccountType::Equity),
            )
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                ClosingError::RetainedEarningsNotFound(retained_earnings_account_id.to_string())
            })?;

        let balances = self.year_balances(year).await?;
        let plan = ClosingService::compute_plan(&ClosingInput {
            year,
            balances,
            retained_earnings_account_id: AccountId::from_uuid(retained.id),
        });

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now().into();

        let journal = match &plan.journal {
            Some(input) => Some(self.insert_closing_journal(&txn, input, &periods).await?),
            None => None,
        };

        let record = year_end_closings::ActiveModel {
            id: Set(ClosingId::new().into_inner()),
            fiscal_year: Set(year),
            total_income: Set(plan.total_income),
            total_expense: Set(plan.total_expense),
            net_income: Set(plan.net_income),
            journal_id: Set(journal.as_ref().map(|j| j.id)),
            closed_at: Set(now),
        };
        let record = record.insert(&txn).await.map_err(db_err)?;

        // Lock every period of the year that is not already locked.
        for period in periods {
            if period.status == sea_orm_active_enums::FiscalPeriodStatus::Locked {
                continue;
            }
            let mut active: fiscal_periods::ActiveModel = period.into();
            active.status = Set(sea_orm_active_enums::FiscalPeriodStatus::Locked);
            active.updated_at = Set(now);
            active.update(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;

        tracing::info!(
            year,
            net_income = %record.net_income,
            journal_posted = journal.is_some(),
            "Fiscal year closed"
        );

        Ok(ClosingOutcome { record, journal })
    }

    /// Sums approved income and expense balances over a year.
    async fn year_balances(&self, year: i32) -> Result<Vec<AccountBalance>, ClosingError> {
        let (year_start, _) =
            month_bounds(year, 1).map_err(|e| ClosingError::Database(e.to_string()))?;
        let (_, year_end) =
            month_bounds(year, 12).map_err(|e| ClosingError::Database(e.to_string()))?;

        let income_expense = accounts::Entity::find()
            .filter(accounts::Column::AccountType.is_in([
                sea_orm_active_enums::AccountType::Income,
                sea_orm_active_enums::AccountType::Expense,
            ]))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let rows: Vec<(Uuid, Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountId)
            .column_as(journal_lines::Column::Debit.sum(), "total_debit")
            .column_as(journal_lines::Column::Credit.sum(), "total_credit")
            .inner_join(journals::Entity)
            .filter(journals::Column::Status.eq(sea_orm_active_enums::JournalStatus::Approved))
            .filter(
                journals::Column::JournalType.ne(sea_orm_active_enums::JournalType::Closing),
            )
            .filter(journals::Column::JournalDate.gte(year_start))
            .filter(journals::Column::JournalDate.lte(year_end))
            .group_by(journal_lines::Column::AccountId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let totals: HashMap<Uuid, (Decimal, Decimal)> = rows
            .into_iter()
            .map(|(id, debit, credit)| {
                (
                    id,
                    (
                        debit.unwrap_or(Decimal::ZERO),
                        credit.unwrap_or(Decimal::ZERO),
                    ),
                )
            })
            .collect();

        Ok(income_expense
            .into_iter()
            .map(|account| {
                let (debit, credit) = totals
                    .get(&account.id)
                    .copied()
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO));
                let account_type: AccountType = account.account_type.into();
                let balance = match account_type {
                    AccountType::Income => credit - debit,
                    _ => debit - credit,
                };
                AccountBalance {
                    account_id: AccountId::from_uuid(account.id),
                    account_type,
                    balance,
                }
            })
            .collect())
    }

    /// Inserts the closing journal, pre-approved, inside the closing
    /// transaction.
    async fn insert_closing_journal(
        &self,
        txn: &DatabaseTransaction,
        input: &vestry_core::journal::CreateJournalInput,
        periods: &[fiscal_periods::Model],
    ) -> Result<journals::Model, ClosingError> {
        let december = periods
            .iter()
            .find(|p| p.month == 12)
            .ok_or_else(|| ClosingError::Database("December period missing".to_string()))?;

        let created =
            JournalRepository::insert_approved(txn, input, december.id, &self.number_prefix)
                .await
                .map_err(|e| ClosingError::Database(e.to_string()))?;

        Ok(created.journal)
    }
}
