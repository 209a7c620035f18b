//! Read-only reporting queries.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vestry_core::account::{balance_change, AccountType};
use vestry_core::fiscal::FiscalError;
use vestry_shared::types::AccountId;

use crate::entities::{accounts, journal_lines, journals, sea_orm_active_enums};
use crate::repositories::fiscal::month_bounds;

fn db_err(e: DbErr) -> FiscalError {
    FiscalError::Database(e.to_string())
}

/// One account row of a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Sum of debits in the window.
    pub total_debit: Decimal,
    /// Sum of credits in the window.
    pub total_credit: Decimal,
    /// Signed balance movement for the window, positive on the
    /// account's normal side.
    pub balance: Decimal,
}

/// Trial balance for one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalance {
    /// Month (1-12).
    pub month: u32,
    /// Year.
    pub year: i32,
    /// Per-account rows, ordered by code; accounts without movement
    /// are omitted.
    pub rows: Vec<TrialBalanceRow>,
    /// Grand total of debits.
    pub total_debit: Decimal,
    /// Grand total of credits; equals `total_debit` when the ledger
    /// is consistent.
    pub total_credit: Decimal,
}

/// Reporting repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the trial balance for a month from approved journals.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` or a database error.
    pub async fn trial_balance(&self, month: u32, year: i32) -> Result<TrialBalance, FiscalError> {
        let (from, to) = month_bounds(year, month)?;

        let rows: Vec<(Uuid, Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountId)
            .column_as(journal_lines::Column::Debit.sum(), "total_debit")
            .column_as(journal_lines::Column::Credit.sum(), "total_credit")
            .inner_join(journals::Entity)
            .filter(journals::Column::Status.eq(sea_orm_active_enums::JournalStatus::Approved))
            .filter(journals::Column::JournalDate.gte(from))
            .filter(journals::Column::JournalDate.lte(to))
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

        let account_models = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(totals.keys().copied()))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut result_rows = Vec::with_capacity(account_models.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for account in account_models {
            let (debit, credit) = totals
                .get(&account.id)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            let account_type: AccountType = account.account_type.into();

            total_debit += debit;
            total_credit += credit;

            result_rows.push(TrialBalanceRow {
                account_id: AccountId::from_uuid(account.id),
                account_code: account.code,
                account_name: account.name,
                account_type,
                total_debit: debit,
                total_credit: credit,
                balance: balance_change(account_type, debit, credit),
            });
        }

        Ok(TrialBalance {
            month,
            year,
            rows: result_rows,
            total_debit,
            total_credit,
        })
    }
}
