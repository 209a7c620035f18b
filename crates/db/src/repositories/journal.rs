//! Journal repository for double-entry journal database operations.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use vestry_core::fiscal::PeriodStatus;
use vestry_core::journal::{
    build_reversal, validate_lines, AccountInfo, CreateJournalInput, JournalError, JournalService,
    JournalStatus, JournalType, ReversalInput,
};
use vestry_shared::types::{AccountId, JournalId, JournalLineId};

use crate::entities::{accounts, fiscal_periods, journal_lines, journals, sea_orm_active_enums};
use crate::repositories::fiscal::FiscalRepository;

fn db_err(e: DbErr) -> JournalError {
    JournalError::Database(e.to_string())
}

/// Allocates the next journal number within a transaction.
///
/// Numbers are zero-padded to six digits; ordering by length first
/// keeps the lookup correct once the sequence outgrows the padding
/// and a seventh digit appears.
pub(crate) async fn next_journal_number(
    txn: &DatabaseTransaction,
    prefix: &str,
) -> Result<String, JournalError> {
    let length: SimpleExpr =
        Func::char_length(Expr::col(journals::Column::JournalNumber)).into();
    let latest = journals::Entity::find()
        .order_by_desc(length)
        .order_by_desc(journals::Column::JournalNumber)
        .limit(1)
        .one(txn)
        .await
        .map_err(db_err)?;

    Ok(following_number(
        latest.as_ref().map(|journal| journal.journal_number.as_str()),
        prefix,
    ))
}

/// Computes the journal number that follows `latest`.
fn following_number(latest: Option<&str>, prefix: &str) -> String {
    let next = match latest {
        Some(number) => number
            .rsplit('-')
            .next()
            .and_then(|n| n.parse::<u64>().ok())
            .unwrap_or(0)
            .saturating_add(1),
        None => 1,
    };
    format!("{prefix}-{next:06}")
}

/// A journal header with its lines.
#[derive(Debug, Clone)]
pub struct JournalWithLines {
    /// Journal header.
    pub journal: journals::Model,
    /// Journal lines ordered by line number.
    pub lines: Vec<journal_lines::Model>,
}

/// Filter options for listing journals.
#[derive(Debug, Clone, Default)]
pub struct JournalFilter {
    /// Filter by status.
    pub status: Option<JournalStatus>,
    /// Filter by journal type.
    pub journal_type: Option<JournalType>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
}

/// Journal repository for CRUD and lifecycle operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
    number_prefix: String,
}

impl JournalRepository {
    /// Creates a new journal repository.
    ///
    /// `number_prefix` is the journal number prefix, e.g. `JRN` for
    /// numbers like `JRN-000001`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, number_prefix: String) -> Self {
        Self { db, number_prefix }
    }

    /// Creates a journal as a draft.
    ///
    /// Validation runs in the core crate against the resolved fiscal
    /// period and accounts; the database transaction covers the number
    /// allocation, the header, and all lines.
    ///
    /// # Errors
    ///
    /// Returns a `JournalError` for any violated posting rule.
    pub async fn create(&self, input: CreateJournalInput) -> Result<JournalWithLines, JournalError> {
        let (period, account_info) = self.resolve_context(&input).await?;
        let period_status: PeriodStatus = period.status.clone().into();

        let totals = JournalService::validate(
            &input,
            |_| Some(period_status),
            |id| account_info.get(&id).cloned(),
        )?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let journal_number = next_journal_number(&txn, &self.number_prefix).await?;
        let now = Utc::now().into();
        let journal_id = JournalId::new();

        let journal = journals::ActiveModel {
            id: Set(journal_id.into_inner()),
            journal_number: Set(journal_number),
            journal_date: Set(input.date),
            description: Set(input.description.clone()),
            journal_type: Set(input.journal_type.into()),
            status: Set(sea_orm_active_enums::JournalStatus::Draft),
            fiscal_period_id: Set(period.id),
            total_debit: Set(totals.total_debit),
            total_credit: Set(totals.total_credit),
            reversed_by: Set(None),
            reverses: Set(None),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let journal = journal.insert(&txn).await.map_err(db_err)?;

        let lines = Self::insert_lines(&txn, journal_id, &input).await?;

        txn.commit().await.map_err(db_err)?;

        Ok(JournalWithLines { journal, lines })
    }

    /// Lists journals with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: JournalFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<journals::Model>, u64), JournalError> {
        let mut query = journals::Entity::find();

        if let Some(status) = filter.status {
            let db_status: sea_orm_active_enums::JournalStatus = status.into();
            query = query.filter(journals::Column::Status.eq(db_status));
        }
        if let Some(journal_type) = filter.journal_type {
            let db_type: sea_orm_active_enums::JournalType = journal_type.into();
            query = query.filter(journals::Column::JournalType.eq(db_type));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(journals::Column::JournalDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journals::Column::JournalDate.lte(date_to));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let journals = query
            .order_by_desc(journals::Column::JournalDate)
            .order_by_desc(journals::Column::JournalNumber)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok((journals, total))
    }

    /// Gets a journal with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no journal has this ID.
    pub async fn get(&self, id: JournalId) -> Result<JournalWithLines, JournalError> {
        let journal = journals::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(JournalError::NotFound(id))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::JournalId.eq(id.into_inner()))
            .order_by_asc(journal_lines::Column::LineNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(JournalWithLines { journal, lines })
    }

    /// Approves a draft journal.
    ///
    /// The fiscal period is re-checked at approval time: a draft must
    /// not slip into a period that has since been closed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for non-drafts and `PeriodClosed` when
    /// the period no longer accepts postings.
    pub async fn approve(&self, id: JournalId) -> Result<journals::Model, JournalError> {
        let journal = self.get(id).await?.journal;
        let status: JournalStatus = journal.status.clone().into();

        let fiscal = FiscalRepository::new(self.db.clone());
        let period = fiscal.find_period_for_date(journal.journal_date).await?;
        let period_key = vestry_core::fiscal::PeriodKey::for_date(journal.journal_date);
        JournalService::validate_can_approve(status, period_key, period.status.into())?;

        let now = Utc::now().into();
        let mut active: journals::ActiveModel = journal.into();
        active.status = Set(sea_orm_active_enums::JournalStatus::Approved);
        active.approved_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(db_err)
    }

    /// Deletes a draft journal and its lines.
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyDeleteDraft` for approved journals.
    pub async fn delete(&self, id: JournalId) -> Result<(), JournalError> {
        let journal = self.get(id).await?.journal;
        JournalService::validate_can_delete(journal.status.clone().into())?;

        // Lines cascade on delete.
        journals::Entity::delete_by_id(journal.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Reverses an approved journal with a counter-journal on `date`.
    ///
    /// The reversal journal, its approval, and the back-links on both
    /// journals are written in one transaction, so a reversed journal
    /// always carries its `reversed_by` pointer and a retry after a
    /// failure never produces a second reversal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` unless the journal is approved and not
    /// already reversed, and the usual posting errors for the
    /// reversal's own period.
    pub async fn reverse(
        &self,
        id: JournalId,
        date: NaiveDate,
    ) -> Result<JournalWithLines, JournalError> {
        let original = self.get(id).await?;
        JournalService::validate_can_reverse(original.journal.status.clone().into())?;
        if original.journal.reversed_by.is_some() {
            return Err(JournalError::InvalidState {
                status: JournalStatus::Approved,
                action: "reverse twice",
            });
        }

        let reversal_input = build_reversal(
            &ReversalInput {
                journal_number: original.journal.journal_number.clone(),
                description: original.journal.description.clone(),
                lines: original
                    .lines
                    .iter()
                    .map(|line| vestry_core::journal::JournalLineInput {
                        account_id: AccountId::from_uuid(line.account_id),
                        description: line.description.clone(),
                        debit: line.debit,
                        credit: line.credit,
                        responsibility_center_id: line
                            .responsibility_center_id
                            .map(vestry_shared::types::ResponsibilityCenterId::from_uuid),
                    })
                    .collect(),
            },
            date,
        );

        let (period, account_info) = self.resolve_context(&reversal_input).await?;
        let period_status: PeriodStatus = period.status.clone().into();
        JournalService::validate(
            &reversal_input,
            |_| Some(period_status),
            |account_id| account_info.get(&account_id).cloned(),
        )?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let reversal =
            Self::insert_approved(&txn, &reversal_input, period.id, &self.number_prefix).await?;

        let now = Utc::now().into();
        let mut link_reversal: journals::ActiveModel = reversal.journal.into();
        link_reversal.reverses = Set(Some(original.journal.id));
        link_reversal.updated_at = Set(now);
        let journal = link_reversal.update(&txn).await.map_err(db_err)?;

        let mut link_original: journals::ActiveModel = original.journal.into();
        link_original.reversed_by = Set(Some(journal.id));
        link_original.updated_at = Set(now);
        link_original.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        Ok(JournalWithLines {
            journal,
            lines: reversal.lines,
        })
    }

    /// Inserts a pre-approved journal with its lines inside an open
    /// transaction.
    ///
    /// The caller is responsible for any posting-gate validation;
    /// system-generated journals (depreciation, reversal, closing)
    /// use this to post atomically with their bookkeeping records.
    pub(crate) async fn insert_approved(
        txn: &DatabaseTransaction,
        input: &CreateJournalInput,
        fiscal_period_id: Uuid,
        prefix: &str,
    ) -> Result<JournalWithLines, JournalError> {
        let totals = validate_lines(&input.lines)?;
        let journal_number = next_journal_number(txn, prefix).await?;
        let now = Utc::now().into();
        let journal_id = JournalId::new();

        let journal = journals::ActiveModel {
            id: Set(journal_id.into_inner()),
            journal_number: Set(journal_number),
            journal_date: Set(input.date),
            description: Set(input.description.clone()),
            journal_type: Set(input.journal_type.into()),
            status: Set(sea_orm_active_enums::JournalStatus::Approved),
            fiscal_period_id: Set(fiscal_period_id),
            total_debit: Set(totals.total_debit),
            total_credit: Set(totals.total_credit),
            reversed_by: Set(None),
            reverses: Set(None),
            approved_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let journal = journal.insert(txn).await.map_err(db_err)?;
        let lines = Self::insert_lines(txn, journal_id, input).await?;

        Ok(JournalWithLines { journal, lines })
    }

    /// The configured journal number prefix.
    pub(crate) fn number_prefix(&self) -> &str {
        &self.number_prefix
    }

    /// Resolves the fiscal period and account info a validation needs.
    async fn resolve_context(
        &self,
        input: &CreateJournalInput,
    ) -> Result<(fiscal_periods::Model, HashMap<AccountId, AccountInfo>), JournalError> {
        let fiscal = FiscalRepository::new(self.db.clone());
        let period = fiscal.find_period_for_date(input.date).await?;

        let ids: Vec<Uuid> = input
            .lines
            .iter()
            .map(|line| line.account_id.into_inner())
            .collect();
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let account_info: HashMap<AccountId, AccountInfo> = accounts
            .into_iter()
            .map(|account| {
                let id = AccountId::from_uuid(account.id);
                (
                    id,
                    AccountInfo {
                        id,
                        is_active: account.is_active,
                    },
                )
            })
            .collect();

        Ok((period, account_info))
    }

    /// Inserts the lines of a journal.
    async fn insert_lines(
        txn: &DatabaseTransaction,
        journal_id: JournalId,
        input: &CreateJournalInput,
    ) -> Result<Vec<journal_lines::Model>, JournalError> {
        let now = Utc::now().into();
        let mut result = Vec::with_capacity(input.lines.len());

        for (index, line) in input.lines.iter().enumerate() {
            let line_number = i16::try_from(index + 1).unwrap_or(i16::MAX);
            let model = journal_lines::ActiveModel {
                id: Set(JournalLineId::new().into_inner()),
                journal_id: Set(journal_id.into_inner()),
                account_id: Set(line.account_id.into_inner()),
                line_number: Set(line_number),
                description: Set(line.description.clone()),
                debit: Set(line.debit),
                credit: Set(line.credit),
                responsibility_center_id: Set(line
                    .responsibility_center_id
                    .map(vestry_shared::types::ResponsibilityCenterId::into_inner)),
                created_at: Set(now),
            };
            result.push(model.insert(txn).await.map_err(db_err)?);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::following_number;

    #[test]
    fn test_first_number() {
        assert_eq!(following_number(None, "JRN"), "JRN-000001");
    }

    #[test]
    fn test_increments_padded_number() {
        assert_eq!(following_number(Some("JRN-000041"), "JRN"), "JRN-000042");
    }

    #[test]
    fn test_grows_past_the_padding() {
        // The sequence keeps counting once six digits run out.
        assert_eq!(following_number(Some("JRN-999999"), "JRN"), "JRN-1000000");
        assert_eq!(following_number(Some("JRN-1000000"), "JRN"), "JRN-1000001");
    }

    #[test]
    fn test_unparseable_number_restarts() {
        assert_eq!(following_number(Some("JRN-garbage"), "JRN"), "JRN-000001");
    }
}
