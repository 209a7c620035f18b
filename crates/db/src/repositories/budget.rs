//! Budget repository for database operations.
//!
//! Monthly breakdowns live in a JSONB column; this module converts
//! between the stored JSON and the core `BTreeMap` representation.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use vestry_core::budget::{
    compute_variance, BudgetError, BudgetLineInput, BudgetService, BudgetStatus,
    BudgetVarianceLine, BudgetVarianceReport, CreateBudgetInput,
};
use vestry_core::account::AccountType;
use vestry_shared::types::{AccountId, BudgetId, BudgetLineId};

use crate::entities::{
    accounts, budget_lines, budgets, journal_lines, journals, sea_orm_active_enums,
};
use crate::repositories::fiscal::month_bounds;

fn db_err(e: DbErr) -> BudgetError {
    BudgetError::Database(e.to_string())
}

fn monthly_to_json(amounts: &BTreeMap<u32, Decimal>) -> Result<serde_json::Value, BudgetError> {
    serde_json::to_value(amounts).map_err(|e| BudgetError::Database(e.to_string()))
}

fn monthly_from_json(value: &serde_json::Value) -> Result<BTreeMap<u32, Decimal>, BudgetError> {
    serde_json::from_value(value.clone()).map_err(|e| BudgetError::Database(e.to_string()))
}

/// A budget header with its lines.
#[derive(Debug, Clone)]
pub struct BudgetWithLines {
    /// Budget header.
    pub budget: budgets::Model,
    /// Budget lines.
    pub lines: Vec<budget_lines::Model>,
}

/// Budget repository for CRUD, activation, and variance reporting.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a budget as a draft.
    ///
    /// One budget per fiscal year; structural validation runs in the
    /// core crate, the balance check waits until activation.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateYear`, `AccountNotFound`, or a structural
    /// validation error.
    pub async fn create(&self, input: CreateBudgetInput) -> Result<BudgetWithLines, BudgetError> {
        BudgetService::validate_create(&input)?;

        let existing = budgets::Entity::find()
            .filter(budgets::Column::FiscalYear.eq(input.fiscal_year))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(BudgetError::DuplicateYear(input.fiscal_year));
        }

        self.check_accounts_exist(&input.lines).await?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now().into();
        let budget_id = BudgetId::new();

        let budget = budgets::ActiveModel {
            id: Set(budget_id.into_inner()),
            fiscal_year: Set(input.fiscal_year),
            name: Set(input.name),
            status: Set(sea_orm_active_enums::BudgetStatus::Draft),
            activated_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let budget = budget.insert(&txn).await.map_err(db_err)?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let model = budget_lines::ActiveModel {
                id: Set(BudgetLineId::new().into_inner()),
                budget_id: Set(budget_id.into_inner()),
                account_id: Set(line.account_id.into_inner()),
                annual_amount: Set(line.annual_amount),
                monthly_amounts: Set(monthly_to_json(&line.monthly_amounts)?),
                notes: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            lines.push(model.insert(&txn).await.map_err(db_err)?);
        }

        txn.commit().await.map_err(db_err)?;

        Ok(BudgetWithLines { budget, lines })
    }

    /// Lists budgets by fiscal year, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<budgets::Model>, BudgetError> {
        budgets::Entity::find()
            .order_by_desc(budgets::Column::FiscalYear)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Gets a budget with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no budget has this ID.
    pub async fn get(&self, id: BudgetId) -> Result<BudgetWithLines, BudgetError> {
        let budget = budgets::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(BudgetError::NotFound(id))?;

        let lines = budget_lines::Entity::find()
            .filter(budget_lines::Column::BudgetId.eq(id.into_inner()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(BudgetWithLines { budget, lines })
    }

    /// Replaces the lines of a draft budget.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for active budgets, plus the structural
    /// validation errors of budget creation.
    pub async fn replace_lines(
        &self,
        id: BudgetId,
        lines: Vec<BudgetLineInput>,
    ) -> Result<BudgetWithLines, BudgetError> {
        let existing = self.get(id).await?;
        BudgetService::validate_can_modify(existing.budget.status.clone().into())?;
        BudgetService::validate_create(&CreateBudgetInput {
            fiscal_year: existing.budget.fiscal_year,
            name: existing.budget.name.clone(),
            lines: lines.clone(),
        })?;
        self.check_accounts_exist(&lines).await?;

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now().into();

        budget_lines::Entity::delete_many()
            .filter(budget_lines::Column::BudgetId.eq(id.into_inner()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        for line in &lines {
            let model = budget_lines::ActiveModel {
                id: Set(BudgetLineId::new().into_inner()),
                budget_id: Set(id.into_inner()),
                account_id: Set(line.account_id.into_inner()),
                annual_amount: Set(line.annual_amount),
                monthly_amounts: Set(monthly_to_json(&line.monthly_amounts)?),
                notes: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            model.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        self.get(id).await
    }

    /// Activates a draft budget.
    ///
    /// Every line's monthly amounts must sum exactly to its annual
    /// amount; the first unbalanced line aborts the activation.
    ///
    /// # Errors
    ///
    /// Returns `UnbalancedLine` or `InvalidState`.
    pub async fn activate(&self, id: BudgetId) -> Result<budgets::Model, BudgetError> {
        let existing = self.get(id).await?;

        let line_inputs = existing
            .lines
            .iter()
            .map(|line| {
                Ok(BudgetLineInput {
                    account_id: AccountId::from_uuid(line.account_id),
                    annual_amount: line.annual_amount,
                    monthly_amounts: monthly_from_json(&line.monthly_amounts)?,
                })
            })
            .collect::<Result<Vec<_>, BudgetError>>()?;

        BudgetService::validate_activation(existing.budget.status.clone().into(), &line_inputs)?;

        let now = Utc::now().into();
        let mut active: budgets::ActiveModel = existing.budget.into();
        active.status = Set(sea_orm_active_enums::BudgetStatus::Active);
        active.activated_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await.map_err(db_err)
    }

    /// Deletes a draft budget and its lines.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` for active budgets.
    pub async fn delete(&self, id: BudgetId) -> Result<(), BudgetError> {
        let existing = self.get(id).await?;
        BudgetService::validate_can_modify(existing.budget.status.clone().into())?;

        budgets::Entity::delete_by_id(existing.budget.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    /// Builds the variance report for a budget over a month window.
    ///
    /// Actuals come from approved journals only; drafts never count.
    /// Budgeted amounts are the sum of the monthly buckets in the
    /// window.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn variance_report(
        &self,
        id: BudgetId,
        from_month: u32,
        to_month: u32,
    ) -> Result<BudgetVarianceReport, BudgetError> {
        let existing = self.get(id).await?;
        let year = existing.budget.fiscal_year;

        let (window_start, _) = month_bounds(year, from_month)
            .map_err(|e| BudgetError::Database(e.to_string()))?;
        let (_, window_end) = month_bounds(year, to_month)
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let account_ids: Vec<Uuid> = existing
            .lines
            .iter()
            .map(|line| line.account_id)
            .collect();
        let account_models = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(account_ids.clone()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let account_map: HashMap<Uuid, &accounts::Model> =
            account_models.iter().map(|a| (a.id, a)).collect();

        let actuals = self
            .actuals_by_account(&account_ids, window_start, window_end)
            .await?;

        let mut lines = Vec::with_capacity(existing.lines.len());
        let mut total_budgeted = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;

        for line in &existing.lines {
            let Some(account) = account_map.get(&line.account_id) else {
                return Err(BudgetError::AccountNotFound(AccountId::from_uuid(
                    line.account_id,
                )));
            };

            let monthly = monthly_from_json(&line.monthly_amounts)?;
            let budgeted: Decimal = monthly
                .range(from_month..=to_month)
                .map(|(_, amount)| *amount)
                .sum();

            let (sum_debit, sum_credit) = actuals
                .get(&line.account_id)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO));
            let account_type: AccountType = account.account_type.clone().into();
            // Natural-sign actuals: income is credit-normal, expense
            // debit-normal.
            let actual = match account_type {
                AccountType::Income => sum_credit - sum_debit,
                _ => sum_debit - sum_credit,
            };

            let result = compute_variance(budgeted, actual);
            total_budgeted += budgeted;
            total_actual += actual;

            lines.push(BudgetVarianceLine {
                account_id: AccountId::from_uuid(line.account_id),
                account_code: account.code.clone(),
                account_name: account.name.clone(),
                budgeted,
                actual,
                variance: result.variance,
                variance_percentage: result.variance_percentage,
                status: result.status,
            });
        }

        Ok(BudgetVarianceReport {
            budget_id: id,
            budget_name: existing.budget.name,
            fiscal_year: year,
            from_month,
            to_month,
            lines,
            total_budgeted,
            total_actual,
            total_variance: total_actual - total_budgeted,
        })
    }

    /// Sums approved journal line debits and credits per account over
    /// a date range.
    async fn actuals_by_account(
        &self,
        account_ids: &[Uuid],
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    ) -> Result<HashMap<Uuid, (Decimal, Decimal)>, BudgetError> {
        let rows: Vec<(Uuid, Option<Decimal>, Option<Decimal>)> = journal_lines::Entity::find()
            .select_only()
            .column(journal_lines::Column::AccountId)
            .column_as(journal_lines::Column::Debit.sum(), "total_debit")
            .column_as(journal_lines::Column::Credit.sum(), "total_credit")
            .inner_join(journals::Entity)
            .filter(journals::Column::Status.eq(sea_orm_active_enums::JournalStatus::Approved))
            .filter(journals::Column::JournalDate.gte(from))
            .filter(journals::Column::JournalDate.lte(to))
            .filter(journal_lines::Column::AccountId.is_in(account_ids.iter().copied()))
            .group_by(journal_lines::Column::AccountId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
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
            .collect())
    }

    async fn check_accounts_exist(&self, lines: &[BudgetLineInput]) -> Result<(), BudgetError> {
        let ids: Vec<Uuid> = lines
            .iter()
            .map(|line| line.account_id.into_inner())
            .collect();
        let found = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let found_ids: Vec<Uuid> = found.iter().map(|a| a.id).collect();

        for line in lines {
            if !found_ids.contains(&line.account_id.into_inner()) {
                return Err(BudgetError::AccountNotFound(line.account_id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_amounts_json_round_trip() {
        let mut amounts = BTreeMap::new();
        for month in 1..=12u32 {
            amounts.insert(month, dec!(100.00));
        }
        amounts.insert(12, dec!(99.50));

        let json = monthly_to_json(&amounts).unwrap();
        let back = monthly_from_json(&json).unwrap();
        assert_eq!(back, amounts);
        assert_eq!(back[&12], dec!(99.50));
    }

    #[test]
    fn test_single_month_window_sums_one_month() {
        let mut amounts = BTreeMap::new();
        for month in 1..=12u32 {
            amounts.insert(month, Decimal::from(month * 100));
        }

        let budgeted: Decimal = amounts.range(3..=3u32).map(|(_, amount)| *amount).sum();
        assert_eq!(budgeted, dec!(300));
    }

    #[test]
    fn test_monthly_from_json_rejects_non_map() {
        let result = monthly_from_json(&serde_json::Value::String("nope".into()));
        assert!(result.is_err());
    }
}
