//! Fiscal period repository for database operations.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use vestry_core::fiscal::{validate_transition, FiscalError, PeriodKey, PeriodStatus};
use vestry_shared::types::FiscalPeriodId;

use crate::entities::{fiscal_periods, sea_orm_active_enums::FiscalPeriodStatus};

fn db_err(e: DbErr) -> FiscalError {
    FiscalError::Database(e.to_string())
}

/// Returns the first and last day of a month.
///
/// # Errors
///
/// Returns `InvalidMonth` if `month` is not 1-12.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), FiscalError> {
    let start =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(FiscalError::InvalidMonth(month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(FiscalError::InvalidMonth(month))?;
    Ok((start, next.pred_opt().unwrap_or(start)))
}

/// Fiscal period repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ensures all twelve periods of a year exist, creating missing
    /// ones as open.
    ///
    /// Existing periods are left untouched, so calling this for a year
    /// that is partially or fully set up is safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn ensure_year(&self, year: i32) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        let existing = self.list_year(year).await?;
        let existing_months: Vec<i16> = existing.iter().map(|p| p.month).collect();

        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now().into();

        for month in 1..=12i16 {
            if existing_months.contains(&month) {
                continue;
            }
            let (start_date, end_date) = month_bounds(year, u32::from(month.unsigned_abs()))?;
            let model = fiscal_periods::ActiveModel {
                id: Set(FiscalPeriodId::new().into_inner()),
                year: Set(year),
                month: Set(month),
                start_date: Set(start_date),
                end_date: Set(end_date),
                status: Set(FiscalPeriodStatus::Open),
                closed_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            model.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        self.list_year(year).await
    }

    /// Lists the periods of a year ordered by month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_year(&self, year: i32) -> Result<Vec<fiscal_periods::Model>, FiscalError> {
        fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::Year.eq(year))
            .order_by_asc(fiscal_periods::Column::Month)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds the period for a month, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_period(
        &self,
        key: PeriodKey,
    ) -> Result<Option<fiscal_periods::Model>, FiscalError> {
        let month = i16::try_from(key.month).map_err(|_| FiscalError::InvalidMonth(key.month))?;
        fiscal_periods::Entity::find()
            .filter(fiscal_periods::Column::Year.eq(key.year))
            .filter(fiscal_periods::Column::Month.eq(month))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    /// Finds the period containing a date.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if no period covers the date.
    pub async fn find_period_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let key = PeriodKey::for_date(date);
        self.find_period(key)
            .await?
            .ok_or(FiscalError::PeriodNotFound {
                month: date.month(),
                year: date.year(),
            })
    }

    /// Transitions a period to a new status.
    ///
    /// Close, lock, and unlock all route through here; the transition
    /// rules live in the core crate.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` or `InvalidTransition`.
    pub async fn transition(
        &self,
        key: PeriodKey,
        to: PeriodStatus,
    ) -> Result<fiscal_periods::Model, FiscalError> {
        let period = self
            .find_period(key)
            .await?
            .ok_or(FiscalError::PeriodNotFound {
                month: key.month,
                year: key.year,
            })?;

        let from: PeriodStatus = period.status.clone().into();
        validate_transition(from, to)?;

        let now = Utc::now().into();
        let mut active: fiscal_periods::ActiveModel = period.into();
        active.status = Set(to.into());
        active.updated_at = Set(now);
        if to == PeriodStatus::Closed && from == PeriodStatus::Open {
            active.closed_at = Set(Some(now));
        }

        active.update(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds_regular_month() {
        let (start, end) = month_bounds(2026, 4).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 4, 30).unwrap());
    }

    #[test]
    fn test_month_bounds_december_wraps_year() {
        let (start, end) = month_bounds(2026, 12).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_month_bounds_leap_february() {
        let (_, end) = month_bounds(2028, 2).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_month_bounds_invalid_month() {
        assert!(matches!(
            month_bounds(2026, 13),
            Err(FiscalError::InvalidMonth(13))
        ));
        assert!(matches!(
            month_bounds(2026, 0),
            Err(FiscalError::InvalidMonth(0))
        ));
    }
}
