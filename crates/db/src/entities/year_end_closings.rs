//! `SeaORM` Entity for the year_end_closings table.
//!
//! The unique index on `fiscal_year` is the idempotency guard: a year
//! can only ever be closed once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "year_end_closings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_income: Decimal,
    /// Closing journal, absent when there was nothing to close.
    pub journal_id: Option<Uuid>,
    pub closed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journals::Entity",
        from = "Column::JournalId",
        to = "super::journals::Column::Id"
    )]
    Journals,
}

impl ActiveModelBehavior for ActiveModel {}
