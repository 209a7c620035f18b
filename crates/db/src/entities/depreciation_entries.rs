//! `SeaORM` Entity for the depreciation_entries table.
//!
//! One row per asset per month. The unique index on
//! `(asset_id, month, year)` makes the monthly run idempotent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "depreciation_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub asset_id: Uuid,
    pub month: i16,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub book_value_after: Decimal,
    pub journal_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fixed_assets::Entity",
        from = "Column::AssetId",
        to = "super::fixed_assets::Column::Id"
    )]
    FixedAssets,
    #[sea_orm(
        belongs_to = "super::journals::Entity",
        from = "Column::JournalId",
        to = "super::journals::Column::Id"
    )]
    Journals,
}

impl Related<super::fixed_assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedAssets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
