//! `SeaORM` Entity for the fixed_assets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub asset_code: String,
    pub name: String,
    pub description: Option<String>,
    pub acquisition_date: Date,
    #[serde(with = "rust_decimal::serde::str")]
    pub acquisition_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub salvage_value: Decimal,
    pub useful_life_months: i32,
    /// Asset account carrying the acquisition cost.
    pub asset_account_id: Uuid,
    /// Depreciation expense account debited by the monthly run.
    pub expense_account_id: Uuid,
    /// Accumulated depreciation contra account credited by the run.
    pub accumulated_account_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::depreciation_entries::Entity")]
    DepreciationEntries,
}

impl Related<super::depreciation_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepreciationEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
