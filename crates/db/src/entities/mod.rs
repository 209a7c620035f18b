//! `SeaORM` entity definitions.

pub mod accounts;
pub mod budget_lines;
pub mod budgets;
pub mod depreciation_entries;
pub mod fiscal_periods;
pub mod fixed_assets;
pub mod journal_lines;
pub mod journals;
pub mod responsibility_centers;
pub mod sea_orm_active_enums;
pub mod year_end_closings;
