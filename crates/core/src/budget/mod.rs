//! Annual budgets with monthly breakdowns and variance analysis.

pub mod error;
pub mod service;
pub mod types;
pub mod variance;

pub use error::BudgetError;
pub use service::BudgetService;
pub use types::{
    BudgetLineInput, BudgetStatus, BudgetVarianceLine, BudgetVarianceReport, CreateBudgetInput,
    MONTHS_PER_YEAR,
};
pub use variance::{compute_variance, VarianceResult, VarianceStatus};
