//! Year-end closing: income and expense accounts swept into retained
//! earnings, all periods locked.

pub mod error;
pub mod service;
pub mod types;

pub use error::ClosingError;
pub use service::ClosingService;
pub use types::{AccountBalance, ClosingInput, ClosingPlan};
