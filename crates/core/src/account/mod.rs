//! Chart of accounts: account types and normal balance rules.

mod error;
mod types;

pub use error::AccountError;
pub use types::{balance_change, AccountType, NormalBalance};
