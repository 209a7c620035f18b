//! Fiscal period state machine and posting gate.
//!
//! A fiscal period is one calendar month. Its status gates whether
//! journals may post into it; closing or locking a period never touches
//! entries already recorded.

mod error;
mod period;

pub use error::FiscalError;
pub use period::{validate_posting, validate_transition, PeriodKey, PeriodStatus};
