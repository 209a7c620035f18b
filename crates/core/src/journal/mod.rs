//! Double-entry journal validation and lifecycle.
//!
//! A journal is a balanced set of debit/credit lines recorded as one
//! atomic accounting event. Journals are drafted, validated against the
//! fiscal period gate, and approved; approved journals are immutable
//! and can only be undone by a reversal journal.

mod error;
mod reversal;
mod service;
mod types;
mod validation;

pub use error::JournalError;
pub use reversal::{build_reversal, ReversalInput};
pub use service::{AccountInfo, JournalService};
pub use types::{
    CreateJournalInput, JournalLineInput, JournalStatus, JournalTotals, JournalType,
};
pub use validation::validate_lines;
