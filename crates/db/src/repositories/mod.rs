//! Repository abstractions for data access.

pub mod account;
pub mod asset;
pub mod budget;
pub mod center;
pub mod closing;
pub mod fiscal;
pub mod journal;
pub mod report;

pub use account::AccountRepository;
pub use asset::AssetRepository;
pub use budget::BudgetRepository;
pub use center::CenterRepository;
pub use closing::ClosingRepository;
pub use fiscal::FiscalRepository;
pub use journal::JournalRepository;
pub use report::ReportRepository;
