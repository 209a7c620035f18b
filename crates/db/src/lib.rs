//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, AssetRepository, BudgetRepository, CenterRepository, ClosingRepository,
    FiscalRepository, JournalRepository, ReportRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Default connection pool size when the caller has no preference.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(max_connections);

    tracing::debug!(max_connections, "Connecting to database");
    let db = Database::connect(options).await?;
    tracing::info!("Database connection established");
    Ok(db)
}
