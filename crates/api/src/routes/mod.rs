//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod assets;
pub mod budgets;
pub mod centers;
pub mod closing;
pub mod fiscal;
pub mod health;
pub mod journals;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journals::routes())
        .merge(fiscal::routes())
        .merge(budgets::routes())
        .merge(assets::routes())
        .merge(closing::routes())
        .merge(reports::routes())
        .merge(centers::routes())
}
