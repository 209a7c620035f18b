//! Reporting routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::{response::error_response, AppState};
use vestry_core::fiscal::FiscalError;
use vestry_db::repositories::report::ReportRepository;

/// Creates the reporting routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/trial-balance", get(trial_balance))
}

fn report_error(e: &FiscalError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// Query parameters for a trial balance.
#[derive(Debug, Deserialize)]
pub struct TrialBalanceQuery {
    /// Month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// GET `/reports/trial-balance?month&year` - Per-account debit and
/// credit totals from approved journals in the month.
async fn trial_balance(
    State(state): State<AppState>,
    Query(query): Query<TrialBalanceQuery>,
) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.trial_balance(query.month, query.year).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!(
                error = %e,
                month = query.month,
                year = query.year,
                "Failed to build trial balance"
            );
            report_error(&e)
        }
    }
}
