//! Year-end closing routes.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{response::error_response, AppState};
use vestry_core::closing::ClosingError;
use vestry_db::repositories::closing::ClosingRepository;
use vestry_shared::types::AccountId;

/// Creates the year-end closing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/year-end-closing/run", post(run_closing))
        .route("/year-end-closing/status", get(closing_status))
}

fn closing_error(e: &ClosingError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// Request body for running a year-end closing.
#[derive(Debug, Deserialize)]
pub struct RunClosingRequest {
    /// Fiscal year to close.
    pub year: i32,
    /// Equity account receiving the net income.
    pub retained_earnings_account_id: Uuid,
}

/// Query parameters for the closing status.
#[derive(Debug, Deserialize)]
pub struct ClosingStatusQuery {
    /// Fiscal year.
    pub year: i32,
}

/// POST `/year-end-closing/run` - Close a fiscal year.
///
/// All twelve periods must already be closed or locked. The run
/// sweeps income and expense balances into retained earnings, locks
/// every period, and records the closing - atomically.
async fn run_closing(
    State(state): State<AppState>,
    Json(payload): Json<RunClosingRequest>,
) -> impl IntoResponse {
    let repo = ClosingRepository::new((*state.db).clone(), state.journal_number_prefix.clone());

    let retained = AccountId::from_uuid(payload.retained_earnings_account_id);
    match repo.close_year(payload.year, retained).await {
        Ok(outcome) => {
            info!(
                year = payload.year,
                net_income = %outcome.record.net_income,
                "Fiscal year closed"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "closing": outcome.record,
                    "journal": outcome.journal,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, year = payload.year, "Year-end closing failed");
            closing_error(&e)
        }
    }
}

/// GET `/year-end-closing/status?year` - Whether a year was closed.
async fn closing_status(
    State(state): State<AppState>,
    Query(query): Query<ClosingStatusQuery>,
) -> impl IntoResponse {
    let repo = ClosingRepository::new((*state.db).clone(), state.journal_number_prefix.clone());

    match repo.find_by_year(query.year).await {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({
                "year": query.year,
                "closed": record.is_some(),
                "closing": record,
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, year = query.year, "Failed to get closing status");
            closing_error(&e)
        }
    }
}
