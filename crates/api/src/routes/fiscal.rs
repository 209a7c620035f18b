//! Fiscal period routes.

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

use crate::{response::error_response, AppState};
use vestry_core::fiscal::{FiscalError, PeriodKey, PeriodStatus};
use vestry_db::repositories::fiscal::FiscalRepository;

/// Creates the fiscal period routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fiscal-periods", get(list_periods).post(ensure_year))
        .route("/fiscal-periods/close", post(close_period))
        .route("/fiscal-periods/lock", post(lock_period))
        .route("/fiscal-periods/unlock", post(unlock_period))
}

fn fiscal_error(e: &FiscalError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// Query parameters for listing fiscal periods.
#[derive(Debug, Deserialize)]
pub struct ListPeriodsQuery {
    /// Calendar year.
    pub year: i32,
}

/// Request body for creating a year of fiscal periods.
#[derive(Debug, Deserialize)]
pub struct EnsureYearRequest {
    /// Calendar year to create periods for.
    pub year: i32,
}

/// Request body naming a single fiscal period.
#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    /// Month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// GET `/fiscal-periods?year` - List the twelve periods of a year.
async fn list_periods(
    State(state): State<AppState>,
    Query(query): Query<ListPeriodsQuery>,
) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());

    match repo.list_year(query.year).await {
        Ok(periods) => (StatusCode::OK, Json(json!({ "periods": periods }))).into_response(),
        Err(e) => {
            error!(error = %e, year = query.year, "Failed to list fiscal periods");
            fiscal_error(&e)
        }
    }
}

/// POST `/fiscal-periods` - Create all twelve periods of a year.
///
/// Idempotent: periods that already exist are left untouched.
async fn ensure_year(
    State(state): State<AppState>,
    Json(payload): Json<EnsureYearRequest>,
) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());

    match repo.ensure_year(payload.year).await {
        Ok(periods) => {
            info!(year = payload.year, "Fiscal year periods ensured");
            (StatusCode::CREATED, Json(json!({ "periods": periods }))).into_response()
        }
        Err(e) => {
            error!(error = %e, year = payload.year, "Failed to create fiscal periods");
            fiscal_error(&e)
        }
    }
}

/// Transitions a period after checking it currently has `from` status.
///
/// Close and unlock both land on `closed`, so the current status
/// disambiguates which edge the caller means.
async fn transition_from(
    repo: &FiscalRepository,
    payload: PeriodRequest,
    from: PeriodStatus,
    to: PeriodStatus,
    action: &str,
) -> Response {
    let key = match PeriodKey::new(payload.month, payload.year) {
        Ok(key) => key,
        Err(e) => return fiscal_error(&e),
    };

    let current = match repo.find_period(key).await {
        Ok(Some(period)) => PeriodStatus::from(period.status),
        Ok(None) => {
            return fiscal_error(&FiscalError::PeriodNotFound {
                month: payload.month,
                year: payload.year,
            })
        }
        Err(e) => {
            error!(error = %e, "Failed to load fiscal period");
            return fiscal_error(&e);
        }
    };
    if current != from {
        return fiscal_error(&FiscalError::InvalidTransition { from: current, to });
    }

    match repo.transition(key, to).await {
        Ok(period) => {
            info!(
                month = payload.month,
                year = payload.year,
                status = %to,
                "Fiscal period transitioned"
            );
            (StatusCode::OK, Json(period)).into_response()
        }
        Err(e) => {
            error!(error = %e, action, "Fiscal period transition rejected");
            fiscal_error(&e)
        }
    }
}

/// POST `/fiscal-periods/close` - Close an open period.
async fn close_period(
    State(state): State<AppState>,
    Json(payload): Json<PeriodRequest>,
) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());
    transition_from(
        &repo,
        payload,
        PeriodStatus::Open,
        PeriodStatus::Closed,
        "close",
    )
    .await
}

/// POST `/fiscal-periods/lock` - Lock a closed period.
async fn lock_period(
    State(state): State<AppState>,
    Json(payload): Json<PeriodRequest>,
) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());
    transition_from(
        &repo,
        payload,
        PeriodStatus::Closed,
        PeriodStatus::Locked,
        "lock",
    )
    .await
}

/// POST `/fiscal-periods/unlock` - Unlock a locked period back to closed.
///
/// Unlock only steps back to closed; a locked period never returns
/// to open.
async fn unlock_period(
    State(state): State<AppState>,
    Json(payload): Json<PeriodRequest>,
) -> impl IntoResponse {
    let repo = FiscalRepository::new((*state.db).clone());
    transition_from(
        &repo,
        payload,
        PeriodStatus::Locked,
        PeriodStatus::Closed,
        "unlock",
    )
    .await
}
