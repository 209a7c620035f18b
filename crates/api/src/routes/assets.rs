//! Fixed asset and depreciation routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::journals::JournalResponse;
use crate::{response::error_response, AppState};
use vestry_core::asset::AssetError;
use vestry_db::repositories::asset::{
    AssetRepository, CreateAssetInput, DepreciationRunError,
};
use vestry_db::repositories::journal::JournalRepository;
use vestry_shared::types::{AccountId, FixedAssetId};

/// Creates the fixed asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fixed-assets", get(list_assets).post(create_asset))
        .route("/fixed-assets/{id}", get(get_asset))
        .route("/fixed-assets/{id}/schedule", get(get_schedule))
        .route("/fixed-assets/run-depreciation", post(run_depreciation))
}

fn asset_error(e: &AssetError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

fn run_error(e: &DepreciationRunError) -> Response {
    match e {
        DepreciationRunError::Asset(e) => asset_error(e),
        DepreciationRunError::Journal(e) => {
            error_response(e.http_status_code(), e.error_code(), &e.to_string())
        }
    }
}

/// Request body for registering a fixed asset.
#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    /// Unique asset code (e.g. "FA-0001").
    pub asset_code: String,
    /// Asset name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    #[serde(with = "rust_decimal::serde::str")]
    pub acquisition_cost: Decimal,
    /// Salvage value at end of life; book value never drops below it.
    #[serde(with = "rust_decimal::serde::str")]
    pub salvage_value: Decimal,
    /// Useful life in months.
    pub useful_life_months: i32,
    /// Asset account carrying the cost.
    pub asset_account_id: Uuid,
    /// Depreciation expense account debited by the monthly run.
    pub expense_account_id: Uuid,
    /// Accumulated depreciation account credited by the run.
    pub accumulated_account_id: Uuid,
}

/// Request body for a monthly depreciation run.
#[derive(Debug, Deserialize)]
pub struct RunDepreciationRequest {
    /// Month (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Response for a depreciation run.
#[derive(Debug, Serialize)]
pub struct DepreciationRunResponse {
    /// Month that was depreciated.
    pub month: u32,
    /// Year that was depreciated.
    pub year: i32,
    /// Assets that received a schedule entry in this run.
    pub depreciated_count: usize,
    /// Assets skipped: already scheduled or fully depreciated.
    pub skipped_count: usize,
    /// One approved journal per depreciated asset, empty when nothing ran.
    pub journals: Vec<JournalResponse>,
}

/// GET `/fixed-assets` - List fixed assets.
async fn list_assets(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AssetRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(assets) => (StatusCode::OK, Json(json!({ "fixed_assets": assets }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list fixed assets");
            asset_error(&e)
        }
    }
}

/// POST `/fixed-assets` - Register a fixed asset.
async fn create_asset(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssetRequest>,
) -> impl IntoResponse {
    let repo = AssetRepository::new((*state.db).clone());

    let input = CreateAssetInput {
        asset_code: payload.asset_code,
        name: payload.name,
        description: payload.description,
        acquisition_date: payload.acquisition_date,
        acquisition_cost: payload.acquisition_cost,
        salvage_value: payload.salvage_value,
        useful_life_months: payload.useful_life_months,
        asset_account_id: AccountId::from_uuid(payload.asset_account_id),
        expense_account_id: AccountId::from_uuid(payload.expense_account_id),
        accumulated_account_id: AccountId::from_uuid(payload.accumulated_account_id),
    };

    match repo.create(input).await {
        Ok(asset) => {
            info!(asset_id = %asset.id, asset_code = %asset.asset_code, "Fixed asset registered");
            (StatusCode::CREATED, Json(asset)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to register fixed asset");
            asset_error(&e)
        }
    }
}

/// GET `/fixed-assets/{id}` - Get a fixed asset.
async fn get_asset(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AssetRepository::new((*state.db).clone());

    match repo.get(FixedAssetId::from_uuid(id)).await {
        Ok(asset) => (StatusCode::OK, Json(asset)).into_response(),
        Err(e) => {
            error!(error = %e, asset_id = %id, "Failed to get fixed asset");
            asset_error(&e)
        }
    }
}

/// GET `/fixed-assets/{id}/schedule` - Depreciation schedule so far.
async fn get_schedule(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AssetRepository::new((*state.db).clone());

    // 404 for unknown assets rather than an empty schedule.
    if let Err(e) = repo.get(FixedAssetId::from_uuid(id)).await {
        error!(error = %e, asset_id = %id, "Failed to get fixed asset");
        return asset_error(&e);
    }

    match repo.schedule(FixedAssetId::from_uuid(id)).await {
        Ok(entries) => (StatusCode::OK, Json(json!({ "schedule": entries }))).into_response(),
        Err(e) => {
            error!(error = %e, asset_id = %id, "Failed to get depreciation schedule");
            asset_error(&e)
        }
    }
}

/// POST `/fixed-assets/run-depreciation` - Run monthly depreciation.
///
/// Idempotent per asset and month: re-running skips assets already
/// scheduled for the period.
async fn run_depreciation(
    State(state): State<AppState>,
    Json(payload): Json<RunDepreciationRequest>,
) -> impl IntoResponse {
    let repo = AssetRepository::new((*state.db).clone());
    let journals =
        JournalRepository::new((*state.db).clone(), state.journal_number_prefix.clone());

    match repo
        .run_depreciation(&journals, payload.month, payload.year)
        .await
    {
        Ok(result) => {
            info!(
                month = payload.month,
                year = payload.year,
                depreciated = result.depreciated_count,
                skipped = result.skipped_count,
                "Depreciation run completed"
            );
            let response = DepreciationRunResponse {
                month: result.month,
                year: result.year,
                depreciated_count: result.depreciated_count,
                skipped_count: result.skipped_count,
                journals: result
                    .journals
                    .into_iter()
                    .map(JournalResponse::from)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(
                error = %e,
                month = payload.month,
                year = payload.year,
                "Depreciation run failed"
            );
            run_error(&e)
        }
    }
}
