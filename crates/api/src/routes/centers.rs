//! Responsibility center routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{response::error_response, AppState};
use vestry_db::repositories::center::{CenterRepository, CreateCenterInput};
use vestry_shared::error::AppError;
use vestry_shared::types::ResponsibilityCenterId;

/// Creates the responsibility center routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/responsibility-centers",
            get(list_centers).post(create_center),
        )
        .route("/responsibility-centers/{id}", get(get_center))
}

fn center_error(e: &AppError) -> Response {
    error_response(e.status_code(), e.error_code(), &e.to_string())
}

/// Query parameters for listing responsibility centers.
#[derive(Debug, Deserialize)]
pub struct ListCentersQuery {
    /// Only return active centers.
    #[serde(default)]
    pub active_only: bool,
}

/// Request body for creating a responsibility center.
#[derive(Debug, Deserialize)]
pub struct CreateCenterRequest {
    /// Unique center code (e.g. "YOUTH").
    pub code: String,
    /// Center name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// GET `/responsibility-centers` - List centers ordered by code.
async fn list_centers(
    State(state): State<AppState>,
    Query(query): Query<ListCentersQuery>,
) -> impl IntoResponse {
    let repo = CenterRepository::new((*state.db).clone());

    match repo.list(query.active_only).await {
        Ok(centers) => (StatusCode::OK, Json(json!({ "centers": centers }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list responsibility centers");
            center_error(&e)
        }
    }
}

/// POST `/responsibility-centers` - Create a center.
async fn create_center(
    State(state): State<AppState>,
    Json(payload): Json<CreateCenterRequest>,
) -> impl IntoResponse {
    let repo = CenterRepository::new((*state.db).clone());

    let input = CreateCenterInput {
        code: payload.code,
        name: payload.name,
        description: payload.description,
    };

    match repo.create(input).await {
        Ok(center) => {
            info!(center_id = %center.id, code = %center.code, "Responsibility center created");
            (StatusCode::CREATED, Json(center)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create responsibility center");
            center_error(&e)
        }
    }
}

/// GET `/responsibility-centers/{id}` - Get a center.
async fn get_center(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = CenterRepository::new((*state.db).clone());

    match repo.get(ResponsibilityCenterId::from_uuid(id)).await {
        Ok(center) => (StatusCode::OK, Json(center)).into_response(),
        Err(e) => {
            error!(error = %e, center_id = %id, "Failed to get responsibility center");
            center_error(&e)
        }
    }
}
