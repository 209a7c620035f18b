//! Annual budget routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{response::error_response, AppState};
use vestry_core::budget::{BudgetError, BudgetLineInput, CreateBudgetInput};
use vestry_db::repositories::budget::{BudgetRepository, BudgetWithLines};
use vestry_shared::types::BudgetId;

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/{id}", get(get_budget).delete(delete_budget))
        .route("/budgets/{id}/lines", put(replace_lines))
        .route("/budgets/{id}/activate", post(activate_budget))
        .route("/budgets/{id}/variance", get(variance_report))
}

fn budget_error(e: &BudgetError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// Request body for creating a budget.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Fiscal year the budget covers.
    pub fiscal_year: i32,
    /// Budget name (e.g. "2026 Operating Budget").
    pub name: String,
    /// Budget lines, one per account.
    pub lines: Vec<BudgetLineInput>,
}

/// Request body for replacing a draft budget's lines.
#[derive(Debug, Deserialize)]
pub struct ReplaceLinesRequest {
    /// The full replacement line set.
    pub lines: Vec<BudgetLineInput>,
}

/// Query parameters for a variance report.
///
/// The report always starts at January; `month` is the last month of
/// the year-to-date window.
#[derive(Debug, Deserialize)]
pub struct VarianceQuery {
    /// Month to report (1-12).
    pub month: u32,
    /// Calendar year; must match the budget's fiscal year when given.
    pub year: Option<i32>,
}

/// Checks a requested year against the budget's fiscal year. A budget
/// covers exactly one year, so anything else has no data to report.
fn year_matches(requested: Option<i32>, fiscal_year: i32) -> bool {
    requested.map_or(true, |year| year == fiscal_year)
}

/// Response for a budget with its lines.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget header.
    #[serde(flatten)]
    pub budget: vestry_db::entities::budgets::Model,
    /// Budget lines.
    pub lines: Vec<vestry_db::entities::budget_lines::Model>,
}

impl From<BudgetWithLines> for BudgetResponse {
    fn from(value: BudgetWithLines) -> Self {
        Self {
            budget: value.budget,
            lines: value.lines,
        }
    }
}

/// GET `/budgets` - List budgets, newest year first.
async fn list_budgets(State(state): State<AppState>) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list budgets");
            budget_error(&e)
        }
    }
}

/// POST `/budgets` - Create a draft budget.
async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<CreateBudgetRequest>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    let input = CreateBudgetInput {
        fiscal_year: payload.fiscal_year,
        name: payload.name,
        lines: payload.lines,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(
                budget_id = %created.budget.id,
                fiscal_year = created.budget.fiscal_year,
                "Budget created"
            );
            (StatusCode::CREATED, Json(BudgetResponse::from(created))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create budget");
            budget_error(&e)
        }
    }
}

/// GET `/budgets/{id}` - Get a budget with its lines.
async fn get_budget(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.get(BudgetId::from_uuid(id)).await {
        Ok(budget) => (StatusCode::OK, Json(BudgetResponse::from(budget))).into_response(),
        Err(e) => {
            error!(error = %e, budget_id = %id, "Failed to get budget");
            budget_error(&e)
        }
    }
}

/// PUT `/budgets/{id}/lines` - Replace the lines of a draft budget.
async fn replace_lines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceLinesRequest>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo
        .replace_lines(BudgetId::from_uuid(id), payload.lines)
        .await
    {
        Ok(updated) => {
            info!(budget_id = %id, "Budget lines replaced");
            (StatusCode::OK, Json(BudgetResponse::from(updated))).into_response()
        }
        Err(e) => {
            error!(error = %e, budget_id = %id, "Failed to replace budget lines");
            budget_error(&e)
        }
    }
}

/// POST `/budgets/{id}/activate` - Activate a draft budget.
///
/// Activation requires every line's monthly amounts to sum exactly
/// to its annual amount.
async fn activate_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.activate(BudgetId::from_uuid(id)).await {
        Ok(budget) => {
            info!(budget_id = %budget.id, "Budget activated");
            (StatusCode::OK, Json(budget)).into_response()
        }
        Err(e) => {
            error!(error = %e, budget_id = %id, "Failed to activate budget");
            budget_error(&e)
        }
    }
}

/// DELETE `/budgets/{id}` - Delete a draft budget.
async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    match repo.delete(BudgetId::from_uuid(id)).await {
        Ok(()) => {
            info!(budget_id = %id, "Budget deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, budget_id = %id, "Failed to delete budget");
            budget_error(&e)
        }
    }
}

/// GET `/budgets/{id}/variance?month&year` - Variance report for one
/// month: budgeted vs. actual per line, for that month alone.
async fn variance_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<VarianceQuery>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());

    if !(1..=12).contains(&query.month) {
        return error_response(422, "VALIDATION_ERROR", "month must be between 1 and 12");
    }

    match repo
        .variance_report(BudgetId::from_uuid(id), query.month, query.month)
        .await
    {
        Ok(report) => {
            if !year_matches(query.year, report.fiscal_year) {
                return error_response(
                    422,
                    "VALIDATION_ERROR",
                    &format!("Budget covers fiscal year {}", report.fiscal_year),
                );
            }
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => {
            error!(error = %e, budget_id = %id, "Failed to build variance report");
            budget_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_query_takes_month_and_year() {
        let query: VarianceQuery =
            serde_json::from_value(serde_json::json!({"month": 3, "year": 2025})).unwrap();
        assert_eq!(query.month, 3);
        assert_eq!(query.year, Some(2025));
    }

    #[test]
    fn test_variance_query_year_is_optional() {
        let query: VarianceQuery = serde_json::from_value(serde_json::json!({"month": 7})).unwrap();
        assert_eq!(query.month, 7);
        assert_eq!(query.year, None);
    }

    #[test]
    fn test_year_guard() {
        assert!(year_matches(None, 2025));
        assert!(year_matches(Some(2025), 2025));
        assert!(!year_matches(Some(2024), 2025));
    }
}
