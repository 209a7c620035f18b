//! Chart of accounts routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{response::error_response, AppState};
use vestry_core::account::{AccountError, AccountType};
use vestry_db::repositories::account::{
    AccountRepository, CreateAccountInput, UpdateAccountInput,
};
use vestry_shared::types::AccountId;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}", patch(update_account))
        .route("/accounts/{id}", delete(delete_account))
}

fn account_error(e: &AccountError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Only return active accounts.
    #[serde(default)]
    pub active_only: bool,
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Unique account code (e.g. "1-1000").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Account type; the normal balance side is derived from it.
    pub account_type: AccountType,
    /// Optional parent account for hierarchy.
    pub parent_id: Option<Uuid>,
}

/// Request body for updating an account.
///
/// Code and type are immutable; only name, description, and the
/// active flag can change.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// GET `/accounts` - List accounts ordered by code.
async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list(query.account_type, query.active_only).await {
        Ok(accounts) => (StatusCode::OK, Json(json!({ "accounts": accounts }))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list accounts");
            account_error(&e)
        }
    }
}

/// POST `/accounts` - Create an account.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = CreateAccountInput {
        code: payload.code,
        name: payload.name,
        description: payload.description,
        account_type: payload.account_type,
        parent_id: payload.parent_id.map(AccountId::from_uuid),
    };

    match repo.create(input).await {
        Ok(account) => {
            info!(account_id = %account.id, code = %account.code, "Account created");
            (StatusCode::CREATED, Json(account)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create account");
            account_error(&e)
        }
    }
}

/// GET `/accounts/{id}` - Get a single account.
async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.get(AccountId::from_uuid(id)).await {
        Ok(account) => (StatusCode::OK, Json(account)).into_response(),
        Err(e) => {
            error!(error = %e, account_id = %id, "Failed to get account");
            account_error(&e)
        }
    }
}

/// PATCH `/accounts/{id}` - Update name, description, or active flag.
async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    let input = UpdateAccountInput {
        name: payload.name,
        description: payload.description.map(Some),
        is_active: payload.is_active,
    };

    match repo.update(AccountId::from_uuid(id), input).await {
        Ok(account) => {
            info!(account_id = %account.id, "Account updated");
            (StatusCode::OK, Json(account)).into_response()
        }
        Err(e) => {
            error!(error = %e, account_id = %id, "Failed to update account");
            account_error(&e)
        }
    }
}

/// DELETE `/accounts/{id}` - Delete an unused account.
///
/// Accounts referenced by journal lines or child accounts are
/// rejected; deactivate them via PATCH instead.
async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete(AccountId::from_uuid(id)).await {
        Ok(()) => {
            info!(account_id = %id, "Account deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, account_id = %id, "Failed to delete account");
            account_error(&e)
        }
    }
}
