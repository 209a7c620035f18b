//! Double-entry journal routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::{response::error_response, AppState};
use vestry_core::journal::{
    CreateJournalInput, JournalError, JournalLineInput, JournalStatus, JournalType,
};
use vestry_db::repositories::journal::{JournalFilter, JournalRepository, JournalWithLines};
use vestry_shared::types::{JournalId, PageRequest, PageResponse};

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journals", get(list_journals).post(create_journal))
        .route("/journals/{id}", get(get_journal).delete(delete_journal))
        .route("/journals/{id}/approve", post(approve_journal))
        .route("/journals/{id}/reverse", post(reverse_journal))
}

fn journal_error(e: &JournalError) -> Response {
    error_response(e.http_status_code(), e.error_code(), &e.to_string())
}

fn journal_repo(state: &AppState) -> JournalRepository {
    JournalRepository::new((*state.db).clone(), state.journal_number_prefix.clone())
}

/// Query parameters for listing journals.
#[derive(Debug, Deserialize)]
pub struct ListJournalsQuery {
    /// Filter by status.
    pub status: Option<JournalStatus>,
    /// Filter by journal type.
    pub journal_type: Option<JournalType>,
    /// Earliest journal date (inclusive).
    pub date_from: Option<NaiveDate>,
    /// Latest journal date (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Request body for creating a journal.
#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    /// Journal date; decides the fiscal period the entry posts into.
    pub journal_date: NaiveDate,
    /// Description of the accounting event.
    pub description: String,
    /// Journal type; defaults to a general entry.
    #[serde(default = "default_journal_type")]
    pub journal_type: JournalType,
    /// Journal lines; debits must equal credits.
    pub lines: Vec<JournalLineInput>,
}

const fn default_journal_type() -> JournalType {
    JournalType::General
}

/// Request body for reversing a journal.
#[derive(Debug, Deserialize, Default)]
pub struct ReverseJournalRequest {
    /// Date for the reversal entry; defaults to today.
    pub date: Option<NaiveDate>,
}

/// Response for a journal with its lines.
#[derive(Debug, Serialize)]
pub struct JournalResponse {
    /// Journal header.
    #[serde(flatten)]
    pub journal: vestry_db::entities::journals::Model,
    /// Journal lines ordered by line number.
    pub lines: Vec<vestry_db::entities::journal_lines::Model>,
}

impl From<JournalWithLines> for JournalResponse {
    fn from(value: JournalWithLines) -> Self {
        Self {
            journal: value.journal,
            lines: value.lines,
        }
    }
}

/// GET `/journals` - List journals, newest first.
async fn list_journals(
    State(state): State<AppState>,
    Query(query): Query<ListJournalsQuery>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    let filter = JournalFilter {
        status: query.status,
        journal_type: query.journal_type,
        date_from: query.date_from,
        date_to: query.date_to,
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(50).clamp(1, 200),
    };

    match repo.list(filter, page.offset(), page.limit()).await {
        Ok((journals, total)) => (
            StatusCode::OK,
            Json(PageResponse::new(journals, page.page, page.per_page, total)),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list journals");
            journal_error(&e)
        }
    }
}

/// POST `/journals` - Create a draft journal.
///
/// The entry must balance and its period must be open; it posts to
/// the ledger only once approved.
async fn create_journal(
    State(state): State<AppState>,
    Json(payload): Json<CreateJournalRequest>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    let input = CreateJournalInput {
        date: payload.journal_date,
        description: payload.description,
        journal_type: payload.journal_type,
        lines: payload.lines,
    };

    match repo.create(input).await {
        Ok(created) => {
            info!(
                journal_id = %created.journal.id,
                journal_number = %created.journal.journal_number,
                "Journal created"
            );
            (StatusCode::CREATED, Json(JournalResponse::from(created))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create journal");
            journal_error(&e)
        }
    }
}

/// GET `/journals/{id}` - Get a journal with its lines.
async fn get_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    match repo.get(JournalId::from_uuid(id)).await {
        Ok(journal) => (StatusCode::OK, Json(JournalResponse::from(journal))).into_response(),
        Err(e) => {
            error!(error = %e, journal_id = %id, "Failed to get journal");
            journal_error(&e)
        }
    }
}

/// POST `/journals/{id}/approve` - Approve a draft journal.
async fn approve_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    match repo.approve(JournalId::from_uuid(id)).await {
        Ok(journal) => {
            info!(
                journal_id = %journal.id,
                journal_number = %journal.journal_number,
                "Journal approved"
            );
            (StatusCode::OK, Json(journal)).into_response()
        }
        Err(e) => {
            error!(error = %e, journal_id = %id, "Failed to approve journal");
            journal_error(&e)
        }
    }
}

/// POST `/journals/{id}/reverse` - Reverse an approved journal.
///
/// Creates and approves a mirror entry with debits and credits
/// swapped, then links the two.
async fn reverse_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<ReverseJournalRequest>>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    let date = payload
        .and_then(|Json(body)| body.date)
        .unwrap_or_else(|| Utc::now().date_naive());

    match repo.reverse(JournalId::from_uuid(id), date).await {
        Ok(reversal) => {
            info!(
                journal_id = %id,
                reversal_id = %reversal.journal.id,
                "Journal reversed"
            );
            (StatusCode::CREATED, Json(JournalResponse::from(reversal))).into_response()
        }
        Err(e) => {
            error!(error = %e, journal_id = %id, "Failed to reverse journal");
            journal_error(&e)
        }
    }
}

/// DELETE `/journals/{id}` - Delete a draft journal.
///
/// Approved journals cannot be deleted; reverse them instead.
async fn delete_journal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = journal_repo(&state);

    match repo.delete(JournalId::from_uuid(id)).await {
        Ok(()) => {
            info!(journal_id = %id, "Journal deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, journal_id = %id, "Failed to delete journal");
            journal_error(&e)
        }
    }
}
