use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use mindful_types::api::{Claims, CreateJournalRequest};
use mindful_types::models::{Id, JournalEntry};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::ensure_owner;

pub async fn list_journals(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Vec<JournalEntry>> {
    Json(state.store.list_journals(claims.sub))
}

pub async fn create_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<CreateJournalRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;

    let entry = state.store.create_journal(claims.sub, req.into());
    info!(user_id = claims.sub, journal_id = entry.id, "Journal entry written");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_journal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<JournalEntry>, ApiError> {
    let Path(id) = id?;

    let entry = state
        .store
        .get_journal(id)
        .ok_or(ApiError::NotFound("Journal entry not found"))?;
    ensure_owner(entry.user_id, &claims, "Not authorized to access this journal entry")?;

    Ok(Json(entry))
}
