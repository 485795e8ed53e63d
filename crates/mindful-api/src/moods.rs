use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use mindful_types::api::{Claims, CreateMoodRequest, TrendPoint, TrendQuery};
use mindful_types::models::{Id, MoodEntry, NewMoodEntry};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::middleware::ensure_owner;

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Vec<MoodEntry>> {
    Json(state.store.list_moods(claims.sub))
}

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<CreateMoodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let new = NewMoodEntry::try_from(req)?;

    let entry = state.store.create_mood(claims.sub, new);
    info!(user_id = claims.sub, mood_id = entry.id, "Logged mood {}", entry.mood);

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_mood(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: Result<Path<Id>, PathRejection>,
) -> Result<Json<MoodEntry>, ApiError> {
    let Path(id) = id?;

    let entry = state
        .store
        .get_mood(id)
        .ok_or(ApiError::NotFound("Mood entry not found"))?;
    ensure_owner(entry.user_id, &claims, "Not authorized to access this mood entry")?;

    Ok(Json(entry))
}

/// Chart samples for the caller's moods inside the requested window, oldest first.
pub async fn mood_trends(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let Query(query) = query?;
    let cutoff = query.range.cutoff(state.store.now());

    let points = state
        .store
        .list_moods(claims.sub)
        .iter()
        .rev()
        .filter(|m| m.timestamp >= cutoff)
        .map(TrendPoint::from)
        .collect();

    Ok(Json(points))
}
