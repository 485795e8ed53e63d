pub mod auth;
pub mod chats;
pub mod error;
pub mod journals;
pub mod middleware;
pub mod moods;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::auth::AppState;
use crate::middleware::require_auth;

/// All `/api` routes. Everything except register and login needs a bearer token.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/user", get(auth::current_user))
        .route("/api/moods", get(moods::list_moods).post(moods::create_mood))
        .route("/api/moods/trends", get(moods::mood_trends))
        .route("/api/moods/{id}", get(moods::get_mood))
        .route("/api/journals", get(journals::list_journals).post(journals::create_journal))
        .route("/api/journals/{id}", get(journals::get_journal))
        .route("/api/chats", get(chats::list_chats).post(chats::send_chat))
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new().merge(public_routes).merge(protected_routes)
}
