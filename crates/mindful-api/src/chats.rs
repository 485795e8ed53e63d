use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use mindful_store::Store;
use mindful_types::api::{Claims, CreateChatRequest};
use mindful_types::models::{ChatMessage, Id, NewChatMessage};

use crate::auth::AppState;
use crate::error::ApiError;

pub async fn list_chats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Json<Vec<ChatMessage>> {
    Json(state.store.list_chat_messages(claims.sub))
}

pub async fn send_chat(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<CreateChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;

    let messages = submit_chat(&state.store, claims.sub, req.into());

    Ok((StatusCode::CREATED, Json(messages)))
}

/// Store `new` and, when it came from the user, the companion's reply.
///
/// Returns the stored messages in creation order: `[user]` or `[user, reply]`.
/// Messages not flagged as user-originated never trigger a reply.
pub fn submit_chat(store: &Store, owner: Id, new: NewChatMessage) -> Vec<ChatMessage> {
    let message = store.create_chat_message(owner, new);
    if !message.is_user_message {
        return vec![message];
    }

    let rule = mindful_companion::matching_rule(&message.message);
    debug!(owner, rule = rule.map_or("fallback", |r| r.name), "Companion reply selected");

    let reply = rule.map_or(mindful_companion::FALLBACK_REPLY, |r| r.reply);
    let reply = store.create_chat_message(owner, NewChatMessage::from_companion(reply));

    vec![message, reply]
}
