use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::warn;

use mindful_types::api::Claims;
use mindful_types::models::Id;

use crate::auth::AppState;
use crate::error::ApiError;

/// Extract and validate the JWT from the Authorization header.
///
/// The token must also name a user that exists in the store; the store is
/// in-memory, so tokens issued before a restart are refused here.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let claims = decode_token(&state.jwt_secret, token).ok_or(ApiError::Unauthenticated)?;

    if state.store.get_user(claims.sub).is_none() {
        warn!(user_id = claims.sub, "Token for unknown user");
        return Err(ApiError::Unauthenticated);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub fn decode_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Caller-level ownership check for by-id lookups.
pub fn ensure_owner(owner: Id, claims: &Claims, denied: &'static str) -> Result<(), ApiError> {
    if owner == claims.sub {
        Ok(())
    } else {
        warn!(user_id = claims.sub, owner, "Access to another user's entry refused");
        Err(ApiError::Forbidden(denied))
    }
}
