use std::sync::Arc;

use anyhow::anyhow;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand_core::OsRng;
use tracing::{error, info, warn};

use mindful_store::{Store, StoreError};
use mindful_types::api::{AuthResponse, Claims, FieldError, LoginRequest, RegisterRequest};
use mindful_types::models::{NewUser, PublicUser, User};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;

    let username_len = req.username.chars().count();
    if !(3..=32).contains(&username_len) {
        return Err(FieldError::new("username", "must be between 3 and 32 characters").into());
    }
    if req.password.chars().count() < 8 {
        return Err(FieldError::new("password", "must be at least 8 characters").into());
    }

    // Cheap check before hashing; create_user repeats it under the lock
    if state.store.get_user_by_username(&req.username).is_some() {
        return Err(ApiError::Conflict("Username already exists".into()));
    }

    // Run hashing off the async runtime
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| anyhow!("password hashing failed: {}", e))
    })
    .await
    .map_err(|e| { error!("spawn_blocking join error: {}", e); anyhow!(e) })??;

    let user = state
        .store
        .create_user(NewUser {
            username: req.username,
            password: password_hash,
            name: req.name,
            email: req.email,
        })
        .map_err(|e| match e {
            StoreError::UsernameTaken(_) => ApiError::Conflict("Username already exists".into()),
        })?;

    info!(user_id = user.id, "Registered user {}", user.username);

    let token = create_token(&state, &user)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: PublicUser::from(&user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;

    let Some(user) = state.store.get_user_by_username(&req.username) else {
        warn!("Login for unknown username '{}'", req.username);
        return Err(ApiError::Unauthenticated);
    };

    let stored_hash = user.password.clone();
    let verified = tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&stored_hash)
            .map_err(|e| anyhow!("stored password hash is corrupt: {}", e))?;
        Ok::<_, anyhow::Error>(
            Argon2::default()
                .verify_password(req.password.as_bytes(), &parsed_hash)
                .is_ok(),
        )
    })
    .await
    .map_err(|e| { error!("spawn_blocking join error: {}", e); anyhow!(e) })??;

    if !verified {
        warn!(user_id = user.id, "Login with wrong password");
        return Err(ApiError::Unauthenticated);
    }

    let token = create_token(&state, &user)?;

    Ok(Json(AuthResponse {
        user: PublicUser::from(&user),
        token,
    }))
}

/// GET /api/user: the account behind the bearer token.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .store
        .get_user(claims.sub)
        .ok_or(ApiError::Unauthenticated)?;

    Ok(Json(PublicUser::from(&user)))
}

fn create_token(state: &AppStateInner, user: &User) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        exp: (chrono::Utc::now() + state.token_ttl).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}
