use axum::{
    extract::{FromRef, State},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest, SignupResponse, TokenResponse},
        extractors::CurrentUser,
        jwt::JwtKeys,
        password,
    },
    error::ApiError,
    state::AppState,
    store::UserRecord,
};

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::InvalidEmail);
    }

    if state.users.find_by_email(&payload.email).await.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    if payload.password.len() < 6 {
        warn!("password too short");
        return Err(ApiError::WeakPassword);
    }

    let hash = password::hash_password(&payload.password);
    // The pre-check above is racy on its own; the store rejects the
    // duplicate again under its write lock.
    let user = state
        .users
        .insert(&payload.email, &payload.name, &hash)
        .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(SignupResponse {
        message: "User created successfully".into(),
        user_id: user.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and bad password surface the same error to the client.
    let user = match state.users.find_by_email(&payload.email).await {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify_password(&payload.password, &user.password_hash) {
        warn!(email = %payload.email, user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_session(&user.email)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
        user,
    }))
}

#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserRecord> {
    Json(user)
}

#[cfg(feature = "demo")]
#[instrument(skip(state))]
pub async fn github_login(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    crate::auth::oauth::mock_oauth_login(&state, crate::auth::oauth::IdentityProvider::GitHub)
        .await
        .map(Json)
}

#[cfg(feature = "demo")]
#[instrument(skip(state))]
pub async fn google_login(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    crate::auth::oauth::mock_oauth_login(&state, crate::auth::oauth::IdentityProvider::Google)
        .await
        .map(Json)
}

#[cfg(feature = "demo")]
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Json<serde_json::Value> {
    let users = state.users.list_emails().await;
    Json(serde_json::json!({ "users": users }))
}

#[cfg(feature = "demo")]
#[instrument(skip(state))]
pub async fn clear_users(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.users.reset().await;
    info!("store reset to demo seed");
    Json(serde_json::json!({ "message": "Users cleared, demo user restored" }))
}

#[cfg(feature = "demo")]
#[instrument(skip(state))]
pub async fn reset_signup(State(state): State<AppState>) -> Json<serde_json::Value> {
    use crate::auth::oauth::IdentityProvider;

    let mut removed = Vec::new();
    for provider in [IdentityProvider::GitHub, IdentityProvider::Google] {
        let identity = provider.identity();
        if state.users.remove(identity.email).await {
            removed.push(identity.email);
        }
    }
    let message = if removed.is_empty() {
        "Email not found in database".to_string()
    } else {
        format!("{} removed from database", removed.join(", "))
    };
    Json(serde_json::json!({ "message": message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("bad-email"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spa ce@example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
