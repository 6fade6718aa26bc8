use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::task;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::NewUser;
use crate::state::AuthState;

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// OAuth2 password-flow form. Extra fields (`grant_type`, `scope`) are ignored.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
/// Rejects revoked, undecodable and expired tokens.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub name: String,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AuthState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;

        if state.revoked.is_revoked(&token) {
            return Err(AppError::Unauthorized(
                "Token revoked (logged out)".to_string(),
            ));
        }

        let name = state.tokens.verify(&token).map_err(|e| {
            warn!("Rejected bearer token: {e}");
            AppError::Unauthorized("Invalid token".to_string())
        })?;

        Ok(CurrentUser { name, token })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// GET /
pub async fn handle_root() -> Json<Value> {
    Json(json!({ "message": "Backend running" }))
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AuthState>,
    form: Result<Form<SignupForm>, FormRejection>,
) -> Result<Json<Value>, AppError> {
    let Form(form) = form?;

    if state.users.find_by_name(&form.name).await?.is_some() {
        return Err(AppError::Validation("Name already exists".to_string()));
    }
    if state.users.find_by_email(&form.email).await?.is_some() {
        return Err(AppError::Validation("Email already exists".to_string()));
    }

    let password = form.password;
    let password_hash = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let user = state
        .users
        .create(NewUser {
            name: form.name,
            email: form.email,
            phone: form.phone,
            password_hash,
        })
        .await?;

    info!("Created user {} ({})", user.id, user.name);
    Ok(Json(json!({ "message": "Signup successful" })))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AuthState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(form) = form?;
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .users
        .find_by_name(&form.username)
        .await?
        .ok_or_else(invalid)?;

    let password = form.password;
    let stored = user.password.clone();
    let verified = task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let matches = verified.map_err(|e| {
        warn!("Stored hash for user {} is unusable: {e}", user.id);
        invalid()
    })?;
    if !matches {
        warn!("Failed login for '{}'", form.username);
        return Err(invalid());
    }

    let access_token = state
        .tokens
        .issue(&user.name)
        .map_err(|e| AppError::Internal(e.into()))?;

    info!("User '{}' logged in", user.name);
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// GET /profile
pub async fn handle_profile(user: CurrentUser) -> Json<Value> {
    Json(json!({
        "message": "This data is protected",
        "user": user.name
    }))
}

/// POST /logout
pub async fn handle_logout(State(state): State<AuthState>, user: CurrentUser) -> Json<Value> {
    state.revoked.revoke(&user.token);
    info!("User '{}' logged out", user.name);
    Json(json!({ "message": "Logged out successfully" }))
}
