use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{LoginRequest, SignupRequest, TokenResponse, UserResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a new user
///
/// POST /signup
/// Returns the created identity without the password hash
#[instrument(name = "signup", skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<UserResponse>, AppError> {
    info!(username = %request.username, "Signup requested");

    // Use injected repository and token service from app state
    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.token_service),
    );
    let user = service.signup(request).await?;

    info!(user_id = user.id, "Signup completed");

    Ok(Json(user))
}

/// HTTP handler for authenticating a user
///
/// POST /login
/// Returns a signed one-hour JWT on success
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    info!("Login requested");

    let service = UserService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.token_service),
    );
    let response = service.login(request).await?;

    info!(token_length = response.token.len(), "Login completed");

    Ok(Json(response))
}

/// HTTP handler acknowledging logout
///
/// GET /logout
/// Tokens are client-held and stateless, so there is nothing to revoke
/// server-side; clients discard the token and it lapses at expiry.
#[instrument(name = "logout")]
pub async fn logout() -> &'static str {
    "Logout!\n"
}
