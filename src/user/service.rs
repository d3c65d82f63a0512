use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::NewUser,
    repository::UserRepository,
    types::{LoginRequest, SignupRequest, TokenResponse, UserResponse},
};
use crate::auth::{password, token::TokenService};
use crate::shared::AppError;

/// Service for signup and login business logic
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    token_service: Arc<TokenService>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository + Send + Sync>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            repository,
            token_service,
        }
    }

    /// Registers a new identity: hash the password, store the row.
    ///
    /// Hashing failure aborts the signup before any store access; an empty
    /// or weak hash is never written.
    #[instrument(skip(self, request))]
    pub async fn signup(&self, request: SignupRequest) -> Result<UserResponse, AppError> {
        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            warn!("Signup request with missing fields");
            return Err(AppError::Forbidden("Error in request".to_string()));
        }

        let password_hash = password::hash_password(&request.password)?;

        let user = self
            .repository
            .create_user(&NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User signed up");

        Ok(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
        })
    }

    /// Authenticates credentials and issues a signed one-hour assertion.
    ///
    /// Unknown email is reported as not found; a present identity with the
    /// wrong password is rejected without a token.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login attempt for unknown email");
                AppError::NotFound("Not found".to_string())
            })?;

        if !password::verify_password(&request.password, &user.password_hash) {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::Forbidden(
                "Email and/or password do not match".to_string(),
            ));
        }

        let token = self.token_service.issue(user.id)?;

        info!(user_id = user.id, "User logged in, token issued");

        Ok(TokenResponse { token })
    }
}
