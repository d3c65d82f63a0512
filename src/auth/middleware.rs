use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use super::types::AuthUser;
use crate::shared::{AppError, AppState};

/// JWT authentication middleware - validates the Authorization Bearer header
/// and adds a typed AuthUser to the request.
/// Usage: .layer(middleware::from_fn_with_state(app_state.clone(), auth::jwt_auth))
/// Handlers can then extract Extension(auth_user): Extension<AuthUser>.
///
/// Missing header, malformed header, and invalid/expired token are all
/// rejected with the same generic 401 so a caller cannot probe which check
/// failed. The middleware touches no repository; rejection happens before
/// any store access.
#[instrument(skip(state, req, next))]
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or malformed Authorization header");
            AppError::Unauthorized("Unauthorized access to this resource".to_string())
        })?;

    let claims = state.token_service.verify(token).map_err(|e| {
        warn!("JWT authentication failed: {}", e);
        AppError::Unauthorized("Unauthorized access to this resource".to_string())
    })?;

    debug!(user_id = claims.user_id, "Authentication successful");

    // Typed identity for downstream ownership checks
    req.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
    });

    Ok(next.run(req).await)
}
