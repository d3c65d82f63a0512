use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{models::TwitModel, service::TwitService, types::TwitBodyRequest};
use crate::auth::AuthUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all twits
///
/// GET /
/// Public: no authentication required
#[instrument(name = "list_twits", skip(state))]
pub async fn list_twits(State(state): State<AppState>) -> Result<Json<Vec<TwitModel>>, AppError> {
    let service = TwitService::new(Arc::clone(&state.twit_repository));
    let twits = service.list_twits().await?;

    info!(twit_count = twits.len(), "Twits listed successfully");

    Ok(Json(twits))
}

/// HTTP handler for creating a twit owned by the authenticated user
///
/// POST /twit
#[instrument(name = "create_twit", skip(state, request))]
pub async fn create_twit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(request): Json<TwitBodyRequest>,
) -> Result<Json<TwitModel>, AppError> {
    let service = TwitService::new(Arc::clone(&state.twit_repository));
    let twit = service.create_twit(auth_user.user_id, &request.body).await?;

    info!(twit_id = twit.id, user_id = auth_user.user_id, "Twit created successfully");

    Ok(Json(twit))
}

/// HTTP handler for fetching one twit
///
/// GET /twit/{id}
#[instrument(name = "get_twit", skip(state))]
pub async fn get_twit(
    State(state): State<AppState>,
    Path(twit_id): Path<i64>,
) -> Result<Json<TwitModel>, AppError> {
    let service = TwitService::new(Arc::clone(&state.twit_repository));
    let twit = service.get_twit(twit_id).await?;

    Ok(Json(twit))
}

/// HTTP handler for updating a twit's body, owner only
///
/// PUT /twit/{id}
#[instrument(name = "update_twit", skip(state, request))]
pub async fn update_twit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(twit_id): Path<i64>,
    Json(request): Json<TwitBodyRequest>,
) -> Result<Json<TwitModel>, AppError> {
    let service = TwitService::new(Arc::clone(&state.twit_repository));
    let twit = service
        .update_twit(twit_id, auth_user.user_id, &request.body)
        .await?;

    info!(twit_id, user_id = auth_user.user_id, "Twit updated successfully");

    Ok(Json(twit))
}

/// HTTP handler for deleting a twit, owner only
///
/// DELETE /twit/{id}
#[instrument(name = "delete_twit", skip(state))]
pub async fn delete_twit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(twit_id): Path<i64>,
) -> Result<(), AppError> {
    let service = TwitService::new(Arc::clone(&state.twit_repository));
    service.delete_twit(twit_id, auth_user.user_id).await?;

    info!(twit_id, user_id = auth_user.user_id, "Twit deleted successfully");

    Ok(())
}
