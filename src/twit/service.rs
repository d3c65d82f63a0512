use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{models::TwitModel, repository::TwitRepository};
use crate::shared::AppError;

/// Service for twit business logic, including the ownership protocol:
/// mutation re-reads the target row first, so a missing twit is reported
/// as not found while someone else's twit is reported as unauthorized.
pub struct TwitService {
    repository: Arc<dyn TwitRepository + Send + Sync>,
}

impl TwitService {
    pub fn new(repository: Arc<dyn TwitRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_twits(&self) -> Result<Vec<TwitModel>, AppError> {
        self.repository.list_twits().await
    }

    #[instrument(skip(self))]
    pub async fn get_twit(&self, twit_id: i64) -> Result<TwitModel, AppError> {
        self.repository
            .get_twit(twit_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))
    }

    #[instrument(skip(self, body))]
    pub async fn create_twit(&self, user_id: i64, body: &str) -> Result<TwitModel, AppError> {
        if body.is_empty() {
            warn!(user_id, "Create twit request with empty body");
            return Err(AppError::Forbidden("Error in request".to_string()));
        }

        let twit = self.repository.create_twit(user_id, body).await?;
        info!(twit_id = twit.id, user_id, "Twit created");
        Ok(twit)
    }

    #[instrument(skip(self, body))]
    pub async fn update_twit(
        &self,
        twit_id: i64,
        user_id: i64,
        body: &str,
    ) -> Result<TwitModel, AppError> {
        self.check_ownership(twit_id, user_id).await?;

        if body.is_empty() {
            warn!(twit_id, user_id, "Update twit request with empty body");
            return Err(AppError::Forbidden("Error in request".to_string()));
        }

        // The statement re-checks ownership; a row deleted since the read
        // above surfaces as not found
        let updated = self.repository.update_twit(twit_id, user_id, body).await?;
        if !updated {
            return Err(AppError::NotFound("Not found".to_string()));
        }

        info!(twit_id, user_id, "Twit updated");
        self.get_twit(twit_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_twit(&self, twit_id: i64, user_id: i64) -> Result<(), AppError> {
        self.check_ownership(twit_id, user_id).await?;

        let deleted = self.repository.delete_twit(twit_id, user_id).await?;
        if !deleted {
            return Err(AppError::NotFound("Not found".to_string()));
        }

        info!(twit_id, user_id, "Twit deleted");
        Ok(())
    }

    /// Resolves the target twit and verifies the caller owns it.
    ///
    /// Absence and wrong-owner are deliberately distinct responses: the
    /// protocol discloses that a twit exists even to non-owners.
    async fn check_ownership(&self, twit_id: i64, user_id: i64) -> Result<(), AppError> {
        let twit = self
            .repository
            .get_twit(twit_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

        if twit.user_id != user_id {
            warn!(twit_id, owner_id = twit.user_id, user_id, "Ownership check failed");
            return Err(AppError::Unauthorized(
                "Unauthorized access to this resource".to_string(),
            ));
        }

        Ok(())
    }
}
