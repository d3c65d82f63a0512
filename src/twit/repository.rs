use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::TwitModel;
use crate::shared::AppError;

/// Trait for twit repository operations.
///
/// The mutating operations key on both the twit id and the owner id, so a
/// caller that lost an ownership race cannot mutate a row it does not own;
/// they report whether a row was actually touched.
#[async_trait]
pub trait TwitRepository {
    async fn list_twits(&self) -> Result<Vec<TwitModel>, AppError>;
    async fn get_twit(&self, twit_id: i64) -> Result<Option<TwitModel>, AppError>;
    async fn create_twit(&self, user_id: i64, body: &str) -> Result<TwitModel, AppError>;
    async fn update_twit(&self, twit_id: i64, owner_id: i64, body: &str)
        -> Result<bool, AppError>;
    async fn delete_twit(&self, twit_id: i64, owner_id: i64) -> Result<bool, AppError>;
}

/// In-memory implementation of TwitRepository for development and testing
pub struct InMemoryTwitRepository {
    twits: Mutex<HashMap<i64, TwitModel>>,
    next_id: AtomicI64,
}

impl Default for InMemoryTwitRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTwitRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            twits: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the current number of twits in the repository
    pub fn twit_count(&self) -> usize {
        self.twits.lock().unwrap().len()
    }
}

#[async_trait]
impl TwitRepository for InMemoryTwitRepository {
    #[instrument(skip(self))]
    async fn list_twits(&self) -> Result<Vec<TwitModel>, AppError> {
        debug!("Listing twits from memory");

        let twits = self.twits.lock().unwrap();
        let mut all: Vec<TwitModel> = twits.values().cloned().collect();
        all.sort_by_key(|t| t.id);

        debug!(twit_count = all.len(), "Twits listed from memory");
        Ok(all)
    }

    #[instrument(skip(self))]
    async fn get_twit(&self, twit_id: i64) -> Result<Option<TwitModel>, AppError> {
        debug!(twit_id, "Fetching twit from memory");

        let twits = self.twits.lock().unwrap();
        Ok(twits.get(&twit_id).cloned())
    }

    #[instrument(skip(self, body))]
    async fn create_twit(&self, user_id: i64, body: &str) -> Result<TwitModel, AppError> {
        debug!(user_id, "Creating twit in memory");

        let now = Utc::now();
        let twit = TwitModel {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            body: body.to_string(),
            created_at: now,
            updated_at: now,
        };

        let mut twits = self.twits.lock().unwrap();
        twits.insert(twit.id, twit.clone());

        debug!(twit_id = twit.id, "Twit created successfully in memory");
        Ok(twit)
    }

    #[instrument(skip(self, body))]
    async fn update_twit(
        &self,
        twit_id: i64,
        owner_id: i64,
        body: &str,
    ) -> Result<bool, AppError> {
        debug!(twit_id, owner_id, "Updating twit in memory");

        let mut twits = self.twits.lock().unwrap();
        match twits.get_mut(&twit_id) {
            Some(twit) if twit.user_id == owner_id => {
                twit.body = body.to_string();
                twit.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn delete_twit(&self, twit_id: i64, owner_id: i64) -> Result<bool, AppError> {
        debug!(twit_id, owner_id, "Deleting twit from memory");

        let mut twits = self.twits.lock().unwrap();
        match twits.get(&twit_id) {
            Some(twit) if twit.user_id == owner_id => {
                twits.remove(&twit_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// PostgreSQL implementation of twit repository
pub struct PostgresTwitRepository {
    pool: PgPool,
}

impl PostgresTwitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TwitRepository for PostgresTwitRepository {
    #[instrument(skip(self))]
    async fn list_twits(&self) -> Result<Vec<TwitModel>, AppError> {
        debug!("Listing twits from database");

        let twits = sqlx::query_as::<_, TwitModel>(
            "SELECT id, user_id, body, created_at, updated_at FROM twits ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list twits from database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(twit_count = twits.len(), "Twits listed from database");
        Ok(twits)
    }

    #[instrument(skip(self))]
    async fn get_twit(&self, twit_id: i64) -> Result<Option<TwitModel>, AppError> {
        debug!(twit_id, "Fetching twit from database");

        let twit = sqlx::query_as::<_, TwitModel>(
            "SELECT id, user_id, body, created_at, updated_at FROM twits WHERE id = $1",
        )
        .bind(twit_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, twit_id, "Failed to fetch twit from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(twit)
    }

    #[instrument(skip(self, body))]
    async fn create_twit(&self, user_id: i64, body: &str) -> Result<TwitModel, AppError> {
        debug!(user_id, "Creating twit in database");

        let twit = sqlx::query_as::<_, TwitModel>(
            "INSERT INTO twits (user_id, body) VALUES ($1, $2) \
             RETURNING id, user_id, body, created_at, updated_at",
        )
        .bind(user_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id, "Failed to create twit in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(twit_id = twit.id, "Twit created successfully in database");
        Ok(twit)
    }

    #[instrument(skip(self, body))]
    async fn update_twit(
        &self,
        twit_id: i64,
        owner_id: i64,
        body: &str,
    ) -> Result<bool, AppError> {
        debug!(twit_id, owner_id, "Updating twit in database");

        // Conditional on owner as well as id: a non-owner cannot win a race
        // between the handler's ownership read and this statement
        let result = sqlx::query(
            "UPDATE twits SET body = $1, updated_at = NOW() WHERE id = $2 AND user_id = $3",
        )
        .bind(body)
        .bind(twit_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, twit_id, "Failed to update twit in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_twit(&self, twit_id: i64, owner_id: i64) -> Result<bool, AppError> {
        debug!(twit_id, owner_id, "Deleting twit from database");

        let result = sqlx::query("DELETE FROM twits WHERE id = $1 AND user_id = $2")
            .bind(twit_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, twit_id, "Failed to delete twit from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
