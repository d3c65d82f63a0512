use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewUser, UserModel};
use crate::shared::AppError;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    async fn create_user(&self, new_user: &NewUser) -> Result<UserModel, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
}

/// In-memory implementation of UserRepository for development and testing
///
/// Mirrors the Postgres implementation's contract, including the uniqueness
/// constraint on email, without requiring a database connection. Data is
/// lost when the application restarts.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<i64, UserModel>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the current number of users in the repository
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, new_user))]
    async fn create_user(&self, new_user: &NewUser) -> Result<UserModel, AppError> {
        debug!(username = %new_user.username, email = %new_user.email, "Creating user in memory");

        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            warn!(email = %new_user.email, "Email already registered in memory");
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let user = UserModel {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        debug!(user_id = user.id, "User created successfully in memory");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user from memory");

        let users = self.users.lock().unwrap();
        let user = users.values().find(|u| u.email == email).cloned();

        match &user {
            Some(u) => debug!(user_id = u.id, "User found in memory"),
            None => debug!(email = %email, "User not found in memory"),
        }

        Ok(user)
    }
}

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, new_user))]
    async fn create_user(&self, new_user: &NewUser) -> Result<UserModel, AppError> {
        debug!(username = %new_user.username, email = %new_user.email, "Creating user in database");

        let user = sqlx::query_as::<_, UserModel>(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING id, username, email, password_hash, created_at",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    warn!(email = %new_user.email, "Email already registered");
                    return AppError::Conflict("Email already registered".to_string());
                }
            }
            warn!(error = %e, "Failed to create user in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(user_id = user.id, "User created successfully in database");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        debug!(email = %email, "Fetching user from database");

        let user = sqlx::query_as::<_, UserModel>(
            "SELECT id, username, email, password_hash, created_at \
             FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, email = %email, "Failed to fetch user from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &user {
            Some(u) => debug!(user_id = u.id, "User found in database"),
            None => debug!(email = %email, "User not found in database"),
        }

        Ok(user)
    }
}
