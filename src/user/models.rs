use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table.
///
/// Deliberately not serializable: the password hash must never reach a
/// response body. Handlers map this into `types::UserResponse` instead.
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable user row: everything but the store-assigned id and timestamp
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
