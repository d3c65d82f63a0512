use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the twits table
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct TwitModel {
    pub id: i64,
    pub user_id: i64, // Owning identity; foreign key to users.id
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
