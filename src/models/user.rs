//! User and refresh token models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile stored in the `users` table.
///
/// Identity is keyed by the (provider, provider_id) pair, not by email.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// Email address (may be withheld by the provider)
    pub email: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
    /// OAuth provider name ("kakao")
    pub provider: String,
    /// Provider-assigned account ID
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a user on first login.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
    pub provider: String,
    pub provider_id: String,
}

/// Stored refresh token, at most one row per user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub user_id: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
