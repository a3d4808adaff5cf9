// SPDX-License-Identifier: MIT

//! Postgres store backed by sqlx.

use crate::db::{RefreshTokenStore, UserStore, REFRESH_TOKEN_TTL_HOURS};
use crate::error::AppError;
use crate::models::{NewUser, RefreshTokenRecord, User};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Postgres database client.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres with a small pool.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        tracing::info!("Connected to Postgres");
        Ok(Self { pool })
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_provider_identity(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, nickname, profile_image, provider, provider_id, created_at, updated_at \
             FROM users WHERE provider = $1 AND provider_id = $2",
        )
        .bind(provider)
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, nickname, profile_image, provider, provider_id, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, nickname, profile_image, provider, provider_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, now(), now()) \
             RETURNING id, email, nickname, profile_image, provider, provider_id, created_at, updated_at",
        )
        .bind(&user.email)
        .bind(&user.nickname)
        .bind(&user.profile_image)
        .bind(&user.provider)
        .bind(&user.provider_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update_profile(
        &self,
        user_id: i64,
        nickname: &str,
        profile_image: Option<&str>,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET nickname = $2, profile_image = $3, updated_at = now() WHERE id = $1 \
             RETURNING id, email, nickname, profile_image, provider, provider_id, created_at, updated_at",
        )
        .bind(user_id)
        .bind(nickname)
        .bind(profile_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl RefreshTokenStore for PgStore {
    async fn save(&self, user_id: i64, token: &str) -> Result<(), AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(REFRESH_TOKEN_TTL_HOURS);

        // Single upsert instead of delete-then-insert, so two concurrent
        // refreshes for the same user cannot leave two live rows.
        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token, created_at, expires_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE \
             SET token = EXCLUDED.token, created_at = EXCLUDED.created_at, \
                 expires_at = EXCLUDED.expires_at",
        )
        .bind(user_id)
        .bind(token)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn is_valid(&self, user_id: i64, token: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM refresh_tokens \
             WHERE user_id = $1 AND token = $2 AND expires_at > now())",
        )
        .bind(user_id)
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT user_id, token, created_at, expires_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}
