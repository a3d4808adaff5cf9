// SPDX-License-Identifier: MIT

//! Persistence layer.
//!
//! The session core talks to storage through the [`UserStore`] and
//! [`RefreshTokenStore`] traits so it can run against Postgres in
//! production and the in-memory store in tests and local development.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{NewUser, RefreshTokenRecord, User};
use async_trait::async_trait;

/// Fixed refresh token row TTL: 24 hours.
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 24;

/// User profile storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by their provider identity.
    async fn find_by_provider_identity(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError>;

    /// Insert a new user, returning the stored row.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Refresh nickname and profile image on a returning login.
    /// Email, provider identity and created_at are preserved;
    /// updated_at is bumped.
    async fn update_profile(
        &self,
        user_id: i64,
        nickname: &str,
        profile_image: Option<&str>,
    ) -> Result<User, AppError>;
}

/// Refresh token storage with single-active-token-per-user semantics.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Store a refresh token for a user, replacing any existing one.
    /// The stored row expires after [`REFRESH_TOKEN_TTL_HOURS`].
    async fn save(&self, user_id: i64, token: &str) -> Result<(), AppError>;

    /// True iff a row exists for `user_id`, its token string equals
    /// `token` exactly, and its expiry is strictly after now. The three
    /// failure causes are not distinguished.
    async fn is_valid(&self, user_id: i64, token: &str) -> Result<bool, AppError>;

    /// Delete a user's refresh token. Not an error if none exists.
    async fn delete_by_user_id(&self, user_id: i64) -> Result<(), AppError>;

    async fn delete_by_token(&self, token: &str) -> Result<(), AppError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
}
