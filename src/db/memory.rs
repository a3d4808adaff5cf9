// SPDX-License-Identifier: MIT

//! In-memory store for tests and local development without Postgres.

use crate::db::{RefreshTokenStore, UserStore, REFRESH_TOKEN_TTL_HOURS};
use crate::error::AppError;
use crate::models::{NewUser, RefreshTokenRecord, User};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// In-memory implementation of both store traits.
///
/// Keying the token map by user ID gives the single-active-refresh-token
/// invariant for free: an insert replaces any previous entry atomically.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<i64, User>>,
    tokens: Arc<DashMap<i64, RefreshTokenRecord>>,
    next_user_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_provider_identity(
        &self,
        provider: &str,
        provider_id: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.provider == provider && entry.provider_id == provider_id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&user_id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let stored = User {
            id,
            email: user.email,
            nickname: user.nickname,
            profile_image: user.profile_image,
            provider: user.provider,
            provider_id: user.provider_id,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_profile(
        &self,
        user_id: i64,
        nickname: &str,
        profile_image: Option<&str>,
    ) -> Result<User, AppError> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))?;
        entry.nickname = nickname.to_string();
        entry.profile_image = profile_image.map(|s| s.to_string());
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn save(&self, user_id: i64, token: &str) -> Result<(), AppError> {
        let now = Utc::now();
        self.tokens.insert(
            user_id,
            RefreshTokenRecord {
                user_id,
                token: token.to_string(),
                created_at: now,
                expires_at: now + Duration::hours(REFRESH_TOKEN_TTL_HOURS),
            },
        );
        Ok(())
    }

    async fn is_valid(&self, user_id: i64, token: &str) -> Result<bool, AppError> {
        Ok(self
            .tokens
            .get(&user_id)
            .map(|record| record.token == token && record.expires_at > Utc::now())
            .unwrap_or(false))
    }

    async fn delete_by_user_id(&self, user_id: i64) -> Result<(), AppError> {
        self.tokens.remove(&user_id);
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> Result<(), AppError> {
        self.tokens.retain(|_, record| record.token != token);
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        Ok(self
            .tokens
            .iter()
            .find(|record| record.token == token)
            .map(|record| record.value().clone()))
    }
}
