// SPDX-License-Identifier: MIT

//! Session manager: login, token refresh, logout and current-user lookup.

use crate::db::{RefreshTokenStore, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::services::kakao::IdentityProvider;
use crate::token::TokenCodec;
use std::sync::Arc;

/// A freshly issued access + refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Orchestrates the token lifecycle over the stores and the identity
/// provider. Each operation is all-or-nothing from the caller's
/// perspective: any failing step aborts the whole operation.
#[derive(Clone)]
pub struct SessionService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    identity: Arc<dyn IdentityProvider>,
    codec: TokenCodec,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        identity: Arc<dyn IdentityProvider>,
        codec: TokenCodec,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            identity,
            codec,
        }
    }

    /// Log in with a provider-issued access token.
    ///
    /// Resolves the provider identity, finds or creates the user, then
    /// issues and persists a fresh token pair.
    pub async fn login(&self, provider_access_token: &str) -> Result<TokenPair, AppError> {
        let info = self.identity.get_user_info(provider_access_token).await?;
        let user = self.find_or_create_user(&info).await?;

        let access_token = self.codec.create_access_token(user.id)?;
        let refresh_token = self.codec.create_refresh_token(user.id)?;
        self.refresh_tokens.save(user.id, &refresh_token).await?;

        tracing::info!(user_id = user.id, nickname = %user.nickname, "Login successful");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Rotate a refresh token into a new token pair.
    ///
    /// The presented token must decode cleanly and match the currently
    /// stored one; the old token is implicitly invalidated because the
    /// store then holds only the new one (single-use rotation).
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let user_id = self.codec.parse_subject(refresh_token)?;

        if !self.refresh_tokens.is_valid(user_id, refresh_token).await? {
            tracing::warn!(user_id, "Refresh token not current, rejecting");
            return Err(AppError::RefreshRejected);
        }

        let access_token = self.codec.create_access_token(user_id)?;
        let new_refresh_token = self.codec.create_refresh_token(user_id)?;
        self.refresh_tokens.save(user_id, &new_refresh_token).await?;

        tracing::info!(user_id, "Tokens refreshed");

        Ok(TokenPair {
            access_token,
            refresh_token: new_refresh_token,
        })
    }

    /// Delete the user's stored refresh token. Idempotent: logging out
    /// twice is not an error.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let user_id = self.codec.parse_subject(refresh_token)?;
        self.refresh_tokens.delete_by_user_id(user_id).await?;
        tracing::info!(user_id, "Logged out");
        Ok(())
    }

    /// Resolve an authenticated principal to its stored user record.
    /// `None` means no record exists, which is distinct from
    /// unauthenticated (handled by the middleware).
    pub async fn current_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.users.find_by_id(user_id).await
    }

    /// Find the user for a provider identity, creating it on first login.
    /// Returning logins refresh nickname and profile image only.
    async fn find_or_create_user(
        &self,
        info: &crate::services::kakao::ProviderUserInfo,
    ) -> Result<User, AppError> {
        let provider = self.identity.name();

        match self
            .users
            .find_by_provider_identity(provider, &info.provider_id)
            .await?
        {
            Some(existing) => {
                self.users
                    .update_profile(existing.id, &info.nickname, info.profile_image.as_deref())
                    .await
            }
            None => {
                tracing::info!(provider, provider_id = %info.provider_id, "Creating new user");
                self.users
                    .create(NewUser {
                        email: info.email.clone(),
                        nickname: info.nickname.clone(),
                        profile_image: info.profile_image.clone(),
                        provider: provider.to_string(),
                        provider_id: info.provider_id.clone(),
                    })
                    .await
            }
        }
    }
}
