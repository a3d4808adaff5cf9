// SPDX-License-Identifier: MIT

//! Signed session token codec.
//!
//! Access and refresh tokens share the same HS256 encoding and verification
//! path; they differ only in the validity duration passed at creation time.
//! Validity is purely cryptographic and time-based - no server-side record
//! of access tokens exists.

use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Access token validity: 1 hour.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh token validity: 24 hours.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Creates and verifies signed session tokens with a process-wide key.
///
/// Rotating the signing key invalidates all outstanding tokens; there is
/// no graceful rotation.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
        }
    }

    /// Create a short-lived access token for a user.
    pub fn create_access_token(&self, user_id: i64) -> Result<String, AppError> {
        self.create_token(user_id, ACCESS_TOKEN_TTL_SECS)
    }

    /// Create a refresh token for a user.
    pub fn create_refresh_token(&self, user_id: i64) -> Result<String, AppError> {
        self.create_token(user_id, REFRESH_TOKEN_TTL_SECS)
    }

    /// Create a signed token with the user ID as subject,
    /// issued now and expiring after `validity_secs`.
    pub fn create_token(&self, user_id: i64, validity_secs: i64) -> Result<String, AppError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
            .as_secs() as i64;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now as usize,
            exp: (now + validity_secs) as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token creation failed: {}", e)))
    }

    /// Verify signature and expiry, returning the user ID from the subject.
    pub fn parse_subject(&self, token: &str) -> Result<i64, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|_| AppError::InvalidToken)?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::InvalidToken)
    }

    /// Same verification as `parse_subject`, but returns false instead of
    /// erroring on any failure.
    pub fn is_valid(&self, token: &str) -> bool {
        self.parse_subject(token).is_ok()
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact to the second; the jsonwebtoken default of 60s
        // leeway would keep expired tokens alive for another minute.
        validation.leeway = 0;
        validation
    }
}
