// SPDX-License-Identifier: MIT

//! Kakao identity provider client.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// External OAuth identity lookup, injected into the session manager so it
/// can be faked in tests.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name used to key user identities ("kakao").
    fn name(&self) -> &'static str;

    /// Resolve a provider-issued access token to the account's profile.
    /// Fails with `AppError::Auth` if the token is invalid or expired.
    async fn get_user_info(&self, access_token: &str) -> Result<ProviderUserInfo, AppError>;
}

/// Profile fields returned by the identity provider.
#[derive(Debug, Clone)]
pub struct ProviderUserInfo {
    pub provider_id: String,
    pub email: Option<String>,
    pub nickname: String,
    pub profile_image: Option<String>,
}

/// Kakao user-info API client.
#[derive(Clone)]
pub struct KakaoClient {
    http: reqwest::Client,
    user_info_url: String,
}

impl KakaoClient {
    pub fn new(user_info_url: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
            user_info_url,
        }
    }
}

#[async_trait]
impl IdentityProvider for KakaoClient {
    fn name(&self) -> &'static str {
        "kakao"
    }

    async fn get_user_info(&self, access_token: &str) -> Result<ProviderUserInfo, AppError> {
        let response = self
            .http
            .get(&self.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Kakao request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "Kakao user info lookup failed with status {}: {}",
                status, body
            )));
        }

        let user: KakaoUserResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Kakao response parse error: {}", e)))?;

        let account = user.kakao_account.unwrap_or_default();
        let profile = account.profile.unwrap_or_default();

        Ok(ProviderUserInfo {
            provider_id: user.id.to_string(),
            email: account.email,
            nickname: profile.nickname.unwrap_or_default(),
            profile_image: profile.profile_image_url,
        })
    }
}

/// Response from https://kapi.kakao.com/v2/user/me (fields we use).
#[derive(Debug, Deserialize)]
struct KakaoUserResponse {
    id: i64,
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
    profile_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_user_info_parses_profile() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/user/me"))
            .and(header("authorization", "Bearer kakao-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 123456789,
                "kakao_account": {
                    "email": "user@kakao.com",
                    "profile": {
                        "nickname": "테스트사용자",
                        "profile_image_url": "https://img.kakao/p.jpg"
                    }
                }
            })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(format!("{}/v2/user/me", server.uri()));
        let info = client.get_user_info("kakao-token").await.unwrap();

        assert_eq!(info.provider_id, "123456789");
        assert_eq!(info.email.as_deref(), Some("user@kakao.com"));
        assert_eq!(info.nickname, "테스트사용자");
        assert_eq!(info.profile_image.as_deref(), Some("https://img.kakao/p.jpg"));
    }

    #[tokio::test]
    async fn test_get_user_info_tolerates_missing_account_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/user/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(format!("{}/v2/user/me", server.uri()));
        let info = client.get_user_info("kakao-token").await.unwrap();

        assert_eq!(info.provider_id, "42");
        assert!(info.email.is_none());
        assert_eq!(info.nickname, "");
    }

    #[tokio::test]
    async fn test_get_user_info_invalid_token_is_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/user/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "msg": "this access token does not exist",
                "code": -401
            })))
            .mount(&server)
            .await;

        let client = KakaoClient::new(format!("{}/v2/user/me", server.uri()));
        let err = client.get_user_info("expired").await.unwrap_err();

        assert!(matches!(err, AppError::Auth(_)));
    }
}
