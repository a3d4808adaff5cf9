// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use weather_chatbot::config::Config;
use weather_chatbot::db::MemoryStore;
use weather_chatbot::error::AppError;
use weather_chatbot::services::{
    ChatService, IdentityProvider, LlmProvider, ProviderUserInfo, SessionService, ToolOutcome,
    WeatherProvider, WeatherQuery, WeatherSnapshot,
};
use weather_chatbot::token::TokenCodec;
use weather_chatbot::AppState;

/// Scripted LLM behavior for a test app.
#[allow(dead_code)]
pub enum LlmScript {
    WeatherCall(&'static str, &'static str),
    Decline(&'static str),
    Text(Option<&'static str>),
    Fail,
}

struct FakeLlm {
    script: LlmScript,
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn complete(&self, _question: &str) -> Result<Option<String>, AppError> {
        match &self.script {
            LlmScript::Text(text) => Ok(text.map(|t| t.to_string())),
            LlmScript::Decline(text) => Ok(Some(text.to_string())),
            LlmScript::Fail => Err(AppError::LlmUnavailable("down".to_string())),
            LlmScript::WeatherCall(..) => Ok(Some("unexpected".to_string())),
        }
    }

    async fn complete_with_weather_tool(&self, _question: &str) -> Result<ToolOutcome, AppError> {
        match &self.script {
            LlmScript::WeatherCall(city, country_code) => {
                Ok(ToolOutcome::WeatherCall(WeatherQuery {
                    city: city.to_string(),
                    country_code: country_code.to_string(),
                }))
            }
            LlmScript::Decline(text) => Ok(ToolOutcome::Text(Some(text.to_string()))),
            LlmScript::Text(text) => Ok(ToolOutcome::Text(text.map(|t| t.to_string()))),
            LlmScript::Fail => Err(AppError::LlmUnavailable("down".to_string())),
        }
    }
}

/// Weather provider serving a canned snapshot for any city.
struct FakeWeather;

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current_weather(
        &self,
        city: &str,
        _country_code: &str,
    ) -> Result<WeatherSnapshot, AppError> {
        let body = serde_json::json!({
            "name": city,
            "main": {
                "temp": 21.3,
                "feels_like": 20.8,
                "temp_min": 17.0,
                "temp_max": 24.5,
                "humidity": 62,
                "pressure": 1012
            },
            "weather": [{"description": "맑음"}]
        });
        serde_json::from_value(body)
            .map_err(|e| AppError::WeatherUnavailable(e.to_string()))
    }
}

/// Identity provider resolving every token to the same Kakao account,
/// or failing when constructed with `fail`.
struct FakeIdentity {
    fail: bool,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn name(&self) -> &'static str {
        "kakao"
    }

    async fn get_user_info(&self, _access_token: &str) -> Result<ProviderUserInfo, AppError> {
        if self.fail {
            return Err(AppError::Auth("token lookup failed".to_string()));
        }
        Ok(ProviderUserInfo {
            provider_id: "123456789".to_string(),
            email: Some("user@kakao.com".to_string()),
            nickname: "테스트사용자".to_string(),
            profile_image: Some("https://img.kakao/p.jpg".to_string()),
        })
    }
}

/// Create a test app over in-memory stores and fake providers.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(LlmScript::Text(Some("ok")), false)
}

#[allow(dead_code)]
pub fn create_test_app_with(script: LlmScript, identity_fails: bool) -> (Router, Arc<AppState>) {
    let config = Config::default();
    let codec = TokenCodec::new(&config.jwt_signing_key);
    let store = Arc::new(MemoryStore::new());

    let session = SessionService::new(
        store.clone(),
        store,
        Arc::new(FakeIdentity {
            fail: identity_fails,
        }),
        codec.clone(),
    );
    let chat = ChatService::new(Arc::new(FakeLlm { script }), Arc::new(FakeWeather));

    let state = Arc::new(AppState {
        config,
        codec,
        session,
        chat,
    });

    (weather_chatbot::routes::create_router(state.clone()), state)
}

/// POST a JSON body, returning status and parsed response body.
#[allow(dead_code)]
pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// GET a path with an optional Bearer token, returning status and raw body.
#[allow(dead_code)]
pub async fn get_with_auth(
    app: &Router,
    path: &str,
    bearer: Option<&str>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
