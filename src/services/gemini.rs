// SPDX-License-Identifier: MIT

//! Gemini generateContent client.
//!
//! Two request shapes: a plain single-turn completion, and a
//! function-calling completion that declares one weather tool and may come
//! back with structured `{city, countryCode}` arguments instead of text.

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// LLM completion seam, injected into the question router.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Plain completion. `None` means the model returned no candidates
    /// (not an error).
    async fn complete(&self, question: &str) -> Result<Option<String>, AppError>;

    /// Function-calling completion with the weather tool declared.
    async fn complete_with_weather_tool(&self, question: &str) -> Result<ToolOutcome, AppError>;
}

/// What the model chose to do with the weather tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The model requested a weather lookup with these arguments.
    WeatherCall(WeatherQuery),
    /// The model answered in plain text instead of calling the tool.
    Text(Option<String>),
}

/// Structured arguments of a `get_current_weather` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub city: String,
    pub country_code: String,
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("failed to build HTTP client"),
            api_url,
            api_key,
        }
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::LlmUnavailable(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::LlmUnavailable(format!(
                "Gemini HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LlmUnavailable(format!("Gemini JSON parse error: {}", e)))
    }

    /// Tool declaration for the weather lookup.
    fn weather_tool() -> Tool {
        Tool {
            function_declarations: vec![FunctionDeclaration {
                name: "get_current_weather".to_string(),
                description: "특정 도시의 현재 날씨 정보를 가져옵니다.".to_string(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "city": {
                            "type": "string",
                            "description": "도시 이름 (예: 서울, 부산)"
                        },
                        "countryCode": {
                            "type": "string",
                            "description": "국가 코드 (예: KR, US)"
                        }
                    },
                    "required": ["city", "countryCode"]
                }),
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn complete(&self, question: &str) -> Result<Option<String>, AppError> {
        let request = GenerateRequest::plain(question);
        let response = self.generate(&request).await?;
        Ok(response.first_candidate_text())
    }

    async fn complete_with_weather_tool(&self, question: &str) -> Result<ToolOutcome, AppError> {
        let request = GenerateRequest::with_tool(question, Self::weather_tool());
        let response = self.generate(&request).await?;

        // Only the first candidate is inspected; a function-call part wins
        // over any text parts alongside it.
        if let Some(candidate) = response.candidates.first() {
            if let Some(content) = &candidate.content {
                for part in &content.parts {
                    if let Some(call) = &part.function_call {
                        tracing::debug!(
                            name = %call.name,
                            city = %call.args.city,
                            country_code = %call.args.country_code,
                            "Gemini requested a function call"
                        );
                        return Ok(ToolOutcome::WeatherCall(WeatherQuery {
                            city: call.args.city.clone(),
                            country_code: call.args.country_code.clone(),
                        }));
                    }
                }
            }
        }

        Ok(ToolOutcome::Text(response.first_candidate_text()))
    }
}

// ─── Wire format (camelCase JSON) ────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

impl GenerateRequest {
    fn plain(question: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: question.to_string(),
                }],
            }],
            tools: None,
        }
    }

    fn with_tool(question: &str, tool: Tool) -> Self {
        Self {
            tools: Some(vec![tool]),
            ..Self::plain(question)
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if any.
    fn first_candidate_text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    text: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    args: FunctionArgs,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionArgs {
    city: String,
    country_code: String,
}
