// SPDX-License-Identifier: MIT

//! Question router for the chatbot endpoint.
//!
//! Classifies questions with a keyword heuristic, drives the two-step
//! function-calling exchange on the weather branch, and converts every
//! internal failure into a fixed user-facing string. Callers never see an
//! error from this module.

use crate::error::AppError;
use crate::services::gemini::{LlmProvider, ToolOutcome, WeatherQuery};
use crate::services::weather::{format_weather, WeatherProvider};
use std::sync::Arc;

/// Weather keywords; substring match, case-insensitive. A heuristic, not
/// NLP - the LLM's own judgement overrides it on the weather branch.
const WEATHER_KEYWORDS: &[&str] = &["날씨", "weather", "기온", "온도"];

/// Reply when anything fails on the general branch.
pub const GENERAL_FAILURE_REPLY: &str =
    "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Reply when the weather branch fails before a function call is made.
pub const WEATHER_FAILURE_REPLY: &str =
    "날씨 정보를 가져오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Reply when the requested city's weather cannot be fetched.
pub const CITY_LOOKUP_FAILURE_REPLY: &str = "죄송합니다. 해당 도시의 날씨 정보를 가져올 수 없습니다.";

/// Reply when the model returns no candidates.
pub const EMPTY_COMPLETION_REPLY: &str = "죄송합니다. 응답을 생성할 수 없습니다.";

/// Routes chatbot questions to the weather or general branch.
#[derive(Clone)]
pub struct ChatService {
    llm: Arc<dyn LlmProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { llm, weather }
    }

    /// Answer a question. Infallible by design: a conversational endpoint
    /// should never show the user a raw error.
    pub async fn answer(&self, question: &str) -> String {
        if is_weather_question(question) {
            self.answer_weather_question(question).await
        } else {
            match self.general_completion(question).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "General completion failed");
                    GENERAL_FAILURE_REPLY.to_string()
                }
            }
        }
    }

    /// Weather branch: declare the weather tool and let the model decide.
    /// A plain-text reply means the model judged the question non-weather
    /// after all, so it falls through to the general branch.
    async fn answer_weather_question(&self, question: &str) -> String {
        match self.llm.complete_with_weather_tool(question).await {
            Ok(ToolOutcome::WeatherCall(query)) => match self.lookup_weather(&query).await {
                Ok(formatted) => formatted,
                Err(e) => {
                    tracing::error!(error = %e, city = %query.city, "Weather lookup failed");
                    CITY_LOOKUP_FAILURE_REPLY.to_string()
                }
            },
            Ok(ToolOutcome::Text(_)) => {
                tracing::debug!("Model declined the weather tool, using general branch");
                match self.general_completion(question).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "General fallback failed");
                        WEATHER_FAILURE_REPLY.to_string()
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Function-calling request failed");
                WEATHER_FAILURE_REPLY.to_string()
            }
        }
    }

    async fn lookup_weather(&self, query: &WeatherQuery) -> Result<String, AppError> {
        let snapshot = self
            .weather
            .current_weather(&query.city, &query.country_code)
            .await?;
        Ok(format_weather(&snapshot))
    }

    async fn general_completion(&self, question: &str) -> Result<String, AppError> {
        let text = self.llm.complete(question).await?;
        Ok(text.unwrap_or_else(|| {
            tracing::warn!("Model returned no candidates");
            EMPTY_COMPLETION_REPLY.to_string()
        }))
    }
}

/// Case-insensitive substring match against the fixed keyword set.
fn is_weather_question(question: &str) -> bool {
    let lowered = question.to_lowercase();
    WEATHER_KEYWORDS.iter().any(|k| lowered.contains(k))
}
