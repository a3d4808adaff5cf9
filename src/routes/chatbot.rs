// SPDX-License-Identifier: MIT

//! Chatbot question route.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chatbot/question", post(ask_question))
        .route("/api/chatbot/health", get(chatbot_health))
}

#[derive(Deserialize)]
pub struct QuestionRequest {
    question: String,
}

#[derive(Serialize)]
pub struct QuestionResponse {
    response: String,
}

/// Ask the chatbot a question. Always answers 200; internal failures
/// come back as the router's fixed apology strings.
async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuestionRequest>,
) -> Json<QuestionResponse> {
    tracing::info!(question = %request.question, "Chatbot question received");
    let response = state.chat.answer(&request.question).await;
    Json(QuestionResponse { response })
}

async fn chatbot_health() -> &'static str {
    "Chatbot service is running"
}
