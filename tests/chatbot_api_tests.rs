// SPDX-License-Identifier: MIT

//! Chatbot endpoint tests: branch routing and the never-errors contract.

mod common;

use axum::http::StatusCode;
use common::{create_test_app_with, get_with_auth, post_json, LlmScript};
use serde_json::json;
use weather_chatbot::services::chatbot::{EMPTY_COMPLETION_REPLY, GENERAL_FAILURE_REPLY};

#[tokio::test]
async fn test_weather_question_returns_formatted_snapshot() {
    let (app, _state) = create_test_app_with(LlmScript::WeatherCall("서울", "KR"), false);

    let (status, body) = post_json(
        &app,
        "/api/chatbot/question",
        json!({"question": "서울 날씨 어때?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answer = body["response"].as_str().unwrap();
    assert!(answer.contains("📍 서울의 현재 날씨"));
    assert!(answer.contains("습도: 62%"));
}

#[tokio::test]
async fn test_general_question_returns_completion_text() {
    let (app, _state) =
        create_test_app_with(LlmScript::Text(Some("김치찌개 어떠세요?")), false);

    let (status, body) = post_json(
        &app,
        "/api/chatbot/question",
        json!({"question": "오늘 점심 추천해줘"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "김치찌개 어떠세요?");
}

#[tokio::test]
async fn test_weather_keyword_but_model_declines() {
    let (app, _state) =
        create_test_app_with(LlmScript::Decline("그건 날씨 질문이 아니에요."), false);

    let (status, body) = post_json(
        &app,
        "/api/chatbot/question",
        json!({"question": "내 마음의 온도는?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "그건 날씨 질문이 아니에요.");
}

#[tokio::test]
async fn test_llm_failure_still_answers_200() {
    let (app, _state) = create_test_app_with(LlmScript::Fail, false);

    let (status, body) = post_json(
        &app,
        "/api/chatbot/question",
        json!({"question": "오늘 점심 추천해줘"}),
    )
    .await;

    // Internal failures never surface as HTTP errors here.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], GENERAL_FAILURE_REPLY);
}

#[tokio::test]
async fn test_empty_candidates_reply() {
    let (app, _state) = create_test_app_with(LlmScript::Text(None), false);

    let (status, body) = post_json(
        &app,
        "/api/chatbot/question",
        json!({"question": "오늘 점심 추천해줘"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], EMPTY_COMPLETION_REPLY);
}

#[tokio::test]
async fn test_chatbot_health() {
    let (app, _state) = create_test_app_with(LlmScript::Text(Some("ok")), false);

    let (status, body) = get_with_auth(&app, "/api/chatbot/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Chatbot service is running");
}
