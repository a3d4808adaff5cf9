// SPDX-License-Identifier: MIT

//! Weather-Chatbot API Server
//!
//! Authenticates users via Kakao OAuth, issues first-party session tokens,
//! and answers chatbot questions through Gemini with live OpenWeather data.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_chatbot::{
    config::Config,
    db::PgStore,
    services::{ChatService, GeminiClient, KakaoClient, OpenWeatherClient, SessionService},
    token::TokenCodec,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Weather-Chatbot API");

    // Initialize Postgres and run migrations
    let store = PgStore::connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");
    store.migrate().await.expect("Failed to run migrations");

    let codec = TokenCodec::new(&config.jwt_signing_key);

    // Session manager over the Postgres store and the Kakao client
    let store = Arc::new(store);
    let session = SessionService::new(
        store.clone(),
        store,
        Arc::new(KakaoClient::new(config.kakao_user_info_url.clone())),
        codec.clone(),
    );

    // Question router over the Gemini and OpenWeather clients
    let chat = ChatService::new(
        Arc::new(GeminiClient::new(
            config.gemini_api_url.clone(),
            config.gemini_api_key.clone(),
        )),
        Arc::new(OpenWeatherClient::new(
            config.openweather_api_url.clone(),
            config.openweather_api_key.clone(),
        )),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        codec,
        session,
        chat,
    });

    // Build router
    let app = weather_chatbot::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("weather_chatbot=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
