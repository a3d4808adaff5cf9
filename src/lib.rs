// SPDX-License-Identifier: MIT

//! Weather-Chatbot: Kakao-login chatbot backend.
//!
//! This crate provides the backend API for Kakao OAuth session management
//! and an LLM-backed chatbot that answers weather questions with live
//! OpenWeather data via Gemini function calling.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod token;

use config::Config;
use services::{ChatService, SessionService};
use token::TokenCodec;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub codec: TokenCodec,
    pub session: SessionService,
    pub chat: ChatService,
}
