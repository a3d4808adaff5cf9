// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod chatbot;
pub mod gemini;
pub mod kakao;
pub mod session;
pub mod weather;

pub use chatbot::ChatService;
pub use gemini::{GeminiClient, LlmProvider, ToolOutcome, WeatherQuery};
pub use kakao::{IdentityProvider, KakaoClient, ProviderUserInfo};
pub use session::{SessionService, TokenPair};
pub use weather::{OpenWeatherClient, WeatherProvider, WeatherSnapshot};
