//! Application configuration loaded from environment variables.
//!
//! Secrets (JWT signing key, provider API keys) are read once at startup
//! and held in memory; nothing re-reads the environment after that.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Postgres connection string
    pub database_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Kakao user-info endpoint
    pub kakao_user_info_url: String,
    /// Gemini API key
    pub gemini_api_key: String,
    /// Gemini generateContent endpoint
    pub gemini_api_url: String,
    /// OpenWeather API key
    pub openweather_api_key: String,
    /// OpenWeather current-weather endpoint
    pub openweather_api_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            database_url: "postgres://localhost/weather_chatbot_test".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!!".to_vec(),
            kakao_user_info_url: "https://kapi.kakao.com/v2/user/me".to_string(),
            gemini_api_key: "test_gemini_key".to_string(),
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent".to_string(),
            openweather_api_key: "test_openweather_key".to_string(),
            openweather_api_url: "https://api.openweathermap.org/data/2.5/weather".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// URL fields default to the real provider endpoints; keys and the
    /// database URL are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            kakao_user_info_url: env::var("KAKAO_USER_INFO_URL")
                .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
                    .to_string()
            }),
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("OPENWEATHER_API_KEY"))?,
            openweather_api_url: env::var("OPENWEATHER_API_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/test");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!!");
        env::set_var("GEMINI_API_KEY", "gk");
        env::set_var("OPENWEATHER_API_KEY", "wk");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.database_url, "postgres://localhost/test");
        assert_eq!(config.gemini_api_key, "gk");
        assert_eq!(config.port, 8080);
        assert!(config.gemini_api_url.contains("generativelanguage"));
    }
}
