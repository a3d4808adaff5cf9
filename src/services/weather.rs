// SPDX-License-Identifier: MIT

//! OpenWeather client and weather text formatting.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Fixed reply when the snapshot is missing required fields.
pub const WEATHER_UNAVAILABLE: &str = "날씨 정보를 가져올 수 없습니다.";

/// Current-weather lookup seam, injected into the question router.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current weather for a city. Fails with
    /// `AppError::WeatherUnavailable` on an empty or error response.
    async fn current_weather(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<WeatherSnapshot, AppError>;
}

/// Current weather as returned by OpenWeather. The readings sections are
/// optional so formatting can detect missing data without erroring.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherSnapshot {
    /// Location name
    #[serde(default)]
    pub name: String,
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

/// Format a snapshot into the fixed display template. Pure; returns the
/// unavailable string instead of erroring when fields are missing.
pub fn format_weather(snapshot: &WeatherSnapshot) -> String {
    let (main, condition) = match (&snapshot.main, snapshot.weather.first()) {
        (Some(main), Some(condition)) => (main, condition),
        _ => return WEATHER_UNAVAILABLE.to_string(),
    };

    format!(
        "📍 {}의 현재 날씨\n\
         🌡️ 기온: {:.1}°C (체감온도: {:.1}°C)\n\
         🌤️ 날씨: {}\n\
         💧 습도: {}%\n\
         🌪️ 기압: {} hPa\n\
         📊 최저/최고: {:.1}°C / {:.1}°C",
        snapshot.name,
        main.temp,
        main.feels_like,
        condition.description,
        main.humidity,
        main.pressure,
        main.temp_min,
        main.temp_max,
    )
}

/// OpenWeather current-weather API client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenWeatherClient {
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
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<WeatherSnapshot, AppError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("q", format!("{},{}", city, country_code).as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "kr"),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("OpenWeather request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!(
                "OpenWeather HTTP {}: {}",
                status, body
            )));
        }

        let snapshot: WeatherSnapshot = response.json().await.map_err(|e| {
            AppError::WeatherUnavailable(format!("OpenWeather JSON parse error: {}", e))
        })?;

        tracing::debug!(city, country_code, location = %snapshot.name, "Weather fetched");
        Ok(snapshot)
    }
}
