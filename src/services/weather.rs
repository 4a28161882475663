//! # Weather Service
//!
//! Current-temperature lookups by city name. Lookups never fail loudly: any
//! transport error, non-200 status or unexpected body is logged and reported
//! as "no data", which handlers turn into a 404.
//!
//! ## Implementations
//!
//! - [`OpenWeatherClient`] - OpenWeatherMap "current weather" endpoint, metric units
//! - [`OfflineWeather`] - Used when no API key is configured; never has data

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::utils::constant::WEATHER_REQUEST_TIMEOUT;

/// Trait for temperature providers
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Returns the current temperature in °C, or `None` when unavailable.
    async fn current_temperature(&self, city: &str) -> Option<f64>;
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

/// OpenWeatherMap client
#[derive(Debug)]
pub struct OpenWeatherClient {
    api_url: String,
    api_key: SecretString,
    http_client: reqwest::Client,
}

impl OpenWeatherClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full URL of the current-weather endpoint
    /// * `api_key` - OpenWeatherMap `appid`
    pub fn new(api_url: String, api_key: SecretString) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(WEATHER_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build weather HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            api_url,
            api_key,
            http_client,
        }
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[("q", city), ("appid", self.api_key.expose_secret()), ("units", "metric")])
            .send()
            .await;

        let response = match response {
            Ok(res) if res.status() == reqwest::StatusCode::OK => res,
            Ok(res) => {
                warn!(status = %res.status(), "Unable to fetch weather data");
                return None;
            }
            Err(e) => {
                error!(error = %e, "Error fetching weather data");
                return None;
            }
        };

        match response.json::<CurrentWeather>().await {
            Ok(weather) => {
                debug!(temperature = weather.main.temp, "Weather data received");
                Some(weather.main.temp)
            }
            Err(e) => {
                error!(error = %e, "Unexpected weather API response body");
                None
            }
        }
    }
}

/// Weather provider used when no API key is configured
pub struct OfflineWeather;

#[async_trait]
impl WeatherService for OfflineWeather {
    async fn current_temperature(&self, city: &str) -> Option<f64> {
        warn!(%city, "Weather lookup skipped: no weather API configured");
        None
    }
}
