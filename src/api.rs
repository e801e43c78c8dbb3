//! Open-Meteo weather client

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error};

use crate::state::{Coordinates, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

/// Weather request failure. Never leaves the client; it is logged and
/// collapsed to `None`.
#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response missing {0}")]
    Incomplete(&'static str),
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
    daily: DailyForecast,
    hourly: Option<HourlyForecast>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: u8,
}

#[derive(Debug, Deserialize)]
struct DailyForecast {
    sunrise: Vec<i64>,
    sunset: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct HourlyForecast {
    temperature_2m: Vec<Option<f64>>,
}

/// Single-attempt client for the Open-Meteo forecast endpoint
#[derive(Clone, Debug)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly=temperature_2m\
             &current=temperature_2m,weather_code&daily=sunrise,sunset\
             &timezone=auto&timeformat=unixtime&forecast_days=1",
            self.base_url, lat, lon
        )
    }

    /// Fetch current weather. Any failure is logged and yields `None`.
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Option<WeatherSnapshot> {
        match self.fetch(lat, lon).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(error = %e, lat, lon, "Weather API error");
                None
            }
        }
    }

    async fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.forecast_url(lat, lon);
        debug!(%url, "requesting forecast");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }

        let body = response.text().await?;
        let data: ForecastResponse = serde_json::from_str(&body)?;
        snapshot_from_response(Coordinates::new(lat, lon), data)
    }
}

fn snapshot_from_response(
    coordinates: Coordinates,
    data: ForecastResponse,
) -> Result<WeatherSnapshot, WeatherError> {
    let sunrise = *data
        .daily
        .sunrise
        .first()
        .ok_or(WeatherError::Incomplete("daily sunrise"))?;
    let sunset = *data
        .daily
        .sunset
        .first()
        .ok_or(WeatherError::Incomplete("daily sunset"))?;

    let hourly: Vec<f64> = data
        .hourly
        .map(|h| h.temperature_2m.into_iter().flatten().collect())
        .unwrap_or_default();
    let high = hourly.iter().copied().reduce(f64::max);
    let low = hourly.iter().copied().reduce(f64::min);

    Ok(WeatherSnapshot {
        name: coordinates.label(),
        temperature: data.current.temperature_2m,
        weather_code: data.current.weather_code,
        description: weather_description(data.current.weather_code),
        sunrise,
        sunset,
        high,
        low,
    })
}

/// Convert WMO weather code to human-readable description
pub fn weather_description(code: u8) -> String {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
    .to_string()
}
