//! Current weather API client
//!
//! Fetches current conditions from an OpenWeatherMap-compatible endpoint and
//! parses the response into an [`Observation`].

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::{LocationQuery, Observation, WeatherMain};

/// Default current-weather endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The provider does not know the requested city
    #[error("City not found: '{0}'. Please check the spelling and try again.")]
    CityNotFound(String),

    /// The provider rejected the API key
    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    /// Any other non-success status
    #[error("Weather API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Client for the current-weather endpoint
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_WEATHER_URL.to_string(),
        }
    }

    /// Use a different endpoint, e.g. a proxy or a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current weather for a city name or a coordinate pair
    ///
    /// # Returns
    /// * `Ok(Observation)` - Current conditions in metric units
    /// * `Err(WeatherError::CityNotFound)` - The provider answered 404
    /// * `Err(WeatherError::InvalidApiKey)` - The provider answered 401
    /// * `Err(WeatherError)` - Any other request or parsing failure
    pub async fn fetch(&self, query: &LocationQuery) -> Result<Observation, WeatherError> {
        let (location, label) = match query {
            LocationQuery::City {
                name,
                country,
                state,
            } => {
                let q = super::qualified_query(name, country.as_deref(), state.as_deref());
                (format!("q={}", urlencoding::encode(&q)), q)
            }
            LocationQuery::Coordinates { lat, lon } => {
                (format!("lat={}&lon={}", lat, lon), format!("{}, {}", lat, lon))
            }
        };

        let url = format!(
            "{}?{}&appid={}&units=metric",
            self.base_url,
            location,
            urlencoding::encode(&self.api_key)
        );
        tracing::debug!(location = %label, "fetching current weather");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(label)),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidApiKey),
            status => return Err(WeatherError::Api { status, body: text }),
        }

        let api_response: CurrentWeatherResponse = serde_json::from_str(&text)?;
        parse_response(api_response)
    }
}

/// Convert the provider's response into an Observation
fn parse_response(response: CurrentWeatherResponse) -> Result<Observation, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MissingField("weather[0]".to_string()))?;
    let wind = response.wind.unwrap_or_default();

    Ok(Observation {
        city: response.name,
        country: response.sys.country.unwrap_or_default(),
        latitude: response.coord.lat,
        longitude: response.coord.lon,
        temperature: response.main.temp,
        temp_min: response.main.temp_min,
        temp_max: response.main.temp_max,
        humidity: response.main.humidity.clamp(0.0, 100.0).round() as u8,
        pressure: response.main.pressure,
        // Reported in metres
        visibility: response.visibility.unwrap_or(0.0) / 1000.0,
        cloudiness: response
            .clouds
            .map(|c| c.all.clamp(0.0, 100.0).round() as u8)
            .unwrap_or(0),
        wind_speed: wind.speed,
        wind_deg: wind.deg,
        sunrise: response.sys.sunrise,
        sunset: response.sys.sunset,
        timezone: response.timezone,
        description: condition.description,
        main: WeatherMain::from_label(&condition.main),
    })
}

/// Current weather response structure
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    coord: Coord,
    main: MainReadings,
    weather: Vec<ConditionEntry>,
    wind: Option<Wind>,
    visibility: Option<f64>,
    clouds: Option<Clouds>,
    sys: Sys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct Coord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
    description: String,
    #[allow(dead_code)]
    icon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct Clouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct Sys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}
