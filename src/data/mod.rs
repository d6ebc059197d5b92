//! Core data models for Skyview
//!
//! This module contains the observation record every formatter works from, the
//! provider's condition groups, and the HTTP clients that produce them.

pub mod geocode;
pub mod weather;

pub use geocode::{CitySuggestion, GeocodeClient};
pub use weather::{WeatherClient, WeatherError};

use serde::{Deserialize, Serialize};

/// Condition group reported by the provider alongside the free-text description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum WeatherMain {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, smoke, haze, dust, fog, sand and ash
    Fog,
    Squall,
    Tornado,
    Other,
}

impl WeatherMain {
    /// Maps the provider's group label, case-insensitively
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "clear" => Self::Clear,
            "clouds" => Self::Clouds,
            "rain" => Self::Rain,
            "drizzle" => Self::Drizzle,
            "thunderstorm" => Self::Thunderstorm,
            "snow" => Self::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" => Self::Fog,
            "squall" => Self::Squall,
            "tornado" => Self::Tornado,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Fog => "Fog",
            Self::Squall => "Squall",
            Self::Tornado => "Tornado",
            Self::Other => "Other",
        }
    }
}

impl From<String> for WeatherMain {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

/// A snapshot of current weather at one location, in canonical metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// City name as reported by the provider
    pub city: String,
    /// ISO 3166 country code
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Current temperature in Celsius
    pub temperature: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Sea-level pressure in hPa
    pub pressure: f64,
    /// Visibility in km
    pub visibility: f64,
    /// Cloud coverage percentage (0-100)
    pub cloudiness: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind bearing in degrees
    pub wind_deg: f64,
    /// Sunrise as epoch seconds
    pub sunrise: i64,
    /// Sunset as epoch seconds
    pub sunset: i64,
    /// Offset from UTC in seconds
    pub timezone: i32,
    /// Free-text description, e.g. "light rain"
    pub description: String,
    pub main: WeatherMain,
}

/// What the user asked to look up
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// A city name, optionally narrowed by country and state ISO codes
    City {
        name: String,
        country: Option<String>,
        state: Option<String>,
    },
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City {
            name: name.into(),
            country: None,
            state: None,
        }
    }
}

/// Joins a city name with optional country and state codes the way the
/// provider expects: `"Springfield,US,IL"`
pub fn qualified_query(name: &str, country: Option<&str>, state: Option<&str>) -> String {
    let mut query = name.trim().to_string();
    if let Some(country) = country {
        query.push(',');
        query.push_str(country);
    }
    if let Some(state) = state {
        query.push(',');
        query.push_str(state);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_main_from_label() {
        assert_eq!(WeatherMain::from_label("Rain"), WeatherMain::Rain);
        assert_eq!(WeatherMain::from_label("clouds"), WeatherMain::Clouds);
        assert_eq!(WeatherMain::from_label("Haze"), WeatherMain::Fog);
        assert_eq!(WeatherMain::from_label("Mist"), WeatherMain::Fog);
        assert_eq!(WeatherMain::from_label("Meteor"), WeatherMain::Other);
    }

    #[test]
    fn test_weather_main_deserializes_from_label() {
        let main: WeatherMain = serde_json::from_str("\"Thunderstorm\"").unwrap();
        assert_eq!(main, WeatherMain::Thunderstorm);
    }

    #[test]
    fn test_qualified_query() {
        assert_eq!(qualified_query(" London ", None, None), "London");
        assert_eq!(qualified_query("London", Some("GB"), None), "London,GB");
        assert_eq!(
            qualified_query("Springfield", Some("US"), Some("IL")),
            "Springfield,US,IL"
        );
    }

    #[test]
    fn test_observation_serialization_roundtrip() {
        let observation = Observation {
            city: "London".to_string(),
            country: "GB".to_string(),
            latitude: 51.5074,
            longitude: -0.1276,
            temperature: 15.5,
            temp_min: 12.0,
            temp_max: 18.0,
            humidity: 65,
            pressure: 1013.0,
            visibility: 10.0,
            cloudiness: 20,
            wind_speed: 3.2,
            wind_deg: 180.0,
            sunrise: 1_721_016_000,
            sunset: 1_721_073_600,
            timezone: 3600,
            description: "clear sky".to_string(),
            main: WeatherMain::Clear,
        };

        let json = serde_json::to_string(&observation).expect("Failed to serialize");
        let deserialized: Observation = serde_json::from_str(&json).expect("Failed to deserialize");

        assert_eq!(deserialized, observation);
    }
}
