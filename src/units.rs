//! Unit conversion and display formatting
//!
//! Observations are always stored in canonical metric units (Celsius, m/s, hPa, km).
//! This module converts those values into the unit a user has chosen and renders
//! them with the matching symbol. Every unit enum parses leniently: an unknown
//! string yields the canonical unit instead of an error.

use serde::{Deserialize, Serialize};

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Parses a unit name, returning `None` for unrecognized input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "celsius" => Some(Self::Celsius),
            "fahrenheit" => Some(Self::Fahrenheit),
            "kelvin" => Some(Self::Kelvin),
            _ => None,
        }
    }

    /// Parses a unit name, falling back to Celsius for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Returns the name used in the preference store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
            Self::Kelvin => "kelvin",
        }
    }

    /// Converts a Celsius value into this unit
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

impl From<String> for TemperatureUnit {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WindUnit {
    /// Kilometres per hour
    #[default]
    Kmh,
    /// Miles per hour
    Mph,
    /// Metres per second (canonical)
    Ms,
    Knots,
}

impl WindUnit {
    /// Parses a unit name, returning `None` for unrecognized input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kmh" => Some(Self::Kmh),
            "mph" => Some(Self::Mph),
            "ms" => Some(Self::Ms),
            "knots" => Some(Self::Knots),
            _ => None,
        }
    }

    /// Parses a unit name, falling back to metres per second for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or(Self::Ms)
    }

    /// Returns the name used in the preference store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kmh => "kmh",
            Self::Mph => "mph",
            Self::Ms => "ms",
            Self::Knots => "knots",
        }
    }

    /// Converts a speed in m/s into this unit
    pub fn convert(self, ms: f64) -> f64 {
        match self {
            Self::Kmh => ms * 3.6,
            Self::Mph => ms * 2.237,
            Self::Ms => ms,
            Self::Knots => ms * 1.944,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Mph => "mph",
            Self::Ms => "m/s",
            Self::Knots => "knots",
        }
    }
}

impl From<String> for WindUnit {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// Pressure display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PressureUnit {
    #[default]
    Hpa,
    Mbar,
    Mmhg,
    Inhg,
}

impl PressureUnit {
    /// Parses a unit name, returning `None` for unrecognized input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hpa" => Some(Self::Hpa),
            "mbar" => Some(Self::Mbar),
            "mmhg" => Some(Self::Mmhg),
            "inhg" => Some(Self::Inhg),
            _ => None,
        }
    }

    /// Parses a unit name, falling back to hPa for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Returns the name used in the preference store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hpa => "hpa",
            Self::Mbar => "mbar",
            Self::Mmhg => "mmhg",
            Self::Inhg => "inhg",
        }
    }

    /// Converts a pressure in hPa into this unit
    pub fn convert(self, hpa: f64) -> f64 {
        match self {
            // hPa and mbar are the same quantity
            Self::Hpa | Self::Mbar => hpa,
            Self::Mmhg => hpa * 0.750062,
            Self::Inhg => hpa * 0.0295301,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Hpa => "hPa",
            Self::Mbar => "mbar",
            Self::Mmhg => "mmHg",
            Self::Inhg => "inHg",
        }
    }
}

impl From<String> for PressureUnit {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// Distance display unit, used for visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
    Meters,
}

impl DistanceUnit {
    /// Parses a unit name, returning `None` for unrecognized input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "km" => Some(Self::Km),
            "miles" => Some(Self::Miles),
            "meters" => Some(Self::Meters),
            _ => None,
        }
    }

    /// Parses a unit name, falling back to kilometres for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Returns the name used in the preference store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Km => "km",
            Self::Miles => "miles",
            Self::Meters => "meters",
        }
    }

    /// Converts a distance in km into this unit
    pub fn convert(self, km: f64) -> f64 {
        match self {
            Self::Km => km,
            Self::Miles => km * 0.621371,
            Self::Meters => km * 1000.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Km => "km",
            Self::Miles => "mi",
            Self::Meters => "m",
        }
    }
}

impl From<String> for DistanceUnit {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// Rounds to the nearest integer with halves going toward positive infinity.
///
/// Going through `i64` also means a value such as -0.2 renders as "0", never "-0".
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Rounds to one decimal place with halves going up, so 0.25 becomes 0.3.
///
/// `{:.1}` alone rounds exact ties to even.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Formats a Celsius temperature in the given unit, e.g. `"68°F"`.
///
/// The value is rounded to a whole number and the symbol follows it without a space.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", round_half_up(unit.convert(celsius)), unit.symbol())
}

/// Formats a wind speed in m/s with one decimal place, e.g. `"36.0 km/h"`.
pub fn format_wind_speed(ms: f64, unit: WindUnit) -> String {
    format!("{:.1} {}", round_one_decimal(unit.convert(ms)), unit.symbol())
}

/// Formats a pressure in hPa as a whole number, e.g. `"1013 hPa"`.
pub fn format_pressure(hpa: f64, unit: PressureUnit) -> String {
    format!("{} {}", round_half_up(unit.convert(hpa)), unit.symbol())
}

/// Formats a distance in km.
///
/// Kilometres and miles keep one decimal place; meters are rounded to a whole number.
pub fn format_distance(km: f64, unit: DistanceUnit) -> String {
    let converted = unit.convert(km);
    match unit {
        DistanceUnit::Meters => format!("{} {}", round_half_up(converted), unit.symbol()),
        DistanceUnit::Km | DistanceUnit::Miles => {
            format!("{:.1} {}", round_one_decimal(converted), unit.symbol())
        }
    }
}
