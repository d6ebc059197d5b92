//! User display preferences and their persistence
//!
//! [`Preferences`] is a plain value object handed to the formatting functions.
//! [`PreferenceStore`] is the only thing that reads or writes it to disk, along
//! with the list of recent searches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};
use crate::units::{DistanceUnit, PressureUnit, TemperatureUnit, WindUnit};

const PREFERENCES_KEY: &str = "preferences";
const RECENT_SEARCHES_KEY: &str = "recent_searches";

/// Maximum number of recent searches kept
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Clock style for sunrise/sunset times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "12h" => Some(Self::TwelveHour),
            "24h" => Some(Self::TwentyFourHour),
            _ => None,
        }
    }

    /// Parses a clock style, falling back to 24-hour for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwelveHour => "12h",
            Self::TwentyFourHour => "24h",
        }
    }
}

/// Region, which only affects how times are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Region {
    #[default]
    Auto,
    Us,
    Eu,
    Asia,
}

impl Region {
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "us" => Some(Self::Us),
            "eu" => Some(Self::Eu),
            "asia" => Some(Self::Asia),
            _ => None,
        }
    }

    /// Parses a region, falling back to auto for unrecognized input.
    pub fn parse_lenient(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Us => "us",
            Self::Eu => "eu",
            Self::Asia => "asia",
        }
    }
}

impl From<String> for TimeFormat {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl From<String> for Region {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

/// Unit and display choices for rendering an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub temperature_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
    pub pressure_unit: PressureUnit,
    pub distance_unit: DistanceUnit,
    pub time_format: TimeFormat,
    pub region: Region,
}

/// Errors from updating a preference by name
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The preference name is not one of the known keys
    #[error("Unknown preference '{0}'. Valid keys: {}", Preferences::KEYS.join(", "))]
    UnknownKey(String),

    /// The value is not valid for the preference
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Preferences {
    /// Names accepted by [`Preferences::set`]
    pub const KEYS: [&'static str; 6] = [
        "temperature_unit",
        "wind_unit",
        "pressure_unit",
        "distance_unit",
        "time_format",
        "region",
    ];

    /// Returns a copy with the named preference changed.
    ///
    /// Unlike the lenient unit parsing used when reading stored values, an
    /// explicit update rejects values it does not recognize.
    pub fn set(self, key: &str, value: &str) -> Result<Self, PreferenceError> {
        let invalid = || PreferenceError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let mut updated = self;
        match key {
            "temperature_unit" => {
                updated.temperature_unit = TemperatureUnit::try_parse(value).ok_or_else(invalid)?
            }
            "wind_unit" => updated.wind_unit = WindUnit::try_parse(value).ok_or_else(invalid)?,
            "pressure_unit" => {
                updated.pressure_unit = PressureUnit::try_parse(value).ok_or_else(invalid)?
            }
            "distance_unit" => {
                updated.distance_unit = DistanceUnit::try_parse(value).ok_or_else(invalid)?
            }
            "time_format" => updated.time_format = TimeFormat::try_parse(value).ok_or_else(invalid)?,
            "region" => updated.region = Region::try_parse(value).ok_or_else(invalid)?,
            _ => return Err(PreferenceError::UnknownKey(key.to_string())),
        }
        Ok(updated)
    }

    /// Key/value pairs in display order
    pub fn entries(&self) -> [(&'static str, &'static str); 6] {
        [
            ("temperature_unit", self.temperature_unit.as_str()),
            ("wind_unit", self.wind_unit.as_str()),
            ("pressure_unit", self.pressure_unit.as_str()),
            ("distance_unit", self.distance_unit.as_str()),
            ("time_format", self.time_format.as_str()),
            ("region", self.region.as_str()),
        ]
    }
}

/// Loads and saves [`Preferences`] and recent searches
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    store: KeyValueStore,
}

impl PreferenceStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    /// Loads preferences, using defaults when none are stored or the stored
    /// document is unreadable
    pub fn load(&self) -> Preferences {
        match self.store.read::<Preferences>(PREFERENCES_KEY) {
            Ok(Some(stored)) => stored.value,
            Ok(None) => Preferences::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable preferences");
                Preferences::default()
            }
        }
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), StorageError> {
        self.store.write(PREFERENCES_KEY, preferences)
    }

    /// Updates one preference by name and persists the result
    pub fn update(&self, key: &str, value: &str) -> Result<Preferences, PreferenceError> {
        let updated = self.load().set(key, value)?;
        self.save(&updated)?;
        Ok(updated)
    }

    /// Restores defaults and clears recent searches
    pub fn reset(&self) -> Result<Preferences, StorageError> {
        let defaults = Preferences::default();
        self.save(&defaults)?;
        self.store.remove(RECENT_SEARCHES_KEY)?;
        Ok(defaults)
    }

    /// Recent searches, most recent first
    pub fn recent_searches(&self) -> Vec<String> {
        match self.store.read::<Vec<String>>(RECENT_SEARCHES_KEY) {
            Ok(Some(stored)) => stored.value,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable recent searches");
                Vec::new()
            }
        }
    }

    /// Records a search at the front of the list.
    ///
    /// An existing identical entry is moved rather than duplicated, and the list
    /// is capped at [`MAX_RECENT_SEARCHES`].
    pub fn record_search(&self, query: &str) -> Result<Vec<String>, StorageError> {
        let mut searches = self.recent_searches();
        searches.retain(|existing| existing != query);
        searches.insert(0, query.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);

        self.store.write(RECENT_SEARCHES_KEY, &searches)?;
        Ok(searches)
    }
}
