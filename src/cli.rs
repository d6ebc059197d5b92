//! Command-line interface parsing for Skyview
//!
//! This module handles parsing of CLI arguments using clap and turns the raw
//! arguments into location queries and one-shot preference overrides.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;

use crate::data::geocode::DEFAULT_GEO_URL;
use crate::data::weather::DEFAULT_WEATHER_URL;
use crate::data::LocationQuery;
use crate::preferences::{Preferences, TimeFormat};
use crate::units::{DistanceUnit, PressureUnit, TemperatureUnit, WindUnit};

/// Fallback environment variable for the API key
pub const FALLBACK_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key was given on the command line or in the environment
    #[error("No API key configured. Set SKYVIEW_API_KEY or pass --api-key")]
    MissingApiKey,

    /// Latitude or longitude out of range
    #[error("Invalid coordinates: lat {lat}, lon {lon}. Latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// Both city names and coordinates were given
    #[error("Give either city names or --lat/--lon, not both")]
    ConflictingLocation,

    /// Nothing to look up and no recent search to fall back to
    #[error("No location given and no recent searches. Try: skyview weather London")]
    NoLocation,
}

/// Skyview - current weather for any city, in your units
#[derive(Parser, Debug)]
#[command(name = "skyview")]
#[command(about = "Current weather lookup with unit preferences, condition icons and advice")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding preferences, recent searches and accounts
    #[arg(long, global = true, env = "SKYVIEW_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Weather API key
    #[arg(long, global = true, env = "SKYVIEW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Current weather endpoint
    #[arg(long, global = true, env = "SKYVIEW_API_URL", default_value = DEFAULT_WEATHER_URL)]
    pub api_url: String,

    /// Direct geocoding endpoint used for suggestions
    #[arg(long, global = true, env = "SKYVIEW_GEO_URL", default_value = DEFAULT_GEO_URL)]
    pub geo_url: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The API key from `--api-key`/`SKYVIEW_API_KEY`, else `OPENWEATHER_API_KEY`
    pub fn resolved_api_key(&self) -> Result<String, CliError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(FALLBACK_API_KEY_VAR).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingApiKey)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show current weather for one or more cities, or for coordinates
    ///
    /// Examples:
    ///   skyview weather London
    ///   skyview weather Paris Tokyo --temp-unit fahrenheit
    ///   skyview weather Springfield --country US --state IL
    ///   skyview weather --lat 51.5 --lon -0.12
    ///
    /// With no location, the most recent search is repeated.
    Weather(WeatherArgs),

    /// Suggest matching city names
    Suggest {
        /// Partial city name (at least two characters)
        query: String,
        /// ISO 3166 country code to narrow the search
        #[arg(long)]
        country: Option<String>,
        /// State or province code to narrow the search
        #[arg(long)]
        state: Option<String>,
    },

    /// Show or change saved preferences
    #[command(subcommand)]
    Prefs(PrefsAction),

    /// List recent searches
    Recent,

    /// Create a local account and sign in
    Signup {
        name: String,
        email: String,
        password: String,
    },

    /// Sign in to a local account
    Login { email: String, password: String },

    /// Sign out
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Edit the signed-in account's profile
    Profile {
        /// New display name
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PrefsAction {
    /// Print all preferences
    Show,
    /// Change one preference, e.g. `skyview prefs set wind_unit knots`
    Set { key: String, value: String },
    /// Restore defaults and clear recent searches
    Reset,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WeatherArgs {
    /// City names to look up
    pub cities: Vec<String>,

    /// Latitude, used together with --lon
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude, used together with --lat
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// ISO 3166 country code appended to every city
    #[arg(long)]
    pub country: Option<String>,

    /// State or province code appended to every city
    #[arg(long)]
    pub state: Option<String>,

    /// Temperature unit for this lookup only
    #[arg(long, value_parser = ["celsius", "fahrenheit", "kelvin"])]
    pub temp_unit: Option<String>,

    /// Wind speed unit for this lookup only
    #[arg(long, value_parser = ["kmh", "mph", "ms", "knots"])]
    pub wind_unit: Option<String>,

    /// Pressure unit for this lookup only
    #[arg(long, value_parser = ["hpa", "mbar", "mmhg", "inhg"])]
    pub pressure_unit: Option<String>,

    /// Distance unit for this lookup only
    #[arg(long, value_parser = ["km", "miles", "meters"])]
    pub distance_unit: Option<String>,

    /// Clock style for this lookup only
    #[arg(long, value_parser = ["12h", "24h"])]
    pub time_format: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl WeatherArgs {
    /// Converts the arguments into location queries.
    ///
    /// # Returns
    /// * `Ok(vec![])` when neither cities nor coordinates were given
    /// * `Ok(queries)` in the order the cities were given
    /// * `Err(CliError)` for out-of-range or conflicting locations
    pub fn queries(&self) -> Result<Vec<LocationQuery>, CliError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                if !self.cities.is_empty() {
                    return Err(CliError::ConflictingLocation);
                }
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    return Err(CliError::InvalidCoordinates { lat, lon });
                }
                Ok(vec![LocationQuery::Coordinates { lat, lon }])
            }
            _ => Ok(self
                .cities
                .iter()
                .filter(|name| !name.trim().is_empty())
                .map(|name| LocationQuery::City {
                    name: name.trim().to_string(),
                    country: self.country.clone(),
                    state: self.state.clone(),
                })
                .collect()),
        }
    }

    /// Applies the one-shot unit flags on top of saved preferences
    pub fn apply_overrides(&self, preferences: Preferences) -> Preferences {
        let mut updated = preferences;
        if let Some(unit) = &self.temp_unit {
            updated.temperature_unit = TemperatureUnit::parse_lenient(unit);
        }
        if let Some(unit) = &self.wind_unit {
            updated.wind_unit = WindUnit::parse_lenient(unit);
        }
        if let Some(unit) = &self.pressure_unit {
            updated.pressure_unit = PressureUnit::parse_lenient(unit);
        }
        if let Some(unit) = &self.distance_unit {
            updated.distance_unit = DistanceUnit::parse_lenient(unit);
        }
        if let Some(format) = self.time_format.as_deref().and_then(TimeFormat::try_parse) {
            updated.time_format = format;
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_args(argv: &[&str]) -> WeatherArgs {
        let mut full = vec!["skyview", "weather"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Weather(args) => args,
            other => panic!("Expected weather command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_weather_cities() {
        let args = weather_args(&["Paris", "Tokyo"]);
        assert_eq!(args.cities, vec!["Paris", "Tokyo"]);
        assert!(!args.json);
    }

    #[test]
    fn test_cli_parse_negative_coordinates() {
        let args = weather_args(&["--lat", "-33.87", "--lon", "151.21"]);
        assert_eq!(args.lat, Some(-33.87));
        assert_eq!(args.lon, Some(151.21));
    }

    #[test]
    fn test_cli_lat_requires_lon() {
        let result = Cli::try_parse_from(["skyview", "weather", "--lat", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_unit_flag_value() {
        let result = Cli::try_parse_from(["skyview", "weather", "Oslo", "--temp-unit", "rankine"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_prefs_set() {
        let cli = Cli::parse_from(["skyview", "prefs", "set", "wind_unit", "knots"]);
        match cli.command {
            Command::Prefs(action) => assert_eq!(
                action,
                PrefsAction::Set {
                    key: "wind_unit".to_string(),
                    value: "knots".to_string()
                }
            ),
            other => panic!("Expected prefs command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_parse_profile_requires_name() {
        let cli = Cli::parse_from(["skyview", "profile", "--name", "Ada Lovelace"]);
        match cli.command {
            Command::Profile { name } => assert_eq!(name, "Ada Lovelace"),
            other => panic!("Expected profile command, got {:?}", other),
        }

        assert!(Cli::try_parse_from(["skyview", "profile"]).is_err());
    }

    #[test]
    fn test_cli_verbose_counts() {
        let cli = Cli::parse_from(["skyview", "-vv", "recent"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_queries_for_cities_carry_country_and_state() {
        let args = weather_args(&["Springfield", "--country", "US", "--state", "IL"]);

        let queries = args.queries().unwrap();

        assert_eq!(
            queries,
            vec![LocationQuery::City {
                name: "Springfield".to_string(),
                country: Some("US".to_string()),
                state: Some("IL".to_string()),
            }]
        );
    }

    #[test]
    fn test_queries_empty_when_nothing_given() {
        assert!(weather_args(&[]).queries().unwrap().is_empty());
    }

    #[test]
    fn test_queries_reject_out_of_range_coordinates() {
        let args = weather_args(&["--lat", "91", "--lon", "0"]);
        assert!(matches!(
            args.queries(),
            Err(CliError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_queries_reject_cities_with_coordinates() {
        let args = weather_args(&["Paris", "--lat", "1", "--lon", "2"]);
        assert!(matches!(args.queries(), Err(CliError::ConflictingLocation)));
    }

    #[test]
    fn test_apply_overrides_only_touches_given_flags() {
        let args = weather_args(&["Oslo", "--temp-unit", "kelvin", "--time-format", "12h"]);
        let saved = Preferences {
            wind_unit: WindUnit::Knots,
            ..Preferences::default()
        };

        let effective = args.apply_overrides(saved);

        assert_eq!(effective.temperature_unit, TemperatureUnit::Kelvin);
        assert_eq!(effective.time_format, TimeFormat::TwelveHour);
        assert_eq!(effective.wind_unit, WindUnit::Knots);
        assert_eq!(effective.pressure_unit, PressureUnit::Hpa);
    }

    #[test]
    fn test_resolved_api_key_prefers_flag() {
        let cli = Cli::parse_from(["skyview", "--api-key", "abc", "recent"]);
        assert_eq!(cli.resolved_api_key().unwrap(), "abc");
    }
}
