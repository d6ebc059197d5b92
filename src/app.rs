//! Command execution for Skyview
//!
//! `App` owns the local stores and the API settings and runs one parsed
//! [`Command`]. Reports go to `out`; per-city failures that do not stop the
//! command go to `err`.

use std::io::{self, Write};

use futures::future::join_all;
use thiserror::Error;

use crate::auth::{AuthError, AuthStore};
use crate::cli::{CliError, Command, PrefsAction, WeatherArgs};
use crate::data::{GeocodeClient, LocationQuery, Observation, WeatherClient, WeatherError};
use crate::preferences::{PreferenceError, PreferenceStore};
use crate::report::WeatherReport;
use crate::storage::{KeyValueStore, StorageError};

/// Errors surfaced to the user by a command
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Endpoints and credentials for the weather provider
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// `None` when no key is configured; only commands that call the API need one
    pub api_key: Option<String>,
    pub weather_url: String,
    pub geo_url: String,
}

/// Runs commands against the local stores and the weather provider
pub struct App {
    preferences: PreferenceStore,
    auth: AuthStore,
    api: ApiSettings,
}

impl App {
    pub fn new(store: KeyValueStore, api: ApiSettings) -> Self {
        Self {
            preferences: PreferenceStore::new(store.clone()),
            auth: AuthStore::new(store),
            api,
        }
    }

    fn api_key(&self) -> Result<&str, CliError> {
        self.api.api_key.as_deref().ok_or(CliError::MissingApiKey)
    }

    fn weather_client(&self) -> Result<WeatherClient, CliError> {
        Ok(WeatherClient::new(self.api_key()?).with_base_url(self.api.weather_url.clone()))
    }

    fn geocode_client(&self) -> Result<GeocodeClient, CliError> {
        Ok(GeocodeClient::new(self.api_key()?).with_base_url(self.api.geo_url.clone()))
    }

    /// Executes a single command
    pub async fn run<W: Write, E: Write>(
        &self,
        command: Command,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), AppError> {
        match command {
            Command::Weather(args) => self.show_weather(&args, out, err).await,
            Command::Suggest {
                query,
                country,
                state,
            } => {
                let suggestions = self
                    .geocode_client()?
                    .suggest(&query, country.as_deref(), state.as_deref())
                    .await?;
                if suggestions.is_empty() {
                    writeln!(out, "No matching cities")?;
                }
                for suggestion in suggestions {
                    writeln!(
                        out,
                        "{}  ({:.4}, {:.4})",
                        suggestion.display(),
                        suggestion.lat,
                        suggestion.lon
                    )?;
                }
                Ok(())
            }
            Command::Prefs(action) => self.prefs(action, out),
            Command::Recent => {
                let searches = self.preferences.recent_searches();
                if searches.is_empty() {
                    writeln!(out, "No recent searches")?;
                }
                for (i, search) in searches.iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, search)?;
                }
                Ok(())
            }
            Command::Signup {
                name,
                email,
                password,
            } => {
                let user = self.auth.signup(&name, &email, &password)?;
                writeln!(out, "Welcome, {}! You are signed in as {}", user.name, user.email)?;
                Ok(())
            }
            Command::Login { email, password } => {
                let user = self.auth.login(&email, &password)?;
                writeln!(out, "Signed in as {} ({})", user.name, user.email)?;
                Ok(())
            }
            Command::Logout => {
                self.auth.logout()?;
                writeln!(out, "Signed out")?;
                Ok(())
            }
            Command::Whoami => {
                match self.auth.current_user()? {
                    Some(user) => writeln!(
                        out,
                        "{} ({}), signed in {}",
                        user.name,
                        user.email,
                        user.login_time.format("%Y-%m-%d %H:%M UTC")
                    )?,
                    None => writeln!(out, "Not signed in")?,
                }
                Ok(())
            }
            Command::Profile { name } => {
                let user = self.auth.update_profile(&name)?;
                writeln!(out, "Profile updated: {} ({})", user.name, user.email)?;
                Ok(())
            }
        }
    }

    fn prefs<W: Write>(&self, action: PrefsAction, out: &mut W) -> Result<(), AppError> {
        let preferences = match action {
            PrefsAction::Show => self.preferences.load(),
            PrefsAction::Set { key, value } => self.preferences.update(&key, &value)?,
            PrefsAction::Reset => self.preferences.reset()?,
        };
        for (key, value) in preferences.entries() {
            writeln!(out, "{:<17} {}", key, value)?;
        }
        Ok(())
    }

    /// Fetches every requested location concurrently and prints the reports
    /// in request order
    async fn show_weather<W: Write, E: Write>(
        &self,
        args: &WeatherArgs,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), AppError> {
        let mut queries = args.queries()?;
        if queries.is_empty() {
            let recent = self
                .preferences
                .recent_searches()
                .into_iter()
                .next()
                .ok_or(CliError::NoLocation)?;
            tracing::debug!(query = %recent, "repeating most recent search");
            queries.push(LocationQuery::city(recent));
        }

        let preferences = args.apply_overrides(self.preferences.load());
        let client = self.weather_client()?;

        let results = join_all(queries.iter().map(|query| client.fetch(query))).await;

        let mut reports = Vec::new();
        let mut failures = Vec::new();
        for (query, result) in queries.iter().zip(results) {
            match result {
                Ok(observation) => {
                    self.remember(query, &observation);
                    reports.push(WeatherReport::build(&observation, &preferences));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "lookup failed");
                    failures.push(e);
                }
            }
        }

        // With no report to show, the last failure becomes the command's error
        let fatal = if reports.is_empty() { failures.pop() } else { None };
        for e in &failures {
            writeln!(err, "Error: {}", e)?;
        }
        if let Some(e) = fatal {
            return Err(e.into());
        }

        if args.json {
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        } else {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}", report)?;
            }
        }
        Ok(())
    }

    /// Records a successful lookup in the recent search list
    fn remember(&self, query: &LocationQuery, observation: &Observation) {
        let entry = match query {
            LocationQuery::City {
                name,
                country,
                state,
            } => crate::data::qualified_query(name, country.as_deref(), state.as_deref()),
            LocationQuery::Coordinates { .. } => {
                format!("{}, {}", observation.city, observation.country)
            }
        };
        if let Err(e) = self.preferences.record_search(&entry) {
            tracing::warn!(error = %e, "could not save recent search");
        }
    }
}
