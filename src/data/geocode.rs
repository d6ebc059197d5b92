//! City name autocomplete via the direct geocoding endpoint

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::WeatherError;

/// Default direct geocoding endpoint
pub const DEFAULT_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Maximum number of suggestions requested per query
const SUGGESTION_LIMIT: u8 = 5;

/// Queries shorter than this return no suggestions without hitting the API
const MIN_QUERY_CHARS: usize = 2;

/// One autocomplete match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
    /// State or province; empty when the provider gives none
    pub state: String,
    pub lat: f64,
    pub lon: f64,
}

impl CitySuggestion {
    /// Human-readable label such as `"Portland, Oregon, US"`
    pub fn display(&self) -> String {
        if self.state.is_empty() {
            format!("{}, {}", self.name, self.country)
        } else {
            format!("{}, {}, {}", self.name, self.state, self.country)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl From<GeoEntry> for CitySuggestion {
    fn from(entry: GeoEntry) -> Self {
        Self {
            name: entry.name,
            country: entry.country,
            state: entry.state.unwrap_or_default(),
            lat: entry.lat,
            lon: entry.lon,
        }
    }
}

/// Client for city suggestions
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeocodeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_GEO_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Looks up cities matching `query`, optionally narrowed by country and state codes
    ///
    /// Returns an empty list without making a request when the query is shorter
    /// than two characters.
    pub async fn suggest(
        &self,
        query: &str,
        country: Option<&str>,
        state: Option<&str>,
    ) -> Result<Vec<CitySuggestion>, WeatherError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let q = super::qualified_query(trimmed, country, state);
        let url = format!(
            "{}?q={}&limit={}&appid={}",
            self.base_url,
            urlencoding::encode(&q),
            SUGGESTION_LIMIT,
            urlencoding::encode(&self.api_key)
        );
        tracing::debug!(query = %q, "fetching city suggestions");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidApiKey),
            status => return Err(WeatherError::Api { status, body: text }),
        }

        let entries: Vec<GeoEntry> = serde_json::from_str(&text)?;
        Ok(entries.into_iter().map(CitySuggestion::from).collect())
    }
}
