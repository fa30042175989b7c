//! Google Places text search, used to check that a listed store exists and
//! is still open for business.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::ai::config::{http_timeout_from_env, retry_policy_from_env};
use crate::catalog::City;
use crate::error::UpstreamError;
use crate::utils::{send_with_retry, RetryPolicy};

pub const PLACES_TEXT_SEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/textsearch/json";

#[derive(Clone, Debug)]
pub struct PlacesConfig {
    pub api_key: String,
    pub url: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl PlacesConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("GOOGLE_PLACES_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        Some(Self {
            api_key,
            url: env::var("GOOGLE_PLACES_URL").ok(),
            timeout: http_timeout_from_env(),
            retry: retry_policy_from_env(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub business_status: Option<String>,
}

#[derive(Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceCandidate>,
    #[serde(default)]
    status: Option<String>,
}

/// Whether a lookup candidate counts as an operating business.
///
/// Many responses leave `business_status` out entirely; those are treated
/// as operational.
pub fn is_operational(candidate: &PlaceCandidate) -> bool {
    candidate
        .business_status
        .as_deref()
        .map_or(true, |s| s.eq_ignore_ascii_case("OPERATIONAL"))
}

/// Lowercase alphanumeric words, single-spaced. "Joe's  Hardware, LLC"
/// becomes "joe s hardware llc".
fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive match where either name contains the other. Candidates
/// without a name never match.
pub fn name_matches(store: &str, candidate: &PlaceCandidate) -> bool {
    let Some(name) = candidate.name.as_deref() else {
        return false;
    };
    let store = normalize_name(store);
    let name = normalize_name(name);
    if store.is_empty() || name.is_empty() {
        return false;
    }
    name.contains(&store) || store.contains(&name)
}

#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    retry: RetryPolicy,
}

impl PlacesClient {
    pub fn new(
        api_key: impl Into<String>,
        url: Option<&str>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            url: url.unwrap_or(PLACES_TEXT_SEARCH_URL).to_string(),
            retry,
        })
    }

    pub fn from_config(config: &PlacesConfig) -> Result<Self, UpstreamError> {
        Self::new(
            config.api_key.clone(),
            config.url.as_deref(),
            config.timeout,
            config.retry,
        )
    }

    /// Look up `store` in `city` and return every candidate the API found.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, store: &str, city: City) -> Result<Vec<PlaceCandidate>, UpstreamError> {
        let query = format!("{store}, {}, Georgia", city.display_name());
        let resp = send_with_retry(&self.retry, "places", || {
            self.http
                .get(&self.url)
                .query(&[("query", query.as_str()), ("key", self.api_key.as_str())])
        })
        .await?;

        let raw = resp.text().await?;
        trace!(raw = %raw, "places response");
        let parsed: TextSearchResponse =
            serde_json::from_str(&raw).map_err(|e| UpstreamError::Malformed(e.to_string()))?;
        match parsed.status.as_deref() {
            None | Some("OK") | Some("ZERO_RESULTS") => {}
            Some(other) => {
                return Err(UpstreamError::Malformed(format!("places status {other}")));
            }
        }
        debug!(query, count = parsed.results.len(), "places candidates");
        Ok(parsed.results)
    }

    /// True when a candidate named like `store` in `city` is operating.
    pub async fn verify(&self, store: &str, city: City) -> Result<bool, UpstreamError> {
        let candidates = self.search(store, city).await?;
        Ok(candidates
            .iter()
            .any(|c| name_matches(store, c) && is_operational(c)))
    }
}
