//! Nominatim-compatible HTTP backend.
//!
//! Implements [`PlaceSearchService`] and [`GeocodingService`] over the
//! `/search` endpoint with `format=jsonv2`. Completion queries ask for
//! `layer=address` and `featureType=settlement`, which keeps businesses and
//! POIs out of the suggestions. Geocoding asks for a single best match.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::{
    Completion, GeocodingService, PlaceSearchService, Placemark, ResultType, SearchFilter,
    SearchQuery,
};
use crate::config::ServicesConfig;
use crate::error::ServiceError;
use crate::geo::Coordinate;

/// One element of a `jsonv2` search response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    name: Option<String>,
}

impl Place {
    fn title(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim(),
        }
    }

    fn completion(&self) -> Completion {
        let title = self.title();
        let subtitle = self
            .display_name
            .strip_prefix(title)
            .unwrap_or(&self.display_name)
            .trim_start_matches([',', ' ']);
        Completion::new(title, subtitle)
    }

    fn coordinate(&self) -> Option<Coordinate> {
        let latitude = self.lat.trim().parse().ok()?;
        let longitude = self.lon.trim().parse().ok()?;
        Some(Coordinate::new(latitude, longitude)).filter(Coordinate::is_valid)
    }

    fn placemark(&self) -> Placemark {
        Placemark {
            name: self.title().to_string(),
            coordinate: self.coordinate(),
        }
    }
}

/// Decode a search response. Nominatim reports some failures as a JSON
/// object (`{"error": ...}`) with a success status; anything that is not an
/// array is rejected.
fn parse_places(body: &str) -> Result<Vec<Place>, ServiceError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    match value {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
        serde_json::Value::Object(ref map) => {
            let message = match map.get("error") {
                Some(serde_json::Value::String(msg)) => msg.clone(),
                Some(serde_json::Value::Object(err)) => err
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
                _ => "expected a JSON array of places".to_string(),
            };
            Err(ServiceError::InvalidResponse(message))
        }
        _ => Err(ServiceError::InvalidResponse(
            "expected a JSON array of places".to_string(),
        )),
    }
}

/// Map a non-success status. Throttling and maintenance are reported as the
/// service being unavailable.
fn status_error(status: reqwest::StatusCode) -> ServiceError {
    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS | reqwest::StatusCode::SERVICE_UNAVAILABLE => {
            ServiceError::Unavailable(format!("HTTP {status}"))
        }
        _ => ServiceError::Status {
            status: status.as_u16(),
        },
    }
}

pub struct NominatimClient {
    http: reqwest::Client,
    search_endpoint: Url,
    search_limit: usize,
    language: Option<String>,
}

impl NominatimClient {
    pub fn new(config: &ServicesConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let search_endpoint = Url::parse(&base)
            .and_then(|url| url.join("search"))
            .with_context(|| format!("invalid services base_url: {}", config.base_url))?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            search_endpoint,
            search_limit: config.search_limit.max(1),
            language: config.language.clone(),
        })
    }

    fn completion_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.search_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &query.fragment)
                .append_pair("format", "jsonv2")
                .append_pair("limit", &self.search_limit.to_string());
            match query.result_type {
                ResultType::Address => {
                    pairs.append_pair("layer", "address");
                }
            }
            match query.filter {
                SearchFilter::LocationsOnly => {
                    pairs.append_pair("featureType", "settlement");
                }
            }
            if let Some(lang) = &self.language {
                pairs.append_pair("accept-language", lang);
            }
        }
        url
    }

    fn geocode_url(&self, name: &str) -> Url {
        let mut url = self.search_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", name)
                .append_pair("format", "jsonv2")
                .append_pair("limit", "1");
            if let Some(lang) = &self.language {
                pairs.append_pair("accept-language", lang);
            }
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Place>, ServiceError> {
        tracing::debug!(url = %url, "nominatim request");
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body = response.text().await?;
        parse_places(&body)
    }
}

#[async_trait]
impl PlaceSearchService for NominatimClient {
    async fn complete(&self, query: &SearchQuery) -> Result<Vec<Completion>, ServiceError> {
        let places = self.fetch(self.completion_url(query)).await?;
        Ok(places.iter().map(Place::completion).collect())
    }
}

#[async_trait]
impl GeocodingService for NominatimClient {
    async fn geocode(&self, name: &str) -> Result<Vec<Placemark>, ServiceError> {
        let places = self.fetch(self.geocode_url(name)).await?;
        Ok(places.iter().map(Place::placemark).collect())
    }
}
