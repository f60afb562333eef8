//! External location services.
//!
//! Provides the [`PlaceSearchService`] (incremental place-name completion) and
//! [`GeocodingService`] (place name → coordinates) traits, plus an HTTP
//! implementation of both against a Nominatim-compatible API. Backends are
//! created via [`create_services`] from configuration.

pub mod nominatim;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::config::ServicesConfig;
use crate::error::ServiceError;
use crate::geo::Coordinate;

/// Kind of result a completion query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultType {
    /// Addresses and place names.
    Address,
}

/// Restricts completions to a class of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    /// Settlements only; businesses and points of interest are excluded.
    LocationsOnly,
}

/// A completion request for a partially typed place name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub fragment: String,
    pub result_type: ResultType,
    pub filter: SearchFilter,
}

impl SearchQuery {
    /// Address-type, locations-only query, the shape used for city search.
    pub fn cities(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            result_type: ResultType::Address,
            filter: SearchFilter::LocationsOnly,
        }
    }
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Short display name, e.g. `"Paris"`.
    pub title: String,
    /// Disambiguating context, e.g. `"Île-de-France, France"`.
    pub subtitle: String,
}

impl Completion {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// A forward-geocoding match. The coordinate may be missing when the
/// service knows the place but not where it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

/// Incremental place search. Backends may coalesce rapid queries.
#[async_trait]
pub trait PlaceSearchService: Send + Sync {
    /// Completions for `query`, in the service's ranking order.
    async fn complete(&self, query: &SearchQuery) -> Result<Vec<Completion>, ServiceError>;
}

/// Forward geocoding.
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Matches for `name`, best first. An empty list means no match.
    async fn geocode(&self, name: &str) -> Result<Vec<Placemark>, ServiceError>;
}

/// The pair of backends a session talks to.
#[derive(Clone)]
pub struct Services {
    pub search: Arc<dyn PlaceSearchService>,
    pub geocoding: Arc<dyn GeocodingService>,
}

/// Create location services from config.
///
/// Currently only `"nominatim"` is supported; one HTTP client serves both traits.
pub fn create_services(config: &ServicesConfig) -> Result<Services> {
    match config.provider.as_str() {
        "nominatim" => {
            let client = Arc::new(nominatim::NominatimClient::new(config)?);
            Ok(Services {
                search: client.clone(),
                geocoding: client,
            })
        }
        other => anyhow::bail!("unknown location provider: {other}. Supported: nominatim"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_shape() {
        let query = SearchQuery::cities("Par");
        assert_eq!(query.fragment, "Par");
        assert_eq!(query.result_type, ResultType::Address);
        assert_eq!(query.filter, SearchFilter::LocationsOnly);
    }

    #[test]
    fn create_known_provider() {
        let services = create_services(&ServicesConfig::default());
        assert!(services.is_ok());
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let config = ServicesConfig {
            provider: "carrier-pigeon".into(),
            ..ServicesConfig::default()
        };
        let err = create_services(&config).err().unwrap();
        assert!(err.to_string().contains("unknown location provider"));
    }
}
