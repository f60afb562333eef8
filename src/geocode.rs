//! Forward geocoding of a confirmed place name.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::geo::Coordinate;
use crate::services::GeocodingService;

/// Resolves place names to coordinates. One lookup per call, no caching,
/// no retry; every failure resolves to `None`.
#[derive(Clone)]
pub struct Geocoder {
    service: Arc<dyn GeocodingService>,
}

impl Geocoder {
    pub fn new(service: Arc<dyn GeocodingService>) -> Self {
        Self { service }
    }

    /// Coordinate of the first match for `name`, or `None` when the name is
    /// blank, nothing matches, the first match has no usable location, or the
    /// lookup fails.
    pub async fn resolve(&self, name: &str) -> Option<Coordinate> {
        let name = name.trim();
        if name.is_empty() {
            warn!("refusing to geocode an empty place name");
            return None;
        }

        let placemarks = match self.service.geocode(name).await {
            Ok(placemarks) => placemarks,
            Err(e) => {
                warn!(name = %name, error = %e, "geocoding failed");
                return None;
            }
        };

        let Some(first) = placemarks.into_iter().next() else {
            warn!(name = %name, "no geocoding match");
            return None;
        };

        match first.coordinate.filter(Coordinate::is_valid) {
            Some(coordinate) => {
                debug!(name = %name, matched = %first.name, coordinate = %coordinate, "geocoded");
                Some(coordinate)
            }
            None => {
                warn!(name = %name, matched = %first.name, "geocoding match has no location");
                None
            }
        }
    }
}
