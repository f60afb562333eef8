//! Map region fitting.
//!
//! [`ViewportFitter::fit`] frames a set of points with the bounding box of
//! their signed latitudes and longitudes, padded by a fixed factor. An axis
//! with zero extent (one point, or all points sharing that latitude or
//! longitude) gets `min_span` instead so the result is always a drawable
//! region. Any non-zero extent is padded exactly, however small.
//!
//! Longitude is not wrapped. Points on both sides of the antimeridian (e.g.
//! 179° and -179°) produce a box almost 360° wide centred near 0°, not a
//! narrow box around 180°. Poles are not special-cased either; the latitude
//! delta is only capped at 180°.

use super::{Coordinate, Region, Span};
use crate::config::ViewportConfig;

const MAX_LATITUDE_DELTA: f64 = 180.0;
const MAX_LONGITUDE_DELTA: f64 = 360.0;

#[derive(Debug, Clone, Copy)]
pub struct ViewportFitter {
    padding_factor: f64,
    min_span: f64,
    fallback: Region,
}

impl ViewportFitter {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            padding_factor: config.padding_factor,
            min_span: config.min_span,
            fallback: Region {
                center: Coordinate::new(config.default_latitude, config.default_longitude),
                span: Span {
                    latitude_delta: config.default_span,
                    longitude_delta: config.default_span,
                },
            },
        }
    }

    /// The region shown before any memory has been located.
    pub fn default_region(&self) -> Region {
        self.fallback
    }

    /// Compute a region containing every point, or `None` for an empty set.
    pub fn fit(&self, points: &[Coordinate]) -> Option<Region> {
        let (first, rest) = points.split_first()?;

        let mut min_lat = first.latitude;
        let mut max_lat = first.latitude;
        let mut min_lon = first.longitude;
        let mut max_lon = first.longitude;

        for point in rest {
            min_lat = min_lat.min(point.latitude);
            max_lat = max_lat.max(point.latitude);
            min_lon = min_lon.min(point.longitude);
            max_lon = max_lon.max(point.longitude);
        }

        let span = Span {
            latitude_delta: self.padded(max_lat - min_lat, MAX_LATITUDE_DELTA),
            longitude_delta: self.padded(max_lon - min_lon, MAX_LONGITUDE_DELTA),
        };
        let center = Coordinate::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0);

        Some(Region { center, span })
    }

    /// Refit `region` in place. Returns `false` (and leaves `region` alone)
    /// when there are no points.
    pub fn fit_into(&self, region: &mut Region, points: &[Coordinate]) -> bool {
        match self.fit(points) {
            Some(fitted) => {
                *region = fitted;
                true
            }
            None => false,
        }
    }

    fn padded(&self, extent: f64, max: f64) -> f64 {
        let delta = if extent == 0.0 {
            self.min_span
        } else {
            extent * self.padding_factor
        };
        delta.min(max)
    }
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}
