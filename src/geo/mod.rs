//! Geographic value types: [`Coordinate`], [`Span`], and [`Region`].
//!
//! All values are decimal degrees. Longitudes are signed (`-180..=180`) and
//! never wrapped; see [`viewport`] for what that means for regions that
//! straddle the antimeridian.

pub mod viewport;

use serde::{Deserialize, Serialize};

pub use viewport::ViewportFitter;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite, with latitude in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = String;

    /// Parses `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'lat,lon', got: {s}"))?;
        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude: {lat}"))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude: {lon}"))?;
        let coordinate = Coordinate::new(latitude, longitude);
        if !coordinate.is_valid() {
            return Err(format!("coordinate out of range: {s}"));
        }
        Ok(coordinate)
    }
}

/// Visible extent of a region, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

/// A map viewport: center plus span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinate,
    pub span: Span,
}

impl Region {
    /// Whether `point` lies inside the region (edges included).
    pub fn contains(&self, point: Coordinate) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.span.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.span.longitude_delta / 2.0
    }
}
