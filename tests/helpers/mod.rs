#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geomemo::capture::PhotoSource;
use geomemo::error::ServiceError;
use geomemo::geo::Coordinate;
use geomemo::services::{
    Completion, GeocodingService, PlaceSearchService, Placemark, SearchQuery, Services,
};
use tokio::sync::oneshot;

/// Smallest payload that sniffs as a JPEG.
pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
/// Smallest payload that sniffs as a PNG.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n";

pub const PARIS: Coordinate = Coordinate::new(48.8566, 2.3522);
pub const TOKYO: Coordinate = Coordinate::new(35.6762, 139.6503);

/// Scripted place search. Fragments without a script answer with an empty list.
/// A gated fragment waits until its gate is released, to force out-of-order delivery.
#[derive(Default)]
pub struct StubSearch {
    responses: Mutex<HashMap<String, Result<Vec<String>, String>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<SearchQuery>>,
}

impl StubSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, fragment: &str, titles: &[&str]) {
        self.responses.lock().unwrap().insert(
            fragment.to_string(),
            Ok(titles.iter().map(|t| t.to_string()).collect()),
        );
    }

    pub fn fail(&self, fragment: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(fragment.to_string(), Err(message.to_string()));
    }

    /// Hold the response for `fragment` until the returned sender fires.
    pub fn gate(&self, fragment: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(fragment.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearchService for StubSearch {
    async fn complete(&self, query: &SearchQuery) -> Result<Vec<Completion>, ServiceError> {
        self.calls.lock().unwrap().push(query.clone());

        let gate = self.gates.lock().unwrap().remove(&query.fragment);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&query.fragment)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()));
        match response {
            Ok(titles) => Ok(titles
                .into_iter()
                .map(|t| Completion::new(t, "stub"))
                .collect()),
            Err(message) => Err(ServiceError::Unavailable(message)),
        }
    }
}

/// Scripted geocoder. Unknown names have no match.
#[derive(Default)]
pub struct StubGeocoder {
    places: Mutex<HashMap<String, Vec<Placemark>>>,
    failing: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A stub that knows Paris and Tokyo.
    pub fn with_cities() -> Arc<Self> {
        let stub = Self::new();
        stub.add("Paris", PARIS);
        stub.add("Tokyo", TOKYO);
        stub
    }

    pub fn add(&self, name: &str, coordinate: Coordinate) {
        self.places
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .push(Placemark {
                name: name.to_string(),
                coordinate: Some(coordinate),
            });
    }

    pub fn add_placemark(&self, name: &str, placemark: Placemark) {
        self.places
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .push(placemark);
    }

    pub fn fail(&self, name: &str) {
        self.failing.lock().unwrap().push(name.to_string());
    }

    pub fn gate(&self, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(name.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingService for StubGeocoder {
    async fn geocode(&self, name: &str) -> Result<Vec<Placemark>, ServiceError> {
        self.calls.lock().unwrap().push(name.to_string());

        let gate = self.gates.lock().unwrap().remove(name);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failing.lock().unwrap().iter().any(|n| n == name) {
            return Err(ServiceError::Status { status: 503 });
        }
        Ok(self
            .places
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }
}

/// Photo source that hands out a fixed payload, or cancels when `None`.
pub struct StubPhotos(pub Option<Vec<u8>>);

impl StubPhotos {
    pub fn jpeg() -> Self {
        Self(Some(JPEG.to_vec()))
    }

    pub fn png() -> Self {
        Self(Some(PNG.to_vec()))
    }

    pub fn cancelled() -> Self {
        Self(None)
    }
}

#[async_trait]
impl PhotoSource for StubPhotos {
    async fn pick_image(&self) -> Option<Vec<u8>> {
        self.0.clone()
    }
}

pub fn services(search: Arc<StubSearch>, geocoding: Arc<StubGeocoder>) -> Services {
    Services { search, geocoding }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
