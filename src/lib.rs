//! Geotagged photo memories: city autocomplete, forward geocoding, and map
//! viewport fitting over an in-memory collection.
//!
//! A memory is a photo tagged with a city name and the coordinate that name
//! resolves to, plus an optional voice note. Memories live in a session-scoped
//! [`memory::MemoryStore`]; nothing is persisted.
//!
//! | Piece | Does |
//! |-------|------|
//! | [`search::CityAutocomplete`] | Partial city name → suggestion titles, newest query wins |
//! | [`geocode::Geocoder`] | Confirmed city name → coordinate, or `None` |
//! | [`geo::ViewportFitter`] | Set of coordinates → padded map region |
//! | [`capture::CaptureFlow`] | Photo → name → geocode → append, one capture at a time |
//!
//! # Architecture
//!
//! - **Services**: place search and geocoding sit behind async traits; the
//!   bundled backend talks to a Nominatim-compatible HTTP API
//! - **State**: [`session::Session`] owns the store, suggestions, selected
//!   city, and region, each published on a `tokio::sync::watch` channel with a
//!   single writer
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`geo`] — Coordinates, regions, and viewport fitting
//! - [`memory`] — The memory record and the append-only store
//! - [`services`] — Place-search and geocoding backends
//! - [`search`] — City autocomplete
//! - [`geocode`] — Forward geocoding
//! - [`capture`] — Capture flow and voice notes
//! - [`session`] — Session state and reactive bindings

pub mod capture;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod memory;
pub mod search;
pub mod services;
pub mod session;
