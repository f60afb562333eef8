//! Typed errors for the service backends and the capture flow.
//!
//! [`ServiceError`] covers place-search and geocoding failures. These never
//! reach callers of [`crate::geocode::Geocoder`] or
//! [`crate::search::CityAutocomplete`]; they are logged and turned into
//! `None` or "keep the last suggestions". [`CaptureError`] is the user-facing
//! error state of a capture draft, so its messages are phrased as actions.
//! [`StoreError`] guards the memory store invariants.

#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}")]
    Status { status: u16 },

    #[error("could not decode service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid service response: {0}")]
    InvalidResponse(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Another memory is already being captured. Finish or discard it first.")]
    Busy,

    #[error("No photo was selected.")]
    NoImage,

    #[error("Choose a city before saving.")]
    MissingLocation,

    #[error("Couldn't find a location for '{name}'. Check the spelling or pick a suggestion.")]
    NotFound { name: String },

    #[error("This memory has already been saved.")]
    AlreadySaved,

    #[error("Couldn't save this memory: {0}")]
    Store(#[from] StoreError),
}

/// Rejected appends to a [`crate::memory::store::MemoryStore`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("memory {0} is already in the store")]
    DuplicateId(uuid::Uuid),

    #[error("memory has an empty location name")]
    EmptyLocationName,

    #[error("memory coordinate {0} is out of range")]
    InvalidCoordinate(crate::geo::Coordinate),
}
