//! Memory record definitions.
//!
//! Defines [`Memory`] (one captured, geotagged moment) and [`ImageData`]
//! (the photo payload it owns, with its sniffed [`ImageFormat`]).

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::geo::Coordinate;

/// Image container formats accepted from a photo source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Heic,
}

impl ImageFormat {
    /// Detect the format from the leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::Webp),
            [_, _, _, _, b'f', b't', b'y', b'p', brand @ ..] if brand.len() >= 4 => {
                match &brand[..4] {
                    b"heic" | b"heix" | b"hevc" | b"heim" | b"heis" | b"mif1" | b"msf1" => {
                        Some(Self::Heic)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Heic => "heic",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded photo. Cloning shares the underlying bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageData {
    format: ImageFormat,
    bytes: Arc<[u8]>,
}

impl ImageData {
    /// Wrap `bytes` if they look like a supported image; `None` for empty or
    /// unrecognised payloads.
    pub fn decode(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes: Vec<u8> = bytes.into();
        let format = ImageFormat::sniff(&bytes)?;
        Some(Self {
            format,
            bytes: bytes.into(),
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for ImageData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ImageData", 2)?;
        s.serialize_field("format", &self.format)?;
        s.serialize_field("len", &self.bytes.len())?;
        s.end()
    }
}

/// A captured memory. Only built once its coordinate has been resolved.
#[derive(Debug, Clone, Serialize)]
pub struct Memory {
    /// UUID v7 (time-sortable), assigned at creation.
    pub id: Uuid,
    /// The photo, if one was captured and decoded.
    pub image: Option<ImageData>,
    /// Display name of the place, e.g. `"Paris"`.
    pub location_name: String,
    /// Geocoded position of `location_name`.
    pub coordinate: Coordinate,
    /// Path of the recorded voice note, if any.
    pub voice_note: Option<PathBuf>,
    /// Capture time.
    pub date: DateTime<Utc>,
}

impl Memory {
    /// Build a memory with a fresh id and the current time.
    pub fn new(
        image: Option<ImageData>,
        location_name: impl Into<String>,
        coordinate: Coordinate,
        voice_note: Option<PathBuf>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            image,
            location_name: location_name.into(),
            coordinate,
            voice_note,
            date: Utc::now(),
        }
    }
}
