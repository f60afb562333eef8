//! Memory capture: photo → place name → geocode → append.
//!
//! [`CaptureFlow::begin`] waits for a photo from a [`PhotoSource`] and hands
//! back a [`CaptureDraft`] that owns the transient state of one capture (the
//! photo, the pending place name, an optional voice note). Only one draft may
//! be alive at a time; a second `begin` fails with [`CaptureError::Busy`].
//! [`CaptureDraft::save`] geocodes the name and appends the finished
//! [`Memory`] to the store only when a coordinate came back.

pub mod voice;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CaptureError;
use crate::geocode::Geocoder;
use crate::memory::{ImageData, Memory, MemoryStore};

pub use voice::{AudioDevice, VoiceRecorder};

/// Where photos come from (a picker, a camera, a file).
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// The encoded bytes of the chosen photo, or `None` if the user cancelled.
    async fn pick_image(&self) -> Option<Vec<u8>>;
}

/// Holds the single-capture slot until dropped.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct CaptureFlow {
    geocoder: Geocoder,
    store: Arc<watch::Sender<MemoryStore>>,
    busy: Arc<AtomicBool>,
}

impl CaptureFlow {
    pub fn new(geocoder: Geocoder, store: Arc<watch::Sender<MemoryStore>>) -> Self {
        Self {
            geocoder,
            store,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a draft is currently alive. "Add memory" should be disabled while true.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the capture slot and wait for a photo.
    ///
    /// Fails with [`CaptureError::Busy`] if another draft is alive, or
    /// [`CaptureError::NoImage`] if the user cancelled or the payload is not a
    /// recognised image. Neither failure changes any state.
    pub async fn begin(&self, source: &dyn PhotoSource) -> Result<CaptureDraft, CaptureError> {
        let guard = BusyGuard::acquire(&self.busy).ok_or(CaptureError::Busy)?;

        let Some(bytes) = source.pick_image().await else {
            info!("photo selection cancelled");
            return Err(CaptureError::NoImage);
        };
        let len = bytes.len();
        let Some(image) = ImageData::decode(bytes) else {
            warn!(bytes = len, "selected photo is empty or not a supported image");
            return Err(CaptureError::NoImage);
        };

        info!(format = %image.format(), bytes = len, "capture started");
        Ok(CaptureDraft {
            image: Some(image),
            location_name: String::new(),
            voice_note: None,
            last_error: None,
            geocoder: self.geocoder.clone(),
            store: Arc::clone(&self.store),
            guard: Some(guard),
        })
    }
}

/// Transient state of one capture in progress.
pub struct CaptureDraft {
    image: Option<ImageData>,
    location_name: String,
    voice_note: Option<PathBuf>,
    last_error: Option<CaptureError>,
    geocoder: Geocoder,
    store: Arc<watch::Sender<MemoryStore>>,
    guard: Option<BusyGuard>,
}

impl std::fmt::Debug for CaptureDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureDraft")
            .field("image", &self.image)
            .field("location_name", &self.location_name)
            .field("voice_note", &self.voice_note)
            .field("last_error", &self.last_error)
            .field("holds_slot", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

impl CaptureDraft {
    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    /// Set the place name to geocode on save (usually a picked suggestion).
    pub fn set_location_name(&mut self, name: impl Into<String>) {
        self.location_name = name.into();
        self.last_error = None;
    }

    pub fn voice_note(&self) -> Option<&PathBuf> {
        self.voice_note.as_ref()
    }

    pub fn attach_voice_note(&mut self, path: Option<PathBuf>) {
        self.voice_note = path;
    }

    /// Save is enabled only with a photo and a non-blank place name.
    pub fn can_save(&self) -> bool {
        self.image.is_some() && !self.location_name.trim().is_empty()
    }

    /// The error of the last failed save, for display. Cleared on success or
    /// when the place name changes.
    pub fn last_error(&self) -> Option<&CaptureError> {
        self.last_error.as_ref()
    }

    /// Whether this draft has already produced a memory.
    pub fn is_saved(&self) -> bool {
        self.image.is_none()
    }

    /// Geocode the place name and append the memory.
    ///
    /// On success the draft's transient state is cleared and the capture slot
    /// released, so a new capture can begin. On failure nothing is appended
    /// and the draft stays editable; a [`CaptureError::NotFound`] can be fixed
    /// by changing the name and saving again.
    pub async fn save(&mut self) -> Result<Memory, CaptureError> {
        let result = self.try_save().await;
        self.last_error = result.as_ref().err().cloned();
        result
    }

    async fn try_save(&mut self) -> Result<Memory, CaptureError> {
        let Some(image) = self.image.clone() else {
            return Err(CaptureError::AlreadySaved);
        };
        let name = self.location_name.trim().to_string();
        if name.is_empty() {
            return Err(CaptureError::MissingLocation);
        }

        let Some(coordinate) = self.geocoder.resolve(&name).await else {
            warn!(name = %name, "memory not saved: location could not be resolved");
            return Err(CaptureError::NotFound { name });
        };

        let memory = Memory::new(Some(image), name, coordinate, self.voice_note.clone());
        let mut appended = Ok(());
        self.store.send_if_modified(|store| {
            appended = store.append(memory.clone());
            appended.is_ok()
        });
        appended?;

        info!(id = %memory.id, location = %memory.location_name, "memory saved");

        self.image = None;
        self.location_name.clear();
        self.voice_note = None;
        self.guard = None;
        Ok(memory)
    }
}
