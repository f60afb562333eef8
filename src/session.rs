//! Top-level session state.
//!
//! [`Session`] owns everything that lives for one app session: the memory
//! store, the suggestion list, the selected city, and the map region. Each
//! is exposed as a `watch::Receiver`, so the presentation layer re-renders on
//! change while all writes go through the single `watch::Sender` that owns the
//! value. Nothing here is persisted.
//!
//! The selected city does double duty: it is the default place name for the
//! next capture and the active filter for the memory list and the map. The
//! region is refit from the filtered memories whenever the store or the
//! filter changes; with nothing to show it keeps its previous value.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::capture::{CaptureDraft, CaptureFlow, PhotoSource};
use crate::config::ViewportConfig;
use crate::error::CaptureError;
use crate::geo::{Region, ViewportFitter};
use crate::geocode::Geocoder;
use crate::memory::{Memory, MemoryStore};
use crate::search::CityAutocomplete;
use crate::services::Services;

pub struct Session {
    autocomplete: CityAutocomplete,
    capture: CaptureFlow,
    fitter: ViewportFitter,
    memories: Arc<watch::Sender<MemoryStore>>,
    selected_city: watch::Sender<Option<String>>,
    region: watch::Sender<Region>,
}

impl Session {
    pub fn new(services: Services, viewport: &ViewportConfig) -> Self {
        let fitter = ViewportFitter::new(viewport);
        let (memories, _) = watch::channel(MemoryStore::new());
        let memories = Arc::new(memories);
        let (selected_city, _) = watch::channel(None);
        let (region, _) = watch::channel(fitter.default_region());

        let geocoder = Geocoder::new(services.geocoding);
        Self {
            autocomplete: CityAutocomplete::new(services.search),
            capture: CaptureFlow::new(geocoder, Arc::clone(&memories)),
            fitter,
            memories,
            selected_city,
            region,
        }
    }

    pub fn search_results(&self) -> watch::Receiver<Vec<String>> {
        self.autocomplete.subscribe()
    }

    pub fn memories(&self) -> watch::Receiver<MemoryStore> {
        self.memories.subscribe()
    }

    pub fn region(&self) -> watch::Receiver<Region> {
        self.region.subscribe()
    }

    pub fn selected_city(&self) -> watch::Receiver<Option<String>> {
        self.selected_city.subscribe()
    }

    pub fn current_region(&self) -> Region {
        *self.region.borrow()
    }

    /// Forward a keystroke in the city search box. See [`CityAutocomplete::set_query`].
    pub fn set_query(&self, fragment: &str) -> Option<JoinHandle<()>> {
        self.autocomplete.set_query(fragment)
    }

    /// Confirm a suggestion: it becomes the selected city (list filter and
    /// default capture name), the search box is cleared, and the map refits.
    pub fn select_city(&self, title: &str) {
        self.selected_city.send_replace(Some(title.to_string()));
        self.autocomplete.set_query("");
        self.refit_region();
    }

    /// Drop the filter and show every memory again.
    pub fn clear_selection(&self) {
        if self.selected_city.send_replace(None).is_some() {
            self.refit_region();
        }
    }

    /// Memories passing the current filter, in capture order.
    pub fn visible_memories(&self) -> Vec<Memory> {
        let city = self.selected_city.borrow().clone();
        let memories = self.memories.borrow();
        memories
            .filter_by_location(city.as_deref())
            .cloned()
            .collect()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_busy()
    }

    /// Start a capture. The draft's place name is prefilled with the selected city.
    pub async fn begin_capture(
        &self,
        source: &dyn PhotoSource,
    ) -> Result<CaptureDraft, CaptureError> {
        let mut draft = self.capture.begin(source).await?;
        let city = self.selected_city.borrow().clone();
        if let Some(city) = city {
            draft.set_location_name(city);
        }
        Ok(draft)
    }

    /// Save a draft and refit the map around the result.
    pub async fn save_capture(&self, draft: &mut CaptureDraft) -> Result<Memory, CaptureError> {
        let memory = draft.save().await?;
        self.refit_region();
        Ok(memory)
    }

    /// Refit the region around the visible memories. Returns `false` and
    /// leaves the region alone when no memory is visible.
    pub fn refit_region(&self) -> bool {
        let city = self.selected_city.borrow().clone();
        let points = self.memories.borrow().coordinates(city.as_deref());
        let fitted = self
            .region
            .send_if_modified(|region| self.fitter.fit_into(region, &points));
        debug!(points = points.len(), fitted, "region refit");
        fitted
    }
}
