//! City-name autocomplete.
//!
//! [`CityAutocomplete`] turns a partially typed city name into a list of
//! suggestion titles published on a `watch` channel. Each non-empty query is
//! sent to the [`PlaceSearchService`] on a spawned task; the completion is
//! marshalled back through the channel's lock before it touches the list.
//!
//! Ordering: every [`set_query`](CityAutocomplete::set_query) bumps a
//! generation counter, and a completion only publishes if its generation is
//! still the latest. A slow response to an older query can therefore never
//! overwrite the suggestions of a newer one, whatever order the backend
//! answers in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::services::{PlaceSearchService, SearchQuery};

#[derive(Clone)]
pub struct CityAutocomplete {
    service: Arc<dyn PlaceSearchService>,
    results: Arc<watch::Sender<Vec<String>>>,
    generation: Arc<AtomicU64>,
}

impl CityAutocomplete {
    pub fn new(service: Arc<dyn PlaceSearchService>) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            service,
            results: Arc::new(results),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Observe the suggestion list. The value is replaced wholesale on every
    /// accepted completion.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.results.subscribe()
    }

    /// Snapshot of the current suggestions.
    pub fn results(&self) -> Vec<String> {
        self.results.borrow().clone()
    }

    /// Start a search for `fragment`.
    ///
    /// An empty fragment clears the suggestions immediately and sends no
    /// request; `None` is returned. Otherwise the lookup runs in the
    /// background and the returned handle completes once its result has been
    /// published, dropped as stale, or logged as a failure. Callers are free
    /// to ignore the handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_query(&self, fragment: &str) -> Option<JoinHandle<()>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if fragment.is_empty() {
            self.results.send_if_modified(|current| {
                let changed = !current.is_empty();
                current.clear();
                changed
            });
            return None;
        }

        let query = SearchQuery::cities(fragment);
        let service = Arc::clone(&self.service);
        let results = Arc::clone(&self.results);
        let latest = Arc::clone(&self.generation);

        Some(tokio::spawn(async move {
            match service.complete(&query).await {
                Ok(completions) => {
                    let titles: Vec<String> = completions.into_iter().map(|c| c.title).collect();
                    let count = titles.len();
                    let published = results.send_if_modified(|current| {
                        if latest.load(Ordering::SeqCst) != generation {
                            return false;
                        }
                        *current = titles;
                        true
                    });
                    if published {
                        debug!(fragment = %query.fragment, count, "suggestions updated");
                    } else {
                        debug!(fragment = %query.fragment, generation, "dropping stale suggestions");
                    }
                }
                Err(e) => {
                    warn!(fragment = %query.fragment, error = %e, "city search failed");
                }
            }
        }))
    }
}
