//! In-memory, append-only collection of [`Memory`] records.
//!
//! Insertion order is capture order. [`MemoryStore::append`] is the only
//! mutation and it enforces the store invariants: unique ids, a non-empty
//! location name, and a valid coordinate.

use uuid::Uuid;

use crate::error::StoreError;
use crate::geo::Coordinate;
use crate::memory::types::Memory;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    memories: Vec<Memory>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a memory at the end of the store.
    pub fn append(&mut self, memory: Memory) -> Result<(), StoreError> {
        if memory.location_name.trim().is_empty() {
            return Err(StoreError::EmptyLocationName);
        }
        if !memory.coordinate.is_valid() {
            return Err(StoreError::InvalidCoordinate(memory.coordinate));
        }
        if self.get(memory.id).is_some() {
            return Err(StoreError::DuplicateId(memory.id));
        }

        tracing::debug!(
            id = %memory.id,
            location = %memory.location_name,
            coordinate = %memory.coordinate,
            "memory appended"
        );
        self.memories.push(memory);
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// All memories in capture order.
    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.memories.iter()
    }

    pub fn as_slice(&self) -> &[Memory] {
        &self.memories
    }

    /// Memories whose location name equals `location`, or all of them when
    /// `location` is `None` or empty. Capture order is kept.
    pub fn filter_by_location<'a>(
        &'a self,
        location: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Memory> + 'a {
        let location = location.filter(|l| !l.is_empty());
        self.memories
            .iter()
            .filter(move |m| location.map_or(true, |l| m.location_name == l))
    }

    /// Coordinates of the memories matching `location` (see [`Self::filter_by_location`]).
    pub fn coordinates(&self, location: Option<&str>) -> Vec<Coordinate> {
        self.filter_by_location(location)
            .map(|m| m.coordinate)
            .collect()
    }
}
