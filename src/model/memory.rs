use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Entry, EntryStore, Trip};
use crate::error::StoreError;

/// In-memory store backing tests and local development.
///
/// Status transitions go through the `Entry` methods, so this enforces the
/// same monotonicity rules a production store must.
#[derive(Default)]
pub struct MemoryStore {
    trips: RwLock<HashMap<Uuid, Trip>>,
    entries: RwLock<HashMap<Uuid, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn insert_trip(&self, trip: Trip) -> Result<Trip, StoreError> {
        let mut trips = self.trips.write().await;
        trips.insert(trip.id, trip.clone());
        Ok(trip)
    }

    async fn get_trip(&self, id: Uuid) -> Result<Trip, StoreError> {
        let trips = self.trips.read().await;
        trips.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, StoreError> {
        let trips = self.trips.read().await;
        let mut all: Vec<Trip> = trips.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn insert_entry(&self, entry: Entry) -> Result<Entry, StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_entry(&self, id: Uuid) -> Result<Entry, StoreError> {
        let entries = self.entries.read().await;
        entries.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn entries_for_trip(&self, trip_id: Uuid) -> Result<Vec<Entry>, StoreError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<Entry> = entries
            .values()
            .filter(|e| e.trip_id == trip_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn begin_processing(&self, id: Uuid) -> Result<Entry, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.begin_processing()?;
        Ok(entry.clone())
    }

    async fn complete_entry(
        &self,
        id: Uuid,
        transcript_source: &str,
        transcript_target: &str,
        provider: &str,
    ) -> Result<Entry, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.complete(transcript_source, transcript_target, provider)?;
        Ok(entry.clone())
    }

    async fn fail_entry(&self, id: Uuid, detail: &str) -> Result<Entry, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(StoreError::NotFound)?;
        entry.fail(detail)?;
        Ok(entry.clone())
    }
}
