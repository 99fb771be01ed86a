use async_trait::async_trait;
use uuid::Uuid;

use super::{Entry, Trip};
use crate::error::StoreError;

/// Store seam over the external relational database.
///
/// Implementations own their interior synchronization; handlers and the
/// pipeline share one store behind `Arc<dyn EntryStore>`.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn insert_trip(&self, trip: Trip) -> Result<Trip, StoreError>;

    async fn get_trip(&self, id: Uuid) -> Result<Trip, StoreError>;

    /// All trips, newest first.
    async fn list_trips(&self) -> Result<Vec<Trip>, StoreError>;

    async fn insert_entry(&self, entry: Entry) -> Result<Entry, StoreError>;

    async fn get_entry(&self, id: Uuid) -> Result<Entry, StoreError>;

    /// Entries belonging to a trip, newest first.
    async fn entries_for_trip(&self, trip_id: Uuid) -> Result<Vec<Entry>, StoreError>;

    /// Compare-and-set `{pending, failed} -> processing`.
    ///
    /// A caller that loses the race (entry already `processing` or `done`)
    /// gets `StoreError::InvalidTransition` and must not run the pipeline.
    async fn begin_processing(&self, id: Uuid) -> Result<Entry, StoreError>;

    /// Single terminal write for a successful pipeline run: both
    /// transcripts, the provider tag, and status `done`.
    async fn complete_entry(
        &self,
        id: Uuid,
        transcript_source: &str,
        transcript_target: &str,
        provider: &str,
    ) -> Result<Entry, StoreError>;

    /// Single terminal write for a failed pipeline run: status `failed`
    /// plus a human-readable error detail.
    async fn fail_entry(&self, id: Uuid, detail: &str) -> Result<Entry, StoreError>;
}
