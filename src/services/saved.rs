use crate::error::{NotFoundError, Result};
use crate::models::{
    ensure_saved_id, NewSavedProperty, SavedPropertyPatch, SavedPropertyRecord,
};
use crate::services::traits::{Clock, Latency, Operation, SystemClock};
use crate::services::types::RecordKey;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Outcome of flipping a listing's saved state
#[derive(Debug, Clone, PartialEq)]
pub enum SaveToggle {
    /// A new record was created
    Saved(SavedPropertyRecord),
    /// The existing record was deleted
    Removed(SavedPropertyRecord),
}

impl SaveToggle {
    /// Saved state after the toggle
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveToggle::Saved(_))
    }

    pub fn record(&self) -> &SavedPropertyRecord {
        match self {
            SaveToggle::Saved(record) | SaveToggle::Removed(record) => record,
        }
    }
}

/// In-memory store of saved listings.
///
/// Records live in insertion order behind a single lock. Mutations hold
/// the write guard for the whole read-modify-write so id assignment is
/// serialized; reads clone a consistent snapshot.
pub struct SavedPropertyStore {
    records: RwLock<Vec<SavedPropertyRecord>>,
    latency: Arc<dyn Latency>,
    clock: Arc<dyn Clock>,
}

impl SavedPropertyStore {
    /// Build a store seeded with `snapshot`.
    ///
    /// Fails if a snapshot id is zero or above `MAX_SNAPSHOT_SAVED_ID`.
    pub fn init(
        snapshot: Vec<SavedPropertyRecord>,
        latency: Arc<dyn Latency>,
    ) -> anyhow::Result<Self> {
        for record in &snapshot {
            ensure_saved_id(record.id)?;
        }

        info!("Initialized saved-property store with {} records", snapshot.len());
        Ok(Self {
            records: RwLock::new(snapshot),
            latency,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the timestamp source used by `create`
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn get_all(&self) -> Vec<SavedPropertyRecord> {
        self.latency.pause(Operation::SavedList).await;
        self.records.read().await.clone()
    }

    pub async fn get_by_id<K>(&self, id: &K) -> Result<SavedPropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.latency.pause(Operation::SavedGet).await;

        let records = self.records.read().await;
        position(&records, id)
            .map(|index| records[index].clone())
            .ok_or_else(|| NotFoundError::saved_property(id))
    }

    /// Save a listing. The property id is not checked against any catalog.
    pub async fn create(&self, input: NewSavedProperty) -> SavedPropertyRecord {
        self.latency.pause(Operation::SavedCreate).await;

        let mut records = self.records.write().await;
        let record = self.insert(&mut records, input);
        info!(id = record.id, property_id = %record.property_id, "Saved property");
        record
    }

    /// Merge `patch` onto an existing record; its id never changes
    pub async fn update<K>(&self, id: &K, patch: SavedPropertyPatch) -> Result<SavedPropertyRecord>
    where
        K: RecordKey + ?Sized,
    {
        self.latency.pause(Operation::SavedUpdate).await;

        let mut records = self.records.write().await;
        let index = position(&records, id).ok_or_else(|| NotFoundError::saved_property(id))?;
        patch.apply_to(&mut records[index]);
        debug!(id = records[index].id, "Updated saved property");
        Ok(records[index].clone())
    }

    pub async fn delete<K>(&self, id: &K) -> Result<bool>
    where
        K: RecordKey + ?Sized,
    {
        self.latency.pause(Operation::SavedDelete).await;

        let mut records = self.records.write().await;
        let index = position(&records, id).ok_or_else(|| NotFoundError::saved_property(id))?;
        let removed = records.remove(index);
        info!(id = removed.id, property_id = %removed.property_id, "Removed saved property");
        Ok(true)
    }

    /// Whether any record bookmarks `property_id`, compared as text
    pub async fn is_saved<P>(&self, property_id: &P) -> bool
    where
        P: fmt::Display + ?Sized,
    {
        self.latency.pause(Operation::SavedCheck).await;

        let wanted = property_id.to_string();
        self.records
            .read()
            .await
            .iter()
            .any(|r| r.property_id == wanted)
    }

    /// First record bookmarking `property_id`
    pub async fn find_by_property<P>(&self, property_id: &P) -> Option<SavedPropertyRecord>
    where
        P: fmt::Display + ?Sized,
    {
        self.latency.pause(Operation::SavedList).await;

        let wanted = property_id.to_string();
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.property_id == wanted)
            .cloned()
    }

    /// Save `property_id` if it is not saved yet, otherwise delete the
    /// first record bookmarking it.
    pub async fn toggle<P>(&self, property_id: &P, notes: Option<String>) -> SaveToggle
    where
        P: fmt::Display + ?Sized,
    {
        self.latency.pause(Operation::SavedDelete).await;

        let wanted = property_id.to_string();
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.property_id == wanted) {
            Some(index) => {
                let removed = records.remove(index);
                info!(id = removed.id, property_id = %wanted, "Unsaved property");
                SaveToggle::Removed(removed)
            }
            None => {
                let record = self.insert(
                    &mut records,
                    NewSavedProperty {
                        property_id: wanted,
                        notes,
                    },
                );
                info!(id = record.id, property_id = %record.property_id, "Saved property");
                SaveToggle::Saved(record)
            }
        }
    }

    /// Delete every record in one batch, returning how many were removed
    pub async fn clear_all(&self) -> usize {
        self.latency.pause(Operation::SavedDelete).await;

        let mut records = self.records.write().await;
        let removed = records.len();
        records.clear();
        info!(removed, "Cleared saved properties");
        removed
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn insert(
        &self,
        records: &mut Vec<SavedPropertyRecord>,
        input: NewSavedProperty,
    ) -> SavedPropertyRecord {
        let record = SavedPropertyRecord {
            id: next_id(records),
            property_id: input.property_id,
            notes: input.notes,
            saved_date: self.clock.now(),
        };
        records.push(record.clone());
        record
    }
}

/// One past the largest id in use, or 1 for an empty store.
///
/// Seeded ids are capped at 2^53 - 1 and each create adds one, so this
/// cannot reach `u64::MAX`.
fn next_id(records: &[SavedPropertyRecord]) -> u64 {
    records.iter().map(|r| r.id).max().map_or(1, |max| max + 1)
}

fn position<K>(records: &[SavedPropertyRecord], id: &K) -> Option<usize>
where
    K: RecordKey + ?Sized,
{
    let wanted = id.record_id()?;
    records.iter().position(|r| r.id == wanted)
}
