use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::catalog;
use super::types::ModelRecord;
use crate::error::{Error, Result};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Change notification sent after every mutating registry call.
///
/// Observers typically re-read [`ModelRegistry::entries`] on each firing;
/// the payload only names what changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryEvent {
    /// The whole sequence was swapped out.
    Replaced { len: usize },
    Appended { id: Uuid },
    Removed { id: Uuid },
}

/// Ordered, observable holder of [`ModelRecord`] values.
///
/// Insertion order is significant and drives display order. Entries are not
/// validated or deduplicated. Each mutating call sends exactly one
/// [`RegistryEvent`] before it returns.
pub struct ModelRegistry {
    entries: RwLock<Vec<ModelRecord>>,
    events: broadcast::Sender<RegistryEvent>,
}

impl ModelRegistry {
    pub fn new(initial: Vec<ModelRecord>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(initial),
            events,
        }
    }

    /// Registry seeded with the built-in model catalog.
    pub fn with_default_catalog() -> Self {
        Self::new(catalog::default_catalog())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the current entries, in order.
    pub async fn entries(&self) -> Vec<ModelRecord> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn get(&self, id: Uuid) -> Result<ModelRecord> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Error::ModelNotFound(id.to_string()))
    }

    /// First record carrying `name`, in insertion order. Names are not
    /// unique; later records with the same name are shadowed here.
    pub async fn find_by_name(&self, name: &str) -> Option<ModelRecord> {
        let entries = self.entries.read().await;
        entries.iter().find(|r| r.model_name() == name).cloned()
    }

    /// Append a record to the end of the sequence.
    pub async fn push(&self, record: ModelRecord) {
        let id = record.id();
        {
            let mut entries = self.entries.write().await;
            entries.push(record);
        }
        self.notify(RegistryEvent::Appended { id });
    }

    /// Remove the record with `id`. A failed call does not mutate and sends
    /// no event.
    pub async fn remove(&self, id: Uuid) -> Result<ModelRecord> {
        let removed = {
            let mut entries = self.entries.write().await;
            let idx = entries
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| Error::ModelNotFound(id.to_string()))?;
            entries.remove(idx)
        };
        self.notify(RegistryEvent::Removed { id });
        Ok(removed)
    }

    /// Swap out the entire sequence.
    pub async fn replace(&self, new_entries: Vec<ModelRecord>) {
        let len = new_entries.len();
        {
            let mut entries = self.entries.write().await;
            *entries = new_entries;
        }
        self.notify(RegistryEvent::Replaced { len });
    }

    fn notify(&self, event: RegistryEvent) {
        debug!(?event, "registry changed");
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }
}
