//! Sync bus: collection change notifications
//!
//! Every time a subscription replaces a collection mirror, one
//! [`SyncEvent`] is published here. Consumers (notification worker,
//! UI shells) re-read the mirror on receipt; events carry no data
//! because every snapshot is whole-state. A lagging receiver simply
//! misses versions; the next read of the mirror is still complete.

use dashmap::DashMap;
use tokio::sync::broadcast;

/// Per-collection version counters
///
/// Lock-free via DashMap; each collection keeps an independent,
/// atomically incremented version so consumers can tell stale
/// deliveries from fresh ones.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<&'static str, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// Increment a collection's version and return the new value
    /// (first increment returns 1).
    pub fn increment(&self, collection: &'static str) -> u64 {
        let mut entry = self.versions.entry(collection).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version, 0 when the collection has never changed.
    pub fn get(&self, collection: &str) -> u64 {
        self.versions.get(collection).map(|v| *v).unwrap_or(0)
    }
}

/// One mirror replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncEvent {
    /// Collection name from [`crate::core::paths`]
    pub collection: &'static str,
    /// Version from [`ResourceVersions`], monotonic per collection
    pub version: u64,
}

/// Broadcast bus for [`SyncEvent`]s
#[derive(Clone, Debug)]
pub struct SyncBus {
    tx: broadcast::Sender<SyncEvent>,
    versions: std::sync::Arc<ResourceVersions>,
}

impl SyncBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            versions: std::sync::Arc::new(ResourceVersions::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Publish a change for `collection`, returning the new version.
    /// A send error only means no receiver is currently attached.
    pub fn publish(&self, collection: &'static str) -> u64 {
        let version = self.versions.increment(collection);
        let _ = self.tx.send(SyncEvent {
            collection,
            version,
        });
        version
    }

    pub fn version(&self, collection: &str) -> u64 {
        self.versions.get(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_increment_per_collection() {
        let bus = SyncBus::new(16);
        assert_eq!(bus.publish("members"), 1);
        assert_eq!(bus.publish("members"), 2);
        assert_eq!(bus.publish("payments"), 1);
        assert_eq!(bus.version("members"), 2);
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let bus = SyncBus::new(16);
        let mut rx = bus.subscribe();
        bus.publish("members");
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.collection, "members");
        assert_eq!(ev.version, 1);
    }
}
