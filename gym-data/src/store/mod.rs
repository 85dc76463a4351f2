//! Remote mirror store seam
//!
//! The shared remote store is a keyed, hierarchical, eventually
//! consistent tree supporting get/set/update/delete on a path and
//! subscription to a path's live value. Subscribers always receive
//! the **whole subtree** on every change (O(subtree) per delivery,
//! never an incremental diff), so the repository layer replaces its
//! entire in-memory collection on each snapshot.
//!
//! `update("", map)` is the atomic multi-path update: all paths in
//! the map become visible to subscribers as one unit. Callers needing
//! several writes to land together must use it; a sequence of single
//! writes has no cross-write atomicity and no rollback.

pub mod memory;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Store failure; propagates to callers as [`shared::AppError::Store`]
/// and is never retried automatically.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("write rejected at '{path}': {reason}")]
    Rejected { path: String, reason: String },

    #[error("malformed path: {0}")]
    BadPath(String),
}

impl From<StoreError> for shared::AppError {
    fn from(e: StoreError) -> Self {
        shared::AppError::Store(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Callback receiving whole-subtree snapshots; invoked once on attach
/// with the current value, then after every write touching the path.
pub type SnapshotHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Handle for detaching a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub fn new() -> Self {
        SubscriptionId(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The remote mirror store contract.
///
/// Write acknowledgments are the only suspension points in the core;
/// a caller awaiting a write sees a deferred completion while other
/// subscriptions keep delivering snapshots.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Read the value at `path`; `Value::Null` when absent.
    async fn get(&self, path: &str) -> StoreResult<Value>;

    /// Replace the value at `path`. `Value::Null` deletes.
    async fn set(&self, path: &str, value: Value) -> StoreResult<()>;

    /// Merge child paths under `path`. Keys are relative paths (may
    /// contain `/`); a `Value::Null` entry deletes that child. All
    /// entries become visible to subscribers together.
    async fn update(&self, path: &str, children: BTreeMap<String, Value>) -> StoreResult<()>;

    /// Remove the subtree at `path`.
    async fn delete(&self, path: &str) -> StoreResult<()>;

    /// Attach a live subscription to `path`.
    fn subscribe(&self, path: &str, handler: SnapshotHandler) -> SubscriptionId;

    /// Detach; unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Decode a keyed-collection snapshot into `(key, record)` entries.
///
/// The store holds collections as objects keyed by id, but legacy
/// writers left plain arrays in places; both shapes are accepted.
/// Null entries (deleted records) are skipped. Object records missing
/// an `id` field get it backfilled from their key.
pub fn snapshot_entries(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let mut v = v.clone();
                if let Value::Object(obj) = &mut v
                    && !obj.contains_key("id")
                {
                    obj.insert("id".to_string(), Value::String(k.clone()));
                }
                (k.clone(), v)
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| {
                let key = i.to_string();
                let mut v = v.clone();
                if let Value::Object(obj) = &mut v
                    && !obj.contains_key("id")
                {
                    obj.insert("id".to_string(), Value::String(key.clone()));
                }
                (key, v)
            })
            .collect(),
        _ => Vec::new(),
    }
}
