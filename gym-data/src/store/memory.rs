//! In-process mirror store
//!
//! Backs every test and offline operation with the same contract the
//! remote store provides: a JSON tree plus whole-subtree snapshot
//! delivery. Local writes deliver snapshots synchronously before the
//! write future resolves, matching the remote client's local-cache
//! behavior (a caller that awaited a write observes its own change in
//! the mirror immediately).

use super::{SnapshotHandler, StoreError, StoreResult, SubscriptionId};
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;

struct Subscription {
    path: Vec<String>,
    handler: SnapshotHandler,
}

/// In-memory [`super::MirrorStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    tree: RwLock<Value>,
    subs: DashMap<SubscriptionId, Subscription>,
    /// Test fault injection: writes under this prefix are rejected,
    /// simulating a store-side permission denial.
    fail_prefix: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            tree: RwLock::new(Value::Object(Default::default())),
            subs: DashMap::new(),
            fail_prefix: RwLock::new(None),
        }
    }

    /// Reject every subsequent write under `prefix` (None clears).
    pub fn reject_writes_under(&self, prefix: Option<&str>) {
        *self.fail_prefix.write() = prefix.map(|p| p.to_string());
    }

    fn check_writable(&self, path: &str) -> StoreResult<()> {
        if let Some(prefix) = self.fail_prefix.read().as_deref()
            && path.starts_with(prefix)
        {
            return Err(StoreError::Rejected {
                path: path.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    fn segments(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect()
    }

    /// Like [`Self::segments`] but rejects empty segments (leading,
    /// trailing or doubled separators) instead of dropping them. The
    /// empty path addresses the root and stays valid.
    fn segments_checked(path: &str) -> StoreResult<Vec<String>> {
        if path.is_empty() {
            return Ok(Vec::new());
        }
        if path.split('/').any(|s| s.is_empty()) {
            return Err(StoreError::BadPath(path.to_string()));
        }
        Ok(path.split('/').map(|s| s.to_string()).collect())
    }

    fn read_at<'a>(root: &'a Value, segments: &[String]) -> &'a Value {
        let mut node = root;
        for seg in segments {
            match node {
                Value::Object(map) => match map.get(seg) {
                    Some(v) => node = v,
                    None => return &Value::Null,
                },
                _ => return &Value::Null,
            }
        }
        node
    }

    /// Write `value` at `segments`, creating intermediate objects.
    /// `Value::Null` removes the node.
    fn write_at(root: &mut Value, segments: &[String], value: Value) {
        if segments.is_empty() {
            *root = if value.is_null() {
                Value::Object(Default::default())
            } else {
                value
            };
            return;
        }
        let mut node = root;
        for seg in &segments[..segments.len() - 1] {
            if !node.is_object() {
                *node = Value::Object(Default::default());
            }
            node = node
                .as_object_mut()
                .expect("intermediate node is an object")
                .entry(seg.clone())
                .or_insert_with(|| Value::Object(Default::default()));
        }
        if !node.is_object() {
            *node = Value::Object(Default::default());
        }
        let map = node.as_object_mut().expect("parent node is an object");
        let last = &segments[segments.len() - 1];
        if value.is_null() {
            map.remove(last);
        } else {
            map.insert(last.clone(), value);
        }
    }

    /// True when one path is a (segment-wise) prefix of the other:
    /// either write-inside-subscription or subscription-inside-write.
    fn overlaps(sub: &[String], changed: &[String]) -> bool {
        let n = sub.len().min(changed.len());
        sub[..n] == changed[..n]
    }

    /// Deliver fresh snapshots to every subscription overlapping any
    /// changed path. Snapshots are cloned under the read lock and the
    /// handlers run after it is released.
    fn notify(&self, changed: &[Vec<String>]) {
        let mut pending: Vec<(SnapshotHandler, Value)> = Vec::new();
        {
            let tree = self.tree.read();
            for entry in self.subs.iter() {
                let sub = entry.value();
                if changed.iter().any(|c| Self::overlaps(&sub.path, c)) {
                    pending.push((
                        sub.handler.clone(),
                        Self::read_at(&tree, &sub.path).clone(),
                    ));
                }
            }
        }
        for (handler, snapshot) in pending {
            handler(snapshot);
        }
    }
}

#[async_trait]
impl super::MirrorStore for MemoryStore {
    async fn get(&self, path: &str) -> StoreResult<Value> {
        let segments = Self::segments(path);
        Ok(Self::read_at(&self.tree.read(), &segments).clone())
    }

    async fn set(&self, path: &str, value: Value) -> StoreResult<()> {
        self.check_writable(path)?;
        let segments = Self::segments_checked(path)?;
        {
            let mut tree = self.tree.write();
            Self::write_at(&mut tree, &segments, value);
        }
        self.notify(&[segments]);
        Ok(())
    }

    async fn update(&self, path: &str, children: BTreeMap<String, Value>) -> StoreResult<()> {
        let base = Self::segments_checked(path)?;
        let mut changed = Vec::with_capacity(children.len());
        for key in children.keys() {
            let full = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}/{key}")
            };
            // Atomic: any unwritable or malformed path rejects the
            // whole batch.
            self.check_writable(&full)?;
            let mut segments = base.clone();
            segments.extend(Self::segments_checked(key)?);
            changed.push(segments);
        }
        {
            let mut tree = self.tree.write();
            for (segments, (_, value)) in changed.iter().zip(children) {
                Self::write_at(&mut tree, segments, value);
            }
        }
        self.notify(&changed);
        Ok(())
    }

    async fn delete(&self, path: &str) -> StoreResult<()> {
        self.set(path, Value::Null).await
    }

    fn subscribe(&self, path: &str, handler: SnapshotHandler) -> SubscriptionId {
        let id = SubscriptionId::new();
        let segments = Self::segments(path);
        // Initial snapshot on attach, before any change lands.
        let snapshot = Self::read_at(&self.tree.read(), &segments).clone();
        handler(snapshot);
        self.subs.insert(
            id,
            Subscription {
                path: segments,
                handler,
            },
        );
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subs.remove(&id);
    }
}
