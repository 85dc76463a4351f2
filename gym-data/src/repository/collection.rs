//! Live collection mirrors
//!
//! One [`Collection`] (or [`Singleton`]) per entity type holds the
//! latest decoded snapshot. Updates come exclusively from the store
//! subscription callback, which **replaces the whole rows vector**:
//! full-snapshot semantics, never incremental patches. Reads hand out
//! clones; consumers never hold the lock across awaits.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::store::snapshot_entries;

/// Live mirror of one keyed collection
#[derive(Clone)]
pub struct Collection<T> {
    name: &'static str,
    rows: Arc<RwLock<Vec<T>>>,
    /// Keep current rows (seed defaults) when a snapshot is null;
    /// used by catalog collections that ship built-in defaults until
    /// staff write their own.
    keep_on_null: bool,
}

impl<T: DeserializeOwned + Clone> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Collection {
            name,
            rows: Arc::new(RwLock::new(Vec::new())),
            keep_on_null: false,
        }
    }

    /// Collection seeded with defaults that survive empty snapshots.
    pub fn with_defaults(name: &'static str, defaults: Vec<T>) -> Self {
        Collection {
            name,
            rows: Arc::new(RwLock::new(defaults)),
            keep_on_null: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the mirror from a whole-subtree snapshot. Undecodable
    /// records are logged and skipped rather than poisoning the rest
    /// of the snapshot (legacy data is loosely shaped).
    pub fn apply_snapshot(&self, snapshot: &Value) {
        if snapshot.is_null() && self.keep_on_null {
            return;
        }
        let mut rows = Vec::new();
        for (key, value) in snapshot_entries(snapshot) {
            match serde_json::from_value::<T>(value) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(
                        collection = self.name,
                        key = %key,
                        error = %e,
                        "skipping undecodable record"
                    );
                }
            }
        }
        *self.rows.write() = rows;
    }

    /// Clone of the full collection (snapshot-consistent).
    pub fn all(&self) -> Vec<T> {
        self.rows.read().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// First row matching `pred`, cloned.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.read().iter().find(|r| pred(r)).cloned()
    }

    /// All rows matching `pred`, cloned.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.read().iter().filter(|r| pred(r)).cloned().collect()
    }
}

/// Live mirror of a one-record path (settings, templates, counter)
#[derive(Clone)]
pub struct Singleton<T> {
    name: &'static str,
    value: Arc<RwLock<T>>,
    fallback: T,
}

impl<T: DeserializeOwned + Clone> Singleton<T> {
    pub fn new(name: &'static str, fallback: T) -> Self {
        Singleton {
            name,
            value: Arc::new(RwLock::new(fallback.clone())),
            fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace from a snapshot; null or undecodable keeps the
    /// fallback (the store may simply not hold the record yet).
    pub fn apply_snapshot(&self, snapshot: &Value) {
        if snapshot.is_null() {
            return;
        }
        match serde_json::from_value::<T>(snapshot.clone()) {
            Ok(v) => *self.value.write() = v,
            Err(e) => {
                tracing::warn!(
                    singleton = self.name,
                    error = %e,
                    "undecodable singleton snapshot, keeping fallback"
                );
                *self.value.write() = self.fallback.clone();
            }
        }
    }

    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}
