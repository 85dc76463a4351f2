//! Entity Repository
//!
//! Per-collection CRUD over the mirror store plus the live in-memory
//! tables. Every create generates a push id before the write; all
//! writes are awaited by callers before dependent operations proceed
//! (the roll-counter advance follows member creation, never races
//! ahead of it). A write failure surfaces as a rejected operation;
//! the repository never retries and never rolls back sibling writes;
//! callers needing atomicity batch through the multi-path update.

pub mod collection;
pub mod tables;

pub mod attendance;
pub mod catalogs;
pub mod enquiries;
pub mod members;
pub mod notifications;
pub mod payments;
pub mod plans;
pub mod roll_counter;
pub mod settings;
pub mod templates;

pub use collection::{Collection, Singleton};
pub use tables::Tables;

use serde::Serialize;
use serde_json::Value;
use shared::AppResult;
use std::collections::BTreeMap;

use crate::core::GymState;

/// Write one freshly-keyed record at `<root>/<collection>/<id>`.
pub async fn create_record<T: Serialize>(
    state: &GymState,
    collection: &str,
    id: &str,
    record: &T,
) -> AppResult<()> {
    let value = serde_json::to_value(record)?;
    state
        .store
        .set(&state.config.record_path(collection, id), value)
        .await?;
    Ok(())
}

/// Merge `fields` into one record (child-path update).
pub async fn update_record(
    state: &GymState,
    collection: &str,
    id: &str,
    fields: BTreeMap<String, Value>,
) -> AppResult<()> {
    state
        .store
        .update(&state.config.record_path(collection, id), fields)
        .await?;
    Ok(())
}

/// Remove one record; referencing history (payments, attendance)
/// stays behind as orphaned-but-valid records.
pub async fn delete_record(state: &GymState, collection: &str, id: &str) -> AppResult<()> {
    state
        .store
        .delete(&state.config.record_path(collection, id))
        .await?;
    Ok(())
}

/// Replace a whole collection or singleton path.
pub async fn set_path(state: &GymState, collection: &str, value: Value) -> AppResult<()> {
    state.store.set(&state.config.path(collection), value).await?;
    Ok(())
}
