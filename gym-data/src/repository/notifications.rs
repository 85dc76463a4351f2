//! Notification records
//!
//! Manual creation and read-state management. The scheduled passes in
//! `notify` emit their own batches directly.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use shared::models::{Notification, NotificationCreate};
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};

pub async fn add_notification(
    state: &GymState,
    input: NotificationCreate,
) -> AppResult<Notification> {
    let notification = Notification {
        id: push_id(),
        kind: input.kind,
        title: input.title,
        message: input.message,
        member_id: input.member_id,
        member_name: input.member_name,
        member_phone: input.member_phone,
        read: false,
        created_at: state.now(),
    };
    super::create_record(state, paths::NOTIFICATIONS, &notification.id, &notification).await?;
    Ok(notification)
}

pub async fn mark_read(state: &GymState, id: &str) -> AppResult<()> {
    if state.tables.notifications.find(|n| n.id == id).is_none() {
        return Err(AppError::not_found("Notification"));
    }
    let mut fields = BTreeMap::new();
    fields.insert("read".to_string(), json!(true));
    super::update_record(state, paths::NOTIFICATIONS, id, fields).await
}

/// Flip every unread flag in one multi-path update, so a crash midway
/// never leaves a half-read list.
pub async fn mark_all_read(state: &GymState) -> AppResult<()> {
    let unread: Vec<String> = state
        .tables
        .notifications
        .filter(|n| !n.read)
        .into_iter()
        .map(|n| n.id)
        .collect();
    if unread.is_empty() {
        return Ok(());
    }
    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    for id in unread {
        fields.insert(format!("{id}/read"), json!(true));
    }
    state
        .store
        .update(&state.config.path(paths::NOTIFICATIONS), fields)
        .await?;
    Ok(())
}

pub async fn clear_all(state: &GymState) -> AppResult<()> {
    state
        .store
        .delete(&state.config.path(paths::NOTIFICATIONS))
        .await?;
    tracing::info!("notification list cleared");
    Ok(())
}

pub async fn delete_notification(state: &GymState, id: &str) -> AppResult<()> {
    super::delete_record(state, paths::NOTIFICATIONS, id).await
}
