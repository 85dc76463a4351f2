//! Backup & Restore
//!
//! `backup` snapshots the live mirrors into one portable document;
//! `restore` re-keys each collection by record id and writes the whole
//! snapshot back in a single multi-path update. Restore overwrites:
//! present collections replace the stored ones wholesale, records
//! absent from the snapshot are gone afterwards.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use shared::models::BackupSnapshot;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};

pub fn backup(state: &GymState) -> BackupSnapshot {
    BackupSnapshot {
        members: state.tables.members.all(),
        attendance: state.tables.attendance.all(),
        payments: state.tables.payments.all(),
        enquiries: state.tables.enquiries.all(),
        plans: state.tables.plans.all(),
        settings: Some(state.tables.settings.get()),
        workout_plans: state.tables.workout_plans.all(),
        diet_plans: state.tables.diet_plans.all(),
        message_templates: Some(state.tables.templates.get()),
        roll_counter: state.tables.roll_counter.get(),
        backup_date: state.now(),
    }
}

pub async fn restore(state: &GymState, snapshot: BackupSnapshot) -> AppResult<()> {
    let mut updates: BTreeMap<String, Value> = BTreeMap::new();

    insert_keyed(&mut updates, state, paths::MEMBERS, &snapshot.members, |m| &m.id)?;
    insert_keyed(&mut updates, state, paths::ATTENDANCE, &snapshot.attendance, |a| &a.id)?;
    insert_keyed(&mut updates, state, paths::PAYMENTS, &snapshot.payments, |p| &p.id)?;
    insert_keyed(&mut updates, state, paths::ENQUIRIES, &snapshot.enquiries, |e| &e.id)?;
    insert_keyed(&mut updates, state, paths::PLANS, &snapshot.plans, |p| &p.id)?;
    insert_keyed(&mut updates, state, paths::WORKOUT_PLANS, &snapshot.workout_plans, |w| &w.id)?;
    insert_keyed(&mut updates, state, paths::DIET_PLANS, &snapshot.diet_plans, |d| &d.id)?;

    if let Some(settings) = &snapshot.settings {
        updates.insert(
            state.config.path(paths::SETTINGS),
            serde_json::to_value(settings)?,
        );
    }
    if let Some(templates) = &snapshot.message_templates {
        updates.insert(
            state.config.path(paths::MSG_TEMPLATES),
            serde_json::to_value(templates)?,
        );
    }
    if snapshot.roll_counter > 0 {
        updates.insert(
            state.config.path(paths::ROLL_COUNTER),
            json!(snapshot.roll_counter),
        );
    }

    if updates.is_empty() {
        return Err(AppError::validation("Backup contains no data"));
    }

    state.store.update("", updates).await?;
    tracing::info!("backup restored");
    Ok(())
}

fn insert_keyed<T: Serialize>(
    updates: &mut BTreeMap<String, Value>,
    state: &GymState,
    collection: &str,
    rows: &[T],
    id_of: impl Fn(&T) -> &str,
) -> AppResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut keyed = Map::new();
    for row in rows {
        let id = id_of(row);
        if id.is_empty() {
            continue;
        }
        keyed.insert(id.to_string(), serde_json::to_value(row)?);
    }
    updates.insert(state.config.path(collection), Value::Object(keyed));
    Ok(())
}
