//! Legacy Migration Engine
//!
//! One-time transform of the predecessor application's `gymData/` tree
//! into the current schema under `appData/`, run on boot before the
//! live subscriptions attach. Every transformed path lands in a single
//! multi-path update together with the roll counter and the completion
//! flag, so concurrent readers observe either the old world or the
//! whole new one.
//!
//! Idempotence: paths are recomputed deterministically from the legacy
//! source, so a re-run overwrites the same records instead of
//! duplicating them. The completion flag short-circuits normal boots;
//! a flag without member data (a partial prior failure) is treated as
//! inconsistent and the migration self-heals by re-running.

pub mod legacy;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

use shared::models::{
    payment::kind, AttendanceRecord, AttendanceType, Enquiry, EnquiryStatus, Member, MemberStatus,
    MessageTemplates, Payment, PaymentStatus, Plan, Settings,
};
use shared::{AppError, AppResult};

use crate::core::{paths, Config};
use crate::store::{snapshot_entries, MirrorStore};
use crate::utils::time::{parse_12h, parse_date};

use legacy::{
    LegacyAttendance, LegacyEnquiry, LegacyMember, LegacyMessageSettings, LegacyPlan,
    LegacySettings,
};

/// What the boot-time check decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    AlreadyDone,
    NothingToMigrate,
    Migrated { members: usize, payments: usize },
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::AlreadyDone => write!(f, "already migrated"),
            MigrationOutcome::NothingToMigrate => write!(f, "no legacy data"),
            MigrationOutcome::Migrated { members, payments } => {
                write!(f, "migrated {members} members, {payments} payments")
            }
        }
    }
}

/// Boot-time migration check and (when needed) the full transform.
pub async fn run(store: &dyn MirrorStore, config: &Config) -> AppResult<MigrationOutcome> {
    let flag = store.get(&config.path(paths::MIGRATED)).await?;
    if !flag.is_null() {
        let members = store.get(&config.path(paths::MEMBERS)).await?;
        if !snapshot_entries(&members).is_empty() {
            return Ok(MigrationOutcome::AlreadyDone);
        }
        tracing::warn!(
            "migration flag set but member collection is empty; re-running migration"
        );
    }

    let legacy_root = store.get(&config.legacy_root).await?;
    let legacy_members = legacy_collection::<LegacyMember>(&legacy_root, "members");
    if legacy_members.is_empty() {
        store
            .set(
                &config.path(paths::MIGRATED),
                json!({ "at": Utc::now().to_rfc3339(), "membersMigrated": 0 }),
            )
            .await?;
        return Ok(MigrationOutcome::NothingToMigrate);
    }

    tracing::info!(members = legacy_members.len(), "migrating legacy data");
    let mut updates: BTreeMap<String, Value> = BTreeMap::new();
    let mut max_roll: i64 = 0;
    let mut payment_count = 0usize;

    // Plans first; members reference them by id.
    let mut plans: Vec<Plan> = Vec::new();
    for (_, lp) in legacy_collection::<LegacyPlan>(&legacy_root, "plans") {
        let plan = Plan {
            id: lp.id.clone(),
            name: lp.name,
            duration: if lp.days > 0 { lp.days } else { 30 },
            price: lp.price,
            description: lp.desc,
        };
        updates.insert(
            config.record_path(paths::PLANS, &plan.id),
            serde_json::to_value(&plan)?,
        );
        plans.push(plan);
    }

    // Members, extracting embedded payment history into the payments
    // collection. First history entry was the admission.
    let member_count = legacy_members.len();
    for (key, lm) in legacy_members {
        let mid = if lm.id.is_empty() { key.clone() } else { lm.id.clone() };
        let roll_no = mid.parse::<i64>().or_else(|_| key.parse::<i64>()).unwrap_or(0);
        max_roll = max_roll.max(roll_no);

        let plan = plans.iter().find(|p| p.id == lm.plan_id);
        let mut total_paid = 0.0;

        for (index, entry) in lm.payment_history.iter().enumerate() {
            total_paid += entry.amount;
            let payment = Payment {
                id: format!("p_{mid}_{index}"),
                member_id: mid.clone(),
                member_name: lm.full_name.clone(),
                amount: entry.amount,
                kind: if index == 0 {
                    kind::NEW_ADMISSION.to_string()
                } else {
                    kind::RENEWAL.to_string()
                },
                plan: plan.map(|p| p.name.clone()).unwrap_or_default(),
                date: parse_12h(&entry.date, &entry.time, config.timezone)
                    .unwrap_or_else(Utc::now),
                status: PaymentStatus::Paid,
                mode: if entry.mode.is_empty() {
                    "Cash".to_string()
                } else {
                    entry.mode.clone()
                },
                notes: String::new(),
            };
            updates.insert(
                config.record_path(paths::PAYMENTS, &payment.id),
                serde_json::to_value(&payment)?,
            );
            payment_count += 1;
        }

        let created_at = legacy_timestamp(config, &lm.join_date).unwrap_or_else(Utc::now);

        let member = Member {
            id: mid.clone(),
            roll_no,
            name: lm.full_name,
            father_name: lm.father_name,
            phone: lm.mobile_number,
            alt_phone: String::new(),
            email: String::new(),
            dob: lm.dob,
            age: String::new(),
            gender: "Male".to_string(),
            address: String::new(),
            height: String::new(),
            weight: String::new(),
            blood_group: String::new(),
            photo: None,
            plan: plan.map(|p| p.name.clone()).unwrap_or_default(),
            plan_id: lm.plan_id,
            plan_amount: plan.map(|p| p.price).unwrap_or(0.0),
            admission_fee: 0.0,
            discount: 0.0,
            payment_mode: "Cash".to_string(),
            total_amount: total_paid + lm.due_amount,
            paid_amount: total_paid,
            due_amount: lm.due_amount,
            start_date: lm.join_date,
            end_date: lm.expiry_date,
            status: status_from_legacy(&lm.status),
            notes: String::new(),
            created_at,
        };
        updates.insert(
            config.record_path(paths::MEMBERS, &mid),
            serde_json::to_value(&member)?,
        );
    }

    // Attendance: legacy data only ever recorded entries, so every
    // event becomes a check-in.
    for (key, la) in legacy_collection::<LegacyAttendance>(&legacy_root, "attendance") {
        let record = AttendanceRecord {
            id: if la.id.is_empty() { key.clone() } else { la.id },
            member_id: la.member_id,
            member_name: la.member_name,
            member_phone: String::new(),
            member_roll_no: la.serial_number,
            kind: AttendanceType::CheckIn,
            timestamp: parse_12h(&la.date, &la.entry_time, config.timezone)
                .unwrap_or_else(Utc::now),
        };
        updates.insert(
            config.record_path(paths::ATTENDANCE, &key),
            serde_json::to_value(&record)?,
        );
    }

    for (key, le) in legacy_collection::<LegacyEnquiry>(&legacy_root, "enquiries") {
        let eid = if le.id.is_empty() { key } else { le.id };
        let enquiry = Enquiry {
            id: eid.clone(),
            name: le.name,
            phone: le.mobile,
            interest: if le.plan.is_empty() {
                "Gym".to_string()
            } else {
                le.plan
            },
            source: "Walk-in".to_string(),
            notes: le.notes,
            status: enquiry_status_from_legacy(&le.status),
            created_at: legacy_timestamp(config, &le.date).unwrap_or_else(Utc::now),
            follow_up_date: String::new(),
        };
        updates.insert(
            config.record_path(paths::ENQUIRIES, &eid),
            serde_json::to_value(&enquiry)?,
        );
    }

    if let Some(ls) = legacy_singleton::<LegacySettings>(&legacy_root, "settings") {
        let mut settings = Settings::default();
        if !ls.gym_name.is_empty() {
            settings.gym_name = ls.gym_name;
        }
        settings.gym_phone = if ls.phone.is_empty() { ls.whatsapp } else { ls.phone };
        settings.gym_address = ls.address;
        settings.email = ls.email;
        settings.open_time = ls.open_time;
        settings.close_time = ls.close_time;
        settings.tagline = ls.tagline;
        if ls.max_capacity > 0 {
            settings.max_capacity = ls.max_capacity;
        }
        if ls.expiry_alert_days > 0 {
            settings.expiry_alert_days = ls.expiry_alert_days;
        }
        updates.insert(
            config.path(paths::SETTINGS),
            serde_json::to_value(&settings)?,
        );
    }

    if let Some(lt) = legacy_singleton::<LegacyMessageSettings>(&legacy_root, "messageSettings") {
        let mut templates = MessageTemplates::default();
        let adopt = |slot: &mut String, text: Option<String>| {
            if let Some(text) = text.filter(|t| !t.is_empty()) {
                *slot = text;
            }
        };
        adopt(&mut templates.birthday.whatsapp, lt.birthday_wish);
        adopt(&mut templates.welcome.whatsapp, lt.new_admission);
        adopt(&mut templates.expiry.whatsapp, lt.expired_member);
        adopt(&mut templates.renewal.whatsapp, lt.expiring_soon);
        adopt(&mut templates.dues.whatsapp, lt.dues_reminder);
        updates.insert(
            config.path(paths::MSG_TEMPLATES),
            serde_json::to_value(&templates)?,
        );
    }

    updates.insert(config.path(paths::ROLL_COUNTER), json!(max_roll + 1));
    updates.insert(
        config.path(paths::MIGRATED),
        json!({ "at": Utc::now().to_rfc3339(), "membersMigrated": member_count }),
    );

    store
        .update("", updates)
        .await
        .map_err(|e| AppError::migration(e.to_string()))?;

    Ok(MigrationOutcome::Migrated {
        members: member_count,
        payments: payment_count,
    })
}

/// Legacy date fields hold either a full timestamp or a bare
/// `YYYY-MM-DD`; bare dates land at local midnight.
fn legacy_timestamp(config: &Config, raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = raw.parse::<DateTime<Utc>>() {
        return Some(ts);
    }
    let date = parse_date(raw)?;
    config
        .timezone
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn status_from_legacy(status: &str) -> MemberStatus {
    match status.trim().to_lowercase().as_str() {
        "expired" => MemberStatus::Expired,
        "expiring" => MemberStatus::Expiring,
        _ => MemberStatus::Active,
    }
}

fn enquiry_status_from_legacy(status: &str) -> EnquiryStatus {
    match status.trim().to_lowercase().as_str() {
        "followup" | "follow-up" => EnquiryStatus::Followup,
        "converted" => EnquiryStatus::Converted,
        "lost" => EnquiryStatus::Lost,
        _ => EnquiryStatus::New,
    }
}

/// Decode one legacy collection leniently; undecodable records are
/// dropped with a warning rather than failing the whole migration.
fn legacy_collection<T: serde::de::DeserializeOwned>(root: &Value, name: &str) -> Vec<(String, T)> {
    let subtree = root.get(name).cloned().unwrap_or(Value::Null);
    snapshot_entries(&subtree)
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(decoded) => Some((key, decoded)),
            Err(e) => {
                tracing::warn!(collection = name, key = %key, error = %e, "skipping legacy record");
                None
            }
        })
        .collect()
}

fn legacy_singleton<T: serde::de::DeserializeOwned>(root: &Value, name: &str) -> Option<T> {
    let value = root.get(name)?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
