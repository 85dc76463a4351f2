//! Notification Engine
//!
//! Scheduled scan over the member mirror that emits operational
//! alerts: birthdays, upcoming and past expiries, pending dues. Each
//! rule family is gated by a Settings toggle and deduplicated on
//! `(kind, member, local calendar day)` against the notification
//! mirror, so repeated passes within one day are no-ops.
//!
//! Every emission of one pass, plus any expired-status write-backs,
//! lands in a single multi-path update.

mod worker;

pub use worker::NotificationWorker;

use serde_json::Value;
use std::collections::BTreeMap;

use shared::models::{Member, MemberStatus, Notification, NotificationKind};
use shared::util::push_id;
use shared::AppResult;

use crate::core::{paths, GymState};
use crate::domain::membership::days_left;
use crate::utils::time::is_birthday;

/// Run one full notification pass. Returns how many alerts were
/// emitted (zero when everything was already covered today).
pub async fn run_pass(state: &GymState) -> AppResult<usize> {
    let settings = state.tables.settings.get();
    let members = state.tables.members.all();
    let existing = state.tables.notifications.all();
    let today = state.today();

    let covered = |kind: NotificationKind, member_id: &str, marker: Option<&str>| {
        existing.iter().any(|n| {
            n.kind == kind
                && n.member_id == member_id
                && state.local_day(n.created_at) == today
                && marker.is_none_or(|m| n.message.contains(m))
        })
    };

    let mut fresh: Vec<Notification> = Vec::new();
    let mut status_writes: BTreeMap<String, Value> = BTreeMap::new();

    for member in &members {
        if settings.birthday_wish
            && is_birthday(&member.dob, today)
            && !covered(NotificationKind::Birthday, &member.id, None)
        {
            fresh.push(alert(
                state,
                member,
                NotificationKind::Birthday,
                "Birthday Today",
                format!("{} has birthday today. Send wishes!", member.name),
            ));
        }

        if settings.expiry_reminder {
            match days_left(member, today) {
                Some(left) if (0..=settings.expiry_alert_days).contains(&left) => {
                    if !covered(NotificationKind::Expiry, &member.id, None) {
                        let days = if left == 1 { "day" } else { "days" };
                        fresh.push(alert(
                            state,
                            member,
                            NotificationKind::Expiry,
                            "Membership Expiring",
                            format!(
                                "{}'s plan expires in {left} {days} ({})",
                                member.name, member.end_date
                            ),
                        ));
                    }
                }
                Some(left) if left < 0 => {
                    // The dedup marker distinguishes the expired alert
                    // from an earlier same-day expiring alert.
                    if !covered(NotificationKind::Expiry, &member.id, Some("expired")) {
                        fresh.push(alert(
                            state,
                            member,
                            NotificationKind::Expiry,
                            "Membership Expired",
                            format!("{}'s plan expired on {}", member.name, member.end_date),
                        ));
                        if member.status != MemberStatus::Expired {
                            status_writes.insert(
                                format!(
                                    "{}/status",
                                    state.config.record_path(paths::MEMBERS, &member.id)
                                ),
                                Value::String("expired".to_string()),
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        if settings.dues_reminder
            && member.due_amount > 0.0
            && !covered(NotificationKind::Dues, &member.id, None)
        {
            fresh.push(alert(
                state,
                member,
                NotificationKind::Dues,
                "Dues Pending",
                format!("{} has Rs. {} pending", member.name, member.due_amount),
            ));
        }
    }

    if fresh.is_empty() && status_writes.is_empty() {
        return Ok(0);
    }

    let emitted = fresh.len();
    let mut batch = status_writes;
    for notification in fresh {
        batch.insert(
            state
                .config
                .record_path(paths::NOTIFICATIONS, &notification.id),
            serde_json::to_value(&notification)?,
        );
    }
    state.store.update("", batch).await?;

    tracing::info!(emitted, "notification pass complete");
    Ok(emitted)
}

fn alert(
    state: &GymState,
    member: &Member,
    kind: NotificationKind,
    title: &str,
    message: String,
) -> Notification {
    Notification {
        id: push_id(),
        kind,
        title: title.to_string(),
        message,
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        member_phone: member.phone.clone(),
        read: false,
        created_at: state.now(),
    }
}
