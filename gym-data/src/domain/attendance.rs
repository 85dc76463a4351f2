//! Presence derivation
//!
//! Presence is a fold over one member's records for one local calendar
//! day, in timestamp order: each check-in flips to `In`, each
//! check-out to `Out`, starting from `Out`. Duplicate events collapse
//! into the state they assert, so a stray double check-out never
//! corrupts the day.

use chrono::NaiveDate;
use chrono_tz::Tz;

use shared::models::{AttendanceRecord, AttendanceType, Member};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    In,
    Out,
}

/// Fold one member's presence for `day`.
pub fn presence_for(
    records: &[AttendanceRecord],
    member_id: &str,
    day: NaiveDate,
    tz: Tz,
) -> Presence {
    let mut events: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.member_id == member_id && r.timestamp.with_timezone(&tz).date_naive() == day)
        .collect();
    events.sort_by_key(|r| r.timestamp);
    events
        .last()
        .map(|r| match r.kind {
            AttendanceType::CheckIn => Presence::In,
            AttendanceType::CheckOut => Presence::Out,
        })
        .unwrap_or(Presence::Out)
}

/// Aggregate view of one local calendar day
#[derive(Debug, Clone, Default)]
pub struct DaySummary {
    pub check_ins: usize,
    pub check_outs: usize,
    /// Members currently inside, by fold over their own events
    pub currently_in: Vec<Member>,
    /// All of the day's records, timestamp-ordered
    pub history: Vec<AttendanceRecord>,
}

/// Build the front-desk day view: counts, who is inside right now, and
/// the ordered event history.
pub fn day_summary(
    records: &[AttendanceRecord],
    members: &[Member],
    day: NaiveDate,
    tz: Tz,
) -> DaySummary {
    let mut history: Vec<AttendanceRecord> = records
        .iter()
        .filter(|r| r.timestamp.with_timezone(&tz).date_naive() == day)
        .cloned()
        .collect();
    history.sort_by_key(|r| r.timestamp);

    let check_ins = history
        .iter()
        .filter(|r| r.kind == AttendanceType::CheckIn)
        .count();
    let check_outs = history.len() - check_ins;

    let mut inside_ids: Vec<&str> = Vec::new();
    for record in &history {
        match record.kind {
            AttendanceType::CheckIn => {
                if !inside_ids.contains(&record.member_id.as_str()) {
                    inside_ids.push(&record.member_id);
                }
            }
            AttendanceType::CheckOut => {
                inside_ids.retain(|id| *id != record.member_id);
            }
        }
    }
    let currently_in = inside_ids
        .iter()
        .filter_map(|id| members.iter().find(|m| m.id == *id).cloned())
        .collect();

    DaySummary {
        check_ins,
        check_outs,
        currently_in,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    fn record(member_id: &str, kind: &str, ts: &str) -> AttendanceRecord {
        serde_json::from_value(json!({
            "id": format!("{member_id}-{ts}"),
            "memberId": member_id,
            "type": kind,
            "timestamp": ts,
        }))
        .unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn fold_ends_on_last_event() {
        let records = vec![
            record("m1", "checkin", "2024-01-10T09:00:00+05:30"),
            record("m1", "checkout", "2024-01-10T10:00:00+05:30"),
            record("m1", "checkin", "2024-01-10T11:00:00+05:30"),
        ];
        assert_eq!(
            presence_for(&records, "m1", day("2024-01-10"), TZ),
            Presence::In
        );
        assert_eq!(
            presence_for(&records[..2], "m1", day("2024-01-10"), TZ),
            Presence::Out
        );
        assert_eq!(
            presence_for(&records, "m1", day("2024-01-11"), TZ),
            Presence::Out
        );
        assert_eq!(
            presence_for(&records, "m2", day("2024-01-10"), TZ),
            Presence::Out
        );
    }

    #[test]
    fn day_boundary_is_local_not_utc() {
        // 23:30 IST on Jan 10 is 18:00 UTC the same day; 01:00 IST on
        // Jan 11 is 19:30 UTC still Jan 10. Local days must win.
        let records = vec![record("m1", "checkin", "2024-01-10T19:30:00Z")];
        assert_eq!(
            presence_for(&records, "m1", day("2024-01-11"), TZ),
            Presence::In
        );
        assert_eq!(
            presence_for(&records, "m1", day("2024-01-10"), TZ),
            Presence::Out
        );
    }

    #[test]
    fn summary_counts_and_inside_list() {
        let records = vec![
            record("m1", "checkin", "2024-01-10T09:00:00+05:30"),
            record("m2", "checkin", "2024-01-10T09:15:00+05:30"),
            record("m1", "checkout", "2024-01-10T10:00:00+05:30"),
            // stray double check-out stays harmless
            record("m1", "checkout", "2024-01-10T10:01:00+05:30"),
        ];
        let members: Vec<Member> = vec![
            serde_json::from_value(json!({"id": "m1", "name": "Ravi"})).unwrap(),
            serde_json::from_value(json!({"id": "m2", "name": "Anita"})).unwrap(),
        ];
        let summary = day_summary(&records, &members, day("2024-01-10"), TZ);
        assert_eq!(summary.check_ins, 2);
        assert_eq!(summary.check_outs, 2);
        assert_eq!(summary.currently_in.len(), 1);
        assert_eq!(summary.currently_in[0].name, "Anita");
        assert_eq!(summary.history.len(), 4);
    }
}
