//! Membership status derivation

use chrono::NaiveDate;

use shared::models::{Member, MemberStatus};

use crate::utils::time::{days_between, parse_date};

/// Effective status of a member on `today`.
///
/// Purely derived from the stored end date; the persisted `status`
/// field lags until the notification pass writes it back. A missing or
/// unparseable end date counts as active: open-ended memberships never
/// alarm.
pub fn member_status(member: &Member, today: NaiveDate, alert_days: i64) -> MemberStatus {
    let Some(end) = parse_date(&member.end_date) else {
        return MemberStatus::Active;
    };
    let left = days_between(today, end);
    if left < 0 {
        MemberStatus::Expired
    } else if left <= alert_days {
        MemberStatus::Expiring
    } else {
        MemberStatus::Active
    }
}

/// Days until expiry (negative once past); `None` for open-ended
/// memberships.
pub fn days_left(member: &Member, today: NaiveDate) -> Option<i64> {
    parse_date(&member.end_date).map(|end| days_between(today, end))
}
