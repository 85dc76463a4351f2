//! Dashboard aggregates

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

use shared::models::{Member, MemberStatus, Payment};

use super::membership::member_status;

/// Front-dashboard headline numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_members: usize,
    pub active_members: usize,
    pub expiring_members: usize,
    pub expired_members: usize,
    pub today_admissions: usize,
    pub pending_dues: f64,
}

pub fn dashboard_stats(
    members: &[Member],
    today: NaiveDate,
    alert_days: i64,
    tz: Tz,
) -> DashboardStats {
    let mut stats = DashboardStats {
        total_members: members.len(),
        ..Default::default()
    };
    for member in members {
        match member_status(member, today, alert_days) {
            MemberStatus::Active => stats.active_members += 1,
            MemberStatus::Expiring => stats.expiring_members += 1,
            MemberStatus::Expired => stats.expired_members += 1,
        }
        if member.created_at.with_timezone(&tz).date_naive() == today {
            stats.today_admissions += 1;
        }
        if member.due_amount > 0.0 {
            stats.pending_dues += member.due_amount;
        }
    }
    stats
}

/// Collection totals over the payment history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentStats {
    pub today_collection: f64,
    pub month_collection: f64,
    pub total_revenue: f64,
}

/// Sum collections by the local calendar day of each payment.
pub fn payment_stats(payments: &[Payment], today: NaiveDate, tz: Tz) -> PaymentStats {
    let mut stats = PaymentStats::default();
    for payment in payments {
        let day = payment.date.with_timezone(&tz).date_naive();
        stats.total_revenue += payment.amount;
        if day == today {
            stats.today_collection += payment.amount;
        }
        if day.year() == today.year() && day.month() == today.month() {
            stats.month_collection += payment.amount;
        }
    }
    stats
}
