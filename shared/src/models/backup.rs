//! Backup Snapshot Model

use super::{
    AttendanceRecord, CatalogPlan, Enquiry, Member, MessageTemplates, Payment, Plan, Settings,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full-store snapshot produced by `backup()` and consumed by
/// `restore()`. Collections are arrays here; restore re-keys them by
/// id before writing (overwrite, not merge).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub enquiries: Vec<Enquiry>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub workout_plans: Vec<CatalogPlan>,
    #[serde(default)]
    pub diet_plans: Vec<CatalogPlan>,
    #[serde(default)]
    pub message_templates: Option<MessageTemplates>,
    #[serde(default)]
    pub roll_counter: i64,
    #[serde(default = "Utc::now")]
    pub backup_date: DateTime<Utc>,
}
