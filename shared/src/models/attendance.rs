//! Attendance Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of an attendance event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceType {
    #[default]
    #[serde(rename = "checkin")]
    CheckIn,
    #[serde(rename = "checkout")]
    CheckOut,
}

/// Attendance record
///
/// Immutable once created; presence is always re-derived by folding a
/// day's records in timestamp order, never stored. Member name/phone/
/// roll are denormalized snapshots so a later rename does not rewrite
/// history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub member_id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default)]
    pub member_phone: String,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub member_roll_no: i64,
    #[serde(rename = "type", default)]
    pub kind: AttendanceType,
    pub timestamp: DateTime<Utc>,
}
