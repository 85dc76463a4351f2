//! Member Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored membership status.
///
/// Only `active` and `expired` are ever persisted; `expiring` exists
/// purely as a derived value (see `gym_data::domain::membership`).
/// Unknown legacy strings decode as `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    #[default]
    Active,
    Expiring,
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Expiring => "expiring",
            MemberStatus::Expired => "expired",
        }
    }
}

/// Lenient decode: anything that is not exactly "expired"/"expiring"
/// counts as active (legacy data holds free-text statuses).
pub fn status_lenient<'de, D>(deserializer: D) -> Result<MemberStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v.as_str() {
        Some("expired") => MemberStatus::Expired,
        Some("expiring") => MemberStatus::Expiring,
        _ => MemberStatus::Active,
    })
}

/// Member entity
///
/// Financial invariant: `total_amount = admission_fee + plan_amount -
/// discount` and `due_amount = total_amount - paid_amount` (clamped at
/// zero by dues collection). Dates are calendar strings (YYYY-MM-DD);
/// empty means unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub roll_no: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub alt_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub height: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub weight: String,
    #[serde(default)]
    pub blood_group: String,
    /// Opaque photo reference (URL or data URI); never interpreted here
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub plan: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub plan_id: String,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub plan_amount: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub admission_fee: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub discount: f64,
    #[serde(default)]
    pub payment_mode: String,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub due_amount: f64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, deserialize_with = "status_lenient")]
    pub status: MemberStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Admission payload
///
/// `name` and `phone` are required; everything else falls back to the
/// admission defaults. `roll_no = None` assigns the next counter value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub roll_no: Option<i64>,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub alt_phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub photo: Option<String>,
    /// Plan reference: by id, or by case-insensitive name
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub plan_amount: Option<f64>,
    #[serde(default)]
    pub admission_fee: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub payment_mode: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Partial member edit; `None` keeps the stored value.
///
/// Financial fields are recomputed by the ledger after the merge so
/// the total/due invariant survives edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub father_name: Option<String>,
    pub phone: Option<String>,
    pub alt_phone: Option<String>,
    pub email: Option<String>,
    pub dob: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub blood_group: Option<String>,
    pub photo: Option<Option<String>>,
    pub plan: Option<String>,
    pub plan_id: Option<String>,
    pub plan_amount: Option<f64>,
    pub admission_fee: Option<f64>,
    pub discount: Option<f64>,
    pub payment_mode: Option<String>,
    pub paid_amount: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}
