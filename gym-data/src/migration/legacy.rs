//! Legacy schema
//!
//! Wire shapes of the predecessor application's `gymData/` tree. Every
//! field is optional and leniently typed: that dataset was written by
//! hand-rolled clients over years and mixes numbers, strings, and
//! missing keys freely. Decoding must never fail a whole record over
//! one loose field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use shared::models::serde_helpers;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMember {
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub mobile_number: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub plan_id: String,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub due_amount: f64,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "entries_lenient")]
    pub payment_history: Vec<LegacyPaymentEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPaymentEntry {
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub amount: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPlan {
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub days: i64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub price: f64,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAttendance {
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub member_id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub serial_number: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub entry_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEnquiry {
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub mobile: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySettings {
    #[serde(default)]
    pub gym_name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub phone: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub whatsapp: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub max_capacity: i64,
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub expiry_alert_days: i64,
}

/// Legacy per-occasion message texts; each maps onto one slot of the
/// current template set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMessageSettings {
    #[serde(default)]
    pub birthday_wish: Option<String>,
    #[serde(default)]
    pub new_admission: Option<String>,
    #[serde(default)]
    pub expired_member: Option<String>,
    #[serde(default)]
    pub expiring_soon: Option<String>,
    #[serde(default)]
    pub dues_reminder: Option<String>,
}

/// Decode a legacy list that may be a JSON array, a keyed object, or
/// junk. Null and undecodable entries are dropped.
fn entries_lenient<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let v = Value::deserialize(deserializer)?;
    let values: Vec<Value> = match v {
        Value::Array(items) => items,
        Value::Object(map) => map.into_values().collect(),
        _ => Vec::new(),
    };
    Ok(values
        .into_iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
