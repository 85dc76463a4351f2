//! Payment Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a payment settled the balance it was collected against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Paid,
    Partial,
}

/// Payment record
///
/// Immutable except for deletion. Deleting a payment is an audit-trail
/// correction only: the owning member's balances are deliberately not
/// adjusted (see the ledger module).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub member_id: String,
    #[serde(default)]
    pub member_name: String,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub amount: f64,
    /// Free-text kind: "New Admission" | "Renewal" | "Dues Collection" | "Payment"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub notes: String,
}

/// Payment creation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub member_id: String,
    pub member_name: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub notes: String,
}

pub mod kind {
    pub const NEW_ADMISSION: &str = "New Admission";
    pub const RENEWAL: &str = "Renewal";
    pub const DUES_COLLECTION: &str = "Dues Collection";
    pub const PAYMENT: &str = "Payment";
}
