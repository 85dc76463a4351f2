//! Enquiry Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Enquiry pipeline status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    #[default]
    New,
    Followup,
    Converted,
    Lost,
}

/// Walk-in / phone enquiry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: EnquiryStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Calendar date (YYYY-MM-DD); defaults to three days after creation
    #[serde(default)]
    pub follow_up_date: String,
}

/// Enquiry creation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Partial enquiry edit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub interest: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub status: Option<EnquiryStatus>,
    pub follow_up_date: Option<String>,
}
