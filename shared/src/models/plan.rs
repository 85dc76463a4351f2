//! Membership Plan Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};

/// Membership plan (catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default, deserialize_with = "serde_helpers::string_lenient")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Membership length in days
    #[serde(default, deserialize_with = "serde_helpers::i64_lenient")]
    pub duration: i64,
    #[serde(default, deserialize_with = "serde_helpers::f64_lenient")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl Plan {
    /// Built-in catalog used until staff customize plans.
    pub fn defaults() -> Vec<Plan> {
        vec![
            Plan {
                id: "1".into(),
                name: "Monthly".into(),
                duration: 30,
                price: 500.0,
                description: "1 Month Membership".into(),
            },
            Plan {
                id: "2".into(),
                name: "Quarterly".into(),
                duration: 90,
                price: 1200.0,
                description: "3 Months Membership".into(),
            },
            Plan {
                id: "3".into(),
                name: "Half Yearly".into(),
                duration: 180,
                price: 2000.0,
                description: "6 Months Membership".into(),
            },
            Plan {
                id: "4".into(),
                name: "Yearly".into(),
                duration: 365,
                price: 3500.0,
                description: "12 Months Membership".into(),
            },
        ]
    }
}
