//! Settings Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};

/// Singleton gym configuration record
///
/// The three reminder toggles gate the notification engine's rule
/// families; `expiry_alert_days` is the "expiring soon" window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub gym_name: String,
    #[serde(default)]
    pub gym_phone: String,
    #[serde(default)]
    pub gym_address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default = "default_capacity", deserialize_with = "serde_helpers::i64_lenient")]
    pub max_capacity: i64,
    #[serde(default = "default_admission_fee", deserialize_with = "serde_helpers::f64_lenient")]
    pub admission_fee: f64,
    #[serde(default = "default_alert_days", deserialize_with = "serde_helpers::i64_lenient")]
    pub expiry_alert_days: i64,
    #[serde(default = "default_true")]
    pub birthday_wish: bool,
    #[serde(default = "default_true")]
    pub expiry_reminder: bool,
    #[serde(default = "default_true")]
    pub dues_reminder: bool,
}

fn default_capacity() -> i64 {
    50
}

fn default_admission_fee() -> f64 {
    200.0
}

fn default_alert_days() -> i64 {
    7
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            gym_name: "My Gym".to_string(),
            gym_phone: String::new(),
            gym_address: String::new(),
            email: String::new(),
            open_time: String::new(),
            close_time: String::new(),
            tagline: String::new(),
            max_capacity: default_capacity(),
            admission_fee: default_admission_fee(),
            expiry_alert_days: default_alert_days(),
            birthday_wish: true,
            expiry_reminder: true,
            dues_reminder: true,
        }
    }
}
