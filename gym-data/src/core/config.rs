//! Data-core configuration

use chrono_tz::Tz;

/// Configuration for the data core (immutable after initialization)
///
/// Business configuration (gym name, alert window, reminder toggles)
/// lives in the [`shared::models::Settings`] singleton instead; it is
/// staff-editable data, not deployment configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root path for current-schema data
    pub app_root: String,
    /// Root path of the legacy dataset; read-only, migration only
    pub legacy_root: String,
    /// Gym-local timezone for calendar-day scoping (attendance days,
    /// notification dedup days, "today" stats)
    pub timezone: Tz,
    /// Sync bus channel capacity
    pub sync_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app_root: "appData".to_string(),
            legacy_root: "gymData".to_string(),
            timezone: chrono_tz::Asia::Kolkata,
            sync_capacity: 1024,
        }
    }
}

impl Config {
    /// Full store path of a collection, e.g. `appData/members`
    pub fn path(&self, collection: &str) -> String {
        format!("{}/{}", self.app_root, collection)
    }

    /// Full store path of one record, e.g. `appData/members/<id>`
    pub fn record_path(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.app_root, collection, id)
    }
}
