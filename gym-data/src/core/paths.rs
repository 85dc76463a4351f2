//! Store path layout
//!
//! All current-schema data lives under one namespaced root (default
//! `appData`) so the untouched legacy dataset (default `gymData`) can
//! coexist in the same store. These are the collection names below
//! that root; the legacy root is only ever read, and only during
//! migration.

pub const MEMBERS: &str = "members";
pub const ATTENDANCE: &str = "attendance";
pub const PAYMENTS: &str = "payments";
pub const ENQUIRIES: &str = "enquiries";
pub const NOTIFICATIONS: &str = "notifications";
pub const PLANS: &str = "plans";
pub const SETTINGS: &str = "settings";
pub const WORKOUT_PLANS: &str = "workoutPlans";
pub const DIET_PLANS: &str = "dietPlans";
/// Message template singleton; the legacy client named this path
/// "messageSettings" and the name is kept for store compatibility.
pub const MSG_TEMPLATES: &str = "messageSettings";
pub const ROLL_COUNTER: &str = "rollCounter";
/// Migration completion flag (timestamp + migrated count)
pub const MIGRATED: &str = "_migrated";
