//! Authoritative in-memory tables
//!
//! One live mirror per entity type, updated only by the store
//! subscription callback. Consumers get read-only clones plus a
//! [`SyncEvent`](crate::core::SyncEvent) per replacement on the bus.

use serde_json::Value;
use std::sync::Arc;

use shared::models::{
    AttendanceRecord, CatalogPlan, Enquiry, Member, MessageTemplates, Notification, Payment, Plan,
    Settings,
};

use crate::core::{paths, Config, SyncBus};
use crate::store::{MirrorStore, SubscriptionId};

use super::{Collection, Singleton};

/// All live mirrors
#[derive(Clone)]
pub struct Tables {
    pub members: Collection<Member>,
    pub attendance: Collection<AttendanceRecord>,
    pub payments: Collection<Payment>,
    pub enquiries: Collection<Enquiry>,
    pub notifications: Collection<Notification>,
    pub plans: Collection<Plan>,
    pub workout_plans: Collection<CatalogPlan>,
    pub diet_plans: Collection<CatalogPlan>,
    pub settings: Singleton<Settings>,
    pub templates: Singleton<MessageTemplates>,
    pub roll_counter: Singleton<i64>,
}

impl Tables {
    pub fn new() -> Self {
        Tables {
            members: Collection::new(paths::MEMBERS),
            attendance: Collection::new(paths::ATTENDANCE),
            payments: Collection::new(paths::PAYMENTS),
            enquiries: Collection::new(paths::ENQUIRIES),
            notifications: Collection::new(paths::NOTIFICATIONS),
            plans: Collection::with_defaults(paths::PLANS, Plan::defaults()),
            workout_plans: Collection::with_defaults(
                paths::WORKOUT_PLANS,
                CatalogPlan::default_workouts(),
            ),
            diet_plans: Collection::with_defaults(paths::DIET_PLANS, CatalogPlan::default_diets()),
            settings: Singleton::new(paths::SETTINGS, Settings::default()),
            templates: Singleton::new(paths::MSG_TEMPLATES, MessageTemplates::default()),
            roll_counter: Singleton::new(paths::ROLL_COUNTER, 1),
        }
    }

    /// Open one live subscription per collection. Returns the handles
    /// for detach; drop them via [`MirrorStore::unsubscribe`] when the
    /// state shuts down.
    pub fn attach(&self, store: &Arc<dyn MirrorStore>, config: &Config, bus: &SyncBus) -> Vec<SubscriptionId> {
        let mut subs = Vec::new();

        macro_rules! watch {
            ($table:expr) => {{
                let table = $table.clone();
                let bus = bus.clone();
                let name = table.name();
                subs.push(store.subscribe(
                    &config.path(name),
                    Arc::new(move |snapshot: Value| {
                        table.apply_snapshot(&snapshot);
                        bus.publish(name);
                    }),
                ));
            }};
        }

        watch!(self.members);
        watch!(self.attendance);
        watch!(self.payments);
        watch!(self.enquiries);
        watch!(self.notifications);
        watch!(self.plans);
        watch!(self.workout_plans);
        watch!(self.diet_plans);
        watch!(self.settings);
        watch!(self.templates);
        watch!(self.roll_counter);

        tracing::info!(count = subs.len(), "live subscriptions attached");
        subs
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}
