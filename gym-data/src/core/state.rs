//! Data-core state handle
//!
//! [`GymState`] holds shared references to the store, the live
//! tables, and the sync bus. `Arc`-backed fields make cloning cheap;
//! every operation module takes `&GymState`.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::{Config, SyncBus};
use crate::migration;
use crate::notify::NotificationWorker;
use crate::repository::Tables;
use crate::store::{MirrorStore, SubscriptionId};
use shared::AppResult;

/// Cheap-clone handle over the whole data core
#[derive(Clone)]
pub struct GymState {
    /// Immutable configuration
    pub config: Config,
    /// The shared remote store (or its in-memory stand-in)
    pub store: Arc<dyn MirrorStore>,
    /// Live in-memory mirrors, one per entity type
    pub tables: Tables,
    /// Collection change notifications
    pub bus: SyncBus,
    shutdown: CancellationToken,
    subs: Arc<SubscriptionGuard>,
}

/// Detaches the live subscriptions when the last state clone drops.
struct SubscriptionGuard {
    store: Arc<dyn MirrorStore>,
    ids: Vec<SubscriptionId>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.store.unsubscribe(id);
        }
    }
}

impl GymState {
    /// Boot the data core:
    ///
    /// 1. Run the legacy migration to completion (a failure is logged
    ///    and leaves the flag unset so the next boot retries; it
    ///    never crashes startup).
    /// 2. Attach one live subscription per collection; each delivers
    ///    its initial snapshot before this returns.
    ///
    /// Background tasks (notification worker) start separately via
    /// [`GymState::start_background_tasks`].
    pub async fn initialize(store: Arc<dyn MirrorStore>, config: Config) -> AppResult<Self> {
        match migration::run(store.as_ref(), &config).await {
            Ok(report) => {
                tracing::info!(outcome = %report, "legacy migration check complete");
            }
            Err(e) => {
                tracing::error!(error = %e, "legacy migration failed; flag left unset for retry");
            }
        }

        let bus = SyncBus::new(config.sync_capacity);
        let tables = Tables::new();
        let ids = tables.attach(&store, &config, &bus);

        Ok(GymState {
            config,
            store: store.clone(),
            tables,
            bus,
            shutdown: CancellationToken::new(),
            subs: Arc::new(SubscriptionGuard { store, ids }),
        })
    }

    /// Start the notification worker; call once after initialize.
    pub fn start_background_tasks(&self) {
        let worker = NotificationWorker::new(self.clone(), self.shutdown.clone());
        tokio::spawn(async move {
            worker.run().await;
        });
    }

    /// Signal background tasks to stop.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Today's calendar date in the gym's timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.config.timezone).date_naive()
    }

    /// Calendar day of a stored timestamp, in the gym's timezone.
    pub fn local_day(&self, ts: DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.config.timezone).date_naive()
    }
}
