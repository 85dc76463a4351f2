//! Notification Worker
//!
//! Background task driving the notification pass. Runs once on start,
//! then re-runs whenever the member mirror changes. Passes are
//! idempotent within a day, so a lagged or coalesced event stream only
//! costs a redundant no-op pass, never a missed alert.

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::core::{paths, GymState};

pub struct NotificationWorker {
    state: GymState,
    shutdown: CancellationToken,
}

impl NotificationWorker {
    pub fn new(state: GymState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    pub async fn run(self) {
        tracing::info!("notification worker started");
        let mut events = self.state.bus.subscribe();

        // Catch up on anything that happened before the worker started
        // (the mirrors are already populated at this point).
        self.pass().await;

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Ok(event) if event.collection == paths::MEMBERS => {
                            self.pass().await;
                        }
                        Ok(_) => {}
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "sync events lagged, running catch-up pass");
                            self.pass().await;
                        }
                        Err(RecvError::Closed) => {
                            tracing::info!("sync bus closed, stopping notification worker");
                            break;
                        }
                    }
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("notification worker shutting down");
                    break;
                }
            }
        }
    }

    async fn pass(&self) {
        if let Err(e) = super::run_pass(&self.state).await {
            tracing::error!(error = %e, "notification pass failed");
        }
    }
}
