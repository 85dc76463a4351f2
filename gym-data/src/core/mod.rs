//! Core state, configuration and reactivity plumbing

pub mod bus;
pub mod config;
pub mod paths;
pub mod state;

pub use bus::{ResourceVersions, SyncBus, SyncEvent};
pub use config::Config;
pub use state::GymState;
