//! Gym Operations Data Core
//!
//! Local, reactive mirror of a shared remote keyed store, plus every
//! piece of business state derived from it: membership status,
//! day-scoped attendance presence, financial ledgers, deduplicated
//! operational alerts, and the one-time migration of legacy records.
//!
//! # Module structure
//!
//! ```text
//! gym-data/src/
//! ├── core/          # config, state handle, sync bus, path layout
//! ├── store/         # remote mirror store seam + in-memory impl
//! ├── repository/    # live collections + per-entity CRUD
//! ├── migration/     # one-time legacy schema migration
//! ├── domain/        # pure derivations (status, presence, stats)
//! ├── ledger/        # admission / renewal / dues operations
//! ├── notify/        # notification generation engine + worker
//! ├── messaging/     # template fill + receipt text
//! ├── backup/        # full-store backup & restore
//! └── utils/         # logging, time, validation helpers
//! ```
//!
//! Control flow on boot: the migration engine runs to completion (or
//! verifies it already ran), then [`GymState::initialize`] attaches a
//! live subscription per collection; derivation, notification and
//! ledger code reacts to the mirrors from there.

pub mod backup;
pub mod core;
pub mod domain;
pub mod ledger;
pub mod messaging;
pub mod migration;
pub mod notify;
pub mod repository;
pub mod store;
pub mod utils;

// Re-export public handle types
pub use crate::core::{Config, GymState, SyncBus, SyncEvent};
pub use crate::store::{MemoryStore, MirrorStore};
pub use shared::{AppError, AppResult};
