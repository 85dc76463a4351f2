//! Shared types for the gym data core
//!
//! Entity models, error types and small utilities used by the
//! `gym-data` crate and by embedders (UI shells, sync tooling).
//! Models serialize with the camelCase field names the remote store
//! already holds, so a mirrored snapshot round-trips byte-compatible.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult};
pub use serde::{Deserialize, Serialize};
