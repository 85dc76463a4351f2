//! Derived domain views
//!
//! Pure functions over the live mirrors. Nothing here writes to the
//! store; derived values (presence, effective status, dashboard
//! numbers) are recomputed on demand from the raw records.

pub mod attendance;
pub mod membership;
pub mod stats;
