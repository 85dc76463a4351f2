//! Roll number counter
//!
//! One integer at `appData/rollCounter` holding the next roll number
//! to assign. Advancing always ratchets: the counter never moves
//! backwards, even when staff hand-picked a lower roll.

use serde_json::json;

use shared::AppResult;

use crate::core::{paths, GymState};

/// Next roll number to assign.
pub fn current(state: &GymState) -> i64 {
    state.tables.roll_counter.get()
}

/// Record that `used` was assigned: counter becomes
/// `max(current, used + 1)`.
pub async fn advance(state: &GymState, used: i64) -> AppResult<i64> {
    let next = current(state).max(used + 1);
    super::set_path(state, paths::ROLL_COUNTER, json!(next)).await?;
    Ok(next)
}
