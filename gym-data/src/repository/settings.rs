//! Gym settings

use shared::models::Settings;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};

pub fn get(state: &GymState) -> Settings {
    state.tables.settings.get()
}

pub async fn save(state: &GymState, settings: Settings) -> AppResult<()> {
    if settings.expiry_alert_days < 0 {
        return Err(AppError::validation("Expiry alert window cannot be negative"));
    }
    super::set_path(state, paths::SETTINGS, serde_json::to_value(&settings)?).await?;
    tracing::info!("settings saved");
    Ok(())
}
