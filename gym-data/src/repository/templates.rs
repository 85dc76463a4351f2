//! Message templates

use shared::models::MessageTemplates;
use shared::AppResult;

use crate::core::{paths, GymState};

pub fn get(state: &GymState) -> MessageTemplates {
    state.tables.templates.get()
}

pub async fn save(state: &GymState, templates: MessageTemplates) -> AppResult<()> {
    super::set_path(state, paths::MSG_TEMPLATES, serde_json::to_value(&templates)?).await?;
    tracing::info!("message templates saved");
    Ok(())
}
