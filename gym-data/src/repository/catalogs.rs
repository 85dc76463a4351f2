//! Workout / diet catalogs
//!
//! Whole-catalog replacement only; staff edit these as documents.

use serde_json::{json, Map};

use shared::models::CatalogPlan;
use shared::util::push_id;
use shared::AppResult;

use crate::core::{paths, GymState};

pub async fn save_workouts(state: &GymState, plans: Vec<CatalogPlan>) -> AppResult<()> {
    save(state, paths::WORKOUT_PLANS, plans).await
}

pub async fn save_diets(state: &GymState, plans: Vec<CatalogPlan>) -> AppResult<()> {
    save(state, paths::DIET_PLANS, plans).await
}

async fn save(state: &GymState, collection: &str, plans: Vec<CatalogPlan>) -> AppResult<()> {
    let mut keyed = Map::new();
    for mut plan in plans {
        if plan.id.is_empty() {
            plan.id = push_id();
        }
        keyed.insert(plan.id.clone(), serde_json::to_value(&plan)?);
    }
    super::set_path(state, collection, json!(keyed)).await
}
