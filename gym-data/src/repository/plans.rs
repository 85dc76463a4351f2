//! Plan catalog

use serde_json::{json, Map};

use shared::models::Plan;
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::utils::validation::validate_required_text;

fn validate(plan: &Plan) -> AppResult<()> {
    validate_required_text(&plan.name, "Plan name")?;
    if plan.duration <= 0 {
        return Err(AppError::validation("Plan duration must be positive"));
    }
    if plan.price < 0.0 {
        return Err(AppError::validation("Plan price cannot be negative"));
    }
    Ok(())
}

pub async fn add_plan(state: &GymState, mut plan: Plan) -> AppResult<Plan> {
    validate(&plan)?;
    if plan.id.is_empty() {
        plan.id = push_id();
    }
    super::create_record(state, paths::PLANS, &plan.id, &plan).await?;
    Ok(plan)
}

pub async fn update_plan(state: &GymState, plan: Plan) -> AppResult<()> {
    validate(&plan)?;
    if state.tables.plans.find(|p| p.id == plan.id).is_none() {
        return Err(AppError::not_found("Plan"));
    }
    super::create_record(state, paths::PLANS, &plan.id, &plan).await
}

pub async fn delete_plan(state: &GymState, id: &str) -> AppResult<()> {
    if state.tables.plans.find(|p| p.id == id).is_none() {
        return Err(AppError::not_found("Plan"));
    }
    super::delete_record(state, paths::PLANS, id).await
}

/// Replace the whole catalog, re-keyed by plan id. Plans without an id
/// get one assigned; the write is a single whole-path set so the
/// catalog is never observed half-replaced.
pub async fn save_all(state: &GymState, plans: Vec<Plan>) -> AppResult<()> {
    let mut keyed = Map::new();
    for mut plan in plans {
        validate(&plan)?;
        if plan.id.is_empty() {
            plan.id = push_id();
        }
        keyed.insert(plan.id.clone(), serde_json::to_value(&plan)?);
    }
    super::set_path(state, paths::PLANS, json!(keyed)).await
}
