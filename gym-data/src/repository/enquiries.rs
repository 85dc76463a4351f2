//! Enquiry records

use serde_json::{json, Value};
use std::collections::BTreeMap;

use shared::models::{Enquiry, EnquiryCreate, EnquiryStatus, EnquiryUpdate};
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::utils::time::{add_days, format_date};
use crate::utils::validation::{validate_phone, validate_required_text};

pub async fn create_enquiry(state: &GymState, input: EnquiryCreate) -> AppResult<Enquiry> {
    validate_required_text(&input.name, "Name")?;
    validate_phone(&input.phone)?;

    let enquiry = Enquiry {
        id: push_id(),
        name: input.name,
        phone: input.phone,
        interest: input.interest.unwrap_or_else(|| "Gym".to_string()),
        source: input.source.unwrap_or_else(|| "Walk-in".to_string()),
        notes: input.notes,
        status: EnquiryStatus::New,
        created_at: state.now(),
        // default follow-up window: three days out
        follow_up_date: format_date(add_days(state.today(), 3)),
    };
    super::create_record(state, paths::ENQUIRIES, &enquiry.id, &enquiry).await?;
    tracing::info!(enquiry_id = %enquiry.id, "enquiry created");
    Ok(enquiry)
}

pub async fn update_enquiry(state: &GymState, id: &str, patch: EnquiryUpdate) -> AppResult<()> {
    if state.tables.enquiries.find(|e| e.id == id).is_none() {
        return Err(AppError::not_found("Enquiry"));
    }
    if let Some(phone) = &patch.phone {
        validate_phone(phone)?;
    }

    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    if let Some(v) = patch.name {
        validate_required_text(&v, "Name")?;
        fields.insert("name".to_string(), json!(v));
    }
    if let Some(v) = patch.phone {
        fields.insert("phone".to_string(), json!(v));
    }
    if let Some(v) = patch.interest {
        fields.insert("interest".to_string(), json!(v));
    }
    if let Some(v) = patch.source {
        fields.insert("source".to_string(), json!(v));
    }
    if let Some(v) = patch.notes {
        fields.insert("notes".to_string(), json!(v));
    }
    if let Some(v) = patch.status {
        fields.insert("status".to_string(), json!(v));
    }
    if let Some(v) = patch.follow_up_date {
        fields.insert("followUpDate".to_string(), json!(v));
    }
    if fields.is_empty() {
        return Ok(());
    }
    super::update_record(state, paths::ENQUIRIES, id, fields).await
}

pub async fn delete_enquiry(state: &GymState, id: &str) -> AppResult<()> {
    if state.tables.enquiries.find(|e| e.id == id).is_none() {
        return Err(AppError::not_found("Enquiry"));
    }
    super::delete_record(state, paths::ENQUIRIES, id).await
}
