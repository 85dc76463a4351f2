//! Member records
//!
//! Direct member CRUD plus ranked search. Admission and renewal go
//! through the ledger module instead; edits here re-derive the
//! financial totals so the invariant `total = admission + plan -
//! discount`, `due = total - paid` survives any partial update.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use shared::models::{Member, MemberUpdate};
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::utils::validation::{validate_phone, validate_required_text};

pub fn get(state: &GymState, id: &str) -> AppResult<Member> {
    state
        .tables
        .members
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::not_found("Member"))
}

/// Merge a partial edit into one member record.
///
/// Only the provided fields are written; the financial totals are
/// recomputed from the merged values and written alongside them in the
/// same child-path update, so a reader never observes a stale total.
pub async fn update_member(state: &GymState, id: &str, patch: MemberUpdate) -> AppResult<Member> {
    let mut member = get(state, id)?;

    if let Some(name) = &patch.name {
        validate_required_text(name, "Name")?;
    }
    if let Some(phone) = &patch.phone {
        validate_phone(phone)?;
    }

    let mut fields: BTreeMap<String, Value> = BTreeMap::new();

    macro_rules! merge {
        ($field:ident, $wire:literal) => {
            if let Some(v) = patch.$field {
                fields.insert($wire.to_string(), json!(v));
                member.$field = v;
            }
        };
    }

    merge!(name, "name");
    merge!(father_name, "fatherName");
    merge!(phone, "phone");
    merge!(alt_phone, "altPhone");
    merge!(email, "email");
    merge!(dob, "dob");
    merge!(age, "age");
    merge!(gender, "gender");
    merge!(address, "address");
    merge!(height, "height");
    merge!(weight, "weight");
    merge!(blood_group, "bloodGroup");
    merge!(plan, "plan");
    merge!(plan_id, "planId");
    merge!(plan_amount, "planAmount");
    merge!(admission_fee, "admissionFee");
    merge!(discount, "discount");
    merge!(payment_mode, "paymentMode");
    merge!(paid_amount, "paidAmount");
    merge!(start_date, "startDate");
    merge!(end_date, "endDate");
    merge!(notes, "notes");

    // photo: Some(None) clears the stored reference
    if let Some(photo) = patch.photo {
        fields.insert("photo".to_string(), json!(photo));
        member.photo = photo;
    }

    member.total_amount = member.admission_fee + member.plan_amount - member.discount;
    member.due_amount = member.total_amount - member.paid_amount;
    fields.insert("totalAmount".to_string(), json!(member.total_amount));
    fields.insert("dueAmount".to_string(), json!(member.due_amount));

    super::update_record(state, paths::MEMBERS, id, fields).await?;
    tracing::info!(member_id = %id, "member updated");
    Ok(member)
}

/// Remove one member. Payment and attendance history referencing the
/// member stays behind untouched.
pub async fn delete_member(state: &GymState, id: &str) -> AppResult<()> {
    let member = get(state, id)?;
    super::delete_record(state, paths::MEMBERS, id).await?;
    tracing::info!(member_id = %id, roll_no = member.roll_no, "member deleted");
    Ok(())
}

/// Ranked front-desk search over the live mirror.
pub fn search_members(state: &GymState, query: &str) -> Vec<Member> {
    rank(&state.tables.members.all(), query)
}

/// Score and order members against a query. Exact roll number wins,
/// then exact name, prefix matches, and finally substring matches on
/// name, father's name, phone or roll. Non-matching members are
/// dropped; a blank query lists everyone unfiltered.
pub fn rank(members: &[Member], query: &str) -> Vec<Member> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return members.to_vec();
    }
    let mut scored: Vec<(i32, Member)> = members
        .iter()
        .filter_map(|m| {
            let score = score_member(m, &q)?;
            Some((score, m.clone()))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.roll_no.cmp(&b.1.roll_no)));
    scored.into_iter().map(|(_, m)| m).collect()
}

fn score_member(m: &Member, q: &str) -> Option<i32> {
    let roll = m.roll_no.to_string();
    let name = m.name.to_lowercase();
    let father = m.father_name.to_lowercase();
    let phone = m.phone.to_lowercase();
    if roll == q {
        Some(100)
    } else if name == q {
        Some(90)
    } else if roll.starts_with(q) {
        Some(80)
    } else if name.starts_with(q) {
        Some(70)
    } else if phone.starts_with(q) {
        Some(60)
    } else if name.contains(q) || father.contains(q) || phone.contains(q) || roll.contains(q) {
        Some(40)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(roll: i64, name: &str, phone: &str) -> Member {
        serde_json::from_value(json!({
            "id": format!("m{roll}"),
            "rollNo": roll,
            "name": name,
            "phone": phone,
        }))
        .unwrap()
    }

    #[test]
    fn exact_roll_beats_name_prefix() {
        let members = vec![
            member(1, "Ravi Kumar", "9876543210"),
            member(12, "One Two", "9000000000"),
        ];
        let hits = rank(&members, "1");
        assert_eq!(hits[0].roll_no, 1); // exact roll
        assert_eq!(hits[1].roll_no, 12); // roll prefix
    }

    #[test]
    fn phone_and_substring_matches_rank_lower() {
        let members = vec![
            member(1, "Ravi", "9876543210"),
            member(2, "Gaurav", "8000000000"),
        ];
        let hits = rank(&members, "rav");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Ravi"); // name prefix over contains
        assert!(rank(&members, "98765")[0].phone.starts_with("98765"));
    }

    #[test]
    fn father_name_matches_and_blank_query_lists_everyone() {
        let mut members = vec![
            member(1, "Ravi", "9876543210"),
            member(2, "Sanjay", "8000000000"),
        ];
        members[1].father_name = "Ramesh Kumar".to_string();

        let hits = rank(&members, "ramesh");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Sanjay");

        // blank query is "show me the register", not "show nothing"
        assert_eq!(rank(&members, "").len(), 2);
        assert_eq!(rank(&members, "  ").len(), 2);
    }
}
