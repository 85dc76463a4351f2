//! Financial Ledger
//!
//! Admission, renewal, and dues collection. Each operation keeps the
//! balance invariant `total = admission + plan - discount`, `due =
//! total - paid` on the member record and leaves an immutable payment
//! record behind for the audit trail.
//!
//! The admission pipeline is sequential: member record, then roll
//! counter, then payment, then welcome notification. A failure midway
//! stops the pipeline and surfaces the error; earlier writes stay
//! (a member without a payment record is recoverable by staff, a
//! payment without a member is not).

use chrono::NaiveDate;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use shared::models::{
    payment::kind, Member, MemberCreate, MemberStatus, NotificationCreate, NotificationKind,
    Payment, PaymentCreate, PaymentStatus, Plan,
};
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::repository;
use crate::utils::time::{add_days, format_date, parse_date};
use crate::utils::validation::{validate_phone, validate_required_text};

/// Admit a new member.
///
/// Roll numbers are unique: a hand-picked duplicate is rejected, an
/// omitted roll takes the counter value. The counter then ratchets
/// past whatever was assigned.
pub async fn admit_member(state: &GymState, input: MemberCreate) -> AppResult<Member> {
    validate_required_text(&input.name, "Name")?;
    validate_phone(&input.phone)?;

    let roll_no = input
        .roll_no
        .unwrap_or_else(|| repository::roll_counter::current(state));
    if let Some(existing) = state.tables.members.find(|m| m.roll_no == roll_no) {
        return Err(AppError::conflict(format!(
            "Roll Number {} already exists for {}",
            roll_no, existing.name
        )));
    }

    let plan = resolve_plan(state, input.plan_id.as_deref(), input.plan.as_deref());
    let start_date = input
        .start_date
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| format_date(state.today()));
    let end_date = match (&input.end_date, &plan) {
        (Some(end), _) if !end.is_empty() => end.clone(),
        (_, Some(plan)) => parse_date(&start_date)
            .map(|d| format_date(add_days(d, plan.duration)))
            .unwrap_or_default(),
        _ => String::new(),
    };

    let plan_amount = input
        .plan_amount
        .or_else(|| plan.as_ref().map(|p| p.price))
        .unwrap_or(0.0);
    let total_amount = input.admission_fee + plan_amount - input.discount;
    let paid_amount = input.paid_amount;
    let due_amount = total_amount - paid_amount;

    let member = Member {
        id: push_id(),
        roll_no,
        name: input.name,
        father_name: input.father_name,
        phone: input.phone,
        alt_phone: input.alt_phone,
        email: input.email,
        dob: input.dob,
        age: input.age,
        gender: input.gender.unwrap_or_else(|| "Male".to_string()),
        address: input.address,
        height: input.height,
        weight: input.weight,
        blood_group: input.blood_group,
        photo: input.photo,
        plan: plan
            .as_ref()
            .map(|p| p.name.clone())
            .or(input.plan)
            .unwrap_or_default(),
        plan_id: plan.as_ref().map(|p| p.id.clone()).unwrap_or_default(),
        plan_amount,
        admission_fee: input.admission_fee,
        discount: input.discount,
        payment_mode: input
            .payment_mode
            .clone()
            .unwrap_or_else(|| "Cash".to_string()),
        total_amount,
        paid_amount,
        due_amount,
        start_date,
        end_date,
        status: MemberStatus::Active,
        notes: input.notes,
        created_at: state.now(),
    };

    repository::create_record(state, paths::MEMBERS, &member.id, &member).await?;
    repository::roll_counter::advance(state, roll_no).await?;

    if paid_amount > 0.0 {
        admission_payment(state, &member, paid_amount, kind::NEW_ADMISSION).await?;
    }

    repository::notifications::add_notification(
        state,
        NotificationCreate {
            kind: NotificationKind::Welcome,
            title: "New Member Added".to_string(),
            message: format!("{} joined with {} plan", member.name, member.plan),
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            member_phone: member.phone.clone(),
        },
    )
    .await?;

    tracing::info!(member_id = %member.id, roll_no, "member admitted");
    Ok(member)
}

/// Renew a membership onto `plan_id`.
///
/// The new cycle's balance is `plan price - discount` against this
/// cycle's payment; a prior unpaid due is dropped from the member
/// record (it stays visible in the payment history).
///
/// The new cycle starts today unless `start_override` backdates it
/// (e.g. a renewal entered late); `end_override` replaces the
/// start + plan duration end date.
pub async fn renew_member(
    state: &GymState,
    member_id: &str,
    plan_id: &str,
    paid: f64,
    discount: f64,
    start_override: Option<NaiveDate>,
    end_override: Option<NaiveDate>,
) -> AppResult<Member> {
    let mut member = repository::members::get(state, member_id)?;
    let plan = state
        .tables
        .plans
        .find(|p| p.id == plan_id)
        .ok_or_else(|| AppError::not_found("Plan"))?;

    let start = start_override.unwrap_or_else(|| state.today());
    let start_date = format_date(start);
    let end_date = format_date(end_override.unwrap_or_else(|| add_days(start, plan.duration)));
    let total_amount = plan.price - discount;
    let due_amount = total_amount - paid;

    member.plan = plan.name.clone();
    member.plan_id = plan.id.clone();
    member.plan_amount = plan.price;
    member.start_date = start_date.clone();
    member.end_date = end_date.clone();
    member.status = MemberStatus::Active;
    member.discount = discount;
    member.total_amount = total_amount;
    member.paid_amount += paid;
    member.due_amount = due_amount;

    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    fields.insert("plan".to_string(), json!(member.plan));
    fields.insert("planId".to_string(), json!(member.plan_id));
    fields.insert("planAmount".to_string(), json!(member.plan_amount));
    fields.insert("startDate".to_string(), json!(start_date));
    fields.insert("endDate".to_string(), json!(end_date));
    fields.insert("status".to_string(), json!(MemberStatus::Active));
    fields.insert("discount".to_string(), json!(discount));
    fields.insert("totalAmount".to_string(), json!(total_amount));
    fields.insert("paidAmount".to_string(), json!(member.paid_amount));
    fields.insert("dueAmount".to_string(), json!(due_amount));
    repository::update_record(state, paths::MEMBERS, member_id, fields).await?;

    if paid > 0.0 {
        admission_payment(state, &member, paid, kind::RENEWAL).await?;
    }

    tracing::info!(member_id, plan = %member.plan, "membership renewed");
    Ok(member)
}

/// Collect an amount against a member's outstanding due.
///
/// The stored due is clamped at zero (overpayment never shows as a
/// negative due); the payment record is `paid` only when the balance
/// cleared.
pub async fn collect_dues(state: &GymState, member_id: &str, amount: f64) -> AppResult<Payment> {
    if amount <= 0.0 {
        return Err(AppError::validation("Amount must be positive"));
    }
    let member = repository::members::get(state, member_id)?;

    let new_paid = member.paid_amount + amount;
    let new_due = member.total_amount - new_paid;

    let mut fields: BTreeMap<String, Value> = BTreeMap::new();
    fields.insert("paidAmount".to_string(), json!(new_paid));
    fields.insert("dueAmount".to_string(), json!(new_due.max(0.0)));
    repository::update_record(state, paths::MEMBERS, member_id, fields).await?;

    let payment = repository::payments::add_payment(
        state,
        PaymentCreate {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            amount,
            kind: Some(kind::DUES_COLLECTION.to_string()),
            plan: member.plan.clone(),
            status: Some(if new_due <= 0.0 {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Partial
            }),
            mode: None,
            notes: String::new(),
        },
    )
    .await?;

    tracing::info!(member_id, amount, remaining = new_due.max(0.0), "dues collected");
    Ok(payment)
}

async fn admission_payment(
    state: &GymState,
    member: &Member,
    amount: f64,
    payment_kind: &str,
) -> AppResult<Payment> {
    repository::payments::add_payment(
        state,
        PaymentCreate {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            amount,
            kind: Some(payment_kind.to_string()),
            plan: member.plan.clone(),
            status: Some(if member.due_amount > 0.0 {
                PaymentStatus::Partial
            } else {
                PaymentStatus::Paid
            }),
            mode: Some(member.payment_mode.clone()),
            notes: String::new(),
        },
    )
    .await
}

/// Plan lookup by id first, then case-insensitive name.
fn resolve_plan(state: &GymState, plan_id: Option<&str>, plan_name: Option<&str>) -> Option<Plan> {
    if let Some(id) = plan_id.filter(|id| !id.is_empty())
        && let Some(plan) = state.tables.plans.find(|p| p.id == id)
    {
        return Some(plan);
    }
    let name = plan_name?.to_lowercase();
    state
        .tables
        .plans
        .find(|p| p.name.to_lowercase() == name)
}
