//! Payment records
//!
//! Direct payment creation for ad-hoc collections. Ledger operations
//! (admission, renewal, dues) write their own payment records with the
//! right kind and balance linkage.

use shared::models::{payment::kind, Payment, PaymentCreate, PaymentStatus};
use shared::util::push_id;
use shared::{AppError, AppResult};

use crate::core::{paths, GymState};
use crate::utils::validation::validate_required_text;

pub async fn add_payment(state: &GymState, input: PaymentCreate) -> AppResult<Payment> {
    validate_required_text(&input.member_id, "Member")?;
    if input.amount <= 0.0 {
        return Err(AppError::validation("Amount must be positive"));
    }

    let payment = Payment {
        id: push_id(),
        member_id: input.member_id,
        member_name: input.member_name,
        amount: input.amount,
        kind: input.kind.unwrap_or_else(|| kind::PAYMENT.to_string()),
        plan: input.plan,
        date: state.now(),
        status: input.status.unwrap_or(PaymentStatus::Paid),
        mode: input.mode.unwrap_or_else(|| "Cash".to_string()),
        notes: input.notes,
    };
    super::create_record(state, paths::PAYMENTS, &payment.id, &payment).await?;
    tracing::info!(payment_id = %payment.id, amount = payment.amount, "payment recorded");
    Ok(payment)
}

/// Remove one payment record. Audit-trail correction only: the owning
/// member's paid/due balances are not adjusted.
pub async fn delete_payment(state: &GymState, id: &str) -> AppResult<()> {
    if state.tables.payments.find(|p| p.id == id).is_none() {
        return Err(AppError::not_found("Payment"));
    }
    super::delete_record(state, paths::PAYMENTS, id).await?;
    tracing::info!(payment_id = %id, "payment deleted");
    Ok(())
}
