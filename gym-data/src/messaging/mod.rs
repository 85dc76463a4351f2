//! Outgoing Messages
//!
//! Token substitution for the staff-editable message templates plus a
//! plain-text payment receipt. Rendering is pure; delivery (chat app,
//! SMS) happens outside this layer.

use shared::models::{Member, Payment, Settings};

use crate::utils::time::display_date;

/// Fill a template's `{token}` placeholders from one member.
///
/// `amount` overrides the `{amount}` token for payment contexts;
/// otherwise both `{amount}` and `{due_amount}` render the member's
/// outstanding due. Unknown tokens are left as-is so a typo in a
/// custom template is visible instead of silently vanishing.
pub fn fill_template(
    template: &str,
    member: &Member,
    settings: &Settings,
    amount: Option<f64>,
) -> String {
    if template.is_empty() {
        return String::new();
    }
    let expiry = display_date(&member.end_date);
    template
        .replace("{name}", &member.name)
        .replace("{phone}", &member.phone)
        .replace("{plan}", &member.plan)
        .replace("{rollNo}", &member.roll_no.to_string())
        .replace("{start_date}", &display_date(&member.start_date))
        .replace("{expiry_date}", &expiry)
        .replace("{endDate}", &expiry)
        .replace("{due_amount}", &format_amount(member.due_amount))
        .replace(
            "{amount}",
            &format_amount(amount.unwrap_or(member.due_amount)),
        )
        .replace("{gym_name}", &settings.gym_name)
        .replace("{gym_phone}", &settings.gym_phone)
}

/// Render a shareable plain-text receipt for one payment.
pub fn payment_receipt(member: &Member, payment: &Payment, settings: &Settings) -> String {
    const RULE: &str = "======================";
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        settings.gym_name.clone(),
    ];
    if !settings.gym_phone.is_empty() {
        lines.push(format!("Phone: {}", settings.gym_phone));
    }
    lines.push(RULE.to_string());
    lines.push("PAYMENT RECEIPT".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Name      : {}", member.name));
    lines.push(format!("Roll No   : {}", member.roll_no));
    lines.push(format!("Mobile    : {}", member.phone));
    lines.push(RULE.to_string());
    let plan = if payment.plan.is_empty() {
        &member.plan
    } else {
        &payment.plan
    };
    lines.push(format!("Plan      : {}", if plan.is_empty() { "-" } else { plan }));
    lines.push(format!("Amount    : Rs. {}", format_amount(payment.amount)));
    lines.push(format!("Mode      : {}", payment.mode));
    lines.push(format!(
        "Date      : {}",
        display_date(&payment.date.date_naive().to_string())
    ));
    lines.push(format!(
        "Status    : {}",
        serde_json::to_value(payment.status)
            .ok()
            .and_then(|v| v.as_str().map(|s| s.to_uppercase()))
            .unwrap_or_default()
    ));
    if !member.end_date.is_empty() {
        lines.push(format!("Valid Till: {}", display_date(&member.end_date)));
    }
    lines.push(RULE.to_string());
    lines.push(format!("Thank you for choosing {}!", settings.gym_name));
    lines.join("\n")
}

/// Whole rupees render without a decimal tail.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount}")
    }
}
