//! Input validation helpers

use shared::{AppError, AppResult};

/// Require a non-blank text field.
pub fn validate_required_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Indian mobile number: exactly 10 digits after stripping separators.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.len() == 10
}

pub fn validate_phone(phone: &str) -> AppResult<()> {
    if !is_valid_phone(phone) {
        return Err(AppError::validation("Phone number must be 10 digits"));
    }
    Ok(())
}
