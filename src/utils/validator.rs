//! # Text Input Validation Utilities
//!
//! Custom field validators used by the request payloads through the
//! `validator` derive. Each function returns a [`ValidationError`] with a
//! stable code and a human-readable message.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;
use validator::ValidationError;

/// Phone number pattern: optional leading `+` followed by 10 to 15 digits
pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("Failed to compile phone regex"));

fn rejection(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Validates the phone number format.
///
/// # Examples
///
/// - `+12345678901` ✓ Valid
/// - `0123456789` ✓ Valid
/// - `12345` ✗ Too short
/// - `+1 234 567 890` ✗ Spaces are not allowed
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone_number) {
        Ok(())
    } else {
        Err(rejection(
            "phone_number",
            "Phone number must be a valid format (e.g., +1234567890).",
        ))
    }
}

/// Validates password complexity.
///
/// The password must be at least 8 characters long and contain at least one
/// digit, one uppercase letter and one lowercase letter.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(rejection(
            "password_length",
            "Password must be at least 8 characters long.",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(rejection(
            "password_digit",
            "Password must contain at least one digit.",
        ));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(rejection(
            "password_uppercase",
            "Password must contain at least one uppercase letter.",
        ));
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(rejection(
            "password_lowercase",
            "Password must contain at least one lowercase letter.",
        ));
    }
    Ok(())
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rejection("blank", "Value cannot be blank."))
    } else {
        Ok(())
    }
}

/// Rejects construction years after the current UTC year.
pub fn validate_not_future_year(year: i32) -> Result<(), ValidationError> {
    check_not_future_year(year, OffsetDateTime::now_utc().year())
}

fn check_not_future_year(year: i32, current_year: i32) -> Result<(), ValidationError> {
    if year > current_year {
        Err(rejection("future_year", "Year built cannot be in the future."))
    } else {
        Ok(())
    }
}
