// src/phone.rs
//
// Safaricom MSISDN validation and normalization. Accepted input forms:
// 254XXXXXXXXX, +254XXXXXXXXX, or 0XXXXXXXXX where the subscriber number
// starts with 7 or 1. Canonical form is 254XXXXXXXXX.

use crate::errors::{PaymentError, Result};

pub const INVALID_PHONE_MESSAGE: &str =
    "Invalid phone number. Use format: 254712345678 or 0712345678";

/// Validates a user-entered M-Pesa number and returns the canonical
/// `254XXXXXXXXX` form. Whitespace is stripped before validation.
/// Normalization is idempotent: a canonical number passes through unchanged.
pub fn normalize_msisdn(input: &str) -> Result<String> {
    let phone: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    // A leading '+' is only valid in front of the country code.
    let digits = match phone.strip_prefix('+') {
        Some(rest) if rest.starts_with("254") => rest,
        Some(_) => return Err(PaymentError::validation(INVALID_PHONE_MESSAGE)),
        None => phone.as_str(),
    };

    if let Some(subscriber) = digits.strip_prefix("254") {
        if is_subscriber_number(subscriber) {
            return Ok(digits.to_string());
        }
    } else if let Some(subscriber) = digits.strip_prefix('0') {
        if is_subscriber_number(subscriber) {
            return Ok(format!("254{}", subscriber));
        }
    }

    Err(PaymentError::validation(INVALID_PHONE_MESSAGE))
}

// Nine digits, leading 7 or 1 per the national numbering plan.
fn is_subscriber_number(subscriber: &str) -> bool {
    subscriber.len() == 9
        && subscriber.starts_with(['7', '1'])
        && subscriber.bytes().all(|b| b.is_ascii_digit())
}
