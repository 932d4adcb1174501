//! Phone number and channel address normalization.

use campaign_core::DispatchError;

/// Channel-address prefix Twilio uses for WhatsApp numbers.
pub const WHATSAPP_PREFIX: &str = "whatsapp:";

/// Longest subscriber number E.164 allows, country code included.
const MAX_DIGITS: usize = 15;

/// Normalize a phone number to E.164.
///
/// All whitespace is removed, then a leading `+` followed by 2 to 15 digits
/// is required, the first of which is a non-zero country code digit. No
/// country code is ever guessed and no punctuation is accepted.
///
/// # Example
///
/// ```rust
/// use twilio_dispatch::normalize_phone;
///
/// assert_eq!(normalize_phone("+91 98765 43210").unwrap(), "+919876543210");
/// assert!(normalize_phone("9876543210").is_err());
/// ```
pub fn normalize_phone(raw: &str) -> Result<String, DispatchError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return Err(invalid(raw, "phone number is empty"));
    }
    if !compact.starts_with('+') {
        return Err(invalid(
            raw,
            "phone number must be in E.164 format with a leading '+' and country code",
        ));
    }

    let digits = &compact[1..];
    if digits.is_empty() {
        return Err(invalid(raw, "phone number has no digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(raw, "phone number may only contain digits after '+'"));
    }
    if digits.starts_with('0') {
        return Err(invalid(raw, "country code cannot start with 0"));
    }
    if digits.len() < 2 || digits.len() > MAX_DIGITS {
        return Err(invalid(raw, "phone number must have between 2 and 15 digits"));
    }

    Ok(compact)
}

/// Normalize a WhatsApp address: `whatsapp:` followed by an E.164 number.
///
/// The prefix is added when missing and never doubled. The number under an
/// existing prefix is still normalized.
pub fn normalize_whatsapp_address(raw: &str) -> Result<String, DispatchError> {
    let trimmed = raw.trim();
    let number = trimmed.strip_prefix(WHATSAPP_PREFIX).unwrap_or(trimmed);

    Ok(format!("{}{}", WHATSAPP_PREFIX, normalize_phone(number)?))
}

fn invalid(value: &str, reason: &str) -> DispatchError {
    DispatchError::InvalidNumber {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
