//! Phone number helpers for WhatsApp recipients.
//!
//! The gateway expects bare international numbers: digits only, no `+`,
//! country code first (e.g. `5511999999999`).

const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// Normalize a user-entered phone number.
///
/// Non-digits are dropped and leading zeros stripped. When a default country
/// code is given it is prefixed unless the number already starts with it.
/// Returns `None` if no digits remain.
pub fn normalize_number(raw: &str, default_country_code: Option<&str>) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return None;
    }

    let country: String = default_country_code
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    if country.is_empty() || digits.starts_with(&country) {
        Some(digits.to_string())
    } else {
        Some(format!("{}{}", country, digits))
    }
}

/// Whether `number` is an already-normalized number the gateway will accept.
pub fn is_valid_number(number: &str) -> bool {
    (MIN_DIGITS..=MAX_DIGITS).contains(&number.len()) && number.chars().all(|c| c.is_ascii_digit())
}
