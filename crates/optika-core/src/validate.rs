//! Pure field validators.
//!
//! Greek landline/mobile phone shapes and a simple `local@domain.tld`
//! email test, applied to the customer form's contact fields. No side
//! effects.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Keep only the digits of a phone entry (users type spaces and dashes).
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A phone is valid when exactly 10 digits remain after stripping
/// punctuation and the number is a landline (leading 2) or mobile
/// (leading 6).
pub fn validate_phone(phone: &str) -> bool {
    let digits = normalize_phone(phone);
    digits.len() == 10 && (digits.starts_with('2') || digits.starts_with('6'))
}

/// Empty email is allowed; anything else must look like `local@domain.tld`.
pub fn validate_email(email: &str) -> bool {
    email.is_empty() || EMAIL_RE.is_match(email)
}
