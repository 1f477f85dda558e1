//! Phone number normalization.
//!
//! Twilio formats the same number differently across endpoints (creation
//! responses, listings, webhook parameters), so numbers are compared in
//! digit-normalized form and the `+1` country marker is added or removed
//! explicitly.

/// Country code marker used for US numbers.
pub const COUNTRY_PREFIX: &str = "+1";

/// Prefix `number` with `+1` unless it already carries it.
pub fn internationalize(number: &str) -> String {
    if number.starts_with(COUNTRY_PREFIX) {
        number.to_string()
    } else {
        format!("{}{}", COUNTRY_PREFIX, number)
    }
}

/// Remove a leading `+1` marker, if present.
pub fn strip_internationalize(number: &str) -> String {
    number
        .strip_prefix(COUNTRY_PREFIX)
        .unwrap_or(number)
        .to_string()
}

/// Keep only the ASCII digits of `number`.
pub fn digits(number: &str) -> String {
    number.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whether two numbers are equal once formatting is ignored.
pub fn same_digits(a: &str, b: &str) -> bool {
    digits(a) == digits(b)
}
