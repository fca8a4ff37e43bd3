//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::loose::js_trim;

/// Word-character local part with optional single `.` / `+` separators,
/// then dot-separated host labels and a final label.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_]+\.?\+?)*[A-Za-z0-9_]+@(?:[A-Za-z0-9_]+\.)+[A-Za-z0-9_]+$")
        .expect("email pattern compiles")
});

/// Validates email format
///
/// Surrounding whitespace is ignored; no other normalization happens.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(js_trim(email))
}
