//! String validation functions

use once_cell::sync::Lazy;
use regex::Regex;

use crate::loose::js_trim;

/// `MM/DD/YYYY` with zero-padded month and day
static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0[1-9]|1[0-2])/(?:0[1-9]|[12][0-9]|3[01])/[0-9]{4}$")
        .expect("date pattern compiles")
});

/// Validates minimum length of the trimmed value.
///
/// Length counts Unicode scalar values, so `"héllo"` has length 5.
pub fn min_length(s: &str, min: f64) -> bool {
    trimmed_len(s) >= min
}

/// Validates maximum length of the trimmed value.
pub fn max_length(s: &str, max: f64) -> bool {
    trimmed_len(s) <= max
}

fn trimmed_len(s: &str) -> f64 {
    js_trim(s).chars().count() as f64
}

/// Validates the date format `MM/DD/YYYY`.
///
/// Only the shape is checked: `02/31/2024` passes.
pub fn is_valid_date(date: &str) -> bool {
    DATE_PATTERN.is_match(js_trim(date))
}
