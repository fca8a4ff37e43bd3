//! Loose value coercion
//!
//! Rule parameters arrive as JSON values from the form configuration while
//! field values are always strings. Browser-side callers configure rules with
//! permissive values (`minLength: "7"`, `email: 1`, `equals: false`), so the
//! registry coerces them the way the page script would: abstract equality,
//! number conversion and truthiness.

use serde_json::Value;

/// Truthiness of a configuration value.
///
/// `false`, `0`, `""` and `null` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric conversion of a value. `None` stands for NaN.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => string_to_number(s),
        Value::Array(_) | Value::Object(_) => string_to_number(&to_primitive_string(value)),
    }
}

/// Abstract (type-coercing) equality.
///
/// Quirks are kept on purpose: `"0" == false`, `"" == 0`, `" 1 " == 1`,
/// `"1,2" == [1, 2]`. `null` only equals `null`, and two arrays or objects
/// never compare equal since they are distinct instances.
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(_), Value::Number(_)) => numbers_equal(to_number(a), to_number(b)),
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            numbers_equal(to_number(a), to_number(b))
        }
        (Value::Bool(_), _) => {
            let n = to_number(a).map(number_value).unwrap_or(Value::Null);
            loose_equals(&n, b)
        }
        (_, Value::Bool(_)) => loose_equals(b, a),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => false,
        (Value::Array(_) | Value::Object(_), _) => {
            loose_equals(&Value::String(to_primitive_string(a)), b)
        }
        (_, Value::Array(_) | Value::Object(_)) => loose_equals(b, a),
    }
}

fn numbers_equal(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

fn number_value(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// String form of a value as it appears when joined or concatenated.
fn to_primitive_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(number_to_string).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(to_primitive_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Whitespace stripped by string trimming and number conversion in the page.
///
/// Unicode `White_Space` minus NEL (U+0085), plus the byte order mark.
pub fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Trim a field value the way the page does
pub fn js_trim(s: &str) -> &str {
    s.trim_matches(is_js_whitespace)
}

fn string_to_number(s: &str) -> Option<f64> {
    let s = js_trim(s);
    if s.is_empty() {
        return Some(0.0);
    }

    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        // Accumulate in f64: literals past u64::MAX are still finite numbers.
        return Some(digits.chars().fold(0.0, |acc, c| {
            acc * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0))
        }));
    }

    // f64::from_str also accepts "inf"/"nan" spellings, which are not numbers here.
    let decimal_chars = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E');
    if !s.chars().all(decimal_chars) {
        return None;
    }
    s.parse::<f64>().ok()
}
