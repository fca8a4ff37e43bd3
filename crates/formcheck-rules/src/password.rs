//! Character-class requirements, typically used on password fields

/// Characters accepted by `requireSymbols`
pub const SYMBOLS: &[char] = &[
    '-', '+', '_', '!', '@', '#', '$', '%', '^', '&', '*', '.', ',', '?',
];

/// At least one ASCII digit
pub fn has_number(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// At least one uppercase letter `A-Z`
pub fn has_uppercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

/// At least one lowercase letter `a-z`
pub fn has_lowercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

/// At least one character from [`SYMBOLS`]
pub fn has_symbol(value: &str) -> bool {
    value.chars().any(|c| SYMBOLS.contains(&c))
}
