//! Configuration errors raised by the rule registry

use thiserror::Error;

/// A rule configuration that cannot be evaluated at all.
///
/// These are fatal for a validation pass: they describe a broken form
/// configuration, not a user entering a bad value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("`{0}` does not exist as a validation rule")]
    UnknownRule(String),

    #[error("invalid parameter for `{rule}`: {reason}")]
    InvalidParameter { rule: String, reason: String },
}
