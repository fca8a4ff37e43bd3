use formcheck_rules::ConfigError;
use thiserror::Error;

use crate::dom::DomError;

/// Errors that abort a validation pass.
///
/// A field failing its rules is not an error; it ends up in the
/// [`crate::ErrorMap`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid form configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dom(#[from] DomError),
}
