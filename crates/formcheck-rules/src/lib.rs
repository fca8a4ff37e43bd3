//! formcheck rules
//!
//! The fixed registry of named validation predicates. Every rule is a pure
//! function of a field input and the parameter configured for it; nothing in
//! this crate knows about forms or the DOM.
//!
//! Rule names are the camelCase names used in form configuration:
//! `email`, `minLength`, `maxLength`, `equals`, `date`, `requireSelection`,
//! `requireNumbers`, `requireUppercase`, `requireLowercase`, `requireSymbols`.

pub mod collection;
pub mod email;
pub mod error;
pub mod loose;
pub mod password;
pub mod rule;
pub mod string;

pub use collection::{group_value, has_selection, SelectionItem};
pub use email::is_valid_email;
pub use error::ConfigError;
pub use loose::{is_js_whitespace, is_truthy, js_trim, loose_equals, to_number};
pub use password::{has_lowercase, has_number, has_symbol, has_uppercase, SYMBOLS};
pub use rule::{Rule, RuleInput, RuleRegistry};
pub use string::{is_valid_date, max_length, min_length};
