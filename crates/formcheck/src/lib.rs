//! # formcheck
//!
//! Declarative form validation that keeps error annotations in sync with the
//! latest pass.
//!
//! ## Example
//!
//! ```rust
//! use formcheck::{validate, FieldConfig, FormConfig, MemoryForm};
//!
//! let config = FormConfig::new()
//!     .field_error_class("FormField-error")
//!     .message_error_class("ErrorMessage")
//!     .field(
//!         "user-email",
//!         FieldConfig::new()
//!             .rule("email", true)
//!             .message("Please enter a valid email address."),
//!     );
//!
//! let mut form = MemoryForm::new();
//! let root = form.root();
//! let email = form.append_input(root, "user-email", "email", "not-an-email");
//!
//! assert!(!validate(&mut form, &config).unwrap());
//! assert_eq!(
//!     form.message_after(email, "ErrorMessage"),
//!     Some("Please enter a valid email address.")
//! );
//! ```
//!
//! ## Architecture
//!
//! - **`formcheck-rules`** - the named predicates (re-exported as [`rules`])
//! - **[`config`]** - per-call configuration, loadable from JSON or TOML
//! - **[`dom`]** - the [`FormDom`] capability a form backend implements
//! - **[`memory`]** - an in-memory [`FormDom`]
//! - **[`reconciler`]** - the validation pass

pub mod config;
pub mod dom;
pub mod error;
pub mod memory;
pub mod reconciler;

pub use config::{FieldConfig, FormConfig, LoadError, DEFAULT_ERROR_CLASS, DEFAULT_MESSAGE};
pub use dom::{DomError, FieldKind, FieldState, FormDom};
pub use error::ValidationError;
pub use memory::{MemoryForm, NodeId};
pub use reconciler::{validate, ErrorMap, Reconciler, ValidationReport};

pub use formcheck_rules as rules;
pub use formcheck_rules::{ConfigError, Rule, RuleRegistry};
