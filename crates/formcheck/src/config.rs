//! Form validation configuration
//!
//! The same shape is accepted from Rust builders, JSON and TOML:
//!
//! ```json
//! {
//!   "fieldErrorClass": "FormField-error",
//!   "messageErrorClass": "ErrorMessage",
//!   "fields": {
//!     "user-name": {
//!       "rules": { "minLength": 1, "maxLength": 20 },
//!       "message": "Please enter a valid username."
//!     }
//!   }
//! }
//! ```
//!
//! Rule order is significant and is preserved from the source text.

use formcheck_rules::{ConfigError, Rule, RuleRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Class applied to fields and messages when none is configured
pub const DEFAULT_ERROR_CLASS: &str = "error";

/// Message used when a field configures neither `message` nor `messages`
pub const DEFAULT_MESSAGE: &str = "Please verify your entry.";

/// Configuration for one validation pass over a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Field name to rules and messages
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,

    /// Class added to an invalid field
    #[serde(default = "default_error_class")]
    pub field_error_class: String,

    /// Class carried by the message element that follows an invalid field
    #[serde(default = "default_error_class")]
    pub message_error_class: String,
}

fn default_error_class() -> String {
    DEFAULT_ERROR_CLASS.to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            fields: IndexMap::new(),
            field_error_class: default_error_class(),
            message_error_class: default_error_class(),
        }
    }
}

/// Rules and messages for a single named field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Rule name to parameter, evaluated in this order
    #[serde(default)]
    pub rules: IndexMap<String, Value>,

    /// Generic message for any failing rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Message per failing rule; takes precedence over `message`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<IndexMap<String, String>>,
}

/// Failure to load a configuration from text
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FormConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and check a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: FormConfig = serde_json::from_str(json)?;
        config.check(&RuleRegistry::new())?;
        Ok(config)
    }

    /// Parse and check a TOML configuration
    ///
    /// ```toml
    /// field-error-class = "invalid"
    ///
    /// [fields.user-email]
    /// rules = { email = true }
    /// message = "Please enter a valid email address."
    /// ```
    ///
    /// TOML keys may also be written in camelCase (`fieldErrorClass`).
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let raw: toml::Value = toml::from_str(text)?;
        let config: FormConfig = normalize_toml(raw).try_into()?;
        config.check(&RuleRegistry::new())?;
        Ok(config)
    }

    /// Builder: add or replace a field
    pub fn field(mut self, name: impl Into<String>, field: FieldConfig) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Builder: set the field error class
    pub fn field_error_class(mut self, class: impl Into<String>) -> Self {
        self.field_error_class = class.into();
        self
    }

    /// Builder: set the message error class
    pub fn message_error_class(mut self, class: impl Into<String>) -> Self {
        self.message_error_class = class.into();
        self
    }

    /// Resolve every rule name against the registry.
    ///
    /// Fails on the first unknown rule, in field then rule order.
    pub fn check(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        for field in self.fields.values() {
            field.resolved_rules(registry)?;
        }
        Ok(())
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a rule. Re-adding a rule keeps its original position.
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<Value>) -> Self {
        self.rules.insert(name.into(), param.into());
        self
    }

    /// Builder: set the generic message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builder: set the message for one rule
    pub fn rule_message(mut self, rule: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages
            .get_or_insert_with(IndexMap::new)
            .insert(rule.into(), message.into());
        self
    }

    /// Rules with their names resolved, in declared order
    pub fn resolved_rules<'a>(
        &'a self,
        registry: &RuleRegistry,
    ) -> Result<Vec<(Rule, &'a Value)>, ConfigError> {
        self.rules
            .iter()
            .map(|(name, param)| Ok((registry.resolve(name)?, param)))
            .collect()
    }

    /// Message shown when `rule` fails.
    ///
    /// Per-rule message first, then the generic message, then
    /// [`DEFAULT_MESSAGE`].
    pub fn message_for(&self, rule: Rule) -> &str {
        if let Some(messages) = &self.messages {
            match messages.get(rule.name()) {
                Some(message) => return message,
                None => tracing::warn!(
                    rule = %rule,
                    "per-rule messages configured without an entry for the failing rule"
                ),
            }
        }

        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}

/// Accept kebab-case top-level keys in TOML files.
fn normalize_toml(value: toml::Value) -> toml::Value {
    match value {
        toml::Value::Table(table) => toml::Value::Table(
            table
                .into_iter()
                .map(|(key, value)| {
                    let key = match key.as_str() {
                        "field-error-class" => "fieldErrorClass".to_string(),
                        "message-error-class" => "messageErrorClass".to_string(),
                        _ => key,
                    };
                    (key, value)
                })
                .collect(),
        ),
        other => other,
    }
}
