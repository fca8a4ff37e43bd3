//! Rule names and the registry that evaluates them

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::collection::{group_value, has_selection, SelectionItem};
use crate::email::is_valid_email;
use crate::error::ConfigError;
use crate::loose::{is_truthy, loose_equals, to_number};
use crate::password::{has_lowercase, has_number, has_symbol, has_uppercase};
use crate::string::{is_valid_date, max_length, min_length};

/// A named validation predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Email,
    MinLength,
    MaxLength,
    Equals,
    Date,
    RequireSelection,
    RequireNumbers,
    RequireUppercase,
    RequireLowercase,
    RequireSymbols,
}

impl Rule {
    pub const ALL: [Rule; 10] = [
        Rule::Email,
        Rule::MinLength,
        Rule::MaxLength,
        Rule::Equals,
        Rule::Date,
        Rule::RequireSelection,
        Rule::RequireNumbers,
        Rule::RequireUppercase,
        Rule::RequireLowercase,
        Rule::RequireSymbols,
    ];

    /// Name used in form configuration
    pub fn name(self) -> &'static str {
        match self {
            Rule::Email => "email",
            Rule::MinLength => "minLength",
            Rule::MaxLength => "maxLength",
            Rule::Equals => "equals",
            Rule::Date => "date",
            Rule::RequireSelection => "requireSelection",
            Rule::RequireNumbers => "requireNumbers",
            Rule::RequireUppercase => "requireUppercase",
            Rule::RequireLowercase => "requireLowercase",
            Rule::RequireSymbols => "requireSymbols",
        }
    }

    /// Flag-style rules take an enable flag instead of a comparison parameter.
    /// A falsy flag skips the rule.
    pub fn is_flag(self) -> bool {
        !matches!(self, Rule::MinLength | Rule::MaxLength | Rule::Equals)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == name)
            .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))
    }
}

/// What a rule is evaluated against
#[derive(Debug, Clone, Copy)]
pub enum RuleInput<'a> {
    /// Trimmed value of a text-like field
    Value(&'a str),
    /// Every same-named checkbox or radio element
    Group(&'a [SelectionItem]),
}

impl<'a> RuleInput<'a> {
    /// Value seen by scalar rules. Groups present their checked member's value.
    pub fn scalar(&self) -> &'a str {
        match *self {
            RuleInput::Value(value) => value,
            RuleInput::Group(items) => group_value(items),
        }
    }
}

/// The fixed set of rules, looked up by name.
///
/// Holds no state, so one instance can serve any number of forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleRegistry;

impl RuleRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a configured rule name
    pub fn resolve(&self, name: &str) -> Result<Rule, ConfigError> {
        name.parse()
    }

    /// Resolve and evaluate a rule by name
    pub fn evaluate(
        &self,
        name: &str,
        input: RuleInput<'_>,
        param: &Value,
    ) -> Result<bool, ConfigError> {
        let rule = self.resolve(name)?;
        self.check(rule, input, param)
    }

    /// Evaluate a rule. `Ok(false)` is a validation failure; `Err` means the
    /// parameter itself is unusable.
    pub fn check(
        &self,
        rule: Rule,
        input: RuleInput<'_>,
        param: &Value,
    ) -> Result<bool, ConfigError> {
        if rule.is_flag() && !is_truthy(param) {
            tracing::trace!(rule = %rule, "flag disabled, skipping");
            return Ok(true);
        }

        let passed = match rule {
            Rule::Email => is_valid_email(input.scalar()),
            Rule::MinLength => min_length(input.scalar(), length_param(rule, param)?),
            Rule::MaxLength => max_length(input.scalar(), length_param(rule, param)?),
            Rule::Equals => loose_equals(&Value::String(input.scalar().to_string()), param),
            Rule::Date => is_valid_date(input.scalar()),
            Rule::RequireSelection => match input {
                RuleInput::Group(items) => has_selection(items),
                // A select element has a selection when its value is non-empty.
                RuleInput::Value(value) => !value.is_empty(),
            },
            Rule::RequireNumbers => has_number(input.scalar()),
            Rule::RequireUppercase => has_uppercase(input.scalar()),
            Rule::RequireLowercase => has_lowercase(input.scalar()),
            Rule::RequireSymbols => has_symbol(input.scalar()),
        };

        Ok(passed)
    }
}

fn length_param(rule: Rule, param: &Value) -> Result<f64, ConfigError> {
    to_number(param).ok_or_else(|| ConfigError::InvalidParameter {
        rule: rule.name().to_string(),
        reason: format!("expected a number, got {}", param),
    })
}
