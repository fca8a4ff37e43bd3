//! One validation pass: evaluate, clear stale annotations, annotate

use formcheck_rules::{js_trim, ConfigError, RuleInput, RuleRegistry, SelectionItem};
use indexmap::IndexMap;

use crate::config::FormConfig;
use crate::dom::{DomError, FieldState, FormDom};
use crate::error::ValidationError;

/// Field name to the single message shown for it, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: IndexMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message. A later failure for the same field replaces the
    /// earlier message but keeps the field's position.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// True when `field` failed at least one rule
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.errors
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (field, message) in iter {
            map.insert(field, message);
        }
        map
    }
}

/// Outcome of a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: ErrorMap,
}

impl ValidationReport {
    /// True when no field failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs validation passes against a [`FormDom`].
///
/// Holds only the stateless rule registry; configuration is passed per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    registry: RuleRegistry,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler over an explicit registry instance
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Validate the form and synchronize its error annotations.
    ///
    /// Returns `Ok(true)` when every field passes.
    pub fn validate<D: FormDom>(
        &self,
        form: &mut D,
        config: &FormConfig,
    ) -> Result<bool, ValidationError> {
        Ok(self.run(form, config)?.is_valid())
    }

    /// Validate the form, synchronize its annotations and return the error map.
    ///
    /// Configuration errors are reported before the form is touched.
    pub fn run<D: FormDom>(
        &self,
        form: &mut D,
        config: &FormConfig,
    ) -> Result<ValidationReport, ValidationError> {
        config.check(&self.registry)?;

        let nodes = form.fields();
        let states: Vec<FieldState> = nodes.iter().map(|node| form.field_state(node)).collect();
        tracing::debug!(fields = states.len(), "validating form");

        let errors = self.collect_errors(&states, config)?;

        clear_annotations(form, &nodes, config)?;
        apply_annotations(form, &nodes, &states, &errors, config)?;

        tracing::debug!(errors = errors.len(), "validation finished");
        Ok(ValidationReport { errors })
    }

    /// Evaluate the configured rules without touching the form
    pub fn evaluate<D: FormDom>(
        &self,
        form: &D,
        config: &FormConfig,
    ) -> Result<ErrorMap, ConfigError> {
        config.check(&self.registry)?;
        let states: Vec<FieldState> = form
            .fields()
            .iter()
            .map(|node| form.field_state(node))
            .collect();
        self.collect_errors(&states, config)
    }

    fn collect_errors(
        &self,
        states: &[FieldState],
        config: &FormConfig,
    ) -> Result<ErrorMap, ConfigError> {
        let mut errors = ErrorMap::new();

        for state in states {
            let Some(field) = config.fields.get(&state.name) else {
                continue;
            };

            let group: Vec<SelectionItem> = if state.kind.is_group() {
                states
                    .iter()
                    .filter(|other| other.name == state.name)
                    .map(|other| SelectionItem::new(other.value.clone(), other.checked))
                    .collect()
            } else {
                Vec::new()
            };
            let input = if state.kind.is_group() {
                RuleInput::Group(&group)
            } else {
                RuleInput::Value(js_trim(&state.value))
            };

            for (rule, param) in field.resolved_rules(&self.registry)? {
                if self.registry.check(rule, input, param)? {
                    continue;
                }

                let message = field.message_for(rule);
                tracing::debug!(field = %state.name, rule = %rule, "rule failed");
                errors.insert(state.name.as_str(), message);
            }
        }

        Ok(errors)
    }
}

/// Validate `form` against `config` with a default [`Reconciler`]
pub fn validate<D: FormDom>(form: &mut D, config: &FormConfig) -> Result<bool, ValidationError> {
    Reconciler::new().validate(form, config)
}

/// The message element right after `node`: next sibling carrying the message
/// class that is not itself a field.
fn adjacent_message<D: FormDom>(
    form: &D,
    node: &D::Node,
    fields: &[D::Node],
    class: &str,
) -> Option<D::Node> {
    form.next_element_sibling(node)
        .filter(|sibling| form.has_class(sibling, class) && !fields.contains(sibling))
}

/// Remove the error class and message from every annotated field
fn clear_annotations<D: FormDom>(
    form: &mut D,
    fields: &[D::Node],
    config: &FormConfig,
) -> Result<(), DomError> {
    for node in fields {
        if !form.has_class(node, &config.field_error_class) {
            continue;
        }

        form.remove_class(node, &config.field_error_class)?;
        if let Some(message) = adjacent_message(form, node, fields, &config.message_error_class) {
            form.remove(&message)?;
        }
        tracing::trace!("cleared stale annotation");
    }

    Ok(())
}

/// Mark the first field of each failing name and attach its message
fn apply_annotations<D: FormDom>(
    form: &mut D,
    fields: &[D::Node],
    states: &[FieldState],
    errors: &ErrorMap,
    config: &FormConfig,
) -> Result<(), DomError> {
    for (name, message) in errors.iter() {
        let Some(index) = states.iter().position(|state| state.name == name) else {
            continue;
        };
        let node = &fields[index];

        form.add_class(node, &config.field_error_class)?;
        match adjacent_message(form, node, fields, &config.message_error_class) {
            Some(existing) => {
                form.set_text(&existing, message)?;
                tracing::trace!(field = name, "updated message");
            }
            None => {
                form.insert_message_after(node, &config.message_error_class, message)?;
                tracing::trace!(field = name, "inserted message");
            }
        }
    }

    Ok(())
}
