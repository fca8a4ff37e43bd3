//! The form capability the reconciler works against
//!
//! A backend exposes the form's fields in document order plus the handful of
//! element operations needed to toggle classes and keep one message element
//! next to each invalid field. [`crate::MemoryForm`] implements it in memory;
//! the WASM crate implements it over `web_sys`.

use thiserror::Error;

/// Error raised by a DOM backend while mutating the form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("DOM operation failed: {0}")]
pub struct DomError(pub String);

impl DomError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Input type of a field, as far as validation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Checkbox,
    Radio,
    Select,
}

impl FieldKind {
    /// Map an element's `type` property
    pub fn parse(ty: &str) -> Self {
        match ty.to_ascii_lowercase().as_str() {
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "select" | "select-one" | "select-multiple" => FieldKind::Select,
            _ => FieldKind::Text,
        }
    }

    /// Checkbox and radio fields are validated as a same-named group
    pub fn is_group(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Radio)
    }
}

/// Snapshot of a field read at the start of a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub checked: bool,
}

/// Element access needed by a validation pass.
///
/// Every node handed out is an element; text nodes are never visible here.
pub trait FormDom {
    /// Handle to an element of the form
    type Node: Clone + PartialEq;

    /// Form fields in document order
    fn fields(&self) -> Vec<Self::Node>;

    /// Current name, value, type and checked flag of a field
    fn field_state(&self, field: &Self::Node) -> FieldState;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Replace the text content of an element
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), DomError>;

    /// Create a message element carrying `class` and `text` and insert it as
    /// the next sibling of `node`
    fn insert_message_after(
        &mut self,
        node: &Self::Node,
        class: &str,
        text: &str,
    ) -> Result<Self::Node, DomError>;

    /// Detach an element from the form
    fn remove(&mut self, node: &Self::Node) -> Result<(), DomError>;
}
