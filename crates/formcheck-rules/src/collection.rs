//! Checkbox and radio group validation

/// One member of a same-named checkbox/radio group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub value: String,
    pub checked: bool,
}

impl SelectionItem {
    pub fn new(value: impl Into<String>, checked: bool) -> Self {
        Self {
            value: value.into(),
            checked,
        }
    }
}

/// Validates that at least one member of the group is checked
pub fn has_selection(items: &[SelectionItem]) -> bool {
    items.iter().any(|item| item.checked)
}

/// Value a group presents to scalar rules: the first checked member's value,
/// or the empty string when nothing is checked.
pub fn group_value(items: &[SelectionItem]) -> &str {
    items
        .iter()
        .find(|item| item.checked)
        .map(|item| item.value.as_str())
        .unwrap_or("")
}
