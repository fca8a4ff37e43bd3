//! In-memory form tree
//!
//! An arena of elements rooted at a `form` element. Node ids stay valid after
//! removal; a removed node is simply detached from its parent.

use crate::dom::{DomError, FieldKind, FieldState, FormDom};

pub type NodeId = usize;

const FIELD_TAGS: &[&str] = &["input", "select", "textarea"];

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    tag: String,
    name: String,
    kind: String,
    value: String,
    checked: bool,
    classes: Vec<String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A form held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryForm {
    nodes: Vec<MemoryNode>,
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForm {
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode {
                tag: "form".to_string(),
                ..Default::default()
            }],
        }
    }

    /// The `form` element
    pub fn root(&self) -> NodeId {
        0
    }

    /// Append a non-field element such as a `div` wrapper or a hint `span`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(
            parent,
            MemoryNode {
                tag: tag.to_string(),
                ..Default::default()
            },
        )
    }

    /// Append an `input` of the given type
    pub fn append_input(&mut self, parent: NodeId, name: &str, ty: &str, value: &str) -> NodeId {
        self.append(
            parent,
            MemoryNode {
                tag: "input".to_string(),
                name: name.to_string(),
                kind: ty.to_string(),
                value: value.to_string(),
                ..Default::default()
            },
        )
    }

    /// Append a checkbox or radio `input`
    pub fn append_checkable(
        &mut self,
        parent: NodeId,
        name: &str,
        ty: &str,
        value: &str,
        checked: bool,
    ) -> NodeId {
        let id = self.append_input(parent, name, ty, value);
        self.nodes[id].checked = checked;
        id
    }

    /// Append a single-choice `select` with its current value
    pub fn append_select(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        self.append(
            parent,
            MemoryNode {
                tag: "select".to_string(),
                name: name.to_string(),
                kind: "select-one".to_string(),
                value: value.to_string(),
                ..Default::default()
            },
        )
    }

    /// Append a `textarea`
    pub fn append_textarea(&mut self, parent: NodeId, name: &str, value: &str) -> NodeId {
        self.append(
            parent,
            MemoryNode {
                tag: "textarea".to_string(),
                name: name.to_string(),
                kind: "textarea".to_string(),
                value: value.to_string(),
                ..Default::default()
            },
        )
    }

    fn append(&mut self, parent: NodeId, mut node: MemoryNode) -> NodeId {
        let id = self.nodes.len();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) {
        self.nodes[id].value = value.to_string();
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        self.nodes[id].checked = checked;
    }

    /// Add a class directly, e.g. to model markup rendered by a server
    pub fn set_class(&mut self, id: NodeId, class: &str) {
        if !self.nodes[id].classes.iter().any(|c| c == class) {
            self.nodes[id].classes.push(class.to_string());
        }
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id].tag
    }

    pub fn classes(&self, id: NodeId) -> &[String] {
        &self.nodes[id].classes
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id].text
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Whether the node is still reachable from the form root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// First field with the given name, in document order
    pub fn field_named(&self, name: &str) -> Option<NodeId> {
        self.fields()
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    /// Attached elements carrying `class`
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| self.nodes[id].classes.iter().any(|c| c == class))
            .collect()
    }

    /// Text of the message element right after `field`, when the sibling
    /// carries `class`
    pub fn message_after(&self, field: NodeId, class: &str) -> Option<&str> {
        self.next_element_sibling(&field)
            .filter(|sibling| self.has_class(sibling, class))
            .map(|sibling| self.text(sibling))
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }

    fn position(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes[node].parent?;
        let index = self.nodes[parent].children.iter().position(|&c| c == node)?;
        Some((parent, index))
    }

    fn check(&self, node: NodeId) -> Result<(), DomError> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::new(format!("no node with id {}", node)))
        }
    }
}

impl FormDom for MemoryForm {
    type Node = NodeId;

    fn fields(&self) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&id| FIELD_TAGS.contains(&self.nodes[id].tag.as_str()))
            .collect()
    }

    fn field_state(&self, field: &NodeId) -> FieldState {
        let node = &self.nodes[*field];
        FieldState {
            name: node.name.clone(),
            value: node.value.clone(),
            kind: FieldKind::parse(&node.kind),
            checked: node.checked,
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes
            .get(*node)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.check(*node)?;
        self.set_class(*node, class);
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), DomError> {
        self.check(*node)?;
        self.nodes[*node].classes.retain(|c| c != class);
        Ok(())
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(*node)?;
        self.nodes[parent].children.get(index + 1).copied()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<(), DomError> {
        self.check(*node)?;
        self.nodes[*node].text = text.to_string();
        Ok(())
    }

    fn insert_message_after(
        &mut self,
        node: &NodeId,
        class: &str,
        text: &str,
    ) -> Result<NodeId, DomError> {
        self.check(*node)?;
        let (parent, index) = self
            .position(*node)
            .ok_or_else(|| DomError::new(format!("node {} has no parent", node)))?;

        let id = self.nodes.len();
        self.nodes.push(MemoryNode {
            tag: "span".to_string(),
            classes: vec![class.to_string()],
            text: text.to_string(),
            parent: Some(parent),
            ..Default::default()
        });
        self.nodes[parent].children.insert(index + 1, id);
        Ok(id)
    }

    fn remove(&mut self, node: &NodeId) -> Result<(), DomError> {
        self.check(*node)?;
        let (parent, index) = self
            .position(*node)
            .ok_or_else(|| DomError::new(format!("node {} is not attached", node)))?;
        self.nodes[parent].children.remove(index);
        self.nodes[*node].parent = None;
        Ok(())
    }
}
