use super::access::is_selectable;
use super::identifiers::NodePath;
use super::view::TreeNodeView;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One entry of a hierarchical dataset.
///
/// `children` being present (even when empty) is what makes a node internal;
/// the distinction is presence-based, never length-based.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    write_access: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<TreeNode>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,
}

impl TreeNode {
    /// Creates a node without a `children` field.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Creates an internal node. An empty `children` vector still counts as
    /// having children.
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self { name: name.into(), children: Some(children), ..Self::default() }
    }

    #[must_use]
    pub fn with_write_access(mut self, tag: impl Into<String>) -> Self {
        self.write_access = Some(tag.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write_access(&self) -> Option<&str> {
        self.write_access.as_deref()
    }

    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    pub fn is_selectable(&self) -> bool {
        is_selectable(self.write_access())
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children()?.iter().find(|child| child.name == name)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children().map_or(0, |children| children.iter().map(Self::subtree_len).sum())
    }

    /// Decorated snapshot of this node; `path` must address the node itself.
    pub fn view(&self, path: NodePath) -> TreeNodeView {
        TreeNodeView::from_node(self, path)
    }
}

/// Walks `path` from the given roots. Returns `None` as soon as a segment has
/// no matching sibling.
pub fn find_node<'a>(roots: &'a [TreeNode], path: &NodePath) -> Option<&'a TreeNode> {
    let mut segments = path.segments();
    let first = segments.next()?;
    let mut current = roots.iter().find(|node| node.name == first)?;
    for segment in segments {
        current = current.child(segment)?;
    }
    Some(current)
}
