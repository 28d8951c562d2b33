use super::access::{is_selectable, names};
use super::identifiers::{NodePath, RowKey};
use super::tree::TreeNode;
use crate::query::FieldSource;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Row value emitted by providers: a node copy with its derived flags.
///
/// `has_children` and `selectable` are recomputed from the source node each
/// time a view is built and are never stored on [`TreeNode`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodeView {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    write_access: Option<String>,
    has_children: bool,
    selectable: bool,
    path: NodePath,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, Value>,
}

impl TreeNodeView {
    pub(crate) fn from_node(node: &TreeNode, path: NodePath) -> Self {
        Self {
            name: node.name().to_owned(),
            write_access: node.write_access().map(str::to_owned),
            has_children: node.has_children(),
            selectable: is_selectable(node.write_access()),
            path,
            attributes: node.attributes().clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write_access(&self) -> Option<&str> {
        self.write_access.as_deref()
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn key(&self) -> RowKey {
        RowKey::from(&self.path)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// JSON record that field paths resolve against. Custom attributes are
    /// inserted first so the fixed keys always win on a name clash.
    pub fn to_record(&self) -> Value {
        let mut record: Map<String, Value> =
            self.attributes.iter().map(|(key, value)| (key.clone(), value.clone())).collect();
        record.insert(names::NAME.to_owned(), Value::String(self.name.clone()));
        if let Some(tag) = &self.write_access {
            record.insert(names::WRITE_ACCESS.to_owned(), Value::String(tag.clone()));
        }
        record.insert(names::HAS_CHILDREN.to_owned(), Value::Bool(self.has_children));
        record.insert(names::SELECTABLE.to_owned(), Value::Bool(self.selectable));
        record.insert(names::PATH.to_owned(), Value::String(self.path.to_string()));
        Value::Object(record)
    }
}

impl FieldSource for TreeNodeView {
    fn field_record(&self) -> Cow<'_, Value> {
        Cow::Owned(self.to_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(TreeNode::leaf("phoneNumber").with_write_access("clientModify"), false, true)]
    #[case(TreeNode::branch("data", Vec::new()), true, false)]
    #[case(TreeNode::leaf("flag").with_write_access("readOnly"), false, false)]
    fn derived_flags_follow_source(
        #[case] node: TreeNode,
        #[case] has_children: bool,
        #[case] selectable: bool,
    ) {
        let view = node.view(NodePath::root(node.name()));
        assert_eq!(view.has_children(), has_children);
        assert_eq!(view.is_selectable(), selectable);
    }

    #[rstest]
    fn record_exposes_fixed_and_custom_fields() {
        let node = TreeNode::leaf("email")
            .with_write_access("clientModify")
            .with_attribute("profile", json!({ "email": "x@example.com" }))
            .with_attribute("name", "shadowed");
        let view = node.view(NodePath::parse("profile/email"));

        let record = view.to_record();
        assert_eq!(record["name"], json!("email"));
        assert_eq!(record["writeAccess"], json!("clientModify"));
        assert_eq!(record["hasChildren"], json!(false));
        assert_eq!(record["selectable"], json!(true));
        assert_eq!(record["path"], json!("profile/email"));
        assert_eq!(record["profile"]["email"], json!("x@example.com"));
    }

    #[rstest]
    fn serializes_camel_case() {
        let view = TreeNode::branch("data", Vec::new()).view(NodePath::root("data"));
        let json = serde_json::to_value(&view).expect("serializable");
        assert_eq!(
            json,
            json!({ "name": "data", "hasChildren": true, "selectable": false, "path": ["data"] })
        );
    }
}
