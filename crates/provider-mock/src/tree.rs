use quick_xml::de::from_str;
use rowtree_core::node::{NodePath, TreeNode, find_node};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock, RwLock};
use thiserror::Error;

static CURRENT_TREE: LazyLock<RwLock<StaticExampleTree>> =
    LazyLock::new(|| RwLock::new(StaticExampleTree::default()));

/// Immutable in-memory tree shared by the example providers. Cloning is cheap.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticExampleTree {
    roots: Arc<[TreeNode]>,
}

impl StaticExampleTree {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots: roots.into() }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn find(&self, path: &NodePath) -> Option<&TreeNode> {
        find_node(&self.roots, path)
    }

    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_len).sum()
    }
}

impl Default for StaticExampleTree {
    fn default() -> Self {
        const XML: &str = include_str!("../assets/example_tree.xml");
        Self::from_xml(XML).expect("embedded example_tree.xml must parse")
    }
}

impl StaticExampleTree {
    /// Loads a tree document. A `<children>` element, even an empty one, marks
    /// a node as internal. Attribute values are read as JSON when they parse,
    /// otherwise as plain strings.
    pub fn from_xml(xml: &str) -> Result<Self, TreeLoadError> {
        let parsed: XmlTree = from_str(xml)?;
        let roots = build_siblings(parsed.nodes, "<root>")?;
        Ok(StaticExampleTree::new(roots))
    }
}

#[derive(Debug, Deserialize)]
struct XmlTree {
    #[serde(rename = "node", default)]
    nodes: Vec<XmlNode>,
}

#[derive(Debug, Deserialize)]
struct XmlNode {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@write_access")]
    write_access: Option<String>,
    #[serde(rename = "attribute", default)]
    attributes: Vec<XmlAttribute>,
    #[serde(rename = "children")]
    children: Option<XmlChildren>,
}

#[derive(Debug, Deserialize)]
struct XmlAttribute {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct XmlChildren {
    #[serde(rename = "node", default)]
    nodes: Vec<XmlNode>,
}

fn build_siblings(nodes: Vec<XmlNode>, parent: &str) -> Result<Vec<TreeNode>, TreeLoadError> {
    let mut seen = HashSet::new();
    let mut built = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(node.name.clone()) {
            return Err(TreeLoadError::DuplicateSibling {
                parent: parent.to_owned(),
                name: node.name,
            });
        }
        built.push(build_node(node)?);
    }
    Ok(built)
}

fn build_node(node: XmlNode) -> Result<TreeNode, TreeLoadError> {
    let mut built = match node.children {
        Some(children) => TreeNode::branch(node.name.clone(), build_siblings(children.nodes, &node.name)?),
        None => TreeNode::leaf(node.name.clone()),
    };
    if let Some(tag) = node.write_access {
        built = built.with_write_access(tag);
    }
    for attr in node.attributes {
        let value = parse_attribute_value(&node.name, &attr)?;
        built = built.with_attribute(attr.name, value);
    }
    Ok(built)
}

fn parse_attribute_value(node: &str, attr: &XmlAttribute) -> Result<Value, TreeLoadError> {
    let raw = attr.value.trim();
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(source) if raw.starts_with('{') || raw.starts_with('[') => {
            Err(TreeLoadError::InvalidAttribute {
                node: node.to_owned(),
                name: attr.name.clone(),
                source,
            })
        }
        Err(_) => Ok(Value::String(attr.value.clone())),
    }
}

#[derive(Debug, Error)]
pub enum TreeLoadError {
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("attribute '{name}' on node '{node}' is not valid JSON: {source}")]
    InvalidAttribute {
        node: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate sibling name '{name}' under '{parent}'")]
    DuplicateSibling { parent: String, name: String },
}

/// Restores the previously installed tree when dropped.
pub struct TreeGuard {
    previous: StaticExampleTree,
}

impl Drop for TreeGuard {
    fn drop(&mut self) {
        *CURRENT_TREE.write().expect("example tree lock poisoned") = self.previous.clone();
    }
}

/// Replaces the process-wide tree that newly created providers capture.
/// Providers created earlier keep the tree they captured.
pub fn install_example_tree(tree: StaticExampleTree) -> TreeGuard {
    let mut lock = CURRENT_TREE.write().expect("example tree lock poisoned");
    let previous = lock.clone();
    *lock = tree;
    tracing::debug!(nodes = lock.node_count(), "example tree installed");
    TreeGuard { previous }
}

pub fn reset_example_tree() {
    *CURRENT_TREE.write().expect("example tree lock poisoned") = StaticExampleTree::default();
}

pub fn current_example_tree() -> StaticExampleTree {
    CURRENT_TREE.read().expect("example tree lock poisoned").clone()
}
