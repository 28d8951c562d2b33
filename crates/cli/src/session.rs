use crate::util::CliResult;
use rowtree_core::node::{NodePath, TreeNode};
use rowtree_core::provider::{
    LookupPolicy, ProviderError, ProviderErrorKind, ProviderOptions, TableRow,
};
use rowtree_provider_mock::{
    ExampleChildProvider, ExampleRootProvider, StaticExampleTree, current_example_tree,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Providers for one CLI invocation, sharing a single tree.
pub struct Session {
    tree: StaticExampleTree,
    roots: Arc<ExampleRootProvider>,
    children: Arc<ExampleChildProvider>,
}

impl Session {
    /// Loads `tree_path` when given, otherwise uses the installed example tree.
    /// A file that cannot be read or parsed is a `TreeUnavailable` error.
    pub fn open(tree_path: Option<&Path>, strict: bool) -> CliResult<Self> {
        let tree = match tree_path {
            Some(path) => load_tree(path)?,
            None => current_example_tree(),
        };
        Ok(Self::with_tree(tree, strict))
    }

    pub fn with_tree(tree: StaticExampleTree, strict: bool) -> Self {
        let lookup = if strict { LookupPolicy::Strict } else { LookupPolicy::Permissive };
        let options = ProviderOptions::new().with_lookup(lookup);
        debug!(?lookup, "session opened");
        Self {
            roots: Arc::new(ExampleRootProvider::with_tree(tree.clone())),
            children: Arc::new(ExampleChildProvider::with_tree(tree.clone()).with_options(options)),
            tree,
        }
    }

    pub fn tree(&self) -> &StaticExampleTree {
        &self.tree
    }

    pub fn roots(&self) -> &Arc<ExampleRootProvider> {
        &self.roots
    }

    pub fn children(&self) -> &Arc<ExampleChildProvider> {
        &self.children
    }

    /// Row handle for a `/`-separated path. Paths that do not resolve still
    /// produce a handle so the provider's lookup policy decides.
    pub fn row(&self, path: &str) -> TableRow {
        let path = NodePath::parse(path);
        let view = match self.tree.find(&path) {
            Some(node) => node.view(path),
            None => TreeNode::branch(path.last().unwrap_or_default(), Vec::new()).view(path),
        };
        TableRow::new(view)
    }
}

fn load_tree(path: &Path) -> Result<StaticExampleTree, ProviderError> {
    let unavailable = |err: &dyn std::fmt::Display| {
        ProviderError::new(
            ProviderErrorKind::TreeUnavailable,
            format!("failed to read tree '{}': {err}", path.display()),
        )
    };
    let xml = std::fs::read_to_string(path).map_err(|err| unavailable(&err))?;
    let tree = StaticExampleTree::from_xml(&xml).map_err(|err| unavailable(&err))?;
    info!(path = %path.display(), nodes = tree.node_count(), "tree loaded");
    Ok(tree)
}
