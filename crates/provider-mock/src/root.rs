use crate::ROOT_PROVIDER_ID;
use crate::tree::{StaticExampleTree, current_example_tree};
use rowtree_core::node::{NodePath, TreeNodeView};
use rowtree_core::provider::{
    Fetch, ProviderDescriptor, ProviderKind, TableDataProvider, ready,
};
use rowtree_core::query::{self, FieldOption, FieldPath, QueryState};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

pub(crate) static ROOT_DESCRIPTOR: ProviderDescriptor =
    ProviderDescriptor::new(ROOT_PROVIDER_ID, "Example root rows", ProviderKind::Root);

/// Serves the top-level nodes of a [`StaticExampleTree`].
pub struct ExampleRootProvider {
    tree: StaticExampleTree,
    total_items: AtomicUsize,
}

impl ExampleRootProvider {
    /// Captures the currently installed example tree.
    pub fn new() -> Self {
        Self::with_tree(current_example_tree())
    }

    pub fn with_tree(tree: StaticExampleTree) -> Self {
        let total = tree.roots().len();
        Self { tree, total_items: AtomicUsize::new(total) }
    }

    pub fn tree(&self) -> &StaticExampleTree {
        &self.tree
    }

    fn root_views(&self) -> Vec<TreeNodeView> {
        self.tree.roots().iter().map(|node| node.view(NodePath::root(node.name()))).collect()
    }
}

impl Default for ExampleRootProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDataProvider for ExampleRootProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &ROOT_DESCRIPTOR
    }

    fn fetch(&self, state: Option<&QueryState>) -> Fetch<Vec<TreeNodeView>> {
        let views = self.root_views();
        let available = views.len();
        let rows = match state {
            Some(state) => query::refine(views, state),
            None => views,
        };
        self.total_items.store(rows.len(), Ordering::Release);
        debug!(available, matched = rows.len(), "root rows fetched");
        ready(Ok(rows))
    }

    fn total_items(&self) -> usize {
        self.total_items.load(Ordering::Acquire)
    }

    fn field_options(&self, field: &FieldPath) -> Fetch<Vec<FieldOption>> {
        let options = query::field_options(&self.root_views(), field);
        debug!(field = %field, options = options.len(), "field options listed");
        ready(Ok(options))
    }
}
