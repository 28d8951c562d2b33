use crate::node::{NodePath, RowKey, TreeNodeView};
use std::hash::{Hash, Hasher};

/// Handle the host passes back into a provider: the row value plus the
/// host's bookkeeping. Identity is the row key, not the value.
#[derive(Clone, Debug)]
pub struct TableRow {
    key: RowKey,
    level: usize,
    value: TreeNodeView,
}

impl TableRow {
    pub fn new(value: TreeNodeView) -> Self {
        Self { key: value.key(), level: value.path().depth(), value }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// Nesting level, zero for root rows.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn value(&self) -> &TreeNodeView {
        &self.value
    }

    pub fn path(&self) -> &NodePath {
        self.value.path()
    }

    pub fn into_value(self) -> TreeNodeView {
        self.value
    }
}

impl From<TreeNodeView> for TableRow {
    fn from(value: TreeNodeView) -> Self {
        Self::new(value)
    }
}

impl PartialEq for TableRow {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TableRow {}

impl Hash for TableRow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
