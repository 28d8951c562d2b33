use rowtree_core::node::{RowKey, TreeNodeView};
use rowtree_core::provider::{ProviderError, TableChildrenDataProvider, TableRow};
use rowtree_core::query::QueryState;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Tracks expanded rows and the child slices pulled for them.
///
/// Every expansion batch becomes a single provider call. A state change
/// refetches all expanded rows in one batch as well.
pub struct ChildTableDataSource {
    provider: Arc<dyn TableChildrenDataProvider>,
    state: QueryState,
    expanded: BTreeMap<RowKey, TableRow>,
    children: BTreeMap<RowKey, Vec<TreeNodeView>>,
}

impl ChildTableDataSource {
    pub fn new(provider: Arc<dyn TableChildrenDataProvider>) -> Self {
        Self {
            provider,
            state: QueryState::default(),
            expanded: BTreeMap::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn provider(&self) -> &Arc<dyn TableChildrenDataProvider> {
        &self.provider
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Expands `rows`, fetching children only for rows that are not expanded
    /// yet. Returns how many rows were newly expanded.
    pub fn expand(&mut self, rows: &[TableRow]) -> Result<usize, ProviderError> {
        let fresh: Vec<TableRow> = rows
            .iter()
            .filter(|row| !self.expanded.contains_key(row.key()))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return Ok(0);
        }

        let fetched = self.provider.fetch(Some(&self.state), &fresh).into_inner()?;
        for row in &fresh {
            self.expanded.insert(row.key().clone(), row.clone());
        }
        self.children.extend(fetched);
        debug!(expanded = fresh.len(), total_expanded = self.expanded.len(), "rows expanded");
        Ok(fresh.len())
    }

    /// Collapses `key` together with every expanded descendant.
    pub fn collapse(&mut self, key: &RowKey) -> bool {
        let Some(row) = self.expanded.remove(key) else {
            return false;
        };
        self.children.remove(key);

        let prefix = row.path().clone();
        let descendants: Vec<RowKey> = self
            .expanded
            .iter()
            .filter(|(_, candidate)| candidate.path().starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for descendant in &descendants {
            self.expanded.remove(descendant);
            self.children.remove(descendant);
        }
        debug!(row = %key, descendants = descendants.len(), "row collapsed");
        true
    }

    /// Replaces the query state and refetches all expanded rows.
    pub fn set_state(&mut self, state: QueryState) -> Result<(), ProviderError> {
        self.state = state;
        self.reload()
    }

    fn reload(&mut self) -> Result<(), ProviderError> {
        if self.expanded.is_empty() {
            return Ok(());
        }
        let rows: Vec<TableRow> = self.expanded.values().cloned().collect();
        self.children = self.provider.fetch(Some(&self.state), &rows).into_inner()?;
        debug!(rows = rows.len(), "expanded rows reloaded");
        Ok(())
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains_key(key)
    }

    pub fn expanded_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.expanded.values()
    }

    /// Child slice last fetched for `key`; `None` when the row is collapsed.
    pub fn children(&self, key: &RowKey) -> Option<&[TreeNodeView]> {
        self.children.get(key).map(Vec::as_slice)
    }

    /// Child count of `row` under the current query, before paging.
    pub fn children_count(&self, row: &TableRow) -> Result<usize, ProviderError> {
        self.provider.row_children_count(row).into_inner()
    }

    /// Number of pages the children of `row` span, `None` without paging.
    pub fn page_count(&self, row: &TableRow) -> Result<Option<usize>, ProviderError> {
        let Some(page) = self.state.page().filter(|page| page.is_set()) else {
            return Ok(None);
        };
        Ok(Some(page.page_count(self.children_count(row)?)))
    }

    /// Drops the provider cache for `key` and refetches it when expanded.
    pub fn invalidate(&mut self, key: &RowKey) -> Result<(), ProviderError> {
        self.provider.invalidate(key);
        let Some(row) = self.expanded.get(key).cloned() else {
            return Ok(());
        };
        let fetched =
            self.provider.fetch(Some(&self.state), std::slice::from_ref(&row)).into_inner()?;
        self.children.extend(fetched);
        Ok(())
    }

    /// Drops every cached child list and reloads the expanded rows.
    pub fn invalidate_all(&mut self) -> Result<(), ProviderError> {
        self.provider.invalidate_all();
        self.reload()
    }
}
