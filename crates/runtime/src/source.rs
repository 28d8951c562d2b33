use rowtree_core::node::TreeNodeView;
use rowtree_core::provider::{ProviderError, TableDataProvider, TableRow};
use rowtree_core::query::{FieldOption, FieldPath, QueryState};
use std::sync::Arc;
use tracing::debug;

/// Holds the query state of a table and the root rows last pulled for it.
pub struct TableDataSource {
    provider: Arc<dyn TableDataProvider>,
    state: QueryState,
    rows: Vec<TreeNodeView>,
}

impl TableDataSource {
    pub fn new(provider: Arc<dyn TableDataProvider>) -> Self {
        Self { provider, state: QueryState::default(), rows: Vec::new() }
    }

    pub fn provider(&self) -> &Arc<dyn TableDataProvider> {
        &self.provider
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Replaces the query state and pulls the root rows again.
    pub fn fetch(&mut self, state: QueryState) -> Result<&[TreeNodeView], ProviderError> {
        self.state = state;
        self.refresh()
    }

    /// Pulls the root rows for the current state.
    pub fn refresh(&mut self) -> Result<&[TreeNodeView], ProviderError> {
        self.rows = self.provider.fetch(Some(&self.state)).into_inner()?;
        debug!(
            provider = self.provider.descriptor().id,
            rows = self.rows.len(),
            total_items = self.provider.total_items(),
            "root data source refreshed"
        );
        Ok(&self.rows)
    }

    pub fn rows(&self) -> &[TreeNodeView] {
        &self.rows
    }

    pub fn total_items(&self) -> usize {
        self.provider.total_items()
    }

    /// Row handles for the current root rows, ready to hand to a child source.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.rows.iter().cloned().map(TableRow::new).collect()
    }

    pub fn field_options(&self, field: &FieldPath) -> Result<Vec<FieldOption>, ProviderError> {
        self.provider.field_options(field).into_inner()
    }
}
