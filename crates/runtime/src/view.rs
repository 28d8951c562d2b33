use crate::child_source::ChildTableDataSource;
use crate::source::TableDataSource;
use rowtree_core::node::{RowKey, TreeNodeView};
use rowtree_core::provider::{ProviderError, TableChildrenDataProvider, TableDataProvider, TableRow};
use rowtree_core::query::QueryState;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// One line of the flattened table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRow {
    pub key: RowKey,
    pub label: String,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub selectable: bool,
    #[serde(skip)]
    pub value: TreeNodeView,
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("no visible row at index {0}")]
    NoSuchRow(usize),
}

/// Root and child data sources combined into the flat list a table renders.
pub struct TableView {
    roots: TableDataSource,
    children: ChildTableDataSource,
    visible: Vec<VisibleRow>,
}

impl TableView {
    pub fn new(
        roots: Arc<dyn TableDataProvider>,
        children: Arc<dyn TableChildrenDataProvider>,
    ) -> Self {
        Self {
            roots: TableDataSource::new(roots),
            children: ChildTableDataSource::new(children),
            visible: Vec::new(),
        }
    }

    pub fn roots(&self) -> &TableDataSource {
        &self.roots
    }

    pub fn children(&self) -> &ChildTableDataSource {
        &self.children
    }

    /// Applies `state` to both sources and rebuilds the visible rows.
    pub fn apply(&mut self, state: QueryState) -> Result<&[VisibleRow], ViewError> {
        self.roots.fetch(state.clone())?;
        self.children.set_state(state)?;
        self.rebuild();
        Ok(&self.visible)
    }

    pub fn refresh(&mut self) -> Result<&[VisibleRow], ViewError> {
        self.roots.refresh()?;
        self.children.invalidate_all()?;
        self.rebuild();
        Ok(&self.visible)
    }

    pub fn visible_rows(&self) -> &[VisibleRow] {
        &self.visible
    }

    /// Expands or collapses the row shown at `index`.
    pub fn toggle_index(&mut self, index: usize, expand: bool) -> Result<(), ViewError> {
        let Some(visible) = self.visible.get(index) else {
            warn!(index, rows = self.visible.len(), "toggle_index: no such row");
            return Err(ViewError::NoSuchRow(index));
        };
        if !visible.has_children {
            return Ok(());
        }
        let row = TableRow::new(visible.value.clone());
        if expand {
            self.children.expand(std::slice::from_ref(&row))?;
        } else {
            self.children.collapse(row.key());
        }
        self.rebuild();
        Ok(())
    }

    /// Expands every visible internal row that is still collapsed.
    pub fn expand_visible(&mut self) -> Result<usize, ViewError> {
        let rows: Vec<TableRow> = self
            .visible
            .iter()
            .filter(|row| row.has_children && !row.is_expanded)
            .map(|row| TableRow::new(row.value.clone()))
            .collect();
        let expanded = self.children.expand(&rows)?;
        self.rebuild();
        Ok(expanded)
    }

    fn rebuild(&mut self) {
        let mut out = Vec::with_capacity(self.roots.rows().len());
        for root in self.roots.rows() {
            flatten_row(root, 0, &self.children, &mut out);
        }
        debug!(rows = out.len(), "visible rows rebuilt");
        self.visible = out;
    }
}

fn flatten_row(
    view: &TreeNodeView,
    depth: usize,
    children: &ChildTableDataSource,
    out: &mut Vec<VisibleRow>,
) {
    let key = view.key();
    let is_expanded = children.is_expanded(&key);
    out.push(VisibleRow {
        key: key.clone(),
        label: view.name().to_owned(),
        depth,
        has_children: view.has_children(),
        is_expanded,
        selectable: view.is_selectable(),
        value: view.clone(),
    });

    if is_expanded && let Some(slice) = children.children(&key) {
        for child in slice {
            flatten_row(child, depth + 1, children, out);
        }
    }
}
