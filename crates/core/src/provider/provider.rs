use super::descriptor::ProviderDescriptor;
use super::error::ProviderError;
use super::row::TableRow;
use crate::node::{RowKey, TreeNodeView};
use crate::query::{FieldOption, FieldPath, QueryState};
use std::collections::BTreeMap;
use std::future::Ready;

/// Single-value completion returned by every provider call.
///
/// Providers compute eagerly over in-memory data, so the future is already
/// resolved: hosts may `.await` it or take the value with
/// [`Ready::into_inner`].
pub type Fetch<T> = Ready<Result<T, ProviderError>>;

/// Children of each requested row, keyed by row.
pub type ChildRowMap = BTreeMap<RowKey, Vec<TreeNodeView>>;

/// Wraps an already computed result as a [`Fetch`].
pub fn ready<T>(result: Result<T, ProviderError>) -> Fetch<T> {
    std::future::ready(result)
}

/// Supplies top-level rows to a table host.
pub trait TableDataProvider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Current root rows after search, filter and sort. Updates
    /// [`total_items`](Self::total_items) to the post-filter count.
    fn fetch(&self, state: Option<&QueryState>) -> Fetch<Vec<TreeNodeView>>;

    /// Row count of the most recent fetch.
    fn total_items(&self) -> usize;

    /// Distinct values of `field` across the unfiltered root rows. Does not
    /// touch [`total_items`](Self::total_items).
    fn field_options(&self, field: &FieldPath) -> Fetch<Vec<FieldOption>>;
}

/// Supplies children of expanded rows, in bulk.
pub trait TableChildrenDataProvider: Send + Sync {
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Children of every row in `rows`, searched, filtered, sorted and paged
    /// by `state`. The result has an entry for each given row.
    fn fetch(&self, state: Option<&QueryState>, rows: &[TableRow]) -> Fetch<ChildRowMap>;

    /// Number of children `row` has under the query of the most recent fetch,
    /// before paging. Hosts size their pagers with it.
    fn row_children_count(&self, row: &TableRow) -> Fetch<usize>;

    /// Drops the cached child list of `key`; the next fetch rebuilds it.
    fn invalidate(&self, key: &RowKey);

    fn invalidate_all(&self);
}
