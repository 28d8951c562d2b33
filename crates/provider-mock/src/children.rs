use crate::CHILD_PROVIDER_ID;
use crate::tree::{StaticExampleTree, current_example_tree};
use rowtree_core::node::{RowKey, TreeNodeView};
use rowtree_core::provider::{
    ChildRowMap, Fetch, ProviderDescriptor, ProviderError, ProviderKind, ProviderOptions,
    TableChildrenDataProvider, TableRow, ready,
};
use rowtree_core::query::{self, QueryError, QueryState};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, trace, warn};

pub(crate) static CHILD_DESCRIPTOR: ProviderDescriptor =
    ProviderDescriptor::new(CHILD_PROVIDER_ID, "Example child rows", ProviderKind::Children);

type ChildCache = HashMap<RowKey, Arc<[TreeNodeView]>>;

/// Serves the children of expanded rows from a [`StaticExampleTree`].
///
/// The full, unfiltered child list of each parent is materialised once and
/// cached by row key until [`invalidate`](TableChildrenDataProvider::invalidate)
/// drops it. Search, filter, sort and paging always run on a copy.
pub struct ExampleChildProvider {
    tree: StaticExampleTree,
    options: ProviderOptions,
    cache: Mutex<ChildCache>,
    last_state: RwLock<Option<QueryState>>,
    fills: AtomicUsize,
}

impl ExampleChildProvider {
    /// Captures the currently installed example tree.
    pub fn new() -> Self {
        Self::with_tree(current_example_tree())
    }

    pub fn with_tree(tree: StaticExampleTree) -> Self {
        Self {
            tree,
            options: ProviderOptions::default(),
            cache: Mutex::new(HashMap::new()),
            last_state: RwLock::new(None),
            fills: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ProviderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ProviderOptions {
        self.options
    }

    /// How many child lists have been materialised from the tree so far.
    pub fn cache_fills(&self) -> usize {
        self.fills.load(Ordering::Acquire)
    }

    /// Cached, unfiltered child list of `key`, if any.
    pub fn cached_rows(&self, key: &RowKey) -> Option<Arc<[TreeNodeView]>> {
        self.lock_cache().get(key).cloned()
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ChildCache> {
        // The cache only holds derived data; a poisoned lock is still consistent.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn last_state(&self) -> Option<QueryState> {
        self.last_state.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    /// Full child list of `row`, materialised on a cache miss. Lookup and
    /// fill share one lock acquisition. Unresolvable rows are not cached.
    fn children_of(&self, row: &TableRow) -> Result<Arc<[TreeNodeView]>, ProviderError> {
        let mut cache = self.lock_cache();
        if let Some(cached) = cache.get(row.key()) {
            trace!(row = %row.key(), "child cache hit");
            return Ok(Arc::clone(cached));
        }

        let Some(node) = self.tree.find(row.path()) else {
            if self.options.is_strict() {
                warn!(row = %row.key(), "no node found for row");
                return Err(QueryError::UnknownRow(row.key().clone()).into());
            }
            debug!(row = %row.key(), "row not found, returning no children");
            return Ok(Arc::from(Vec::new()));
        };

        let children: Arc<[TreeNodeView]> = node
            .children()
            .unwrap_or_default()
            .iter()
            .map(|child| child.view(row.path().child(child.name())))
            .collect();
        cache.insert(row.key().clone(), Arc::clone(&children));
        self.fills.fetch_add(1, Ordering::AcqRel);
        debug!(row = %row.key(), children = children.len(), "child cache filled");
        Ok(children)
    }
}

impl Default for ExampleChildProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TableChildrenDataProvider for ExampleChildProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &CHILD_DESCRIPTOR
    }

    fn fetch(&self, state: Option<&QueryState>, rows: &[TableRow]) -> Fetch<ChildRowMap> {
        *self.last_state.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = state.cloned();

        let mut result = ChildRowMap::new();
        for row in rows {
            let children = match self.children_of(row) {
                Ok(children) => children.to_vec(),
                Err(err) => return ready(Err(err)),
            };
            let slice = match state {
                Some(state) => query::refine_page(children, state),
                None => children,
            };
            trace!(row = %row.key(), returned = slice.len(), "children fetched");
            result.insert(row.key().clone(), slice);
        }
        debug!(rows = rows.len(), "child rows fetched");
        ready(Ok(result))
    }

    fn row_children_count(&self, row: &TableRow) -> Fetch<usize> {
        let children = match self.children_of(row) {
            Ok(children) => children.to_vec(),
            Err(err) => return ready(Err(err)),
        };
        let count = match self.last_state() {
            Some(state) => query::refine(children, &state).len(),
            None => children.len(),
        };
        ready(Ok(count))
    }

    fn invalidate(&self, key: &RowKey) {
        if self.lock_cache().remove(key).is_some() {
            debug!(row = %key, "child cache entry invalidated");
        }
    }

    fn invalidate_all(&self) {
        let mut cache = self.lock_cache();
        let dropped = cache.len();
        cache.clear();
        debug!(dropped, "child cache cleared");
    }
}
