use super::error::QueryError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Pagination cursor. `current_page` is 1-based; `0` is the reserved "unset"
/// value and disables paging, so page 1 is always a real first page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    current_page: usize,
    page_size: NonZeroUsize,
}

impl Page {
    /// Validating constructor: `current_page >= 1`, `page_size > 0`.
    pub fn new(current_page: usize, page_size: usize) -> Result<Self, QueryError> {
        if current_page == 0 {
            return Err(QueryError::InvalidPage("current page is 1-based".to_owned()));
        }
        let page_size = NonZeroUsize::new(page_size)
            .ok_or_else(|| QueryError::InvalidPage("page size must be positive".to_owned()))?;
        Ok(Self { current_page, page_size })
    }

    /// A cursor that carries a page size but no current page.
    pub const fn unset(page_size: NonZeroUsize) -> Self {
        Self { current_page: 0, page_size }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn is_set(&self) -> bool {
        self.current_page > 0
    }

    /// Row index range of this page, `None` when unset.
    pub fn range(&self) -> Option<Range<usize>> {
        if !self.is_set() {
            return None;
        }
        let size = self.page_size.get();
        let start = (self.current_page - 1).saturating_mul(size);
        Some(start..start.saturating_add(size))
    }

    /// Number of pages needed for `total` rows (at least one).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get()).max(1)
    }
}

/// Slices `rows` to the requested page. A missing or unset page returns
/// `rows` unchanged; a page past the end yields an empty list.
pub fn paginate<T>(rows: Vec<T>, page: Option<&Page>) -> Vec<T> {
    let Some(range) = page.and_then(Page::range) else {
        return rows;
    };
    rows.into_iter().skip(range.start).take(range.end - range.start).collect()
}
