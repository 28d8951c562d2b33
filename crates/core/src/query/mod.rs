mod error;
mod field_path;
mod filter;
mod options;
mod paging;
mod search;
mod sort;
mod state;
mod value;

pub use error::QueryError;
pub use field_path::FieldPath;
pub use filter::{FilterRule, FilterStrategy, apply_filters};
pub use options::{FieldOption, field_options};
pub use paging::{Page, paginate};
pub use search::{matches_row, search};
pub use sort::{SortDirection, SortRule, compare_values, sort_rows};
pub use state::QueryState;
pub use value::{FieldSource, label_text, search_text};

/// Search, then filter, then sort. Paging is left to the caller because only
/// child fetches paginate.
pub fn refine<T: FieldSource>(rows: Vec<T>, state: &QueryState) -> Vec<T> {
    let rows = search(rows, state.search_text(), state.search_columns());
    let rows = apply_filters(rows, state.filter_by());
    sort_rows(rows, state.sort_by())
}

/// [`refine`] followed by [`paginate`].
pub fn refine_page<T: FieldSource>(rows: Vec<T>, state: &QueryState) -> Vec<T> {
    let page = state.page().copied();
    paginate(refine(rows, state), page.as_ref())
}
