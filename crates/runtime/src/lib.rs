//! Host-side state for tables that pull rows from rowtree providers.
//!
//! [`TableDataSource`] owns the query state and the root rows,
//! [`ChildTableDataSource`] owns the expanded rows and their child slices, and
//! [`TableView`] flattens both into [`VisibleRow`]s.

mod child_source;
mod source;
mod view;

pub use child_source::ChildTableDataSource;
pub use source::TableDataSource;
pub use view::{TableView, ViewError, VisibleRow};

#[cfg(test)]
mod tests;
