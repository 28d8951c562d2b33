//! Core types and traits shared by rowtree providers and hosts.
//!
//! The node model ([`node`]) describes the hierarchical rows, the query layer
//! ([`query`]) implements search, filtering, sorting and paging over them, and
//! [`provider`] defines the pull-based contract a table host drives.

pub mod node;
pub mod provider;
pub mod query;

pub use node::{NodePath, RowKey, TreeNode, TreeNodeView};
pub use provider::{
    ChildRowMap, Fetch, LookupPolicy, ProviderDescriptor, ProviderError, ProviderErrorKind,
    ProviderKind, ProviderOptions, TableChildrenDataProvider, TableDataProvider, TableRow,
};
pub use query::{
    FieldOption, FieldPath, FieldSource, FilterRule, FilterStrategy, Page, QueryError, QueryState,
    SortDirection, SortRule,
};
