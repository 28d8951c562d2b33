use crate::node::RowKey;
use thiserror::Error;

/// Validation failures raised while building or applying a query.
///
/// Providers stay permissive by default: none of these surface from a fetch
/// unless the caller opted into strict lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid field path '{0}' (expected dotted segments such as profile.email)")]
    InvalidFieldPath(String),
    #[error("invalid page: {0}")]
    InvalidPage(String),
    #[error("unknown sort direction '{0}' (expected asc or desc)")]
    InvalidSortDirection(String),
    #[error("unknown filter strategy '{0}'")]
    UnknownFilterStrategy(String),
    #[error("malformed filter rule '{0}' (expected field:strategy:value)")]
    MalformedFilter(String),
    #[error("no node found for row '{0}'")]
    UnknownRow(RowKey),
}
