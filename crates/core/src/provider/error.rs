use crate::query::QueryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// General error reported by providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: Option<String>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: Some(message.into()) }
    }

    pub fn simple(kind: ProviderErrorKind) -> Self {
        Self { kind, message: None }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{msg}"),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Error for ProviderError {}

/// Categorises provider failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// A query, page or field path was rejected.
    InvalidArgument,
    /// A row does not resolve to a node and lookups are strict.
    UnknownRow,
    /// The tree backing a provider could not be read or parsed.
    TreeUnavailable,
}

impl Display for ProviderErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ProviderErrorKind::InvalidArgument => "invalid query argument",
            ProviderErrorKind::UnknownRow => "row does not resolve to a node",
            ProviderErrorKind::TreeUnavailable => "row tree is unavailable",
        })
    }
}

impl From<QueryError> for ProviderError {
    fn from(err: QueryError) -> Self {
        let kind = match &err {
            QueryError::UnknownRow(_) => ProviderErrorKind::UnknownRow,
            QueryError::InvalidFieldPath(_)
            | QueryError::InvalidPage(_)
            | QueryError::InvalidSortDirection(_)
            | QueryError::UnknownFilterStrategy(_)
            | QueryError::MalformedFilter(_) => ProviderErrorKind::InvalidArgument,
        };
        ProviderError::new(kind, err.to_string())
    }
}
