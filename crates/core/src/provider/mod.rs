mod descriptor;
mod error;
mod options;
#[allow(clippy::module_inception)]
mod provider;
mod row;

pub use descriptor::{ProviderDescriptor, ProviderKind};
pub use error::{ProviderError, ProviderErrorKind};
pub use options::{LookupPolicy, ProviderOptions};
pub use provider::{ChildRowMap, Fetch, TableChildrenDataProvider, TableDataProvider, ready};
pub use row::TableRow;
