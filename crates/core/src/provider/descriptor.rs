/// Metadata describing a provider implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub kind: ProviderKind,
}

impl ProviderDescriptor {
    pub const fn new(id: &'static str, display_name: &'static str, kind: ProviderKind) -> Self {
        Self { id, display_name, kind }
    }
}

/// Which half of the table contract a provider serves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProviderKind {
    /// Top-level rows.
    #[default]
    Root,
    /// Children of expanded rows.
    Children,
}
