/// How a child provider treats rows it cannot resolve to a source node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Unresolvable rows get an empty child list.
    #[default]
    Permissive,
    /// Unresolvable rows fail the fetch with [`ProviderErrorKind::UnknownRow`].
    ///
    /// [`ProviderErrorKind::UnknownRow`]: super::ProviderErrorKind::UnknownRow
    Strict,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProviderOptions {
    lookup: LookupPolicy,
}

impl ProviderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn lookup(&self) -> LookupPolicy {
        self.lookup
    }

    pub fn is_strict(&self) -> bool {
        self.lookup == LookupPolicy::Strict
    }
}
