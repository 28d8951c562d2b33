/// Access tag that marks a node as selectable by the client.
pub const CLIENT_MODIFY: &str = "clientModify";

/// Canonical record keys exposed to field-path lookups (camelCase).
pub mod names {
    pub const NAME: &str = "name";
    pub const WRITE_ACCESS: &str = "writeAccess";
    pub const HAS_CHILDREN: &str = "hasChildren";
    pub const SELECTABLE: &str = "selectable";
    pub const PATH: &str = "path";
}

/// A node is selectable iff its access tag equals [`CLIENT_MODIFY`] exactly.
pub fn is_selectable(write_access: Option<&str>) -> bool {
    write_access == Some(CLIENT_MODIFY)
}
