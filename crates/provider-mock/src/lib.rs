//! Example providers backed by a static in-memory tree.
//!
//! [`ExampleRootProvider`] serves the top-level nodes and
//! [`ExampleChildProvider`] serves the children of expanded rows, both reading
//! the tree that was current when they were created. Tests swap that tree with
//! [`install_example_tree`].

mod children;
mod root;
mod tree;

pub use children::ExampleChildProvider;
pub use root::ExampleRootProvider;
pub use tree::{
    StaticExampleTree, TreeGuard, TreeLoadError, current_example_tree, install_example_tree,
    reset_example_tree,
};

pub const ROOT_PROVIDER_ID: &str = "example-roots";
pub const CHILD_PROVIDER_ID: &str = "example-children";
