pub mod access;
pub mod identifiers;
pub mod tree;
pub mod view;

pub use access::{CLIENT_MODIFY, is_selectable};
pub use identifiers::{NodePath, RowKey};
pub use tree::{TreeNode, find_node};
pub use view::TreeNodeView;
