// Folder tree for the destination picker
//
// Only folders are inserted. Children are read when a node is expanded and
// dropped when it is collapsed, so opening the picker costs one directory
// read regardless of how deep the base directory goes.

pub mod node;
pub mod tree;
pub mod view;

pub use node::{NodeId, NodeState, TreeNode};
pub use tree::DestinationTree;
pub use view::DestinationTreeView;
