//! Generic trees built from flat parent-referencing records.
//!
//! # Module Structure
//!
//! - `keys` - record identity accessors (`RecordKeys`, `FieldKeys`, `NodeId`)
//! - `node` - `TreeNode` and the `TreeItem` abstraction
//! - `builder` - flat list to forest conversion
//! - `walker` - depth-first search, paths, flattening and filtering

mod builder;
mod keys;
mod node;
mod walker;

pub use builder::{build_tree, build_tree_cloned};
pub use keys::{accessors, Accessors, FieldKeys, NamedAccessors, NodeId, RecordKeys};
pub use node::{TreeItem, TreeNode};
pub use walker::{
    filter_tree, find_by, find_by_id, find_id_path, find_path_to_node, flatten, visit, visit_mut,
};
