//! menutree - menu and permission tree engine for management consoles
//!
//! Turns flat, parent-referencing record lists into trees, enriches backend
//! menu records with routing data, and drives tree tables with cascading
//! checkbox selection and name filtering.

pub mod config;
pub mod dropdown;
pub mod error;
pub mod lookup;
pub mod menu;
pub mod pager;
pub mod permission;
pub mod table;
pub mod tree;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use dropdown::{Dropdown, DropdownLoader};
pub use error::{MenuTreeError, MenuTreeResult};
pub use lookup::{deep_merge, filter_enum, filter_enum_tag, find_item_nested, object_value, FieldNames};
pub use menu::{
    breadcrumb_map, classify_bind_type, find_menu_by_id, find_menu_by_path, find_menu_path,
    flat_menu_list, keep_alive_names, menu_paths, process_menu, process_menu_list,
    show_menu_list, Dictionary, LayoutOptions, LayoutState, MenuBindType, MenuMeta, MenuOptions,
};
pub use pager::{
    OrderInfo, PageParam, PageResult, PagerOptions, RequestParam, TableLoader, TablePager,
    DEFAULT_PAGE_SIZE,
};
pub use permission::{PermissionContext, UserInfo};
pub use table::{CheckedSet, FilteredRow, TableNode, TableOptions, TableRow, TreeTable};
pub use tree::{
    accessors, build_tree, build_tree_cloned, filter_tree, find_by, find_by_id, find_id_path,
    find_path_to_node, flatten, visit, visit_mut, FieldKeys, NodeId, RecordKeys, TreeItem,
    TreeNode,
};
