//! Menu domain: backend menu records, enrichment and navigation state.
//!
//! # Module Structure
//!
//! - `dict` - bind-type dictionary
//! - `model` - `MenuOptions` and `MenuMeta`
//! - `processor` - `process_menu` and menu-tree queries
//! - `layout` - tags, cached pages, current menu and column

mod dict;
mod layout;
mod model;
mod processor;

pub use dict::{DictEntry, Dictionary, MenuBindType};
pub use layout::{LayoutOptions, LayoutState};
pub use model::{MenuMeta, MenuOptions};
pub use processor::{
    breadcrumb_map, classify_bind_type, find_menu_by_id, find_menu_by_path, find_menu_path,
    flat_menu_list, keep_alive_names, menu_paths, process_menu, process_menu_list,
    show_menu_list,
};
