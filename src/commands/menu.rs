use std::path::Path;

use anyhow::{Context, Result};
use menutree::{
    breadcrumb_map, find_menu_by_id, show_menu_list, Config, LayoutState, MenuOptions, NodeId,
};
use serde_json::json;
use tracing::debug;

use super::{print_json, read_json, records};

fn load_menus(input: &Path) -> Result<Vec<MenuOptions>> {
    let rows = records(read_json(input)?)?;
    let menus = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).with_context(|| format!("menu #{} is malformed", i))
        })
        .collect::<Result<Vec<MenuOptions>>>()?;
    Ok(MenuOptions::tree_from_list(menus))
}

pub fn cmd_menu(
    config: &Config,
    input: &Path,
    visible: bool,
    breadcrumbs: bool,
    current: Option<&NodeId>,
) -> Result<()> {
    let mut layout = LayoutState::new(config.layout.clone());
    layout.set_menu_list(load_menus(input)?);
    debug!(roots = layout.menu_list().len(), "menus processed");

    let menus = if visible {
        show_menu_list(layout.menu_list())
    } else {
        layout.menu_list().to_vec()
    };

    if breadcrumbs {
        return print_json(&breadcrumb_map(&menus));
    }

    let Some(id) = current else {
        return print_json(&menus);
    };

    let menu = find_menu_by_id(&menus, id)
        .cloned()
        .with_context(|| format!("no menu with id {}", id))?;
    layout.set_current_menu(Some(menu));

    print_json(&json!({
        "currentMenuId": layout.current_menu_id(),
        "currentColumnId": layout.current_column_id(),
        "path": layout.current_menu_path(),
        "tags": layout.tag_list(),
        "cachePages": layout.cache_pages(),
    }))
}
