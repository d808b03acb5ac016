//! Menu enrichment and menu-tree queries.
//!
//! `process_menu` turns raw backend menus into navigation nodes: it folds
//! the `extraData` side channel into the record, derives routing fields,
//! attaches display metadata and classifies the bind type.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use super::dict::MenuBindType;
use super::model::{bind_type_from_value, is_set_id, is_set_str, MenuMeta, MenuOptions};
use crate::tree::{filter_tree, find_by, find_by_id, find_path_to_node, visit, NodeId};

/// Fields that `extraData` may carry
#[derive(Debug, Default)]
struct MenuExtraData {
    bind_type: Option<MenuBindType>,
    online_form_id: Option<NodeId>,
    online_flow_entry_id: Option<NodeId>,
    report_page_id: Option<NodeId>,
    form_router_name: Option<String>,
    target_url: Option<String>,
}

fn extra_field<T>(
    extra: &Map<String, Value>,
    key: &str,
    menu_id: Option<&NodeId>,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = extra.get(key).filter(|v| !v.is_null())?;
    let parsed = read(value);
    if parsed.is_none() {
        warn!(?menu_id, field = key, %value, "ignoring ill-typed extraData field");
    }
    parsed
}

fn extra_str(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

impl MenuExtraData {
    /// Read each known field on its own; a bad field skips only itself.
    fn from_map(extra: &Map<String, Value>, menu_id: Option<&NodeId>) -> Self {
        Self {
            bind_type: extra.get("bindType").and_then(bind_type_from_value),
            online_form_id: extra_field(extra, "onlineFormId", menu_id, NodeId::from_value),
            online_flow_entry_id: extra_field(extra, "onlineFlowEntryId", menu_id, NodeId::from_value),
            report_page_id: extra_field(extra, "reportPageId", menu_id, NodeId::from_value),
            form_router_name: extra_field(extra, "formRouterName", menu_id, extra_str),
            target_url: extra_field(extra, "targetUrl", menu_id, extra_str),
        }
    }

    /// Fill fields the menu leaves unset. The menu's own values win.
    fn fill(self, menu: &mut MenuOptions) {
        if menu.bind_type.is_none() {
            menu.bind_type = self.bind_type;
        }
        if !is_set_id(&menu.online_form_id) {
            menu.online_form_id = self.online_form_id.or(menu.online_form_id.take());
        }
        if !is_set_id(&menu.online_flow_entry_id) {
            menu.online_flow_entry_id = self
                .online_flow_entry_id
                .or(menu.online_flow_entry_id.take());
        }
        if !is_set_id(&menu.report_page_id) {
            menu.report_page_id = self.report_page_id.or(menu.report_page_id.take());
        }
        if !is_set_str(&menu.form_router_name) {
            menu.form_router_name = self.form_router_name.or(menu.form_router_name.take());
        }
        if !is_set_str(&menu.target_url) {
            menu.target_url = self.target_url.or(menu.target_url.take());
        }
    }
}

/// Bind type implied by the ids a menu carries.
///
/// Priority is fixed: work order, then report, then external link, then
/// online form versus plain route.
pub fn classify_bind_type(menu: &MenuOptions) -> MenuBindType {
    if is_set_id(&menu.online_flow_entry_id) {
        MenuBindType::WorkOrder
    } else if is_set_id(&menu.report_page_id) {
        MenuBindType::Report
    } else if is_set_str(&menu.target_url) {
        MenuBindType::ThirdUrl
    } else if !is_set_id(&menu.online_form_id) {
        MenuBindType::Router
    } else {
        MenuBindType::OnlineForm
    }
}

/// Enrich a menu and all of its descendants in place.
pub fn process_menu(menu: &mut MenuOptions) {
    if let Some(raw) = menu.extra_data.take().filter(|s| !s.is_empty()) {
        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(extra) => MenuExtraData::from_map(&extra, menu.menu_id.as_ref()).fill(menu),
            Err(err) => {
                warn!(menu_id = ?menu.menu_id, error = %err, "ignoring unparsable extraData");
            }
        }
    }

    let router_name = menu.form_router_name.clone().unwrap_or_default();
    menu.path = router_name.clone();
    menu.name = router_name;
    menu.meta = Some(MenuMeta {
        title: menu.menu_name.clone(),
        icon: menu.icon.clone(),
        is_hide: false,
        is_full: false,
        is_affix: false,
        is_keep_alive: true,
    });
    if !menu.path.is_empty() {
        menu.component = Some(menu.path.clone());
    }
    if menu.bind_type.is_none() {
        menu.bind_type = Some(classify_bind_type(menu));
    }

    for child in &mut menu.children {
        process_menu(child);
    }
}

/// Enrich every menu of a forest in place.
pub fn process_menu_list(menus: &mut [MenuOptions]) {
    for menu in menus {
        process_menu(menu);
    }
}

/// Pre-order copies of every menu, children included on each copy.
pub fn flat_menu_list(menus: &[MenuOptions]) -> Vec<MenuOptions> {
    let mut flat = Vec::new();
    visit(menus, |m| flat.push(m.clone()));
    flat
}

/// Deep copy without hidden menus (and their subtrees).
pub fn show_menu_list(menus: &[MenuOptions]) -> Vec<MenuOptions> {
    filter_tree(menus, |m| !m.is_hidden())
}

/// Map of menu path to the root-to-menu chain ending at that menu.
///
/// Menus sharing a path resolve to the last one in pre-order.
pub fn breadcrumb_map(menus: &[MenuOptions]) -> BTreeMap<String, Vec<&MenuOptions>> {
    fn collect<'a>(
        menus: &'a [MenuOptions],
        parents: &[&'a MenuOptions],
        out: &mut BTreeMap<String, Vec<&'a MenuOptions>>,
    ) {
        for menu in menus {
            let mut chain = parents.to_vec();
            chain.push(menu);
            out.insert(menu.path.clone(), chain.clone());
            collect(&menu.children, &chain, out);
        }
    }

    let mut out = BTreeMap::new();
    collect(menus, &[], &mut out);
    out
}

/// Non-empty menu paths in pre-order.
pub fn menu_paths(menus: &[MenuOptions]) -> Vec<&str> {
    let mut paths = Vec::new();
    visit(menus, |m| {
        if !m.path.is_empty() {
            paths.push(m.path.as_str());
        }
    });
    paths
}

pub fn find_menu_by_path<'a>(menus: &'a [MenuOptions], path: &str) -> Option<&'a MenuOptions> {
    find_by(menus, |m| m.path == path)
}

pub fn find_menu_by_id<'a>(menus: &'a [MenuOptions], id: &NodeId) -> Option<&'a MenuOptions> {
    find_by_id(menus, id)
}

/// Root-to-menu chain for `id`, empty when absent.
pub fn find_menu_path<'a>(menus: &'a [MenuOptions], id: &NodeId) -> Vec<&'a MenuOptions> {
    find_path_to_node(menus, id)
}

/// Route names of menus that keep their page alive.
pub fn keep_alive_names(menus: &[MenuOptions]) -> Vec<&str> {
    let mut names = Vec::new();
    visit(menus, |m| {
        if m.is_keep_alive() && !m.name.is_empty() {
            names.push(m.name.as_str());
        }
    });
    names
}
