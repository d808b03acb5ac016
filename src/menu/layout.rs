//! Navigation state of the console shell.
//!
//! Tracks the processed menu forest, the open tags, the page cache, the
//! current menu and (in column mode) the current top-level column.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{is_set_id, is_set_str, MenuOptions};
use super::processor::{find_menu_by_id, find_menu_path, process_menu_list};
use crate::tree::NodeId;

/// Layout switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Route name of the landing page
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Open menus as tags
    #[serde(default = "default_true")]
    pub support_tags: bool,

    /// Group menus by top-level column
    #[serde(default)]
    pub support_column: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            index_name: default_index_name(),
            support_tags: true,
            support_column: false,
        }
    }
}

fn default_index_name() -> String {
    "welcome".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct LayoutState {
    options: LayoutOptions,
    collapsed: bool,
    menu_list: Vec<MenuOptions>,
    tag_list: Vec<MenuOptions>,
    cache_pages: Vec<String>,
    current_menu: Option<MenuOptions>,
    current_column: Option<MenuOptions>,
}

impl LayoutState {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn menu_list(&self) -> &[MenuOptions] {
        &self.menu_list
    }

    pub fn tag_list(&self) -> &[MenuOptions] {
        &self.tag_list
    }

    pub fn cache_pages(&self) -> &[String] {
        &self.cache_pages
    }

    pub fn current_menu(&self) -> Option<&MenuOptions> {
        self.current_menu.as_ref()
    }

    pub fn current_column(&self) -> Option<&MenuOptions> {
        self.current_column.as_ref()
    }

    pub fn current_menu_id(&self) -> Option<&NodeId> {
        self.current_menu.as_ref().and_then(|m| m.menu_id.as_ref())
    }

    pub fn current_column_id(&self) -> Option<&NodeId> {
        self.current_column.as_ref().and_then(|m| m.menu_id.as_ref())
    }

    /// Root-to-current chain through the menu forest.
    pub fn current_menu_path(&self) -> Vec<&MenuOptions> {
        match self.current_menu_id() {
            Some(id) => find_menu_path(&self.menu_list, id),
            None => Vec::new(),
        }
    }

    /// Process and install a menu forest.
    pub fn set_menu_list(&mut self, mut menus: Vec<MenuOptions>) {
        process_menu_list(&mut menus);
        if self.options.support_column {
            if let Some(first) = menus.first() {
                self.current_column = Some(first.clone());
            }
        }
        self.menu_list = menus;
    }

    /// Make `menu` current, opening a tag and caching its page.
    ///
    /// `None` or a menu without an id clears the current menu.
    pub fn set_current_menu(&mut self, menu: Option<MenuOptions>) {
        let Some(menu) = menu.filter(|m| m.menu_id.is_some()) else {
            self.current_menu = None;
            return;
        };

        if self.options.support_tags {
            if !self.tag_list.iter().any(|t| t.menu_id == menu.menu_id) {
                self.tag_list.push(menu.clone());
            }
            if let Some(router_name) = menu.form_router_name.as_ref().filter(|n| !n.is_empty()) {
                if !self.cache_pages.contains(router_name) {
                    self.cache_pages.push(router_name.clone());
                }
            }
        }

        if self.options.support_column {
            if let Some(id) = menu.menu_id.as_ref() {
                let column = self.menu_list.iter().find(|m| {
                    find_menu_by_id(&m.children, id).is_some()
                        && self.current_column_id() != m.menu_id.as_ref()
                });
                if let Some(column) = column {
                    self.current_column = Some(column.clone());
                }
            }
        }

        self.current_menu = Some(menu);
    }

    /// Close the tag for `id`.
    ///
    /// When it was current, the tag that slides into its position (or the
    /// new last tag) becomes current. Cached pages without an open tag are
    /// released.
    pub fn remove_tag(&mut self, id: &NodeId) {
        let mut next = None;
        if let Some(pos) = self
            .tag_list
            .iter()
            .position(|t| t.menu_id.as_ref() == Some(id))
        {
            self.tag_list.remove(pos);
            let slot = pos.min(self.tag_list.len().saturating_sub(1));
            next = self.tag_list.get(slot).cloned();
        }

        if self.current_menu_id() == Some(id) {
            self.set_current_menu(next);
        }

        let open_pages: Vec<&String> = self
            .tag_list
            .iter()
            .filter_map(|t| t.form_router_name.as_ref())
            .collect();
        let before = self.cache_pages.len();
        self.cache_pages.retain(|page| open_pages.contains(&page));
        debug!(
            released = before - self.cache_pages.len(),
            "released cached pages after closing tag"
        );
    }

    /// Close every tag except `id`'s.
    pub fn close_other_tags(&mut self, id: &NodeId) {
        self.tag_list.retain(|t| t.menu_id.as_ref() == Some(id));
        let Some(menu) = self.tag_list.first().cloned() else {
            return;
        };
        if !is_set_id(&menu.online_form_id) && is_set_str(&menu.form_router_name) {
            self.cache_pages = menu.form_router_name.iter().cloned().collect();
            self.set_current_menu(Some(menu));
        }
    }

    pub fn clear_all_tags(&mut self) {
        self.tag_list.clear();
        self.cache_pages.clear();
        self.set_current_menu(None);
    }

    pub fn set_current_column(&mut self, column: Option<MenuOptions>) {
        self.current_column = column;
    }

    pub fn remove_cache_page(&mut self, name: &str) {
        if let Some(pos) = self.cache_pages.iter().position(|p| p == name) {
            self.cache_pages.remove(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn menus() -> Vec<MenuOptions> {
        serde_json::from_value(json!([
            {"menuId": 1, "menuName": "System", "children": [
                {"menuId": 11, "menuName": "Users", "formRouterName": "formSysUser"},
                {"menuId": 12, "menuName": "Roles", "formRouterName": "formSysRole"}
            ]},
            {"menuId": 2, "menuName": "Reports", "children": [
                {"menuId": 21, "menuName": "Daily", "formRouterName": "formDaily"},
                {"menuId": 22, "menuName": "Form", "formRouterName": "formOnline", "onlineFormId": 7}
            ]}
        ]))
        .unwrap()
    }

    fn state(support_column: bool) -> LayoutState {
        let mut state = LayoutState::new(LayoutOptions {
            support_column,
            ..LayoutOptions::default()
        });
        state.set_menu_list(menus());
        state
    }

    fn leaf(state: &LayoutState, id: i64) -> MenuOptions {
        find_menu_by_id(state.menu_list(), &NodeId::Num(id))
            .cloned()
            .unwrap()
    }

    fn tag_ids(state: &LayoutState) -> Vec<NodeId> {
        state
            .tag_list()
            .iter()
            .filter_map(|t| t.menu_id.clone())
            .collect()
    }

    #[test]
    fn set_menu_list_processes_menus() {
        let state = state(false);

        assert_eq!(state.menu_list()[0].children[0].path, "formSysUser");
        assert!(state.current_column().is_none());
    }

    #[test]
    fn column_mode_starts_on_first_root() {
        let state = state(true);

        assert_eq!(state.current_column_id(), Some(&NodeId::Num(1)));
    }

    #[test]
    fn set_current_menu_opens_tag_once_and_caches_page() {
        let mut state = state(false);
        let users = leaf(&state, 11);

        state.set_current_menu(Some(users.clone()));
        state.set_current_menu(Some(users));

        assert_eq!(tag_ids(&state), vec![NodeId::Num(11)]);
        assert_eq!(state.cache_pages(), ["formSysUser".to_string()]);
        assert_eq!(state.current_menu_id(), Some(&NodeId::Num(11)));
    }

    #[test]
    fn set_current_menu_none_clears() {
        let mut state = state(false);
        let users = leaf(&state, 11);
        state.set_current_menu(Some(users));

        state.set_current_menu(None);

        assert!(state.current_menu().is_none());
        assert_eq!(state.tag_list().len(), 1);
    }

    #[test]
    fn column_follows_current_menu() {
        let mut state = state(true);
        let daily = leaf(&state, 21);

        state.set_current_menu(Some(daily));

        assert_eq!(state.current_column_id(), Some(&NodeId::Num(2)));
    }

    #[test]
    fn current_menu_path_walks_from_root() {
        let mut state = state(false);
        let roles = leaf(&state, 12);
        state.set_current_menu(Some(roles));

        let names: Vec<_> = state
            .current_menu_path()
            .iter()
            .filter_map(|m| m.menu_name.as_deref())
            .collect();

        assert_eq!(names, vec!["System", "Roles"]);
    }

    #[test]
    fn remove_current_tag_moves_to_neighbour() {
        let mut state = state(false);
        for id in [11, 12, 21] {
            let m = leaf(&state, id);
            state.set_current_menu(Some(m));
        }
        let users = leaf(&state, 11);
        state.set_current_menu(Some(users));

        state.remove_tag(&NodeId::Num(11));

        assert_eq!(tag_ids(&state), vec![NodeId::Num(12), NodeId::Num(21)]);
        assert_eq!(state.current_menu_id(), Some(&NodeId::Num(12)));
        assert_eq!(
            state.cache_pages(),
            ["formSysRole".to_string(), "formDaily".to_string()]
        );
    }

    #[test]
    fn remove_last_tag_clears_current() {
        let mut state = state(false);
        let users = leaf(&state, 11);
        state.set_current_menu(Some(users));

        state.remove_tag(&NodeId::Num(11));

        assert!(state.tag_list().is_empty());
        assert!(state.current_menu().is_none());
        assert!(state.cache_pages().is_empty());
    }

    #[test]
    fn remove_other_tag_keeps_current() {
        let mut state = state(false);
        for id in [11, 12] {
            let m = leaf(&state, id);
            state.set_current_menu(Some(m));
        }

        state.remove_tag(&NodeId::Num(11));

        assert_eq!(state.current_menu_id(), Some(&NodeId::Num(12)));
    }

    #[test]
    fn close_other_tags_resets_cache() {
        let mut state = state(false);
        for id in [11, 12, 21] {
            let m = leaf(&state, id);
            state.set_current_menu(Some(m));
        }

        state.close_other_tags(&NodeId::Num(12));

        assert_eq!(tag_ids(&state), vec![NodeId::Num(12)]);
        assert_eq!(state.cache_pages(), ["formSysRole".to_string()]);
        assert_eq!(state.current_menu_id(), Some(&NodeId::Num(12)));
    }

    #[test]
    fn close_other_tags_keeps_cache_for_online_form() {
        let mut state = state(false);
        for id in [11, 22] {
            let m = leaf(&state, id);
            state.set_current_menu(Some(m));
        }

        state.close_other_tags(&NodeId::Num(22));

        assert_eq!(tag_ids(&state), vec![NodeId::Num(22)]);
        assert_eq!(state.cache_pages().len(), 2);
    }

    #[test]
    fn clear_all_tags_resets_everything() {
        let mut state = state(false);
        let users = leaf(&state, 11);
        state.set_current_menu(Some(users));

        state.clear_all_tags();

        assert!(state.tag_list().is_empty());
        assert!(state.cache_pages().is_empty());
        assert!(state.current_menu().is_none());
    }

    #[test]
    fn remove_cache_page_and_collapse() {
        let mut state = state(false);
        let users = leaf(&state, 11);
        state.set_current_menu(Some(users));

        state.remove_cache_page("formSysUser");
        state.toggle_collapsed();

        assert!(state.cache_pages().is_empty());
        assert!(state.collapsed());
    }
}
