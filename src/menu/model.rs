//! Menu records as delivered by the console backend

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::dict::MenuBindType;
use crate::tree::{accessors, build_tree, NodeId, TreeItem, TreeNode};

/// Navigation metadata attached to every processed menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_hide: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_full: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_affix: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_keep_alive: bool,
}

/// A menu node.
///
/// Fields the model does not name are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_router_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_form_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_flow_entry_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_page_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    /// Serialized JSON side channel, consumed by menu processing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_bind_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub bind_type: Option<MenuBindType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MenuMeta>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<MenuOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuOptions {
    pub fn new(menu_id: impl Into<NodeId>, menu_name: impl Into<String>) -> Self {
        Self {
            menu_id: Some(menu_id.into()),
            menu_name: Some(menu_name.into()),
            ..Self::default()
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.is_hide)
    }

    pub fn is_keep_alive(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.is_keep_alive)
    }

    /// Nest a flat menu list by `menuId`/`parentId`.
    ///
    /// Already-nested input passes through: existing children are kept and
    /// newly attached ones follow them.
    pub fn tree_from_list(menus: Vec<MenuOptions>) -> Vec<MenuOptions> {
        let keys = accessors(
            |m: &MenuOptions| m.menu_id.clone(),
            |m: &MenuOptions| m.parent_id.clone(),
        );
        build_tree(menus, &keys)
            .into_iter()
            .map(Self::from_node)
            .collect()
    }

    fn from_node(node: TreeNode<MenuOptions>) -> MenuOptions {
        let mut menu = node.record;
        menu.children
            .extend(node.children.into_iter().map(Self::from_node));
        menu
    }
}

impl TreeItem for MenuOptions {
    type Id = NodeId;

    fn item_id(&self) -> Option<&NodeId> {
        self.menu_id.as_ref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

/// Backends send `null` for empty lists and strings.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An unknown bind type is dropped so the menu is classified instead.
fn lenient_bind_type<'de, D>(deserializer: D) -> Result<Option<MenuBindType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(bind_type_from_value))
}

/// Bind type from a JSON value; `null` is unset, anything unknown is logged.
pub(crate) fn bind_type_from_value(value: &Value) -> Option<MenuBindType> {
    if value.is_null() {
        return None;
    }
    let bind_type = value.as_i64().and_then(|id| MenuBindType::from_id(id).ok());
    if bind_type.is_none() {
        warn!(%value, "ignoring unknown bind type");
    }
    bind_type
}

/// An optional string field counts as set only when non-empty.
pub(crate) fn is_set_str(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// An optional id counts as set unless it is missing or an empty string.
pub(crate) fn is_set_id(value: &Option<NodeId>) -> bool {
    match value {
        None => false,
        Some(NodeId::Str(s)) => !s.is_empty(),
        Some(NodeId::Num(_)) => true,
    }
}
