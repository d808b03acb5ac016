//! Lazily loaded option lists
//!
//! A `Dropdown` fetches its options the first time they are needed and
//! serves the cached list afterwards. In tree mode the records are shaped
//! with the tree builder; otherwise every record is a childless root.

use tracing::debug;

use crate::error::{MenuTreeError, MenuTreeResult};
use crate::tree::{build_tree, RecordKeys, TreeNode};

/// Source of dropdown records
pub trait DropdownLoader<T> {
    fn load_dropdown_data(&mut self) -> anyhow::Result<Vec<T>>;
}

impl<T, F> DropdownLoader<T> for F
where
    F: FnMut() -> anyhow::Result<Vec<T>>,
{
    fn load_dropdown_data(&mut self) -> anyhow::Result<Vec<T>> {
        self()
    }
}

pub struct Dropdown<T, L, K>
where
    L: DropdownLoader<T>,
    K: RecordKeys<T>,
{
    loader: L,
    keys: K,
    is_tree: bool,
    loaded: bool,
    list: Vec<TreeNode<T, K::Id>>,
}

impl<T, L, K> Dropdown<T, L, K>
where
    L: DropdownLoader<T>,
    K: RecordKeys<T>,
{
    /// Flat dropdown; `keys` only supply node ids.
    pub fn new(loader: L, keys: K) -> Self {
        Self {
            loader,
            keys,
            is_tree: false,
            loaded: false,
            list: Vec::new(),
        }
    }

    /// Dropdown whose options nest by parent id.
    pub fn tree(loader: L, keys: K) -> Self {
        Self {
            is_tree: true,
            ..Self::new(loader, keys)
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The cached list, empty until loaded
    pub fn list(&self) -> &[TreeNode<T, K::Id>] {
        &self.list
    }

    /// Load once and return the list; later calls return the cache.
    pub fn load(&mut self) -> MenuTreeResult<&[TreeNode<T, K::Id>]> {
        if !self.loaded {
            let records = self
                .loader
                .load_dropdown_data()
                .map_err(MenuTreeError::Load)?;
            debug!(count = records.len(), tree = self.is_tree, "dropdown data loaded");
            self.list = if self.is_tree {
                build_tree(records, &self.keys)
            } else {
                records
                    .into_iter()
                    .map(|r| TreeNode::root(self.keys.id(&r), r))
                    .collect()
            };
            self.loaded = true;
        }
        Ok(&self.list)
    }

    /// Call when the dropdown opens or closes; opening loads on first show.
    pub fn on_visible_change(&mut self, is_show: bool) -> MenuTreeResult<&[TreeNode<T, K::Id>]> {
        if is_show {
            self.load()
        } else {
            Ok(&self.list)
        }
    }

    /// Drop the cache. With `immediate` the list is reloaded right away,
    /// otherwise it is cleared and reloaded on next use.
    pub fn refresh(&mut self, immediate: bool) -> MenuTreeResult<&[TreeNode<T, K::Id>]> {
        self.loaded = false;
        if immediate {
            return self.load();
        }
        self.list.clear();
        Ok(&self.list)
    }
}
