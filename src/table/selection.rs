//! Tree-table selection engine.
//!
//! A `TreeTable` owns one snapshot of a flat record list. The checked-set
//! (ids only) is the single source of truth for selection; checked and
//! indeterminate flags are derived each time a tree view is requested.
//! Every mutation installs a new `Arc`, so holders of an older snapshot can
//! detect change by pointer identity.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::tree::{build_tree_cloned, visit, FieldKeys, RecordKeys, TreeNode};

/// Shared, immutable checked-set snapshot
pub type CheckedSet<I> = Arc<HashSet<I>>;

/// Behaviour switches for a tree table
pub struct TableOptions<T> {
    /// Disable parent/child cascading of checked state
    pub check_strictly: bool,
    is_leaf: Option<Box<dyn Fn(&T) -> bool>>,
}

impl<T> Default for TableOptions<T> {
    fn default() -> Self {
        Self {
            check_strictly: false,
            is_leaf: None,
        }
    }
}

impl<T> TableOptions<T> {
    pub fn strict(check_strictly: bool) -> Self {
        Self {
            check_strictly,
            is_leaf: None,
        }
    }

    /// Records accepted by `is_leaf` never unlock rows below them when filtering.
    pub fn with_leaf_predicate(mut self, is_leaf: impl Fn(&T) -> bool + 'static) -> Self {
        self.is_leaf = Some(Box::new(is_leaf));
        self
    }
}

impl<T> fmt::Debug for TableOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("check_strictly", &self.check_strictly)
            .field("is_leaf", &self.is_leaf.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A record as shown by a filtered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRow<'a, T> {
    #[serde(flatten)]
    pub record: &'a T,
    #[serde(rename = "__disabled")]
    pub disabled: bool,
}

/// A record in a tree view, with its derived selection state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow<T> {
    #[serde(flatten)]
    record: T,
    #[serde(rename = "__checked")]
    checked: bool,
    #[serde(rename = "__indeterminate")]
    indeterminate: bool,
}

impl<T> TableRow<T> {
    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn into_record(self) -> T {
        self.record
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }
}

/// Tree-table node type produced by `TreeTable::table_tree_data`
pub type TableNode<T, I> = TreeNode<TableRow<T>, I>;

pub struct TreeTable<T, K: RecordKeys<T>> {
    keys: K,
    options: TableOptions<T>,
    data_list: Vec<T>,
    data_map: HashMap<K::Id, usize>,
    checked: Option<CheckedSet<K::Id>>,
}

impl<T, K: RecordKeys<T>> TreeTable<T, K> {
    pub fn new(data_list: Vec<T>, keys: K, options: TableOptions<T>) -> Self {
        let mut data_map = HashMap::with_capacity(data_list.len());
        for (position, record) in data_list.iter().enumerate() {
            if let Some(id) = keys.id(record) {
                data_map.insert(id, position);
            }
        }
        Self {
            keys,
            options,
            data_list,
            data_map,
            checked: None,
        }
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn options(&self) -> &TableOptions<T> {
        &self.options
    }

    pub fn data_list(&self) -> &[T] {
        &self.data_list
    }

    pub fn len(&self) -> usize {
        self.data_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_list.is_empty()
    }

    /// Look a record up by id.
    pub fn table_row(&self, id: &K::Id) -> Option<&T> {
        self.data_map.get(id).and_then(|&i| self.data_list.get(i))
    }

    pub fn is_checked(&self, id: &K::Id) -> bool {
        self.checked.as_ref().is_some_and(|set| set.contains(id))
    }

    /// Current checked-set snapshot; `None` until something was checked or set.
    pub fn checked_snapshot(&self) -> Option<CheckedSet<K::Id>> {
        self.checked.clone()
    }

    /// Canonical records of the checked-set, in list order.
    pub fn checked_records(&self) -> Vec<&T> {
        self.data_list
            .iter()
            .filter(|r| self.keys.id(r).is_some_and(|id| self.is_checked(&id)))
            .collect()
    }

    fn is_leaf(&self, record: &T) -> bool {
        self.options.is_leaf.as_ref().is_some_and(|f| f(record))
    }

    /// Flag rows for a filter without removing any.
    ///
    /// A record matches when its name contains `filter` (an empty or absent
    /// filter matches everything) and, with `only_checked`, it is checked.
    /// Matches and all their ancestors are enabled. Rows below a matching
    /// non-leaf are enabled too, as long as they appear after their parent.
    /// The output always has one row per record, in list order.
    pub fn filter_table_data(&self, filter: Option<&str>, only_checked: bool) -> Vec<FilteredRow<'_, T>> {
        let filter = filter.filter(|f| !f.is_empty());
        let mut visited: HashSet<K::Id> = HashSet::new();
        let mut unlocked: HashSet<K::Id> = HashSet::new();
        // Matches without an id, by position.
        let mut anonymous: HashSet<usize> = HashSet::new();

        for (index, record) in self.data_list.iter().enumerate() {
            let id = self.keys.id(record);
            let name_hit = match filter {
                None => true,
                Some(f) => self.keys.name(record).is_some_and(|name| name.contains(f)),
            };
            let checked_hit = !only_checked || id.as_ref().is_some_and(|id| self.is_checked(id));
            if !(name_hit && checked_hit) {
                continue;
            }

            if !self.is_leaf(record) {
                if let Some(id) = &id {
                    unlocked.insert(id.clone());
                }
            }

            if id.is_none() {
                anonymous.insert(index);
            }
            // Stop at a visited id: the walk that visited it went on to the root.
            let mut cursor = Some(record);
            while let Some(current) = cursor {
                if let Some(current_id) = self.keys.id(current) {
                    if !visited.insert(current_id) {
                        break;
                    }
                }
                cursor = self
                    .keys
                    .parent_id(current)
                    .and_then(|pid| self.table_row(&pid));
            }
        }

        let mut rows = Vec::with_capacity(self.data_list.len());
        for (index, record) in self.data_list.iter().enumerate() {
            let parent_unlocked = self
                .keys
                .parent_id(record)
                .is_some_and(|pid| unlocked.contains(&pid));
            let id = self.keys.id(record);
            let enabled = parent_unlocked
                || anonymous.contains(&index)
                || id.as_ref().is_some_and(|id| visited.contains(id));
            if parent_unlocked && !self.is_leaf(record) {
                if let Some(id) = id {
                    unlocked.insert(id);
                }
            }
            rows.push(FilteredRow {
                record,
                disabled: !enabled,
            });
        }
        rows
    }

    /// Build a tree view over copies of `data_list` with derived selection flags.
    ///
    /// Flags are computed bottom-up. Without `check_strictly` a parent whose
    /// children are all checked (or partially checked) is checked, and one
    /// with some but not all is indeterminate. With `check_strictly` each
    /// node reflects only its own membership.
    pub fn table_tree_data(
        &self,
        data_list: &[T],
        checked: Option<&HashSet<K::Id>>,
    ) -> Vec<TableNode<T, K::Id>>
    where
        T: Clone,
    {
        build_tree_cloned(data_list, &self.keys)
            .into_iter()
            .map(|root| self.mark(root, checked).0)
            .collect()
    }

    /// Tree view of the table's own list and checked-set.
    pub fn tree_data(&self) -> Vec<TableNode<T, K::Id>>
    where
        T: Clone,
    {
        self.table_tree_data(&self.data_list, self.checked.as_deref())
    }

    fn mark(
        &self,
        node: TreeNode<T, K::Id>,
        checked: Option<&HashSet<K::Id>>,
    ) -> (TableNode<T, K::Id>, bool) {
        let strict = self.options.check_strictly;
        let own = match (&node.id, checked) {
            (Some(id), Some(set)) => set.contains(id),
            _ => false,
        };

        let mut all_child_checked = !node.children.is_empty();
        let mut has_child_checked = false;
        let mut children = Vec::with_capacity(node.children.len());
        for child in node.children {
            let (marked, hit) = self.mark(child, checked);
            has_child_checked |= hit;
            all_child_checked &= hit;
            children.push(marked);
        }

        let indeterminate = !strict && has_child_checked && !all_child_checked;
        let is_checked = own || (all_child_checked && !strict);
        let marked = TreeNode {
            id: node.id,
            parent: node.parent,
            level: node.level,
            record: TableRow {
                record: node.record,
                checked: is_checked,
                indeterminate,
            },
            children,
        };
        (marked, is_checked || indeterminate)
    }

    /// Toggle a row from a tree view.
    ///
    /// An unchecked or indeterminate row becomes checked, a checked row
    /// unchecked. Unless `check_strictly`, the change cascades to every
    /// descendant of `row`. The previous snapshot is left untouched.
    pub fn on_checked_row_change(&mut self, row: &TableNode<T, K::Id>) {
        let mut next: HashSet<K::Id> = self.checked.as_deref().cloned().unwrap_or_default();
        let select = !row.record.checked || row.record.indeterminate;

        let mut apply = |id: &Option<K::Id>| {
            if let Some(id) = id {
                if select {
                    next.insert(id.clone());
                } else {
                    next.remove(id);
                }
            }
        };
        apply(&row.id);
        if !self.options.check_strictly {
            visit(&row.children, |node| apply(&node.id));
        }

        debug!(select, checked = next.len(), "checked rows updated");
        self.checked = Some(Arc::new(next));
    }

    /// Nodes of `tree` that are checked (or, with `include_half_checked`,
    /// indeterminate), pre-order.
    pub fn checked_rows<'t>(
        &self,
        tree: &'t [TableNode<T, K::Id>],
        include_half_checked: bool,
    ) -> Vec<&'t TableNode<T, K::Id>> {
        let mut rows = Vec::new();
        visit(tree, |node| {
            if node.record.checked || (include_half_checked && node.record.indeterminate) {
                rows.push(node);
            }
        });
        rows
    }

    /// Replace the checked-set with the rows' ids. Unknown ids are dropped.
    pub fn set_checked_rows<'r>(&mut self, rows: impl IntoIterator<Item = &'r T>)
    where
        T: 'r,
    {
        let ids: Vec<K::Id> = rows.into_iter().filter_map(|r| self.keys.id(r)).collect();
        self.set_checked_ids(ids);
    }

    /// Replace the checked-set with `ids`. Unknown ids are dropped.
    pub fn set_checked_ids(&mut self, ids: impl IntoIterator<Item = K::Id>) {
        let set: HashSet<K::Id> = ids
            .into_iter()
            .filter(|id| self.data_map.contains_key(id))
            .collect();
        self.checked = Some(Arc::new(set));
    }
}

impl TreeTable<Value, FieldKeys> {
    /// Table over a JSON array. Anything else yields an empty table.
    pub fn from_json(value: &Value, keys: FieldKeys, options: TableOptions<Value>) -> Self {
        let rows = match value.as_array() {
            Some(rows) => rows.clone(),
            None => {
                debug!("table input is not an array, using an empty list");
                Vec::new()
            }
        };
        Self::new(rows, keys, options)
    }
}
