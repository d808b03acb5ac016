//! Tree construction from flat records.
//!
//! Builds a forest in a single left-to-right pass. The id index is filled
//! while it is read, so a record only attaches under a parent that appeared
//! earlier in the input. A record listed before its parent becomes a root.
//! Callers depend on this ordering contract; keep it.

use std::collections::HashMap;

use tracing::debug;

use super::keys::RecordKeys;
use super::node::TreeNode;

/// A node waiting for its children to be assembled
struct Pending<T, I> {
    id: Option<I>,
    parent: Option<I>,
    level: usize,
    record: T,
    children: Vec<usize>,
}

/// Build a forest from flat records.
///
/// Every input record appears exactly once in the output. Siblings and roots
/// keep source order. A record whose id equals its own parent id is a root.
/// Records without an id are kept but can never be parents; a later record
/// with a duplicate id shadows the earlier one as an attachment target.
pub fn build_tree<T, K>(records: impl IntoIterator<Item = T>, keys: &K) -> Vec<TreeNode<T, K::Id>>
where
    K: RecordKeys<T>,
{
    let mut arena: Vec<Pending<T, K::Id>> = Vec::new();
    let mut index: HashMap<K::Id, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for record in records {
        let id = keys.id(&record);
        let parent_id = keys.parent_id(&record);
        let position = arena.len();

        let parent_slot = match &parent_id {
            Some(pid) if id.as_ref() != Some(pid) => index.get(pid).copied(),
            _ => None,
        };

        let (level, parent) = match parent_slot {
            Some(slot) => {
                let owner = &mut arena[slot];
                owner.children.push(position);
                (owner.level + 1, parent_id)
            }
            None => {
                if let Some(pid) = &parent_id {
                    debug!(?id, parent_id = ?pid, "parent not seen yet, placing record at root");
                }
                roots.push(position);
                (1, None)
            }
        };

        if let Some(id) = &id {
            index.insert(id.clone(), position);
        }

        arena.push(Pending {
            id,
            parent,
            level,
            record,
            children: Vec::new(),
        });
    }

    // Children always sit after their parent in the arena, so assembling
    // back to front finishes every child before its parent needs it.
    let mut finished: Vec<Option<TreeNode<T, K::Id>>> = Vec::with_capacity(arena.len());
    finished.resize_with(arena.len(), || None);

    for (position, pending) in arena.into_iter().enumerate().rev() {
        let children = pending
            .children
            .iter()
            .filter_map(|&child| finished[child].take())
            .collect();
        finished[position] = Some(TreeNode {
            id: pending.id,
            parent: pending.parent,
            level: pending.level,
            record: pending.record,
            children,
        });
    }

    roots
        .into_iter()
        .filter_map(|root| finished[root].take())
        .collect()
}

/// Build a forest from cloned records, leaving the source list untouched.
pub fn build_tree_cloned<T, K>(records: &[T], keys: &K) -> Vec<TreeNode<T, K::Id>>
where
    T: Clone,
    K: RecordKeys<T>,
{
    build_tree(records.iter().cloned(), keys)
}
