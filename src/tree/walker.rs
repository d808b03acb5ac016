//! Depth-first traversal and search over trees.
//!
//! All functions are pre-order and work on any `TreeItem`. Only `visit_mut`
//! and `filter_tree` produce or touch data; the rest borrow.

use super::node::TreeItem;

/// First node (pre-order) whose id equals `id`.
pub fn find_by_id<'a, N: TreeItem>(tree: &'a [N], id: &N::Id) -> Option<&'a N> {
    find_by(tree, |node| node.item_id() == Some(id))
}

/// First node (pre-order) matching `predicate`.
pub fn find_by<'a, N, F>(tree: &'a [N], mut predicate: F) -> Option<&'a N>
where
    N: TreeItem,
    F: FnMut(&N) -> bool,
{
    fn search<'a, N: TreeItem>(
        nodes: &'a [N],
        predicate: &mut dyn FnMut(&N) -> bool,
    ) -> Option<&'a N> {
        for node in nodes {
            if predicate(node) {
                return Some(node);
            }
            if let Some(found) = search(node.children(), predicate) {
                return Some(found);
            }
        }
        None
    }

    search(tree, &mut predicate)
}

/// Root-to-node path (inclusive) inside the first root that contains `id`.
///
/// Returns an empty path when no node matches.
pub fn find_path_to_node<'a, N: TreeItem>(tree: &'a [N], id: &N::Id) -> Vec<&'a N> {
    fn descend<'a, N: TreeItem>(node: &'a N, id: &N::Id, path: &mut Vec<&'a N>) -> bool {
        path.push(node);
        if node.item_id() == Some(id) {
            return true;
        }
        if node.children().iter().any(|child| descend(child, id, path)) {
            return true;
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    for root in tree {
        if descend(root, id, &mut path) {
            return path;
        }
    }
    path
}

/// Same as `find_path_to_node`, reduced to ids.
pub fn find_id_path<N>(tree: &[N], id: &N::Id) -> Vec<N::Id>
where
    N: TreeItem,
    N::Id: Clone,
{
    find_path_to_node(tree, id)
        .into_iter()
        .filter_map(|node| node.item_id().cloned())
        .collect()
}

/// Every node in pre-order, by reference.
pub fn flatten<N: TreeItem>(tree: &[N]) -> Vec<&N> {
    fn collect<'a, N: TreeItem>(nodes: &'a [N], out: &mut Vec<&'a N>) {
        for node in nodes {
            out.push(node);
            collect(node.children(), out);
        }
    }

    let mut out = Vec::new();
    collect(tree, &mut out);
    out
}

/// Call `f` on every node in pre-order.
pub fn visit<'a, N, F>(tree: &'a [N], mut f: F)
where
    N: TreeItem,
    F: FnMut(&'a N),
{
    fn walk<'a, N: TreeItem>(nodes: &'a [N], f: &mut dyn FnMut(&'a N)) {
        for node in nodes {
            f(node);
            walk(node.children(), f);
        }
    }

    walk(tree, &mut f);
}

/// Call `f` on every node in pre-order with mutable access.
///
/// Children are visited after `f` returns, so `f` may rewrite them.
pub fn visit_mut<N, F>(tree: &mut [N], mut f: F)
where
    N: TreeItem,
    F: FnMut(&mut N),
{
    fn walk<N: TreeItem>(nodes: &mut [N], f: &mut dyn FnMut(&mut N)) {
        for node in nodes {
            f(node);
            walk(node.children_mut(), f);
        }
    }

    walk(tree, &mut f);
}

/// Deep copy of `tree` keeping only nodes accepted by `keep`.
///
/// Children are filtered before their parent level, so `keep` sees a node
/// whose children have already been pruned. A rejected node drops its whole
/// subtree.
pub fn filter_tree<N, F>(tree: &[N], mut keep: F) -> Vec<N>
where
    N: TreeItem + Clone,
    F: FnMut(&N) -> bool,
{
    fn prune<N: TreeItem>(nodes: &mut Vec<N>, keep: &mut dyn FnMut(&N) -> bool) {
        for node in nodes.iter_mut() {
            prune(node.children_mut(), keep);
        }
        nodes.retain(|node| keep(node));
    }

    let mut copied = tree.to_vec();
    prune(&mut copied, &mut keep);
    copied
}
