//! Tree node data structure

use serde::Serialize;

use super::keys::NodeId;

/// A node built from a flat record.
///
/// `record` is an owned copy of the source record; `level` is 1 for roots
/// and `parent.level + 1` below that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode<T, I = NodeId> {
    #[serde(skip)]
    pub id: Option<I>,
    /// Parent id, set only when the node was attached under a parent
    #[serde(rename = "_parent", skip_serializing_if = "Option::is_none")]
    pub parent: Option<I>,
    #[serde(rename = "_level")]
    pub level: usize,
    #[serde(flatten)]
    pub record: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode<T, I>>,
}

impl<T, I> TreeNode<T, I> {
    /// Create a detached root node
    pub fn root(id: Option<I>, record: T) -> Self {
        Self {
            id,
            parent: None,
            level: 1,
            record,
            children: Vec::new(),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Rebuild the subtree with a new record type, keeping the shape.
    pub fn map<U, F>(self, f: &mut F) -> TreeNode<U, I>
    where
        F: FnMut(T) -> U,
    {
        let record = f(self.record);
        TreeNode {
            id: self.id,
            parent: self.parent,
            level: self.level,
            record,
            children: self.children.into_iter().map(|c| c.map(&mut *f)).collect(),
        }
    }
}

/// A node that exposes an id and ordered children.
///
/// Implemented by `TreeNode` and by nested domain records such as menus, so
/// the walker functions work over both.
pub trait TreeItem: Sized {
    type Id: PartialEq;

    fn item_id(&self) -> Option<&Self::Id>;

    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut Vec<Self>;
}

impl<T, I: PartialEq> TreeItem for TreeNode<T, I> {
    type Id = I;

    fn item_id(&self) -> Option<&I> {
        self.id.as_ref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}
