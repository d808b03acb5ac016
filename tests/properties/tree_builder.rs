//! Property tests for the tree builder and walker.

use std::collections::HashMap;

use proptest::prelude::*;
use serde_json::{json, Value};

use menutree::{build_tree, find_path_to_node, flatten, FieldKeys, NodeId, TreeNode};

/// Records with small ids so duplicates, self-parents and dangling parents
/// all show up regularly. Some records carry no id or no parent.
fn records() -> impl Strategy<Value = Vec<Value>> {
    let record = (proptest::option::weighted(0.9, 0..12i64), proptest::option::of(0..12i64));
    proptest::collection::vec(record, 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(seq, (id, parent))| {
                let mut record = json!({ "seq": seq });
                if let Some(id) = id {
                    record["id"] = json!(id);
                }
                if let Some(parent) = parent {
                    record["parentId"] = json!(parent);
                }
                record
            })
            .collect()
    })
}

fn check_levels(nodes: &[TreeNode<Value>], level: usize, parent: Option<&NodeId>) {
    for node in nodes {
        assert_eq!(node.level, level);
        assert_eq!(node.parent.as_ref(), parent);
        check_levels(&node.children, level + 1, node.id.as_ref());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every input record appears exactly once in the forest.
    #[test]
    fn property_build_tree_keeps_every_record(list in records()) {
        let tree = build_tree(list.clone(), &FieldKeys::default());

        let mut seqs: Vec<u64> = flatten(&tree)
            .iter()
            .map(|node| node.record["seq"].as_u64().unwrap())
            .collect();
        seqs.sort_unstable();

        prop_assert_eq!(seqs, (0..list.len() as u64).collect::<Vec<_>>());
    }

    /// PROPERTY: roots sit at level 1 and every child one level below its parent.
    #[test]
    fn property_levels_follow_parents(list in records()) {
        let tree = build_tree(list, &FieldKeys::default());

        check_levels(&tree, 1, None);
    }

    /// PROPERTY: a child always comes later in the input than its parent.
    #[test]
    fn property_children_follow_parents(list in records()) {
        let tree = build_tree(list, &FieldKeys::default());

        for node in flatten(&tree) {
            let seq = node.record["seq"].as_u64().unwrap();
            for child in &node.children {
                prop_assert!(child.record["seq"].as_u64().unwrap() > seq);
            }
        }
    }

    /// PROPERTY: the path to any node starts at a root and ends at that node.
    #[test]
    fn property_paths_end_at_target(list in records()) {
        let tree = build_tree(list, &FieldKeys::default());

        // The first node with a given id in pre-order is what a search finds.
        let mut first_by_id: HashMap<NodeId, u64> = HashMap::new();
        for node in flatten(&tree) {
            if let Some(id) = &node.id {
                first_by_id
                    .entry(id.clone())
                    .or_insert_with(|| node.record["seq"].as_u64().unwrap());
            }
        }

        for (id, seq) in first_by_id {
            let path = find_path_to_node(&tree, &id);
            prop_assert!(!path.is_empty());
            prop_assert_eq!(path[0].level, 1);
            let last = path[path.len() - 1];
            prop_assert_eq!(last.record["seq"].as_u64(), Some(seq));
            prop_assert_eq!(path.len(), last.level);
        }
    }
}
