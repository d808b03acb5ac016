//! Property tests for the tree-table selection engine.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{json, Value};

use menutree::{visit, FieldKeys, NodeId, TableOptions, TreeTable};

/// Parents always precede children; names come from a tiny alphabet so
/// filters hit some rows and miss others.
fn permission_list() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec((any::<prop::sample::Index>(), "[ab]{1,3}"), 1..30).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (parent, name))| {
                    let mut record = json!({ "id": i as i64, "name": name });
                    if i > 0 && parent.index(4) != 0 {
                        record["parentId"] = json!(parent.index(i) as i64);
                    }
                    record
                })
                .collect()
        },
    )
}

fn checked_ids(len: usize) -> impl Strategy<Value = Vec<NodeId>> {
    proptest::collection::vec(0..(len as i64 + 3), 0..8)
        .prop_map(|ids| ids.into_iter().map(NodeId::Num).collect())
}

fn list_and_checked() -> impl Strategy<Value = (Vec<Value>, Vec<NodeId>)> {
    permission_list().prop_flat_map(|list| {
        let len = list.len();
        (Just(list), checked_ids(len))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: filtering flags rows but never drops or reorders them.
    #[test]
    fn property_filter_keeps_every_row(
        (list, checked) in list_and_checked(),
        query in "[ab]{0,2}",
        only_checked in any::<bool>(),
    ) {
        let mut table = TreeTable::new(list.clone(), FieldKeys::default(), TableOptions::default());
        table.set_checked_ids(checked);

        let rows = table.filter_table_data(Some(&query), only_checked);

        prop_assert_eq!(rows.len(), list.len());
        for (row, record) in rows.iter().zip(&list) {
            prop_assert_eq!(row.record, record);
        }
    }

    /// PROPERTY: every enabled row whose name matches has enabled ancestors.
    #[test]
    fn property_matches_unlock_ancestors(list in permission_list(), query in "[ab]{1,2}") {
        let table = TreeTable::new(list.clone(), FieldKeys::default(), TableOptions::default());

        let rows = table.filter_table_data(Some(&query), false);

        let enabled: HashSet<i64> = rows
            .iter()
            .filter(|r| !r.disabled)
            .filter_map(|r| r.record["id"].as_i64())
            .collect();
        for record in &list {
            if record["name"].as_str().unwrap().contains(query.as_str()) {
                let mut cursor = Some(record);
                while let Some(current) = cursor {
                    prop_assert!(enabled.contains(&current["id"].as_i64().unwrap()));
                    cursor = current["parentId"]
                        .as_i64()
                        .map(|pid| &list[pid as usize]);
                }
            }
        }
    }

    /// PROPERTY: in strict mode each node's checked flag is exactly membership.
    #[test]
    fn property_strict_mode_is_membership((list, checked) in list_and_checked()) {
        let mut table = TreeTable::new(list, FieldKeys::default(), TableOptions::strict(true));
        table.set_checked_ids(checked);
        let set = table.checked_snapshot().unwrap();

        let tree = table.tree_data();

        let mut seen = 0usize;
        visit(&tree, |node| {
            seen += 1;
            let member = node.id.as_ref().is_some_and(|id| set.contains(id));
            assert_eq!(node.record.is_checked(), member);
            assert!(!node.record.is_indeterminate());
        });
        prop_assert_eq!(seen, table.len());
    }

    /// PROPERTY: leaves are never indeterminate and are checked exactly when selected.
    #[test]
    fn property_leaves_reflect_membership((list, checked) in list_and_checked()) {
        let mut table = TreeTable::new(list, FieldKeys::default(), TableOptions::default());
        table.set_checked_ids(checked);
        let set = table.checked_snapshot().unwrap();

        let tree = table.tree_data();

        visit(&tree, |node| {
            if node.is_leaf() {
                let member = node.id.as_ref().is_some_and(|id| set.contains(id));
                assert_eq!(node.record.is_checked(), member);
                assert!(!node.record.is_indeterminate());
            }
        });
    }

    /// PROPERTY: toggling a row twice restores its subtree's membership.
    #[test]
    fn property_double_toggle_restores_subtree((list, checked) in list_and_checked(), pick in any::<prop::sample::Index>()) {
        let mut table = TreeTable::new(list.clone(), FieldKeys::default(), TableOptions::default());
        table.set_checked_ids(checked);
        let target = NodeId::Num(pick.index(list.len()) as i64);

        let tree = table.tree_data();
        let row = menutree::find_by_id(&tree, &target).unwrap();
        table.on_checked_row_change(row);
        let first = table.is_checked(&target);
        let tree = table.tree_data();
        let row = menutree::find_by_id(&tree, &target).unwrap();
        table.on_checked_row_change(row);

        // After the first toggle the whole subtree shares one state, so the
        // second toggle flips all of it back to unchecked or checked.
        let mut subtree = Vec::new();
        visit(std::slice::from_ref(row), |node| subtree.push(node.id.clone().unwrap()));
        for id in subtree {
            prop_assert_eq!(table.is_checked(&id), !first);
        }
    }

    /// PROPERTY: re-applying the full checked rows of a tree is stable.
    #[test]
    fn property_checked_rows_round_trip((list, checked) in list_and_checked()) {
        let mut table = TreeTable::new(list, FieldKeys::default(), TableOptions::default());
        table.set_checked_ids(checked);
        let tree = table.tree_data();
        let ids: Vec<NodeId> = table
            .checked_rows(&tree, false)
            .into_iter()
            .filter_map(|n| n.id.clone())
            .collect();

        table.set_checked_ids(ids.clone());
        let tree = table.tree_data();
        let again: Vec<NodeId> = table
            .checked_rows(&tree, false)
            .into_iter()
            .filter_map(|n| n.id.clone())
            .collect();

        prop_assert_eq!(again, ids);
    }
}
