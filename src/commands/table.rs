use std::path::Path;

use anyhow::{Context, Result};
use menutree::{find_by_id, Config, FieldKeys, NodeId, TableOptions, TreeTable};
use serde_json::{json, Value};
use tracing::debug;

use super::{print_json, read_json, records};

fn load_table(config: &Config, input: &Path, strict: bool) -> Result<TreeTable<Value, FieldKeys>> {
    let rows = records(read_json(input)?)?;
    let options = TableOptions::strict(strict || config.table.check_strictly);
    Ok(TreeTable::new(rows, config.keys.field_keys(), options))
}

pub fn cmd_filter(
    config: &Config,
    input: &Path,
    query: Option<&str>,
    only_checked: bool,
    checked: Vec<NodeId>,
) -> Result<()> {
    let mut table = load_table(config, input, false)?;
    if !checked.is_empty() {
        table.set_checked_ids(checked);
    }

    let rows = table.filter_table_data(query, only_checked);

    debug!(
        rows = rows.len(),
        disabled = rows.iter().filter(|r| r.disabled).count(),
        "table filtered"
    );
    print_json(&rows)
}

pub fn cmd_check(
    config: &Config,
    input: &Path,
    checked: Vec<NodeId>,
    toggle: Option<&NodeId>,
    include_half: bool,
    strict: bool,
) -> Result<()> {
    let mut table = load_table(config, input, strict)?;
    table.set_checked_ids(checked);

    if let Some(id) = toggle {
        let tree = table.tree_data();
        let row = find_by_id(&tree, id).with_context(|| format!("no row with id {}", id))?;
        table.on_checked_row_change(row);
    }

    let tree = table.tree_data();
    let checked_ids: Vec<&NodeId> = table
        .checked_rows(&tree, include_half)
        .into_iter()
        .filter_map(|node| node.id.as_ref())
        .collect();

    print_json(&json!({
        "checked": checked_ids,
        "tree": tree,
    }))
}
