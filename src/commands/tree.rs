use std::path::Path;

use anyhow::{bail, Result};
use menutree::{build_tree, find_path_to_node, Config, NodeId};
use tracing::debug;

use super::{print_json, read_json, records};

pub fn cmd_tree(config: &Config, input: &Path) -> Result<()> {
    let rows = records(read_json(input)?)?;
    let keys = config.keys.field_keys();

    let tree = build_tree(rows, &keys);

    debug!(roots = tree.len(), "tree built");
    print_json(&tree)
}

pub fn cmd_path(config: &Config, input: &Path, id: &NodeId) -> Result<()> {
    let rows = records(read_json(input)?)?;
    let keys = config.keys.field_keys();
    let tree = build_tree(rows, &keys);

    let path = find_path_to_node(&tree, id);
    if path.is_empty() {
        bail!("no record with {} {}", keys.id_key, id);
    }

    let records: Vec<_> = path.into_iter().map(|node| &node.record).collect();
    print_json(&records)
}
