//! `menutree filter` and `menutree check`

mod common;

use common::fixtures::PERMISSIONS;
use common::{column, stderr, Sandbox};
use serde_json::{json, Value};

fn sandbox() -> Sandbox {
    let sandbox = Sandbox::new();
    sandbox.write("perms.json", PERMISSIONS);
    sandbox
}

fn disabled_ids(rows: &Value) -> Vec<i64> {
    rows.as_array()
        .unwrap()
        .iter()
        .filter(|row| row["__disabled"] == json!(true))
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn filter_flags_every_row() {
    let rows = sandbox().run_json(&["filter", "perms.json", "--query", "user"]);

    assert_eq!(rows.as_array().unwrap().len(), 6);
    assert_eq!(disabled_ids(&rows), vec![5, 6]);
}

#[test]
fn filter_without_query_enables_all() {
    let rows = sandbox().run_json(&["filter", "perms.json"]);

    assert!(disabled_ids(&rows).is_empty());
}

#[test]
fn filter_only_checked() {
    let rows = sandbox().run_json(&["filter", "perms.json", "--only-checked", "--checked", "6"]);

    assert_eq!(disabled_ids(&rows), vec![2, 3, 4]);
}

#[test]
fn check_derives_parent_flags() {
    let result = sandbox().run_json(&["check", "perms.json", "--checked", "3,4"]);

    assert_eq!(result["checked"], json!([2, 3, 4]));
    let root = &result["tree"][0];
    assert_eq!(root["__checked"], false);
    assert_eq!(root["__indeterminate"], true);
    assert_eq!(root["children"][0]["__checked"], true);
}

#[test]
fn check_half_includes_indeterminate_rows() {
    let result = sandbox().run_json(&["check", "perms.json", "--checked", "3,4", "--half"]);

    assert_eq!(result["checked"], json!([1, 2, 3, 4]));
}

#[test]
fn check_toggle_cascades() {
    let result = sandbox().run_json(&["check", "perms.json", "--toggle", "5"]);

    assert_eq!(result["checked"], json!([5, 6]));
}

#[test]
fn check_toggle_unchecks_checked_row() {
    let result = sandbox().run_json(&["check", "perms.json", "--checked", "2,3,4", "--toggle", "2"]);

    assert_eq!(result["checked"], json!([]));
}

#[test]
fn strict_mode_from_flag_or_config() {
    let s = sandbox();
    let result = s.run_json(&["check", "perms.json", "--checked", "3,4", "--strict"]);
    assert_eq!(result["checked"], json!([3, 4]));

    s.write("menutree.toml", "[table]\ncheck_strictly = true\n");
    let result = s.run_json(&["check", "perms.json", "--toggle", "5"]);
    assert_eq!(result["checked"], json!([5]));
    assert_eq!(column(&result["tree"], "__indeterminate"), vec![json!(false)]);
}

#[test]
fn check_ignores_unknown_checked_ids() {
    let result = sandbox().run_json(&["check", "perms.json", "--checked", "3,99,\"x\""]);

    assert_eq!(result["checked"], json!([3]));
}

#[test]
fn check_toggle_unknown_row_fails() {
    let output = sandbox().run(&["check", "perms.json", "--toggle", "77"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no row with id 77"));
}
