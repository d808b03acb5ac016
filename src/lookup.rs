//! Lookups over loosely typed JSON: enum lists, dotted paths and merging

use serde_json::{Map, Value};

/// Keys of an enum option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub value: String,
    pub label: String,
    pub children: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            value: "value".to_string(),
            label: "label".to_string(),
            children: "children".to_string(),
        }
    }
}

/// Placeholder shown for a value with no enum entry
pub const MISSING_LABEL: &str = "--";

/// First item, depth-first, whose `value_key` equals `value`.
pub fn find_item_nested<'a>(
    items: &'a [Value],
    value: &Value,
    value_key: &str,
    children_key: &str,
) -> Option<&'a Value> {
    items.iter().find_map(|item| {
        if item.get(value_key) == Some(value) {
            return Some(item);
        }
        match item.get(children_key) {
            Some(Value::Array(children)) => {
                find_item_nested(children, value, value_key, children_key)
            }
            _ => None,
        }
    })
}

fn enum_item<'a>(value: &Value, enum_data: &'a Value, names: &FieldNames) -> Option<&'a Value> {
    let items = enum_data.as_array()?;
    find_item_nested(items, value, &names.value, &names.children)
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Label of `value` in `enum_data`, or `--` when there is none.
pub fn filter_enum(value: &Value, enum_data: &Value, names: &FieldNames) -> String {
    match enum_item(value, enum_data, names) {
        Some(item) => item.get(&names.label).map(display).unwrap_or_default(),
        None => MISSING_LABEL.to_string(),
    }
}

/// `tagType` of the enum entry for `value`, or an empty string.
pub fn filter_enum_tag(value: &Value, enum_data: &Value, names: &FieldNames) -> String {
    enum_item(value, enum_data, names)
        .and_then(|item| item.get("tagType"))
        .map(display)
        .unwrap_or_default()
}

/// Follow a dotted path such as `meta.title`. An empty path returns `data`.
pub fn object_value<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(data);
    }
    path.split('.').try_fold(data, |current, key| match current {
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => current.get(key),
    })
}

/// Merge `overlay` into a copy of `base`.
///
/// Objects merge key by key, recursively. Two arrays merge element-wise:
/// the result has the overlay's length, and an overlay element lands on a
/// base object by merging into it. Anything else in the overlay overwrites.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let Value::Object(extra) = overlay else {
        return base.clone();
    };
    let mut merged = match base {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    for (key, incoming) in extra {
        let value = match (merged.get(key), incoming) {
            (Some(current @ Value::Object(_)), Value::Object(_)) => deep_merge(current, incoming),
            (Some(Value::Array(current)), Value::Array(items)) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match current.get(i) {
                        Some(slot @ Value::Object(_)) => deep_merge(slot, item),
                        _ => item.clone(),
                    })
                    .collect(),
            ),
            _ => incoming.clone(),
        };
        merged.insert(key.clone(), value);
    }
    Value::Object(merged)
}
