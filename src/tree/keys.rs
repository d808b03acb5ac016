//! Record identity accessors
//!
//! Trees are built from arbitrary record types. Instead of looking fields up
//! by name at runtime, callers hand the builder a `RecordKeys` capability that
//! knows how to read the id, parent id and display name of a record.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a JSON record.
///
/// Numbers and strings are distinct ids: `1` and `"1"` never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Num(i64),
    Str(String),
}

impl NodeId {
    /// Read an id out of a JSON value. Non-integer numbers keep their
    /// textual form; anything else is not an id.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => NodeId::Num(i),
                None => NodeId::Str(n.to_string()),
            }),
            Value::String(s) => Some(NodeId::Str(s.clone())),
            _ => None,
        }
    }

    /// Parse a command-line id: integers become `Num`, quoted or other text `Str`.
    pub fn parse_loose(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(quoted) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            return NodeId::Str(quoted.to_string());
        }
        match raw.parse::<i64>() {
            Ok(i) => NodeId::Num(i),
            Err(_) => NodeId::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Num(i) => write!(f, "{}", i),
            NodeId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Num(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Str(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Str(value)
    }
}

/// Accessor capability over a record type.
pub trait RecordKeys<T> {
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// The record's own id, if it has one.
    fn id(&self, record: &T) -> Option<Self::Id>;

    /// The id of the record's parent. `None` means "root".
    fn parent_id(&self, record: &T) -> Option<Self::Id>;

    /// Display name used for text filtering.
    fn name<'r>(&self, _record: &'r T) -> Option<&'r str> {
        None
    }
}

/// Field-name accessors for JSON object records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldKeys {
    pub id_key: String,
    pub name_key: String,
    pub parent_id_key: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            id_key: "id".to_string(),
            name_key: "name".to_string(),
            parent_id_key: "parentId".to_string(),
        }
    }
}

impl FieldKeys {
    pub fn new(
        id_key: impl Into<String>,
        name_key: impl Into<String>,
        parent_id_key: impl Into<String>,
    ) -> Self {
        Self {
            id_key: id_key.into(),
            name_key: name_key.into(),
            parent_id_key: parent_id_key.into(),
        }
    }
}

impl RecordKeys<Value> for FieldKeys {
    type Id = NodeId;

    fn id(&self, record: &Value) -> Option<NodeId> {
        record.get(&self.id_key).and_then(NodeId::from_value)
    }

    fn parent_id(&self, record: &Value) -> Option<NodeId> {
        record.get(&self.parent_id_key).and_then(NodeId::from_value)
    }

    fn name<'r>(&self, record: &'r Value) -> Option<&'r str> {
        record.get(&self.name_key).and_then(Value::as_str)
    }
}

/// Closure-backed accessors for typed records.
pub struct Accessors<F, P, I> {
    id: F,
    parent_id: P,
    _id: PhantomData<fn() -> I>,
}

/// Build accessors from an id closure and a parent-id closure.
pub fn accessors<T, I, F, P>(id: F, parent_id: P) -> Accessors<F, P, I>
where
    F: Fn(&T) -> Option<I>,
    P: Fn(&T) -> Option<I>,
{
    Accessors {
        id,
        parent_id,
        _id: PhantomData,
    }
}

impl<F, P, I> Accessors<F, P, I> {
    /// Add a display-name accessor, enabling text filtering.
    pub fn with_name<N>(self, name: N) -> NamedAccessors<F, P, N, I> {
        NamedAccessors {
            inner: self,
            name,
        }
    }
}

impl<T, I, F, P> RecordKeys<T> for Accessors<F, P, I>
where
    F: Fn(&T) -> Option<I>,
    P: Fn(&T) -> Option<I>,
    I: Clone + Eq + Hash + fmt::Debug,
{
    type Id = I;

    fn id(&self, record: &T) -> Option<I> {
        (self.id)(record)
    }

    fn parent_id(&self, record: &T) -> Option<I> {
        (self.parent_id)(record)
    }
}

/// `Accessors` plus a name closure.
pub struct NamedAccessors<F, P, N, I> {
    inner: Accessors<F, P, I>,
    name: N,
}

impl<T, I, F, P, N> RecordKeys<T> for NamedAccessors<F, P, N, I>
where
    F: Fn(&T) -> Option<I>,
    P: Fn(&T) -> Option<I>,
    N: for<'r> Fn(&'r T) -> Option<&'r str>,
    I: Clone + Eq + Hash + fmt::Debug,
{
    type Id = I;

    fn id(&self, record: &T) -> Option<I> {
        (self.inner.id)(record)
    }

    fn parent_id(&self, record: &T) -> Option<I> {
        (self.inner.parent_id)(record)
    }

    fn name<'r>(&self, record: &'r T) -> Option<&'r str> {
        (self.name)(record)
    }
}
