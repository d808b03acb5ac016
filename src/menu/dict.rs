//! Dictionaries of enumerated values
//!
//! A dictionary maps numeric ids to a display name and a stable symbol.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MenuTreeError, MenuTreeResult};

/// One dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub id: i64,
    pub name: String,
    pub symbol: String,
}

/// A named list of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    name: String,
    entries: Vec<DictEntry>,
}

impl Dictionary {
    pub fn new(name: impl Into<String>, entries: Vec<DictEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&DictEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_name(&self, id: i64) -> Option<&str> {
        self.get(id).map(|e| e.name.as_str())
    }

    pub fn get_symbol(&self, id: i64) -> Option<&str> {
        self.get(id).map(|e| e.symbol.as_str())
    }

    /// Reverse lookup by symbol
    pub fn get_value(&self, symbol: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.id)
    }
}

/// How a menu node is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum MenuBindType {
    /// Plain routed page
    Router,
    OnlineForm,
    WorkOrder,
    Report,
    /// External link
    ThirdUrl,
}

impl MenuBindType {
    pub const ALL: [MenuBindType; 5] = [
        MenuBindType::Router,
        MenuBindType::OnlineForm,
        MenuBindType::WorkOrder,
        MenuBindType::Report,
        MenuBindType::ThirdUrl,
    ];

    pub fn id(self) -> i64 {
        match self {
            MenuBindType::Router => 0,
            MenuBindType::OnlineForm => 1,
            MenuBindType::WorkOrder => 2,
            MenuBindType::Report => 3,
            MenuBindType::ThirdUrl => 4,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MenuBindType::Router => "ROUTER",
            MenuBindType::OnlineForm => "ONLINE_FORM",
            MenuBindType::WorkOrder => "WORK_ORDER",
            MenuBindType::Report => "REPORT",
            MenuBindType::ThirdUrl => "THIRD_URL",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuBindType::Router => "Route menu",
            MenuBindType::OnlineForm => "Online form",
            MenuBindType::WorkOrder => "Work order list",
            MenuBindType::Report => "Report page",
            MenuBindType::ThirdUrl => "External link",
        }
    }

    pub fn from_id(id: i64) -> MenuTreeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.id() == id)
            .ok_or_else(|| MenuTreeError::UnknownDictionaryId {
                dictionary: "menu bind type".to_string(),
                id,
            })
    }

    /// The bind types as a generic dictionary
    pub fn dictionary() -> Dictionary {
        Dictionary::new(
            "menu bind type",
            Self::ALL
                .into_iter()
                .map(|b| DictEntry {
                    id: b.id(),
                    name: b.label().to_string(),
                    symbol: b.symbol().to_string(),
                })
                .collect(),
        )
    }
}

impl TryFrom<i64> for MenuBindType {
    type Error = MenuTreeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_id(value)
    }
}

impl From<MenuBindType> for i64 {
    fn from(value: MenuBindType) -> Self {
        value.id()
    }
}

impl fmt::Display for MenuBindType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
