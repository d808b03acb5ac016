//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MenuTreeResult;
use crate::menu::LayoutOptions;
use crate::pager::{PagerOptions, DEFAULT_PAGE_SIZE};
use crate::tree::FieldKeys;

use super::loader::{self, ConfigWarning};

/// Record field names used to read JSON input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default = "default_id_key")]
    pub id: String,

    #[serde(default = "default_name_key")]
    pub name: String,

    #[serde(default = "default_parent_id_key")]
    pub parent_id: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            id: default_id_key(),
            name: default_name_key(),
            parent_id: default_parent_id_key(),
        }
    }
}

impl KeysConfig {
    pub fn field_keys(&self) -> FieldKeys {
        FieldKeys::new(&self.id, &self.name, &self.parent_id)
    }
}

fn default_id_key() -> String {
    "id".to_string()
}

fn default_name_key() -> String {
    "name".to_string()
}

fn default_parent_id_key() -> String {
    "parentId".to_string()
}

/// Tree-table selection behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub check_strictly: bool,
}

/// Paged loading defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl PagerConfig {
    /// Pager options seeded with the configured page size
    pub fn options(&self) -> PagerOptions {
        PagerOptions {
            page_size: self.page_size,
            ..PagerOptions::default()
        }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keys: KeysConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub pager: PagerConfig,

    #[serde(default)]
    pub layout: LayoutOptions,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> MenuTreeResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> MenuTreeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (MENUTREE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
