//! Configuration module for menutree
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (MENUTREE_*)
//! 3. `--config` file, else `./menutree.toml`
//! 4. User config (`<config dir>/menutree/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{apply_overrides, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, KeysConfig, PagerConfig, TableConfig};
