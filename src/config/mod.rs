//! Configuration storage for tool settings.
//!
//! This module handles:
//! - Value types and the [`ToolConfig`] view in [`schema`]
//! - File discovery in [`loader`]
//! - The [`ConfigStore`] trait and its implementations in [`store`]
//!
//! # Example
//!
//! ```
//! use toolgate::config::{ConfigScope, ConfigStore, ConfigValue, MemoryConfigStore, ToolConfig};
//!
//! let store = MemoryConfigStore::new();
//! store
//!     .set("maid.path", ConfigValue::Text("/opt/maid".into()), ConfigScope::Global)
//!     .unwrap();
//!
//! let config = ToolConfig::load(&store, "maid").unwrap();
//! assert_eq!(config.path, "/opt/maid");
//! ```
//!
//! # Configuration File Locations
//!
//! 1. User global config (`~/.toolgate/config.yml`)
//! 2. Project config (`.toolgate.yml`), which wins on reads

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::ConfigPaths;
pub use schema::{args_key, fallback_key, path_key, ConfigScope, ConfigValue, ToolConfig};
pub use store::{ConfigStore, ConfigWrite, FileConfigStore, MemoryConfigStore};
