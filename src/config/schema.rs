//! Configuration value types.
//!
//! Settings live under dotted keys named after the tool, mirroring how
//! editor settings are usually written:
//!
//! ```yaml
//! maid.path: /home/you/.cargo/bin/maid
//! maid.args: ["--quiet"]
//! maid.fallback: "~/.local/bin/maid"
//! ```

use serde::{Deserialize, Serialize};

use super::ConfigStore;
use crate::error::Result;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A scalar string.
    Text(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

impl ConfigValue {
    /// Get as a string if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Get as a list. A scalar becomes a one-element list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::List(v) => v.clone(),
        }
    }
}

/// Where a configuration value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// User-wide settings that outlive the process and the project.
    Global,
    /// Settings for the current working directory only.
    Project,
}

/// Key holding the executable path for a tool.
pub fn path_key(tool: &str) -> String {
    format!("{}.path", tool)
}

/// Key holding the extra arguments passed before the target file.
pub fn args_key(tool: &str) -> String {
    format!("{}.args", tool)
}

/// Key holding a fallback install location template.
pub fn fallback_key(tool: &str) -> String {
    format!("{}.fallback", tool)
}

/// Settings for the tool being resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Executable name or absolute path.
    pub path: String,
    /// Arguments inserted between the executable and the target file.
    pub extra_args: Vec<String>,
}

impl ToolConfig {
    /// Defaults for a tool: its bare name on PATH and no extra args.
    pub fn defaults(tool: &str) -> Self {
        Self {
            path: tool.to_string(),
            extra_args: Vec::new(),
        }
    }

    /// Read a tool's settings from a store, filling gaps with defaults.
    ///
    /// An empty path value counts as unset.
    pub fn load(store: &dyn ConfigStore, tool: &str) -> Result<Self> {
        let mut config = Self::defaults(tool);

        if let Some(path) = store.get(&path_key(tool))? {
            if let Some(path) = path.as_text().map(str::trim).filter(|p| !p.is_empty()) {
                config.path = path.to_string();
            }
        }

        if let Some(args) = store.get(&args_key(tool))? {
            config.extra_args = args.to_list();
        }

        Ok(config)
    }
}
