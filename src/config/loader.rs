//! Configuration file discovery.

use std::path::{Path, PathBuf};

/// Locations of the settings files.
///
/// 1. User global config (`~/.toolgate/config.yml`), where resolved paths
///    are persisted
/// 2. Project config (`.toolgate.yml` in the working directory), read with
///    priority over the global file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// User's global config.
    pub global: PathBuf,

    /// Project config, if a project directory is known.
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    ///
    /// `global_override` replaces the default global location (the
    /// `--config` flag).
    pub fn discover(project_root: Option<&Path>, global_override: Option<&Path>) -> Self {
        Self {
            global: global_override
                .map(Path::to_path_buf)
                .unwrap_or_else(Self::default_global),
            project: project_root.map(|root| root.join(".toolgate.yml")),
        }
    }

    /// Default global config at ~/.toolgate/config.yml
    pub fn default_global() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".toolgate")
            .join("config.yml")
    }
}
