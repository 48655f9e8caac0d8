//! Persistent configuration stores.
//!
//! [`ConfigStore`] is the only way the resolver reads or writes settings.
//! [`FileConfigStore`] persists to YAML files; [`MemoryConfigStore`] keeps
//! everything in memory and records every write, which tests use to check
//! what the resolver persisted and when.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ConfigPaths, ConfigScope, ConfigValue};
use crate::error::{Result, ToolgateError};

/// Key/value settings storage.
pub trait ConfigStore: Send + Sync {
    /// Read a value. Project scope takes priority over global.
    fn get(&self, key: &str) -> Result<Option<ConfigValue>>;

    /// Write a value to the given scope. Must persist beyond the process.
    fn set(&self, key: &str, value: ConfigValue, scope: ConfigScope) -> Result<()>;

    /// The scope whose value [`get`](ConfigStore::get) currently returns.
    ///
    /// Stores without layered scopes return `None`.
    fn scope_of(&self, _key: &str) -> Result<Option<ConfigScope>> {
        Ok(None)
    }
}

type SettingsMap = BTreeMap<String, ConfigValue>;

/// Store backed by a global YAML file and an optional project YAML file.
#[derive(Debug)]
pub struct FileConfigStore {
    paths: ConfigPaths,
    write_lock: Mutex<()>,
}

impl FileConfigStore {
    /// Create a store over the given file locations.
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            write_lock: Mutex::new(()),
        }
    }

    /// File locations used by this store.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Find a key, project file first.
    fn lookup(&self, key: &str) -> Result<Option<(ConfigScope, ConfigValue)>> {
        for scope in [ConfigScope::Project, ConfigScope::Global] {
            let Some(path) = self.scope_path(scope) else {
                continue;
            };
            if let Some(value) = read_settings(path)?.remove(key) {
                return Ok(Some((scope, value)));
            }
        }
        Ok(None)
    }

    fn scope_path(&self, scope: ConfigScope) -> Option<&Path> {
        match scope {
            ConfigScope::Global => Some(self.paths.global.as_path()),
            ConfigScope::Project => self.paths.project.as_deref(),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        Ok(self.lookup(key)?.map(|(_, value)| value))
    }

    fn scope_of(&self, key: &str) -> Result<Option<ConfigScope>> {
        Ok(self.lookup(key)?.map(|(scope, _)| scope))
    }

    fn set(&self, key: &str, value: ConfigValue, scope: ConfigScope) -> Result<()> {
        let path = self
            .scope_path(scope)
            .ok_or_else(|| ToolgateError::ConfigWriteError {
                path: PathBuf::from(".toolgate.yml"),
                message: "no project directory for project-scoped settings".to_string(),
            })?
            .to_path_buf();

        // Read-modify-write must not interleave with another writer.
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut settings = read_settings(&path)?;
        settings.insert(key.to_string(), value);
        write_settings(&path, &settings)?;

        tracing::debug!("Saved {} to {}", key, path.display());
        Ok(())
    }
}

/// Load a settings file. A missing or empty file is an empty map.
fn read_settings(path: &Path) -> Result<SettingsMap> {
    if !path.exists() {
        return Ok(SettingsMap::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(SettingsMap::new());
    }

    serde_yaml::from_str(&content).map_err(|e| ToolgateError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a settings file using atomic write.
///
/// Uses the write-to-temp-then-rename pattern to prevent corruption.
fn write_settings(path: &Path, settings: &SettingsMap) -> Result<()> {
    let write_err = |message: String| ToolgateError::ConfigWriteError {
        path: path.to_path_buf(),
        message,
    };

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| write_err(e.to_string()))?;
        }
    }

    let content = serde_yaml::to_string(settings).map_err(|e| write_err(e.to_string()))?;

    let temp_path = path.with_extension("yml.tmp");
    fs::write(&temp_path, &content).map_err(|e| write_err(e.to_string()))?;
    fs::rename(&temp_path, path).map_err(|e| write_err(e.to_string()))?;

    Ok(())
}

/// A recorded call to [`ConfigStore::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWrite {
    pub key: String,
    pub value: ConfigValue,
    pub scope: ConfigScope,
}

/// In-memory store that records every write.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: Mutex<SettingsMap>,
    writes: Mutex<Vec<ConfigWrite>>,
    fail_writes: bool,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `set` always fails.
    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seed a value without recording it as a write.
    pub fn insert(&self, key: &str, value: ConfigValue) {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value);
    }

    /// All writes made through [`ConfigStore::set`], in order.
    pub fn writes(&self) -> Vec<ConfigWrite> {
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Current value for a key as text, for assertions.
    pub fn text(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .and_then(|v| v.as_text().map(String::from))
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Result<Option<ConfigValue>> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: ConfigValue, scope: ConfigScope) -> Result<()> {
        if self.fail_writes {
            return Err(ToolgateError::ConfigWriteError {
                path: PathBuf::from("<memory>"),
                message: "store is read-only".to_string(),
            });
        }

        self.insert(key, value.clone());
        self.writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(ConfigWrite {
                key: key.to_string(),
                value,
                scope,
            });
        Ok(())
    }
}
