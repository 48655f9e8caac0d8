//! Tool registry and definitions.
//!
//! Defines which tools can be resolved, how to probe them, how to install
//! them through their toolchain manager, and where an install is likely to
//! land on each platform when PATH has not caught up yet.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Platform for fallback path selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// All known platforms.
    pub const ALL: [Platform; 3] = [Platform::MacOS, Platform::Linux, Platform::Windows];
}

/// Environment the resolver builds fallback guesses from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallContext {
    /// Current platform
    pub platform: Platform,
    /// The user's home/profile directory, if known
    pub home: Option<PathBuf>,
}

impl InstallContext {
    /// Context for the running process.
    pub fn current() -> Self {
        Self {
            platform: Platform::current(),
            home: dirs::home_dir(),
        }
    }
}

/// Expand a fallback location template.
///
/// `{tool}` is replaced with the tool name. A leading `~/` is resolved
/// against `home`, one path segment at a time so the platform separator is
/// used. Returns `None` for a home-relative template when `home` is unknown.
pub fn expand_template(template: &str, tool: &str, home: Option<&Path>) -> Option<String> {
    let expanded = template.replace("{tool}", tool);

    let path = match expanded.strip_prefix("~/") {
        Some(rest) => rest
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(home?.to_path_buf(), |acc, segment| acc.join(segment)),
        None => PathBuf::from(expanded),
    };

    Some(path.to_string_lossy().into_owned())
}

/// A tool definition.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Tool name, also its default executable name (e.g., "maid")
    pub name: String,
    /// Package the toolchain manager installs (e.g., "maid-lang")
    pub package: String,
    /// Argument that makes the tool print its version
    pub version_arg: String,
    /// Toolchain manager executable (e.g., "cargo")
    pub manager: String,
    /// Arguments that install the package, overwriting any existing install
    pub install_args: Vec<String>,
    /// Page explaining how to install the toolchain manager
    pub manager_install_url: String,
    /// Fallback location template per platform
    pub fallbacks: HashMap<Platform, String>,
}

impl ToolDefinition {
    /// Define a tool installed with `cargo install <package> --force`.
    ///
    /// Fallback guesses point at cargo's default bin directory on every
    /// platform.
    pub fn cargo(name: &str, package: &str) -> Self {
        let fallbacks = Platform::ALL
            .iter()
            .map(|&platform| {
                let template = match platform {
                    Platform::Windows => "~/.cargo/bin/{tool}.exe",
                    Platform::MacOS | Platform::Linux => "~/.cargo/bin/{tool}",
                };
                (platform, template.to_string())
            })
            .collect();

        Self {
            name: name.to_string(),
            package: package.to_string(),
            version_arg: "--version".to_string(),
            manager: "cargo".to_string(),
            install_args: vec![
                "install".to_string(),
                package.to_string(),
                "--force".to_string(),
            ],
            manager_install_url: "https://rustup.rs".to_string(),
            fallbacks,
        }
    }

    /// The maid CLI.
    pub fn maid() -> Self {
        Self::cargo("maid", "maid-lang")
    }

    /// Replace the fallback template for one platform.
    pub fn with_fallback(mut self, platform: Platform, template: &str) -> Self {
        self.fallbacks.insert(platform, template.to_string());
        self
    }

    /// Remove the fallback template for one platform.
    pub fn without_fallback(mut self, platform: Platform) -> Self {
        self.fallbacks.remove(&platform);
        self
    }

    /// The fallback template for a platform, if any.
    pub fn fallback_template(&self, platform: Platform) -> Option<&str> {
        self.fallbacks.get(&platform).map(String::as_str)
    }

    /// Version argument for the toolchain manager.
    pub fn manager_version_arg(&self) -> &str {
        "--version"
    }
}

/// Registry of known tools.
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolRegistry {
    /// Create a registry with all built-in tools.
    pub fn new() -> Self {
        let mut tools = HashMap::new();
        let maid = ToolDefinition::maid();
        tools.insert(maid.name.clone(), maid);
        Self { tools }
    }

    /// Add or replace a tool definition.
    pub fn register(&mut self, tool: ToolDefinition) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Names of all registered tools, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
