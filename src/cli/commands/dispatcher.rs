//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ToolContext`] with everything a command needs to resolve a tool
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::{ConfigPaths, ConfigStore, FileConfigStore};
use crate::error::{Result, ToolgateError};
use crate::requirements::{Resolver, ToolDefinition, ToolRegistry};
use crate::shell::{ProcessRunner, SystemRunner};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Forward a child process's exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }
}

/// The tool being resolved and the collaborators used to resolve it.
pub struct ToolContext {
    tool: ToolDefinition,
    store: Box<dyn ConfigStore>,
    runner: Box<dyn ProcessRunner>,
}

impl ToolContext {
    /// Assemble a context from explicit parts.
    pub fn new(
        tool: ToolDefinition,
        store: Box<dyn ConfigStore>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            tool,
            store,
            runner,
        }
    }

    /// The tool definition.
    pub fn tool(&self) -> &ToolDefinition {
        &self.tool
    }

    /// The settings store.
    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    /// A resolver over this context.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.tool, self.store.as_ref(), self.runner.as_ref())
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_override: None,
        }
    }

    /// Use a different global config file.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Build the context for the named tool, backed by the config files and
    /// real processes.
    pub fn context(&self, tool_name: &str) -> Result<ToolContext> {
        let registry = ToolRegistry::new();
        let tool = registry
            .get(tool_name)
            .cloned()
            .ok_or_else(|| ToolgateError::UnknownTool {
                name: tool_name.to_string(),
                known: registry.names().join(", "),
            })?;

        let paths = ConfigPaths::discover(
            Some(&self.project_root),
            self.config_override.as_deref(),
        );
        tracing::debug!("Using config files {:?}", paths);

        Ok(ToolContext::new(
            tool,
            Box::new(FileConfigStore::new(paths)),
            Box::new(SystemRunner),
        ))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = self.context(&cli.tool)?;
        Self::dispatch_with(&ctx, cli.command.as_ref(), ui)
    }

    /// Dispatch against an already-built context.
    pub fn dispatch_with(
        ctx: &ToolContext,
        command: Option<&Commands>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match command {
            Some(Commands::Ensure) | None => super::ensure::EnsureCommand::new(ctx).execute(ui),
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Run(args)) => {
                super::run::RunCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Config(args)) => {
                super::config::ConfigCommand::new(ctx, args.clone()).execute(ui)
            }
        }
    }
}
