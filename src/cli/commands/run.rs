//! Run command implementation.
//!
//! The `toolgate run <FILE>` command ensures the tool is available, then
//! runs `<path> <args...> <FILE>` with the terminal attached and exits with
//! the tool's exit code.

use crate::cli::args::RunArgs;
use crate::config::ToolConfig;
use crate::error::Result;
use crate::requirements::ResolutionOutcome;
use crate::shell::execute_inherited;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// The run command implementation.
pub struct RunCommand<'a> {
    ctx: &'a ToolContext,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(ctx: &'a ToolContext, args: RunArgs) -> Self {
        Self { ctx, args }
    }

    /// Arguments passed to the tool: configured extras, then the file.
    ///
    /// The file is always a single argument, whatever characters it holds.
    pub fn tool_args(&self, config: &ToolConfig) -> Vec<String> {
        let mut args = config.extra_args.clone();
        args.push(self.args.file.to_string_lossy().into_owned());
        args
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = match self.ctx.resolver().ensure(ui) {
            ResolutionOutcome::Resolved(path) => path,
            ResolutionOutcome::Unresolved => return Ok(CommandResult::failure(1)),
        };

        let config = ToolConfig::load(self.ctx.store(), &self.ctx.tool().name)?;
        let args = self.tool_args(&config);

        let code = execute_inherited(&path, &args)?;
        if code != 0 {
            tracing::debug!("{} exited with code {}", path, code);
        }
        Ok(CommandResult::from_exit_code(code))
    }
}
