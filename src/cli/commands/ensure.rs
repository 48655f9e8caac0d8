//! Ensure command implementation.
//!
//! The `toolgate ensure` command makes sure the tool is usable and prints
//! its path, so scripts can write `$(toolgate ensure)`.

use crate::error::Result;
use crate::requirements::ResolutionOutcome;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// The ensure command implementation.
pub struct EnsureCommand<'a> {
    ctx: &'a ToolContext,
}

impl<'a> EnsureCommand<'a> {
    /// Create a new ensure command.
    pub fn new(ctx: &'a ToolContext) -> Self {
        Self { ctx }
    }
}

impl Command for EnsureCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.ctx.resolver().ensure(ui) {
            ResolutionOutcome::Resolved(path) => {
                println!("{}", path);
                Ok(CommandResult::success())
            }
            // The resolver has already told the user why.
            ResolutionOutcome::Unresolved => Ok(CommandResult::failure(1)),
        }
    }
}
