//! Check command implementation.
//!
//! The `toolgate check` command probes the configured tool and reports the
//! result. It never prompts and never changes settings, so it is safe to run
//! at startup or in CI.

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::error::{Result, ToolgateError};
use crate::requirements::probe::{locate, parse_system_path};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// Machine-readable result of `toolgate check --json`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub tool: String,
    pub path: String,
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// The check command implementation.
pub struct CheckCommand<'a> {
    ctx: &'a ToolContext,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(ctx: &'a ToolContext, args: CheckArgs) -> Self {
        Self { ctx, args }
    }

    /// Probe the tool and build a report.
    pub fn report(&self) -> Result<CheckReport> {
        let (config, result) = self.ctx.resolver().check()?;

        let location = if result.is_present() {
            locate(&config.path, &parse_system_path()).map(|p| p.display().to_string())
        } else {
            None
        };

        Ok(CheckReport {
            tool: self.ctx.tool().name.clone(),
            present: result.is_present(),
            version: result.version,
            diagnostic: result.diagnostic,
            location,
            path: config.path,
        })
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ToolgateError::Other(e.into()))?;
            println!("{}", json);
        } else if report.present {
            let version = report.version.as_deref().unwrap_or_default();
            match &report.location {
                Some(location) => ui.success(&format!("{} ({})", version, location)),
                None => ui.success(version),
            }
        } else {
            ui.warning(&format!(
                "{} is not available: {}",
                report.tool,
                report.diagnostic.as_deref().unwrap_or_default()
            ));
            ui.message(&format!(
                "Run `toolgate ensure` to install {} or set its path.",
                report.tool
            ));
        }

        if report.present {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
