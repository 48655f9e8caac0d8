//! Config command implementation.
//!
//! The `toolgate config` command shows and changes the tool's settings.
//! A new path is only saved after it answers a probe.

use serde::Serialize;

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{args_key, fallback_key, ConfigScope, ConfigValue, ToolConfig};
use crate::error::{Result, ToolgateError};
use crate::requirements::ResolutionOutcome;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ToolContext};

/// The tool's effective settings.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub tool: String,
    pub path: String,
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

/// The config command implementation.
pub struct ConfigCommand<'a> {
    ctx: &'a ToolContext,
    args: ConfigArgs,
}

impl<'a> ConfigCommand<'a> {
    /// Create a new config command.
    pub fn new(ctx: &'a ToolContext, args: ConfigArgs) -> Self {
        Self { ctx, args }
    }

    /// Read the effective settings.
    pub fn report(&self) -> Result<ConfigReport> {
        let name = &self.ctx.tool().name;
        let config = ToolConfig::load(self.ctx.store(), name)?;
        let fallback = self
            .ctx
            .store()
            .get(&fallback_key(name))?
            .and_then(|v| v.as_text().map(str::to_string));

        Ok(ConfigReport {
            tool: name.clone(),
            path: config.path,
            args: config.extra_args,
            fallback,
        })
    }

    fn show(&self, json: bool) -> Result<CommandResult> {
        let report = self.report()?;
        let rendered = if json {
            serde_json::to_string_pretty(&report).map_err(|e| ToolgateError::Other(e.into()))?
        } else {
            serde_yaml::to_string(&report).map_err(|e| ToolgateError::Other(e.into()))?
        };
        println!("{}", rendered.trim_end());
        Ok(CommandResult::success())
    }

    fn set_path(&self, path: &str, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.ctx.resolver().adopt_path(path, ui) {
            ResolutionOutcome::Resolved(_) => Ok(CommandResult::success()),
            ResolutionOutcome::Unresolved => Ok(CommandResult::failure(1)),
        }
    }

    fn set_args(
        &self,
        args: &[String],
        local: bool,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let scope = if local {
            ConfigScope::Project
        } else {
            ConfigScope::Global
        };
        let name = &self.ctx.tool().name;

        self.ctx
            .store()
            .set(&args_key(name), ConfigValue::List(args.to_vec()), scope)?;

        if args.is_empty() {
            ui.success(&format!("Cleared extra arguments for {}", name));
        } else {
            ui.success(&format!("{} will run with: {}", name, args.join(" ")));
        }
        Ok(CommandResult::success())
    }
}

impl Command for ConfigCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            None => self.show(false),
            Some(ConfigAction::Show { json }) => self.show(*json),
            Some(ConfigAction::SetPath { path }) => self.set_path(path, ui),
            Some(ConfigAction::SetArgs { local, args }) => self.set_args(args, *local, ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigStore, FileConfigStore, MemoryConfigStore};
    use crate::requirements::ToolDefinition;
    use crate::shell::{ProcessOutput, ScriptedRunner};
    use crate::ui::MockUI;

    fn context(store: Box<dyn ConfigStore>, runner: ScriptedRunner) -> ToolContext {
        ToolContext::new(ToolDefinition::maid(), store, Box::new(runner))
    }

    fn config_args(action: ConfigAction) -> ConfigArgs {
        ConfigArgs {
            action: Some(action),
        }
    }

    #[test]
    fn report_shows_defaults() {
        let ctx = context(Box::new(MemoryConfigStore::new()), ScriptedRunner::new());
        let report = ConfigCommand::new(&ctx, ConfigArgs { action: None })
            .report()
            .unwrap();

        assert_eq!(report.tool, "maid");
        assert_eq!(report.path, "maid");
        assert!(report.args.is_empty());
        assert!(report.fallback.is_none());
    }

    #[test]
    fn set_path_saves_working_path() {
        let runner = ScriptedRunner::new();
        runner.respond("/opt/maid", ProcessOutput::exited(0, "maid 1.2.0", ""));
        let ctx = context(Box::new(MemoryConfigStore::new()), runner);
        let mut ui = MockUI::new();

        let result = ConfigCommand::new(
            &ctx,
            config_args(ConfigAction::SetPath {
                path: "/opt/maid".into(),
            }),
        )
        .execute(&mut ui)
        .unwrap();

        assert!(result.success);
        let report = ConfigCommand::new(&ctx, ConfigArgs { action: None })
            .report()
            .unwrap();
        assert_eq!(report.path, "/opt/maid");
    }

    #[test]
    fn set_path_rejects_broken_path() {
        let ctx = context(Box::new(MemoryConfigStore::new()), ScriptedRunner::new());
        let mut ui = MockUI::new();

        let result = ConfigCommand::new(
            &ctx,
            config_args(ConfigAction::SetPath {
                path: "/nope/maid".into(),
            }),
        )
        .execute(&mut ui)
        .unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors().len(), 1);
        let report = ConfigCommand::new(&ctx, ConfigArgs { action: None })
            .report()
            .unwrap();
        assert_eq!(report.path, "maid");
    }

    #[test]
    fn set_args_local_writes_project_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = crate::config::ConfigPaths {
            global: temp.path().join("global.yml"),
            project: Some(temp.path().join(".toolgate.yml")),
        };
        let ctx = context(Box::new(FileConfigStore::new(paths)), ScriptedRunner::new());
        let mut ui = MockUI::new();

        ConfigCommand::new(
            &ctx,
            config_args(ConfigAction::SetArgs {
                local: true,
                args: vec!["--quiet".into()],
            }),
        )
        .execute(&mut ui)
        .unwrap();

        assert!(temp.path().join(".toolgate.yml").exists());
        assert!(!temp.path().join("global.yml").exists());
        let report = ConfigCommand::new(&ctx, ConfigArgs { action: None })
            .report()
            .unwrap();
        assert_eq!(report.args, vec!["--quiet"]);
    }
}
