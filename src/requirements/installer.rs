//! Tool installation through the toolchain manager.
//!
//! The installer only knows how to check for its prerequisite and run the
//! install command. Deciding whether to install, and what to do when it
//! fails, belongs to the resolver.

use crate::shell::{display_command, OutputLine, ProcessRunner};
use crate::ui::UserInterface;

use super::probe::probe;
use super::registry::ToolDefinition;
use super::status::{InstallOutcome, InstallStatus, ProbeResult};

/// Installs a tool with its toolchain manager.
pub struct Installer<'a> {
    tool: &'a ToolDefinition,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Installer<'a> {
    pub fn new(tool: &'a ToolDefinition, runner: &'a dyn ProcessRunner) -> Self {
        Self { tool, runner }
    }

    /// Probe the toolchain manager (e.g. `cargo --version`).
    pub fn prerequisite(&self) -> ProbeResult {
        probe(
            self.runner,
            &self.tool.manager,
            self.tool.manager_version_arg(),
        )
    }

    /// The install command as shown to the user.
    pub fn command_line(&self) -> String {
        display_command(&self.tool.manager, &self.tool.install_args)
    }

    /// Run the install command under a spinner.
    ///
    /// Each output line updates the spinner as it arrives. Everything
    /// printed is captured in arrival order so a failure can be shown in
    /// full afterwards.
    pub fn install(&self, ui: &mut dyn UserInterface) -> InstallOutcome {
        let command = self.command_line();
        tracing::info!("Installing {} with `{}`", self.tool.package, command);

        let mut spinner = ui.start_spinner(&format!("Installing {}...", self.tool.package));
        let mut captured = String::new();

        let output = self.runner.run_streaming(
            &self.tool.manager,
            &self.tool.install_args,
            &mut |line: OutputLine| {
                spinner.set_message(line.text());
                captured.push_str(line.text());
                captured.push('\n');
            },
        );

        if output.success() {
            spinner.finish_success(&format!("Installed {}", self.tool.package));
            return InstallOutcome {
                status: InstallStatus::Succeeded,
                captured_output: captured,
            };
        }

        spinner.finish_error(&format!("Failed to install {}", self.tool.package));
        tracing::debug!(
            "`{}` failed with exit code {:?}",
            command,
            output.exit_code
        );

        if let Some(err) = &output.spawn_error {
            captured.insert_str(0, &format!("{}\n", err));
        }
        if captured.trim().is_empty() {
            if let Some(code) = output.exit_code {
                captured = format!("`{}` exited with code {}\n", command, code);
            }
        }

        InstallOutcome {
            status: InstallStatus::Failed,
            captured_output: captured,
        }
    }
}
