//! Tool resolution.
//!
//! [`Resolver::ensure`] turns "is the tool there?" into a fixed sequence of
//! probes, prompts, an optional install and at most one fallback guess. Every
//! branch ends in a [`ResolutionOutcome`]; failures along the way are shown
//! to the user once and never returned as errors.
//!
//! ```text
//! Probing ─┬─ present ───────────────────────────────────────────▶ Resolved
//!          └─ absent ─▶ NeedsDecision ─┬─ set path ─▶ ManualPathFlow ─┬─▶ Resolved
//!                                      │                             └─▶ PathRejected
//!                                      ├─ install ─▶ InstallFlow ─┬─▶ PrereqMissing
//!                                      │                         └─▶ Installing
//!                                      └─ cancel ─▶ Canceled
//! Installing ─▶ PostInstallProbe ─┬─▶ Resolved
//!                                 └─▶ FallbackGuess ─┬─▶ Resolved
//!                                                    └─▶ StillAbsentAfterInstall
//! ```
//!
//! The configured path is only written after a probe of the new value
//! succeeds in the same attempt.

use std::sync::OnceLock;

use crate::config::{fallback_key, path_key, ConfigScope, ConfigStore, ConfigValue, ToolConfig};
use crate::error::{Result, ToolgateError};
use crate::shell::ProcessRunner;
use crate::ui::{Prompt, PromptOption, PromptResult, PromptType, Severity, UserInterface};

use super::flight::SingleFlight;
use super::installer::Installer;
use super::probe::probe;
use super::registry::{expand_template, InstallContext, ToolDefinition};
use super::status::{Failure, ProbeResult, ResolutionOutcome};

/// Decision value for installing the tool.
pub const CHOICE_INSTALL: &str = "install";
/// Decision value for entering a path by hand.
pub const CHOICE_SET_PATH: &str = "set_path";
/// Decision value for giving up.
pub const CHOICE_CANCEL: &str = "cancel";

/// Process-wide flights shared by every resolver that does not inject its own.
pub fn global_flights() -> &'static SingleFlight<ResolutionOutcome> {
    static FLIGHTS: OnceLock<SingleFlight<ResolutionOutcome>> = OnceLock::new();
    FLIGHTS.get_or_init(SingleFlight::new)
}

/// Key of the three-way decision prompt for a tool.
pub fn decision_prompt_key(tool: &str) -> String {
    format!("{}_missing", tool)
}

/// Key of the manual path prompt for a tool.
pub fn path_prompt_key(tool: &str) -> String {
    format!("{}_path", tool)
}

/// Key of the "open the installer page" prompt for a toolchain manager.
pub fn manager_page_prompt_key(manager: &str) -> String {
    format!("install_{}", manager)
}

#[derive(Debug)]
enum State {
    Probing,
    NeedsDecision { diagnostic: String },
    ManualPathFlow,
    InstallFlow,
    Installing,
    PostInstallProbe,
    FallbackGuess,
    Resolved { path: String, found: Found },
    Failed(Failure),
}

/// How a resolved path was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Found {
    /// The configured path answered; nothing to save.
    Configured,
    /// The configured path answered after installing.
    Installed,
    /// The user typed it.
    Supplied,
    /// The platform fallback answered after installing.
    Guessed,
}

impl Found {
    fn persists(self) -> bool {
        matches!(self, Found::Supplied | Found::Guessed)
    }
}

/// Drives one tool from "maybe missing" to a confirmed executable path.
pub struct Resolver<'a> {
    tool: &'a ToolDefinition,
    store: &'a dyn ConfigStore,
    runner: &'a dyn ProcessRunner,
    context: InstallContext,
    flights: &'a SingleFlight<ResolutionOutcome>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for the running process.
    pub fn new(
        tool: &'a ToolDefinition,
        store: &'a dyn ConfigStore,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            tool,
            store,
            runner,
            context: InstallContext::current(),
            flights: global_flights(),
        }
    }

    /// Use a different platform and home directory for fallback guesses.
    pub fn with_context(mut self, context: InstallContext) -> Self {
        self.context = context;
        self
    }

    /// Share in-flight attempts through `flights` instead of the global set.
    pub fn with_flights(mut self, flights: &'a SingleFlight<ResolutionOutcome>) -> Self {
        self.flights = flights;
        self
    }

    /// The tool being resolved.
    pub fn tool(&self) -> &ToolDefinition {
        self.tool
    }

    /// Make sure the tool is usable, asking the user how to fix it if not.
    ///
    /// When the configured path answers, this is a single probe with no
    /// prompts. Concurrent callers for the same tool share one attempt:
    /// only the first one prompts, the rest wait for its outcome.
    pub fn ensure(&self, ui: &mut dyn UserInterface) -> ResolutionOutcome {
        self.flights
            .run(&self.tool.name, || self.drive(State::Probing, ui))
    }

    /// Like [`ensure`](Self::ensure), but an unresolved tool is an error.
    pub fn require(&self, ui: &mut dyn UserInterface) -> Result<String> {
        match self.ensure(ui) {
            ResolutionOutcome::Resolved(path) => Ok(path),
            ResolutionOutcome::Unresolved => Err(ToolgateError::ToolUnavailable {
                tool: self.tool.name.clone(),
            }),
        }
    }

    /// Probe the configured path without prompting or writing anything.
    pub fn check(&self) -> Result<(ToolConfig, ProbeResult)> {
        let config = ToolConfig::load(self.store, &self.tool.name)?;
        let result = self.probe_path(&config.path);
        Ok((config, result))
    }

    /// Validate a path supplied outside the prompt flow and save it if it
    /// answers.
    ///
    /// Waits for any `ensure` already running for this tool, then takes the
    /// tool's flight itself so the probe and the write are not interleaved
    /// with another attempt.
    pub fn adopt_path(&self, candidate: &str, ui: &mut dyn UserInterface) -> ResolutionOutcome {
        self.flights.run_after(&self.tool.name, || {
            let state = self.try_candidate(candidate.trim());
            self.drive(state, ui)
        })
    }

    fn drive(&self, initial: State, ui: &mut dyn UserInterface) -> ResolutionOutcome {
        let config = self.load_config(ui);
        let mut state = initial;

        loop {
            tracing::debug!(tool = %self.tool.name, state = ?state, "Resolution step");

            state = match state {
                State::Probing => {
                    let result = self.probe_path(&config.path);
                    if result.is_present() {
                        State::Resolved {
                            path: config.path.clone(),
                            found: Found::Configured,
                        }
                    } else {
                        State::NeedsDecision {
                            diagnostic: result.diagnostic_text().to_string(),
                        }
                    }
                }
                State::NeedsDecision { diagnostic } => self.decide(&diagnostic, ui),
                State::ManualPathFlow => self.ask_for_path(&config, ui),
                State::InstallFlow => {
                    if self.installer().prerequisite().is_present() {
                        State::Installing
                    } else {
                        self.offer_manager_page(ui);
                        State::Failed(Failure::PrereqMissing)
                    }
                }
                State::Installing => {
                    let outcome = self.installer().install(ui);
                    if outcome.succeeded() {
                        State::PostInstallProbe
                    } else {
                        ui.show_diagnostics(&self.diagnostics_channel(), &outcome.captured_output);
                        State::Failed(Failure::InstallFailed)
                    }
                }
                State::PostInstallProbe => {
                    if self.probe_path(&config.path).is_present() {
                        State::Resolved {
                            path: config.path.clone(),
                            found: Found::Installed,
                        }
                    } else {
                        State::FallbackGuess
                    }
                }
                State::FallbackGuess => match self.fallback_guess() {
                    Some(guess) if self.probe_path(&guess).is_present() => State::Resolved {
                        path: guess,
                        found: Found::Guessed,
                    },
                    guess => State::Failed(Failure::StillAbsentAfterInstall { guess }),
                },
                State::Resolved { path, found } => return self.finish(path, found, ui),
                State::Failed(failure) => {
                    self.report(&failure, ui);
                    return ResolutionOutcome::Unresolved;
                }
            };
        }
    }

    fn load_config(&self, ui: &mut dyn UserInterface) -> ToolConfig {
        match ToolConfig::load(self.store, &self.tool.name) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to read {} settings: {}", self.tool.name, e);
                ui.warning(&format!("Could not read settings ({}), using defaults", e));
                ToolConfig::defaults(&self.tool.name)
            }
        }
    }

    fn probe_path(&self, executable: &str) -> ProbeResult {
        probe(self.runner, executable, &self.tool.version_arg)
    }

    fn installer(&self) -> Installer<'_> {
        Installer::new(self.tool, self.runner)
    }

    fn diagnostics_channel(&self) -> String {
        format!("{} install", self.tool.name)
    }

    fn choices(&self) -> Vec<PromptOption> {
        vec![
            PromptOption::new("Install", CHOICE_INSTALL),
            PromptOption::new("Set Custom Path…", CHOICE_SET_PATH),
            PromptOption::new("Cancel", CHOICE_CANCEL),
        ]
    }

    fn decide(&self, diagnostic: &str, ui: &mut dyn UserInterface) -> State {
        let options = self.choices();
        let prompt = Prompt {
            key: decision_prompt_key(&self.tool.name),
            question: format!(
                "{} CLI not found ({}). Install it with {}?",
                self.tool.name,
                first_line(diagnostic),
                self.tool.manager
            ),
            prompt_type: PromptType::Select {
                options: options.clone(),
            },
            default: None,
            placeholder: None,
        };

        let answer = match ui.prompt(&prompt) {
            Ok(PromptResult::String(answer)) => answer,
            Ok(_) => return State::Failed(Failure::Canceled),
            Err(e) => {
                tracing::debug!("Decision prompt failed: {}", e);
                return State::Failed(Failure::Canceled);
            }
        };

        // Environment overrides may answer with the label instead of the value.
        let choice = options
            .iter()
            .find(|o| {
                o.value.eq_ignore_ascii_case(answer.trim())
                    || o.label.eq_ignore_ascii_case(answer.trim())
            })
            .map(|o| o.value.as_str());

        match choice {
            Some(CHOICE_INSTALL) => State::InstallFlow,
            Some(CHOICE_SET_PATH) => State::ManualPathFlow,
            _ => State::Failed(Failure::Canceled),
        }
    }

    fn ask_for_path(&self, config: &ToolConfig, ui: &mut dyn UserInterface) -> State {
        let placeholder = self
            .fallback_guess()
            .unwrap_or_else(|| format!("/path/to/{}", self.tool.name));

        let prompt = Prompt {
            key: path_prompt_key(&self.tool.name),
            question: format!("Enter the full path to the {} executable", self.tool.name),
            prompt_type: PromptType::Input,
            default: Some(config.path.clone()),
            placeholder: Some(placeholder),
        };

        match ui.prompt(&prompt) {
            Ok(PromptResult::String(path)) if !path.trim().is_empty() => {
                self.try_candidate(path.trim())
            }
            Ok(_) => State::Failed(Failure::Canceled),
            Err(e) => {
                tracing::debug!("Path prompt failed: {}", e);
                State::Failed(Failure::Canceled)
            }
        }
    }

    fn try_candidate(&self, candidate: &str) -> State {
        let result = self.probe_path(candidate);
        if result.is_present() {
            State::Resolved {
                path: candidate.to_string(),
                found: Found::Supplied,
            }
        } else {
            State::Failed(Failure::PathRejected {
                path: candidate.to_string(),
                diagnostic: result.diagnostic_text().to_string(),
            })
        }
    }

    fn offer_manager_page(&self, ui: &mut dyn UserInterface) {
        let url = &self.tool.manager_install_url;
        let prompt = Prompt {
            key: manager_page_prompt_key(&self.tool.manager),
            question: format!(
                "{} is needed to install {}. Open {} to install it?",
                self.tool.manager, self.tool.package, url
            ),
            prompt_type: PromptType::Confirm,
            default: Some("true".to_string()),
            placeholder: None,
        };

        if let Ok(PromptResult::Bool(true)) = ui.prompt(&prompt) {
            if let Err(e) = ui.open_external_link(url) {
                tracing::warn!("Failed to open {}: {}", url, e);
            }
        }
    }

    /// The single fallback location for the current platform, if any.
    ///
    /// A `<tool>.fallback` setting replaces the built-in template.
    fn fallback_guess(&self) -> Option<String> {
        let configured = match self.store.get(&fallback_key(&self.tool.name)) {
            Ok(value) => value.and_then(|v| v.as_text().map(str::to_string)),
            Err(e) => {
                tracing::warn!("Failed to read fallback for {}: {}", self.tool.name, e);
                None
            }
        };

        let template = configured
            .as_deref()
            .or_else(|| self.tool.fallback_template(self.context.platform))?;

        expand_template(template, &self.tool.name, self.context.home.as_deref())
    }

    fn finish(&self, path: String, found: Found, ui: &mut dyn UserInterface) -> ResolutionOutcome {
        let name = &self.tool.name;

        if found.persists() {
            let key = path_key(name);
            let scope = self.save_scope(&key);
            let value = ConfigValue::Text(path.clone());
            match self.store.set(&key, value, scope) {
                Ok(()) => {
                    tracing::info!("Saved {} path: {}", name, path);
                    ui.success(&format!("Using {} at {}", name, path));
                }
                Err(e) => {
                    tracing::warn!("Failed to save {} path: {}", name, e);
                    ui.warning(&format!(
                        "Using {} at {}, but the path could not be saved: {}",
                        name, path, e
                    ));
                }
            }
        } else if found == Found::Installed {
            ui.success(&format!("{} is ready", name));
        }

        ResolutionOutcome::Resolved(path)
    }

    /// Global, unless a project file already supplies the key.
    fn save_scope(&self, key: &str) -> ConfigScope {
        match self.store.scope_of(key) {
            Ok(Some(scope)) => scope,
            Ok(None) => ConfigScope::Global,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key, e);
                ConfigScope::Global
            }
        }
    }

    fn report(&self, failure: &Failure, ui: &mut dyn UserInterface) {
        let tool = self.tool;
        let (severity, message) = match failure {
            Failure::Canceled => (
                Severity::Info,
                format!("{} setup canceled. Run again when you're ready.", tool.name),
            ),
            Failure::PathRejected { path, diagnostic } => (
                Severity::Error,
                format!(
                    "{} did not respond to {}: {}",
                    path,
                    tool.version_arg,
                    first_line(diagnostic)
                ),
            ),
            Failure::PrereqMissing => (
                Severity::Error,
                format!(
                    "{} was not found. Install it from {}, then try again.",
                    tool.manager, tool.manager_install_url
                ),
            ),
            Failure::InstallFailed => (
                Severity::Error,
                format!(
                    "Installing {} failed. See the {} output for details.",
                    tool.package,
                    self.diagnostics_channel()
                ),
            ),
            Failure::StillAbsentAfterInstall { guess } => {
                let also = guess
                    .as_deref()
                    .map(|g| format!(" (also checked {})", g))
                    .unwrap_or_default();
                (
                    Severity::Warn,
                    format!(
                        "Installed {} but {} is still not found{}. \
                         Restart your terminal so the new PATH takes effect, then try again.",
                        tool.package, tool.name, also
                    ),
                )
            }
        };

        tracing::debug!("Resolution of {} failed: {:?}", tool.name, failure);
        ui.notify(severity, &message);
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
