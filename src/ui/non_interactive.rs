//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::spinner::live_message;
use super::theme::ToolgateTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "TOOLGATE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `TOOLGATE_PROMPT_<KEY>` environment variables,
/// then from the prompt's default (confirm and select only). Anything else is
/// dismissed, so a missing tool is never installed without an explicit answer.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    fn override_for(&self, key: &str) -> Option<&String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase());
        self.env_overrides.get(&env_key)
    }
}

fn parse_answer(prompt: &Prompt, value: &str) -> PromptResult {
    match prompt.prompt_type {
        PromptType::Confirm => {
            let v = value.trim().to_lowercase();
            PromptResult::Bool(v == "y" || v == "yes" || v == "true" || v == "1")
        }
        PromptType::Input | PromptType::Select { .. } => {
            PromptResult::String(value.trim().to_string())
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("• {}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.override_for(&prompt.key) {
            tracing::debug!("Answering '{}' from environment", prompt.key);
            return Ok(parse_answer(prompt, value));
        }

        let default = match prompt.prompt_type {
            PromptType::Confirm | PromptType::Select { .. } => prompt.default.as_deref(),
            // An input default is a pre-fill, not an answer.
            PromptType::Input => None,
        };

        Ok(default.map_or(PromptResult::Dismissed, |d| parse_answer(prompt, d)))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            eprintln!("  {}", message);
        }
        Box::new(NoopSpinner {
            echo: self.mode.shows_command_output(),
            base: message.to_string(),
        })
    }

    fn show_diagnostics(&mut self, channel: &str, text: &str) {
        eprintln!("    ┌─ {}", channel);
        for line in text.lines() {
            eprintln!("    │ {}", line);
        }
        eprintln!("    └────────────────────────────────────");
    }

    fn open_external_link(&mut self, url: &str) -> Result<()> {
        // No browser to hand off to; print the link instead.
        eprintln!("  {}", url);
        Ok(())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only echoes output lines in verbose mode.
struct NoopSpinner {
    echo: bool,
    base: String,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, msg: &str) {
        if self.echo {
            eprintln!("{}", live_message(&self.base, msg, &ToolgateTheme::plain()));
        }
    }

    fn finish_success(&mut self, msg: &str) {
        eprintln!("✓ {}", msg);
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn select_prompt(default: Option<&str>) -> Prompt {
        Prompt {
            key: "maid_missing".to_string(),
            question: "maid not found".to_string(),
            prompt_type: PromptType::Select {
                options: vec![
                    PromptOption::new("Install", "install"),
                    PromptOption::new("Cancel", "cancel"),
                ],
            },
            default: default.map(String::from),
            placeholder: None,
        }
    }

    #[test]
    fn prompt_without_default_is_dismissed() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let result = ui.prompt(&select_prompt(None)).unwrap();
        assert_eq!(result, PromptResult::Dismissed);
    }

    #[test]
    fn prompt_uses_select_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let result = ui.prompt(&select_prompt(Some("cancel"))).unwrap();
        assert_eq!(result, PromptResult::String("cancel".to_string()));
    }

    #[test]
    fn env_override_wins() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "TOOLGATE_PROMPT_MAID_MISSING".to_string(),
            "install".to_string(),
        );
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);
        let result = ui.prompt(&select_prompt(Some("cancel"))).unwrap();
        assert_eq!(result, PromptResult::String("install".to_string()));
    }

    #[test]
    fn input_default_is_not_an_answer() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let prompt = Prompt {
            key: "maid_path".to_string(),
            question: "Path".to_string(),
            prompt_type: PromptType::Input,
            default: Some("maid".to_string()),
            placeholder: None,
        };
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Dismissed);
    }

    #[test]
    fn confirm_override_parses_yes() {
        let mut overrides = HashMap::new();
        overrides.insert("TOOLGATE_PROMPT_OPEN_PAGE".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);
        let prompt = Prompt {
            key: "open_page".to_string(),
            question: "Open?".to_string(),
            prompt_type: PromptType::Confirm,
            default: None,
            placeholder: None,
        };
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }
}
