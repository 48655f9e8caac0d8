//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{Result, ToolgateError};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to ToolgateError.
fn prompt_err(prompt: &Prompt) -> impl FnOnce(dialoguer::Error) -> ToolgateError + '_ {
    move |e| ToolgateError::PromptUnavailable {
        key: prompt.key.clone(),
        message: e.to_string(),
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
///
/// Pressing Esc on a select or confirm prompt yields [`PromptResult::Dismissed`].
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

/// Question text with the placeholder appended as an example.
pub fn question_with_placeholder(prompt: &Prompt) -> String {
    match &prompt.placeholder {
        Some(example) => format!("{} ({})", prompt.question, example),
        None => prompt.question.clone(),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt
        .default
        .as_ref()
        .map(|s| s.to_lowercase() == "true" || s == "y" || s == "yes")
        .unwrap_or(true);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on_opt(term)
        .map_err(prompt_err(prompt))?;

    Ok(result.map_or(PromptResult::Dismissed, PromptResult::Bool))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(question_with_placeholder(prompt))
        .allow_empty(true);

    // Pre-fill so the current value can be edited rather than retyped.
    if let Some(default) = &prompt.default {
        input = input.with_initial_text(default.clone());
    }

    let result = input.interact_on(term).map_err(prompt_err(prompt))?;
    let trimmed = result.trim();

    if trimmed.is_empty() {
        Ok(PromptResult::Dismissed)
    } else {
        Ok(PromptResult::String(trimmed.to_string()))
    }
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on_opt(term)
        .map_err(prompt_err(prompt))?;

    Ok(selection
        .and_then(|i| options.get(i))
        .map_or(PromptResult::Dismissed, |o| {
            PromptResult::String(o.value.clone())
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_prompt(placeholder: Option<&str>) -> Prompt {
        Prompt {
            key: "maid_path".to_string(),
            question: "Enter full path to the maid executable".to_string(),
            prompt_type: PromptType::Input,
            default: Some("maid".to_string()),
            placeholder: placeholder.map(String::from),
        }
    }

    #[test]
    fn question_includes_placeholder_example() {
        let prompt = make_prompt(Some("/home/you/.cargo/bin/maid"));
        assert_eq!(
            question_with_placeholder(&prompt),
            "Enter full path to the maid executable (/home/you/.cargo/bin/maid)"
        );
    }

    #[test]
    fn prompt_errors_name_the_prompt() {
        let prompt = make_prompt(None);
        let io = std::io::Error::new(std::io::ErrorKind::NotConnected, "not a terminal");
        let err = prompt_err(&prompt)(dialoguer::Error::IO(io));
        assert!(matches!(err, ToolgateError::PromptUnavailable { ref key, .. } if key == "maid_path"));
    }

    #[cfg(unix)]
    #[test]
    fn input_prompt_without_terminal_is_unavailable() {
        let read = tempfile::tempfile().unwrap();
        let write = tempfile::tempfile().unwrap();
        let term = Term::read_write_pair(read, write);

        let err = prompt_user(&make_prompt(Some("/opt/maid")), &term).unwrap_err();

        assert!(matches!(err, ToolgateError::PromptUnavailable { ref key, .. } if key == "maid_path"));
    }

    #[test]
    fn question_without_placeholder_is_unchanged() {
        let prompt = make_prompt(None);
        assert_eq!(
            question_with_placeholder(&prompt),
            "Enter full path to the maid executable"
        );
    }
}
