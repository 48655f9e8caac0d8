//! Error types for toolgate operations.
//!
//! This module defines [`ToolgateError`], the error type used by the
//! ambient layers (configuration, prompts, CLI), and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - The resolver never returns `ToolgateError`: probe and install failures
//!   are values, and every branch ends in a [`ResolutionOutcome`](crate::requirements::ResolutionOutcome)
//! - Use `ToolgateError` for config, prompt and process plumbing
//! - Use `anyhow::Error` (via `ToolgateError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolgate operations.
#[derive(Debug, Error)]
pub enum ToolgateError {
    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Failed to persist a configuration value.
    #[error("Failed to write config at {path}: {message}")]
    ConfigWriteError { path: PathBuf, message: String },

    /// A prompt could not be shown (no terminal, no default).
    #[error("Cannot prompt for '{key}': {message}")]
    PromptUnavailable { key: String, message: String },

    /// A process could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The tool could not be made available.
    #[error("'{tool}' is not available")]
    ToolUnavailable { tool: String },

    /// No definition exists for the requested tool.
    #[error("Unknown tool '{name}' (known tools: {known})")]
    UnknownTool { name: String, known: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolgate operations.
pub type Result<T> = std::result::Result<T, ToolgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ToolgateError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_write_error_displays_path() {
        let err = ToolgateError::ConfigWriteError {
            path: PathBuf::from("/home/you/.toolgate/config.yml"),
            message: "read-only file system".into(),
        };
        assert!(err.to_string().contains(".toolgate/config.yml"));
    }

    #[test]
    fn prompt_unavailable_displays_key() {
        let err = ToolgateError::PromptUnavailable {
            key: "maid_missing".into(),
            message: "no default".into(),
        };
        assert!(err.to_string().contains("maid_missing"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ToolgateError::CommandFailed {
            command: "maid build.maid".into(),
            code: Some(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("maid build.maid"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn tool_unavailable_displays_tool() {
        let err = ToolgateError::ToolUnavailable { tool: "maid".into() };
        assert_eq!(err.to_string(), "'maid' is not available");
    }

    #[test]
    fn unknown_tool_lists_known_tools() {
        let err = ToolgateError::UnknownTool {
            name: "mad".into(),
            known: "maid".into(),
        };
        assert_eq!(err.to_string(), "Unknown tool 'mad' (known tools: maid)");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ToolgateError = io_err.into();
        assert!(matches!(err, ToolgateError::Io(_)));
    }
}
