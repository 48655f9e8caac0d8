//! Toolgate - make sure a CLI tool is installed before you use it.
//!
//! Toolgate answers one question for a host application: can the `maid`
//! CLI be run right now? When it cannot, it asks the user whether to install
//! it with `cargo install` or to point at an existing copy, and remembers the
//! answer.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings files and the key/value store
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Probing, installing and resolving tools
//! - [`shell`] - Process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use toolgate::config::{ConfigValue, MemoryConfigStore};
//! use toolgate::requirements::{Resolver, SingleFlight, ToolDefinition, CHOICE_SET_PATH};
//! use toolgate::shell::{ProcessOutput, ScriptedRunner};
//! use toolgate::ui::MockUI;
//!
//! let tool = ToolDefinition::maid();
//! let store = MemoryConfigStore::new();
//! let runner = ScriptedRunner::new();
//! runner.respond("/opt/maid", ProcessOutput::exited(0, "maid 1.2.0\n", ""));
//! let flights = SingleFlight::new();
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("maid_missing", CHOICE_SET_PATH);
//! ui.set_prompt_response("maid_path", "/opt/maid");
//!
//! let outcome = Resolver::new(&tool, &store, &runner)
//!     .with_flights(&flights)
//!     .ensure(&mut ui);
//!
//! assert_eq!(outcome.path(), Some("/opt/maid"));
//! assert_eq!(store.text("maid.path").as_deref(), Some("/opt/maid"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod shell;
pub mod ui;

pub use error::{Result, ToolgateError};
