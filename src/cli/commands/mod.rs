//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`toolgate ensure`, `toolgate run`)
//! - One [`ToolContext`] built per invocation and shared by every command
//! - Consistent global flag handling

pub mod check;
pub mod config;
pub mod dispatcher;
pub mod ensure;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ToolContext};
