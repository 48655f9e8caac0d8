//! Process execution and platform helpers.

pub mod command;
pub mod platform;
pub mod scripted;

pub use command::{
    display_command, execute_inherited, OutputLine, ProcessOutput, ProcessRunner, SystemRunner,
};
pub use platform::{browser_command, is_ci, open_url};
pub use scripted::{RecordedCall, ScriptedRunner};
