//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolgate - make sure a CLI tool is installed before you use it.
#[derive(Debug, Parser)]
#[command(name = "toolgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the global config file (overrides ~/.toolgate/config.yml)
    #[arg(short, long, global = true, env = "TOOLGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Tool to resolve
    #[arg(short, long, global = true, default_value = "maid")]
    pub tool: String,

    /// Never prompt; answer from TOOLGATE_PROMPT_* variables or give up
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Make sure the tool is available, offering to install it (default)
    Ensure,

    /// Probe the tool without prompting
    Check(CheckArgs),

    /// Ensure the tool, then run it on a file
    Run(RunArgs),

    /// Show or change tool settings
    Config(ConfigArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// File to pass to the tool
    pub file: PathBuf,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the tool's settings (default)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a new executable path after checking that it runs
    SetPath {
        /// Executable name or absolute path
        path: String,
    },

    /// Save the arguments passed before the file in `toolgate run`
    SetArgs {
        /// Write to the project's .toolgate.yml instead of the global file
        #[arg(long)]
        local: bool,

        /// Arguments, in order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["toolgate"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.tool, "maid");
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["toolgate", "check", "--json", "--non-interactive"]).unwrap();
        assert!(cli.non_interactive);
        assert!(matches!(cli.command, Some(Commands::Check(CheckArgs { json: true }))));
    }

    #[test]
    fn run_takes_a_file() {
        let cli = Cli::try_parse_from(["toolgate", "run", "build.maid"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.file, PathBuf::from("build.maid")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn set_args_accepts_hyphenated_values() {
        let cli =
            Cli::try_parse_from(["toolgate", "config", "set-args", "--local", "--release", "--jobs=4"])
                .unwrap();
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                action: Some(ConfigAction::SetArgs { local, args }),
            })) => {
                assert!(local);
                assert_eq!(args, vec!["--release", "--jobs=4"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn set_path_takes_one_value() {
        let cli =
            Cli::try_parse_from(["toolgate", "config", "set-path", "/opt/my tools/maid"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigArgs {
                action: Some(ConfigAction::SetPath { path }),
            })) => assert_eq!(path, "/opt/my tools/maid"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
