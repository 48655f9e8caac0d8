//! Tool availability and resolution.
//!
//! This module decides whether an external tool can be run and, when it
//! cannot, walks the user through installing it or pointing at it.
//!
//! # Modules
//!
//! - [`probe`] - Run `<tool> --version` and classify the result
//! - [`registry`] - Tool definitions, platforms and fallback templates
//! - [`installer`] - Install a tool with its toolchain manager
//! - [`resolver`] - The resolution flow behind [`Resolver::ensure`]
//! - [`flight`] - Sharing one in-flight resolution between callers
//! - [`status`] - Result types
//!
//! # Example
//!
//! ```
//! use toolgate::config::MemoryConfigStore;
//! use toolgate::requirements::{Resolver, SingleFlight, ToolDefinition};
//! use toolgate::shell::{ProcessOutput, ScriptedRunner};
//! use toolgate::ui::MockUI;
//!
//! let tool = ToolDefinition::maid();
//! let store = MemoryConfigStore::new();
//! let runner = ScriptedRunner::new();
//! runner.respond("maid", ProcessOutput::exited(0, "maid 1.2.0\n", ""));
//! let flights = SingleFlight::new();
//!
//! let mut ui = MockUI::new();
//! let outcome = Resolver::new(&tool, &store, &runner)
//!     .with_flights(&flights)
//!     .ensure(&mut ui);
//!
//! assert_eq!(outcome.path(), Some("maid"));
//! assert!(ui.prompts_shown().is_empty());
//! ```

pub mod flight;
pub mod installer;
pub mod probe;
pub mod registry;
pub mod resolver;
pub mod status;

pub use flight::SingleFlight;
pub use installer::Installer;
pub use probe::{probe, DEFAULT_VERSION_ARG};
pub use registry::{InstallContext, Platform, ToolDefinition, ToolRegistry};
pub use resolver::{Resolver, CHOICE_CANCEL, CHOICE_INSTALL, CHOICE_SET_PATH};
pub use status::{InstallOutcome, InstallStatus, ProbeResult, ProbeStatus, ResolutionOutcome};
