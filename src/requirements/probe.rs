//! Executable probing.
//!
//! A probe runs `<executable> --version` and reports whether it answered.
//! It never prompts, never writes configuration and never fails: anything
//! that goes wrong becomes the diagnostic of an absent result.
//!
//! # Example
//!
//! ```
//! use toolgate::requirements::probe::{probe, DEFAULT_VERSION_ARG};
//! use toolgate::shell::{ProcessOutput, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond("maid", ProcessOutput::exited(0, "maid 1.2.0\n", ""));
//!
//! let result = probe(&runner, "maid", DEFAULT_VERSION_ARG);
//! assert!(result.is_present());
//! assert_eq!(result.version.as_deref(), Some("maid 1.2.0"));
//! ```

use std::path::{Path, PathBuf};

use crate::shell::{display_command, ProcessOutput, ProcessRunner};

use super::status::ProbeResult;

/// Argument passed when the tool does not name its own.
pub const DEFAULT_VERSION_ARG: &str = "--version";

/// Probe an executable name or path.
///
/// Exit code 0 means present, with trimmed stdout as the version (stderr is
/// ignored). Anything else is absent, with the first non-empty of: the spawn
/// error, trimmed stderr, trimmed stdout, or a synthesized exit code message.
/// An empty executable is absent without spawning anything.
pub fn probe(runner: &dyn ProcessRunner, executable: &str, version_arg: &str) -> ProbeResult {
    let executable = executable.trim();
    if executable.is_empty() {
        return ProbeResult::absent("No executable configured");
    }

    let args = [version_arg.to_string()];
    let output = runner.run(executable, &args);

    if output.success() {
        tracing::debug!("{} answered {}", executable, version_arg);
        return ProbeResult::present(output.stdout.trim());
    }

    let diagnostic = diagnostic_for(&output, &display_command(executable, &args));
    tracing::debug!("{} is absent: {}", executable, diagnostic);
    ProbeResult::absent(diagnostic)
}

/// Best available explanation for a failed run.
pub fn diagnostic_for(output: &ProcessOutput, command: &str) -> String {
    if let Some(err) = output.spawn_error.as_deref().filter(|e| !e.trim().is_empty()) {
        return err.trim().to_string();
    }

    [output.stderr.trim(), output.stdout.trim()]
        .into_iter()
        .find(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| match output.exit_code {
            Some(code) => format!("`{}` exited with code {}", command, code),
            None => format!("`{}` was terminated by a signal", command),
        })
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locate an executable on disk.
///
/// Anything containing a path separator is taken as-is. A bare name is
/// looked up in `path_entries`, in order. Used only to report where a
/// present tool lives; presence itself is always decided by [`probe`].
pub fn locate(executable: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(executable);
    if direct.components().count() > 1 {
        return (direct.is_file() && is_executable(direct)).then(|| direct.to_path_buf());
    }

    let names: Vec<String> = if cfg!(windows) && direct.extension().is_none() {
        vec![format!("{}.exe", executable), executable.to_string()]
    } else {
        vec![executable.to_string()]
    };

    path_entries.iter().find_map(|dir| {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file() && is_executable(candidate))
    })
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;

    fn probe_with(output: ProcessOutput) -> ProbeResult {
        let runner = ScriptedRunner::new();
        runner.respond("maid", output);
        probe(&runner, "maid", DEFAULT_VERSION_ARG)
    }

    #[test]
    fn exit_zero_is_present_with_trimmed_stdout() {
        let result = probe_with(ProcessOutput::exited(0, "  maid 1.2.0\n", ""));
        assert!(result.is_present());
        assert_eq!(result.version.as_deref(), Some("maid 1.2.0"));
    }

    #[test]
    fn exit_zero_ignores_stderr() {
        let result = probe_with(ProcessOutput::exited(0, "maid 1.2.0", "warning: deprecated"));
        assert!(result.is_present());
        assert!(result.diagnostic.is_none());
    }

    #[test]
    fn spawn_error_wins() {
        let result = probe(&ScriptedRunner::new(), "maid", DEFAULT_VERSION_ARG);
        assert!(!result.is_present());
        assert_eq!(result.diagnostic_text(), "maid: command not found");
    }

    #[test]
    fn stderr_preferred_over_stdout() {
        let result = probe_with(ProcessOutput::exited(2, "usage: maid", "unknown flag\n"));
        assert_eq!(result.diagnostic_text(), "unknown flag");
    }

    #[test]
    fn stdout_used_when_stderr_empty() {
        let result = probe_with(ProcessOutput::exited(1, "broken install\n", "  \n"));
        assert_eq!(result.diagnostic_text(), "broken install");
    }

    #[test]
    fn silent_failure_gets_synthesized_message() {
        let result = probe_with(ProcessOutput::exited(127, "", ""));
        assert_eq!(
            result.diagnostic_text(),
            "`maid --version` exited with code 127"
        );
    }

    #[test]
    fn signal_without_output_is_reported() {
        let output = ProcessOutput {
            exit_code: None,
            ..Default::default()
        };
        let result = probe_with(output);
        assert!(result.diagnostic_text().contains("signal"));
    }

    #[test]
    fn empty_path_never_spawns() {
        let runner = ScriptedRunner::new();
        let result = probe(&runner, "   ", DEFAULT_VERSION_ARG);
        assert!(!result.is_present());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn passes_version_arg() {
        let runner = ScriptedRunner::new();
        runner.respond("maid", ProcessOutput::exited(0, "1.0", ""));
        probe(&runner, "maid", "-V");
        assert_eq!(runner.calls()[0].args, vec!["-V".to_string()]);
    }

    #[test]
    fn path_with_spaces_is_one_program() {
        let runner = ScriptedRunner::new();
        runner.respond("/opt/my tools/maid", ProcessOutput::exited(0, "1.0", ""));
        let result = probe(&runner, "/opt/my tools/maid", DEFAULT_VERSION_ARG);
        assert!(result.is_present());
        assert_eq!(runner.calls()[0].program, "/opt/my tools/maid");
    }

    #[cfg(unix)]
    #[test]
    fn locate_finds_executable_in_path_entries() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let bin = dir.path().join("maid");
        std::fs::write(&bin, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        let found = locate("maid", &[PathBuf::from("/nonexistent"), dir.path().to_path_buf()]);
        assert_eq!(found, Some(bin.clone()));

        let direct = locate(bin.to_str().unwrap(), &[]);
        assert_eq!(direct, Some(bin));
    }

    #[cfg(unix)]
    #[test]
    fn locate_skips_non_executable_files() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let bin = dir.path().join("maid");
        std::fs::write(&bin, "data").unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(locate("maid", &[dir.path().to_path_buf()]), None);
    }
}
