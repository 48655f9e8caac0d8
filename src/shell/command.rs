//! Process execution.
//!
//! Every command is spawned directly from a program name and a structured
//! argument list. Nothing goes through a shell, so paths containing spaces
//! or shell metacharacters need no quoting.

use crate::error::{Result, ToolgateError};
use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread;

/// Captured result of running a process to completion.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Set when the process could not be started at all.
    pub spawn_error: Option<String>,

    /// Exit code (None if never started or killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Output for a process that exited with the given code.
    pub fn exited(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            spawn_error: None,
            exit_code: Some(exit_code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    /// Output for a process that never started.
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self {
            spawn_error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether the process started and exited with code 0.
    pub fn success(&self) -> bool {
        self.spawn_error.is_none() && self.exit_code == Some(0)
    }
}

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The text of the line, regardless of stream.
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(s) | Self::Stderr(s) => s,
        }
    }
}

/// Spawns processes on behalf of the probe and installer.
///
/// Implementations never return errors: a process that cannot be started
/// is reported through [`ProcessOutput::spawn_error`].
pub trait ProcessRunner: Send + Sync {
    /// Run a program to completion, capturing its output.
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput;

    /// Run a program to completion, reporting each output line as it arrives.
    ///
    /// The default implementation runs to completion first and replays the
    /// captured lines afterwards.
    fn run_streaming(
        &self,
        program: &str,
        args: &[String],
        on_line: &mut dyn FnMut(OutputLine),
    ) -> ProcessOutput {
        let output = self.run(program, args);
        for line in output.stdout.lines() {
            on_line(OutputLine::Stdout(line.to_string()));
        }
        for line in output.stderr.lines() {
            on_line(OutputLine::Stderr(line.to_string()));
        }
        output
    }
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
        tracing::debug!("Running {}", display_command(program, args));

        let output = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => return ProcessOutput::spawn_failed(spawn_error_text(program, &e)),
        };

        ProcessOutput {
            spawn_error: None,
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    fn run_streaming(
        &self,
        program: &str,
        args: &[String],
        on_line: &mut dyn FnMut(OutputLine),
    ) -> ProcessOutput {
        tracing::debug!("Running {} (streaming)", display_command(program, args));

        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return ProcessOutput::spawn_failed(spawn_error_text(program, &e)),
        };

        let (tx, rx) = mpsc::channel();

        let stdout_handle = child.stdout.take().map(|stdout| {
            let tx = tx.clone();
            thread::spawn(move || forward_lines(stdout, OutputLine::Stdout, &tx))
        });

        let stderr_handle = child.stderr.take().map(|stderr| {
            let tx = tx.clone();
            thread::spawn(move || forward_lines(stderr, OutputLine::Stderr, &tx))
        });

        // Readers hold the remaining senders; the loop ends when both finish.
        drop(tx);
        for line in rx {
            on_line(line);
        }

        let stdout = stdout_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default();
        let stderr = stderr_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default();

        match child.wait() {
            Ok(status) => ProcessOutput {
                spawn_error: None,
                exit_code: status.code(),
                stdout,
                stderr,
            },
            Err(e) => ProcessOutput {
                spawn_error: Some(format!("Failed to wait for {}: {}", program, e)),
                exit_code: None,
                stdout,
                stderr,
            },
        }
    }
}

/// Read a pipe to EOF, sending each line as it arrives and returning the
/// whole text.
///
/// Invalid UTF-8 is replaced rather than ending the read, so the pipe is
/// always drained.
fn forward_lines<R: Read>(
    reader: R,
    wrap: fn(String) -> OutputLine,
    tx: &Sender<OutputLine>,
) -> String {
    let mut reader = BufReader::new(reader);
    let mut output = String::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                let line = text.trim_end_matches(['\n', '\r']).to_string();
                output.push_str(&line);
                output.push('\n');
                let _ = tx.send(wrap(line));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("Stopped reading process output: {}", e);
                break;
            }
        }
    }

    output
}

/// Run a program with inherited stdio and return its exit code.
///
/// Used for the dependent action once the tool is resolved.
pub fn execute_inherited(program: &str, args: &[String]) -> Result<i32> {
    tracing::debug!("Executing {}", display_command(program, args));

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|_| ToolgateError::CommandFailed {
            command: display_command(program, args),
            code: None,
        })?;

    Ok(status.code().unwrap_or(1))
}

/// Render a program and its arguments for messages and logs.
///
/// Display only. The string is never handed to a shell.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn spawn_error_text(program: &str, err: &std::io::Error) -> String {
    match err.kind() {
        std::io::ErrorKind::NotFound => format!("{}: command not found", program),
        std::io::ErrorKind::PermissionDenied => format!("{}: permission denied", program),
        _ => format!("{}: {}", program, err),
    }
}
