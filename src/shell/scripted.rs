//! Scripted process runner for testing.
//!
//! `ScriptedRunner` implements [`ProcessRunner`] without spawning anything.
//! Each program name maps to queued outputs (consumed in order) and an
//! optional standing output used once the queue is empty. Programs with no
//! script behave as if they are not installed.
//!
//! # Example
//!
//! ```
//! use toolgate::shell::{ProcessOutput, ProcessRunner, ScriptedRunner};
//!
//! let runner = ScriptedRunner::new();
//! runner.respond("maid", ProcessOutput::exited(0, "maid 1.2.0\n", ""));
//!
//! let out = runner.run("maid", &["--version".to_string()]);
//! assert!(out.success());
//! assert_eq!(runner.call_count("maid"), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use super::command::{ProcessOutput, ProcessRunner};

/// A recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
}

/// [`ProcessRunner`] that replays scripted outputs.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    queued: Mutex<HashMap<String, VecDeque<ProcessOutput>>>,
    standing: Mutex<HashMap<String, ProcessOutput>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedRunner {
    /// Create a runner where every program is missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Always answer `program` with `output` once its queue is empty.
    pub fn respond(&self, program: &str, output: ProcessOutput) {
        lock(&self.standing).insert(program.to_string(), output);
    }

    /// Answer the next calls to `program` with `outputs`, in order.
    pub fn queue(&self, program: &str, outputs: Vec<ProcessOutput>) {
        lock(&self.queued)
            .entry(program.to_string())
            .or_default()
            .extend(outputs);
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls made to `program`.
    pub fn call_count(&self, program: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call.program == program)
            .count()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> ProcessOutput {
        lock(&self.calls).push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
        });

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        if let Some(output) = lock(&self.queued)
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
        {
            return output;
        }

        lock(&self.standing)
            .get(program)
            .cloned()
            .unwrap_or_else(|| {
                ProcessOutput::spawn_failed(format!("{}: command not found", program))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_program_is_missing() {
        let runner = ScriptedRunner::new();
        let out = runner.run("maid", &[]);
        assert_eq!(out.spawn_error.as_deref(), Some("maid: command not found"));
    }

    #[test]
    fn queue_is_consumed_before_standing_output() {
        let runner = ScriptedRunner::new();
        runner.respond("maid", ProcessOutput::exited(0, "standing", ""));
        runner.queue(
            "maid",
            vec![
                ProcessOutput::exited(1, "", "first"),
                ProcessOutput::exited(2, "", "second"),
            ],
        );

        assert_eq!(runner.run("maid", &[]).stderr, "first");
        assert_eq!(runner.run("maid", &[]).stderr, "second");
        assert_eq!(runner.run("maid", &[]).stdout, "standing");
    }

    #[test]
    fn records_calls_with_args() {
        let runner = ScriptedRunner::new();
        runner.run("cargo", &["install".to_string(), "maid-lang".to_string()]);

        assert_eq!(
            runner.calls(),
            vec![RecordedCall {
                program: "cargo".to_string(),
                args: vec!["install".to_string(), "maid-lang".to_string()],
            }]
        );
        assert_eq!(runner.call_count("cargo"), 1);
        assert_eq!(runner.call_count("maid"), 0);
    }
}
