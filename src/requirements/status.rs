//! Result types for probing, installing and resolving.
//!
//! Probe and install failures are plain values. The resolver branches on
//! them and only ever hands a [`ResolutionOutcome`] back to callers.

/// Whether a probed executable answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Present,
    Absent,
}

/// The result of probing a single executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Present or absent
    pub status: ProbeStatus,
    /// Trimmed version output, set only when present
    pub version: Option<String>,
    /// Why the probe failed, set only when absent
    pub diagnostic: Option<String>,
}

impl ProbeResult {
    /// A successful probe.
    pub fn present(version: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Present,
            version: Some(version.into()),
            diagnostic: None,
        }
    }

    /// A failed probe.
    pub fn absent(diagnostic: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Absent,
            version: None,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the executable answered.
    pub fn is_present(&self) -> bool {
        self.status == ProbeStatus::Present
    }

    /// The diagnostic, or an empty string when present.
    pub fn diagnostic_text(&self) -> &str {
        self.diagnostic.as_deref().unwrap_or("")
    }
}

/// Whether an install command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Succeeded,
    Failed,
}

/// The result of running the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Succeeded or failed
    pub status: InstallStatus,
    /// Everything the installer printed, in arrival order
    pub captured_output: String,
}

impl InstallOutcome {
    /// Whether the installer exited successfully.
    pub fn succeeded(&self) -> bool {
        self.status == InstallStatus::Succeeded
    }
}

/// Terminal value of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A path that was confirmed present during this attempt.
    Resolved(String),
    /// Canceled, or every recovery attempt failed.
    Unresolved,
}

impl ResolutionOutcome {
    /// Whether a usable path was found.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The resolved path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Unresolved => None,
        }
    }
}

/// Why a resolution attempt ended unresolved.
///
/// Never returned to callers; each variant produces one user-facing
/// message and then collapses to [`ResolutionOutcome::Unresolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The user canceled or dismissed a prompt.
    Canceled,
    /// A user-supplied path failed its probe.
    PathRejected { path: String, diagnostic: String },
    /// The toolchain manager needed to install the tool is missing.
    PrereqMissing,
    /// The install command failed.
    InstallFailed,
    /// The install succeeded but neither the configured path nor the
    /// fallback guess answers.
    StillAbsentAfterInstall { guess: Option<String> },
}
