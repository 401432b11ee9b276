//! ProbeLauncher port - runs one compatibility probe in a child process
//!
//! The child receives the candidate path in [`PROBE_PATH_VAR`] and answers with
//! its exit code.

use std::path::Path;

/// Environment variable carrying the absolute path of the candidate binary
pub const PROBE_PATH_VAR: &str = "NATIVEPACK_PROBE_PATH";

/// Exit code: the binary loaded
pub const EXIT_COMPATIBLE: i32 = 0;

/// Exit code: the binary failed to load
pub const EXIT_INCOMPATIBLE: i32 = 1;

/// Exit code: the child was started without a candidate path
pub const EXIT_PROTOCOL_ERROR: i32 = 2;

/// Outcome of a single probe run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Exit code 0
    Compatible,
    /// Any exit code other than 0 and the reserved protocol code
    Incompatible { code: Option<i32> },
    /// Reserved exit code: no instruction was given to the child
    ProtocolError,
    /// The child did not exit within the allowed time and was killed
    TimedOut,
}

impl ProbeOutcome {
    /// Classify a child exit code
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(EXIT_COMPATIBLE) => ProbeOutcome::Compatible,
            Some(EXIT_PROTOCOL_ERROR) => ProbeOutcome::ProtocolError,
            other => ProbeOutcome::Incompatible { code: other },
        }
    }
}

/// Error starting the probe child
#[derive(Debug, Clone)]
pub struct LaunchError {
    pub program: String,
    pub message: String,
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to launch {}: {}", self.program, self.message)
    }
}

impl std::error::Error for LaunchError {}

/// Launches the target runtime against a candidate binary
pub trait ProbeLauncher: Send + Sync {
    /// Run one probe for the binary at `binary_path` (absolute)
    fn launch(&self, binary_path: &Path) -> Result<ProbeOutcome, LaunchError>;
}
