//! Runtime probe launcher
//!
//! Starts the application runtime with a tiny bootstrap script that tries to
//! load the candidate binary and reports through its exit code.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::ports::{LaunchError, ProbeLauncher, ProbeOutcome, PROBE_PATH_VAR};

/// Default bound on a probe child's lifetime
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Script executed by the runtime
pub const BOOTSTRAP_SCRIPT: &str = r#"const target = process.env.NATIVEPACK_PROBE_PATH;
if (!target) {
  process.exit(2);
}
try {
  require(target);
  process.exit(0);
} catch (error) {
  console.error(error && error.message);
  process.exit(1);
}
"#;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Launches `program [args..] <bootstrap script>`
#[derive(Debug, Clone)]
pub struct RuntimeLauncher {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl RuntimeLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Arguments placed before the bootstrap script
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn launch_error(&self, message: impl ToString) -> LaunchError {
        LaunchError {
            program: self.program.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl ProbeLauncher for RuntimeLauncher {
    fn launch(&self, binary_path: &Path) -> Result<ProbeOutcome, LaunchError> {
        let dir = tempfile::tempdir().map_err(|e| self.launch_error(e))?;
        let script = dir.path().join("probe.js");
        std::fs::write(&script, BOOTSTRAP_SCRIPT).map_err(|e| self.launch_error(e))?;

        debug!(
            program = %self.program.display(),
            binary = %binary_path.display(),
            "launching compatibility probe"
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&script)
            .env(PROBE_PATH_VAR, binary_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let (status, timed_out) =
            wait_with_deadline(&mut child, self.timeout).map_err(|e| self.launch_error(e))?;
        if timed_out {
            return Ok(ProbeOutcome::TimedOut);
        }
        debug!(code = ?status.code(), "compatibility probe exited");
        Ok(ProbeOutcome::from_exit_code(status.code()))
    }
}

/// Wait for `child`, killing it once `timeout` has elapsed
fn wait_with_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<(ExitStatus, bool)> {
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, false));
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            let _ = child.kill();
            let status = child.wait()?;
            return Ok((status, true));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
