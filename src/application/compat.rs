//! Compatibility Prober
//!
//! Asks the installed runtime whether it can load a candidate binary. Results
//! are memoized by content hash for the lifetime of the prober; concurrent
//! requests for the same hash wait on one probe instead of launching twice.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::domain::ports::{ProbeLauncher, ProbeOutcome};
use crate::domain::value_objects::ContentHash;
use crate::error::{NativeError, NativeResult};

type Slot = Arc<Mutex<Option<bool>>>;

pub struct CompatibilityProber {
    launcher: Arc<dyn ProbeLauncher>,
    timeout_secs: u64,
    record: Mutex<HashMap<ContentHash, Slot>>,
}

impl CompatibilityProber {
    /// `timeout_secs` only describes timeouts; the launcher enforces the bound
    pub fn new(launcher: Arc<dyn ProbeLauncher>, timeout_secs: u64) -> Self {
        Self {
            launcher,
            timeout_secs,
            record: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the runtime can load the binary at `source_path`
    pub fn probe(&self, source_path: &Path, bytes: &[u8]) -> NativeResult<bool> {
        self.probe_hashed(source_path, &ContentHash::from_bytes(bytes))
    }

    /// Same as [`probe`](Self::probe) with a precomputed hash
    pub fn probe_hashed(&self, source_path: &Path, hash: &ContentHash) -> NativeResult<bool> {
        let slot = {
            let mut record = self.record.lock().map_err(|_| NativeError::Aborted)?;
            Arc::clone(record.entry(hash.clone()).or_default())
        };
        let mut cached = slot.lock().map_err(|_| NativeError::Aborted)?;
        if let Some(compatible) = *cached {
            return Ok(compatible);
        }

        info!(binary = %source_path.display(), hash = %hash.short(16), "probing native addon");
        let outcome = self
            .launcher
            .launch(source_path)
            .map_err(|e| NativeError::ProbeLaunch {
                program: e.program,
                message: e.message,
            })?;
        let compatible = match outcome {
            ProbeOutcome::Compatible => true,
            ProbeOutcome::Incompatible { code } => {
                warn!(binary = %source_path.display(), code = ?code, "runtime failed to load native addon");
                false
            }
            ProbeOutcome::ProtocolError => {
                return Err(NativeError::ProbeProtocol {
                    source_path: source_path.to_path_buf(),
                })
            }
            ProbeOutcome::TimedOut => {
                return Err(NativeError::ProbeTimeout {
                    source_path: source_path.to_path_buf(),
                    secs: self.timeout_secs,
                })
            }
        };
        *cached = Some(compatible);
        Ok(compatible)
    }

    /// Fail with a rebuild instruction unless the binary is compatible
    pub fn ensure_compatible(&self, source_path: &Path, hash: &ContentHash) -> NativeResult<()> {
        if self.probe_hashed(source_path, hash)? {
            Ok(())
        } else {
            Err(NativeError::Incompatible {
                source_path: source_path.to_path_buf(),
            })
        }
    }

    /// Number of distinct hashes with a recorded answer
    pub fn recorded(&self) -> usize {
        let slots: Vec<Slot> = match self.record.lock() {
            Ok(record) => record.values().cloned().collect(),
            Err(_) => return 0,
        };
        slots
            .iter()
            .filter(|slot| slot.lock().map(|s| s.is_some()).unwrap_or(false))
            .count()
    }
}
