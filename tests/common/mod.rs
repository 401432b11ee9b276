//! Shared fixtures for nativepack integration tests.
//!
//! - `CountingLauncher`: probe launcher with scripted outcomes and a call count
//! - `Fixture`: in-memory project tree plus a pipeline builder

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use nativepack::domain::ports::{FileSystem, LaunchError, ProbeLauncher, ProbeOutcome};
use nativepack::infrastructure::{JsonManifestRepository, MemoryFs};
use nativepack::{BuildConfig, BuildMode, NativePipeline, ProcessClass};

pub const PROJECT_ROOT: &str = "/app";

/// Probe launcher answering from a script, `Compatible` by default
pub struct CountingLauncher {
    default: ProbeOutcome,
    by_path: Mutex<HashMap<PathBuf, ProbeOutcome>>,
    calls: AtomicUsize,
}

impl CountingLauncher {
    pub fn new(default: ProbeOutcome) -> Self {
        Self {
            default,
            by_path: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn compatible() -> Self {
        Self::new(ProbeOutcome::Compatible)
    }

    pub fn answer(&self, path: impl Into<PathBuf>, outcome: ProbeOutcome) {
        self.by_path.lock().unwrap().insert(path.into(), outcome);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProbeLauncher for CountingLauncher {
    fn launch(&self, binary_path: &Path) -> Result<ProbeOutcome, LaunchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.by_path.lock().unwrap().get(binary_path).copied();
        Ok(scripted.unwrap_or(self.default))
    }
}

/// An in-memory project rooted at `/app`
pub struct Fixture {
    pub fs: MemoryFs,
    pub launcher: Arc<CountingLauncher>,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            fs: MemoryFs::new(),
            launcher: Arc::new(CountingLauncher::compatible()),
        };
        fixture.file(
            "package.json",
            r#"{"name":"desk","version":"1.0.0","main":"build/main/index.js"}"#,
        );
        fixture
    }

    pub fn with_launcher(mut self, launcher: CountingLauncher) -> Self {
        self.launcher = Arc::new(launcher);
        self
    }

    /// Write `content` at `relative` under the project root
    pub fn file(&self, relative: &str, content: impl AsRef<[u8]>) -> &Self {
        self.fs.insert(self.path(relative), content);
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        Path::new(PROJECT_ROOT).join(relative)
    }

    /// A dependency package under `node_modules`
    pub fn package(&self, dir: &str, name: &str, version: &str, main: Option<&str>) -> &Self {
        let descriptor = match main {
            Some(main) => serde_json::json!({"name": name, "version": version, "main": main}),
            None => serde_json::json!({"name": name, "version": version}),
        };
        self.file(&format!("{}/package.json", dir), descriptor.to_string())
    }

    pub fn config(&self, mode: BuildMode) -> BuildConfig {
        BuildConfig {
            project_root: Some(PathBuf::from(PROJECT_ROOT)),
            mode,
            ..Default::default()
        }
    }

    pub fn pipeline(&self, mode: BuildMode) -> NativePipeline {
        self.pipeline_with(self.config(mode))
    }

    pub fn pipeline_for(&self, class: ProcessClass, mode: BuildMode) -> NativePipeline {
        let mut config = self.config(mode);
        config.target = class.target_name().to_string();
        self.pipeline_with(config)
    }

    pub fn pipeline_with(&self, config: BuildConfig) -> NativePipeline {
        let fs: Arc<dyn FileSystem> = Arc::new(self.fs.clone());
        let repo = Arc::new(JsonManifestRepository::new(Arc::clone(&fs)));
        NativePipeline::new(config, fs, self.launcher.clone(), repo).unwrap()
    }

    /// Output manifest as JSON, if written
    pub fn manifest(&self) -> Option<serde_json::Value> {
        self.fs
            .get(self.path("build/addons/package.json"))
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    /// Copied binaries under the addons directory (manifest excluded)
    pub fn emitted(&self) -> Vec<PathBuf> {
        self.fs
            .paths_under(self.path("build/addons"))
            .into_iter()
            .filter(|p| !p.ends_with("package.json"))
            .collect()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
