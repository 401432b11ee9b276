//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{BuildMode, ProcessClass, RuntimeInfo};
use crate::error::{NativeError, NativeResult};

/// Compatibility probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Master switch; `false` trusts every binary
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Also probe project-local binaries in development builds
    #[serde(default)]
    pub in_development: bool,

    /// Runtime executable used to load candidates
    #[serde(default = "default_runtime")]
    pub runtime: PathBuf,

    /// Arguments placed before the bootstrap script
    #[serde(default)]
    pub args: Vec<String>,

    /// Bound on one probe child's lifetime
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            in_development: false,
            runtime: default_runtime(),
            args: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    /// Whether project-local binaries are probed in `mode`
    pub fn applies_to(&self, mode: BuildMode) -> bool {
        self.enabled && (!mode.is_development() || self.in_development)
    }
}

/// Build configuration (`nativepack.toml`)
///
/// Relative directories resolve against the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Bundler target, `electron-main` or `electron-renderer`
    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default)]
    pub mode: BuildMode,

    /// Defaults to the current directory
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// Bundle output directory; defaults to `build/main` or `build/renderer`
    #[serde(default)]
    pub build_output_dir: Option<PathBuf>,

    /// Packaged application directory
    #[serde(default = "default_app_build_dir")]
    pub app_build_dir: PathBuf,

    /// Where copied binaries and the output manifest go
    #[serde(default = "default_addons_output_dir")]
    pub addons_output_dir: PathBuf,

    /// Output name pattern for development builds
    #[serde(default)]
    pub output_name_pattern: Option<String>,

    /// Load flags for direct references; switches loading to `dlopen`
    #[serde(default)]
    pub load_flags: Option<i64>,

    /// Maintain the output manifest
    #[serde(default = "default_true")]
    pub make_manifest: bool,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub runtime: RuntimeInfo,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            mode: BuildMode::default(),
            project_root: None,
            build_output_dir: None,
            app_build_dir: default_app_build_dir(),
            addons_output_dir: default_addons_output_dir(),
            output_name_pattern: None,
            load_flags: None,
            make_manifest: true,
            probe: ProbeConfig::default(),
            runtime: RuntimeInfo::default(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> NativeResult<Self> {
        let (config, _warnings) = super::loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Process class of the configured target
    ///
    /// Only the desktop main and renderer targets are supported.
    pub fn process_class(&self) -> NativeResult<ProcessClass> {
        self.target
            .parse()
            .map_err(|_| NativeError::UnsupportedTarget {
                target: self.target.clone(),
            })
    }

    pub fn project_root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn resolve(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.project_root().join(dir)
        }
    }

    /// Bundle output directory for `class`
    pub fn build_output_dir(&self, class: ProcessClass) -> PathBuf {
        match &self.build_output_dir {
            Some(dir) => self.resolve(dir),
            None => self
                .resolve(&self.app_build_dir)
                .join(class.default_output_dir()),
        }
    }

    pub fn app_build_dir(&self) -> PathBuf {
        self.resolve(&self.app_build_dir)
    }

    pub fn addons_output_dir(&self) -> PathBuf {
        self.resolve(&self.addons_output_dir)
    }

    /// Directory the sandboxed process resolves app-relative paths against
    pub fn app_root(&self) -> PathBuf {
        if self.mode.is_development() {
            self.project_root()
        } else {
            self.app_build_dir()
        }
    }

    /// Path of the output manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.addons_output_dir()
            .join(crate::domain::entities::PACKAGE_DESCRIPTOR)
    }
}

fn default_true() -> bool {
    true
}

fn default_target() -> String {
    ProcessClass::Privileged.target_name().to_string()
}

fn default_runtime() -> PathBuf {
    PathBuf::from("electron")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_app_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_addons_output_dir() -> PathBuf {
    PathBuf::from("build/addons")
}
