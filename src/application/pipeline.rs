//! Native addon pipeline
//!
//! One `NativePipeline` value serves one build run. It owns the compatibility
//! record and the manifest state, and may be shared across threads by the
//! driving bundler.
//!
//! ## Flow (per binary)
//!
//! 1. Classify: project-local or dependency-supplied (package inspector)
//! 2. Plan the output location (path planner)
//! 3. Probe project-local binaries against the runtime
//! 4. Write the artifact
//! 5. Update the output manifest
//! 6. Emit loader code (direct shim or locator module)
//!
//! A failure at any step poisons the run: artifacts written so far are removed
//! and every later call returns [`NativeError::Aborted`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::application::compat::CompatibilityProber;
use crate::application::manifest_sync::{HostProject, ManifestSynchronizer};
use crate::config::BuildConfig;
use crate::domain::entities::{target_file_name, BinaryArtifact, Delivery, PACKAGE_DESCRIPTOR};
use crate::domain::ports::{ContentReader, FileSystem, ManifestRepository, ProbeLauncher};
use crate::domain::services::{
    locator_module, ArtifactPathPlanner, BinaryDiscovery, DiscoveredBinary, Origin,
    PackageInspector, Placement, ShimGenerator,
};
use crate::domain::value_objects::path::{is_within, module_label, normalize};
use crate::domain::value_objects::{ContentHash, ProcessClass};
use crate::error::{NativeError, NativeResult};
use crate::infrastructure::{JsonManifestRepository, LocalFs, RuntimeLauncher};

/// Generated code plus the artifacts it loads
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub artifacts: Vec<BinaryArtifact>,
    pub code: String,
    pub warnings: Vec<String>,
}

/// Everything the run produced so far
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub artifacts: Vec<BinaryArtifact>,
    pub warnings: Vec<String>,
    pub aborted: bool,
}

#[derive(Debug, Default)]
struct RunState {
    aborted: bool,
    emitted: Vec<PathBuf>,
    /// Manifest bytes before the run first touched it; inner `None` when absent
    manifest_before: Option<Option<Vec<u8>>>,
    artifacts: Vec<BinaryArtifact>,
    warnings: Vec<String>,
}

pub struct NativePipeline {
    config: BuildConfig,
    class: ProcessClass,
    project_root: PathBuf,
    fs: Arc<dyn FileSystem>,
    prober: CompatibilityProber,
    manifest: ManifestSynchronizer,
    planner: ArtifactPathPlanner,
    shims: ShimGenerator,
    state: Mutex<RunState>,
}

impl NativePipeline {
    /// Create a pipeline for one run
    ///
    /// Fails with `UnsupportedTarget` unless the configured target is a
    /// desktop main or renderer process.
    pub fn new(
        mut config: BuildConfig,
        fs: Arc<dyn FileSystem>,
        launcher: Arc<dyn ProbeLauncher>,
        manifest_repo: Arc<dyn ManifestRepository>,
    ) -> NativeResult<Self> {
        let class = config.process_class()?;
        let project_root = absolute(&config.project_root())?;
        config.project_root = Some(project_root.clone());

        let planner = ArtifactPathPlanner::new(
            project_root.clone(),
            config.build_output_dir(class),
            config.app_root(),
            config.addons_output_dir(),
            config.mode,
        )
        .with_name_pattern(config.output_name_pattern.clone());
        let manifest =
            ManifestSynchronizer::new(manifest_repo, config.manifest_path(), config.make_manifest);
        let prober = CompatibilityProber::new(launcher, config.probe.timeout_secs);

        Ok(Self {
            class,
            project_root,
            fs,
            prober,
            manifest,
            planner,
            shims: ShimGenerator::new(class),
            state: Mutex::new(RunState::default()),
            config,
        })
    }

    /// Pipeline over the local disk, probing with the configured runtime
    pub fn on_disk(config: BuildConfig) -> NativeResult<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(LocalFs::new());
        let launcher = RuntimeLauncher::new(config.probe.runtime.clone())
            .with_args(config.probe.args.clone())
            .with_timeout(Duration::from_secs(config.probe.timeout_secs));
        let repo = JsonManifestRepository::new(Arc::clone(&fs)).with_file_lock();
        Self::new(config, fs, Arc::new(launcher), Arc::new(repo))
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn process_class(&self) -> ProcessClass {
        self.class
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn prober(&self) -> &CompatibilityProber {
        &self.prober
    }

    /// Resolve a direct reference to a binary and generate its loader shim
    pub fn resolve_direct(&self, source: &Path) -> NativeResult<Resolution> {
        self.ensure_running()?;
        let source = self.absolute_source(source);
        let outcome = self.fs.read(&source).map_err(NativeError::from).and_then(|bytes| {
            let name = source
                .file_name()
                .map(|n| target_file_name(&n.to_string_lossy()))
                .unwrap_or_default();
            self.resolve_artifact(&source, &bytes, &name, self.config.load_flags)
        });
        let (artifact, warnings) = self.or_abort(outcome)?;
        Ok(Resolution {
            code: self.shims.direct_shim(&artifact),
            artifacts: vec![artifact],
            warnings,
        })
    }

    /// Build the locator module answering `bindings(...)` calls made from
    /// `contexts` (directories of the requesting modules)
    pub fn resolve_bindings(&self, contexts: &[PathBuf]) -> NativeResult<Resolution> {
        self.ensure_running()?;
        let outcome = self.resolve_contexts(contexts);
        let (artifacts, warnings) = self.or_abort(outcome)?;
        Ok(Resolution {
            code: locator_module(&self.shims, &artifacts),
            artifacts,
            warnings,
        })
    }

    /// Discover the binaries of one package without resolving them
    pub fn discover(&self, package_root: &Path) -> NativeResult<Vec<DiscoveredBinary>> {
        let reader: &dyn ContentReader = &self.fs;
        BinaryDiscovery::new(reader, &self.config.runtime)
            .discover(&self.absolute_source(package_root))
    }

    /// Probe one binary against the runtime
    pub fn probe(&self, source: &Path) -> NativeResult<bool> {
        self.ensure_running()?;
        let source = self.absolute_source(source);
        let outcome = self
            .fs
            .read(&source)
            .map_err(NativeError::from)
            .and_then(|bytes| self.prober.probe(&source, &bytes));
        self.or_abort(outcome)
    }

    pub fn report(&self) -> BuildReport {
        let state = self.lock_state();
        BuildReport {
            artifacts: state.artifacts.clone(),
            warnings: state.warnings.clone(),
            aborted: state.aborted,
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.lock_state().aborted
    }

    fn resolve_contexts(
        &self,
        contexts: &[PathBuf],
    ) -> NativeResult<(Vec<BinaryArtifact>, Vec<String>)> {
        let reader: &dyn ContentReader = &self.fs;
        let inspector = PackageInspector::new(reader, &self.project_root);
        let discovery = BinaryDiscovery::new(reader, &self.config.runtime);

        let mut roots: Vec<PathBuf> = Vec::new();
        for context in contexts {
            match inspector.find_package_root(&self.absolute_source(context)) {
                Some(root) if !roots.contains(&root) => roots.push(root),
                Some(_) => {}
                None => info!(context = %context.display(), "no package for bindings context, skipped"),
            }
        }

        let mut artifacts = Vec::new();
        let mut warnings = Vec::new();
        for root in roots {
            for binary in discovery.discover(&root)? {
                let (artifact, mut w) =
                    self.resolve_artifact(&binary.path, &binary.bytes, &binary.name, None)?;
                artifacts.push(artifact);
                warnings.append(&mut w);
            }
        }
        Ok((artifacts, warnings))
    }

    fn resolve_artifact(
        &self,
        source: &Path,
        bytes: &[u8],
        target_name: &str,
        load_flags: Option<i64>,
    ) -> NativeResult<(BinaryArtifact, Vec<String>)> {
        let reader: &dyn ContentReader = &self.fs;
        let inspector = PackageInspector::new(reader, &self.project_root);
        let hash = ContentHash::from_bytes(bytes);
        let owner = inspector.owning_package(source)?;

        let origin = match &owner {
            Some((package_root, descriptor)) => Origin::Dependency {
                package_root: package_root.as_path(),
                descriptor,
                linked: !is_within(
                    &self.fs.canonicalize(package_root),
                    &self.fs.canonicalize(&self.project_root),
                ),
            },
            None => Origin::ProjectLocal,
        };
        let placement = self.planner.plan(source, &hash, origin, load_flags);

        if !origin.is_dependency() && self.config.probe.applies_to(self.config.mode) {
            self.prober.ensure_compatible(source, &hash)?;
        }

        let delivery = match &placement {
            Placement::Copy { absolute, .. } => {
                self.emit(absolute, bytes)?;
                Delivery::Copied {
                    emitted_path: absolute.clone(),
                }
            }
            Placement::Installed { .. } => Delivery::Installed,
        };

        let mut warnings = Vec::new();
        let outcome = match &owner {
            Some((_, descriptor)) => {
                let host = self.host_project()?;
                self.snapshot_manifest()?;
                self.manifest
                    .synchronize(host.as_ref(), &descriptor.name, &descriptor.version)?
            }
            None => self.manifest.skip(),
        };
        if let Some(w) = outcome.warning() {
            warnings.push(w.to_string());
        }

        let artifact = BinaryArtifact::new(
            source,
            hash,
            placement.from_build_root(),
            placement.from_app_root(),
            owner.is_some(),
            load_flags,
            target_name,
            delivery,
        )
        .with_module_label(module_label(&self.project_root, source));

        info!(
            binary = %artifact.module_label(),
            path = %artifact.output_path_from_build_root(),
            copied = artifact.is_copied(),
            "resolved native addon"
        );
        let mut state = self.lock_state();
        state.artifacts.push(artifact.clone());
        state.warnings.extend(warnings.iter().cloned());
        Ok((artifact, warnings))
    }

    /// Host project descriptor, re-read for every resolution
    fn host_project(&self) -> NativeResult<Option<HostProject>> {
        let reader: &dyn ContentReader = &self.fs;
        if !reader.is_file(&self.project_root.join(PACKAGE_DESCRIPTOR)) {
            return Ok(None);
        }
        let descriptor =
            PackageInspector::new(reader, &self.project_root).read_project_descriptor()?;
        let manifest_dir = self
            .manifest
            .manifest_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.addons_output_dir());
        Ok(Some(HostProject::from_descriptor(
            &descriptor,
            &self.project_root,
            &manifest_dir,
            reader,
        )))
    }

    fn emit(&self, path: &Path, bytes: &[u8]) -> NativeResult<()> {
        let mut state = self.lock_state();
        if state.aborted {
            return Err(NativeError::Aborted);
        }
        self.fs.write(path, bytes)?;
        if !state.emitted.iter().any(|p| p == path) {
            state.emitted.push(path.to_path_buf());
        }
        Ok(())
    }

    fn snapshot_manifest(&self) -> NativeResult<()> {
        let mut state = self.lock_state();
        if state.aborted {
            return Err(NativeError::Aborted);
        }
        if state.manifest_before.is_none() {
            let reader: &dyn ContentReader = &self.fs;
            let path = self.manifest.manifest_path();
            let before = if reader.is_file(path) {
                Some(reader.read(path)?)
            } else {
                None
            };
            state.manifest_before = Some(before);
        }
        Ok(())
    }

    fn restore_manifest(&self, before: Option<Vec<u8>>) {
        let path = self.manifest.manifest_path();
        let restored = match before {
            Some(bytes) => self.fs.write(path, &bytes),
            None if self.fs.is_file(path) => self.fs.remove(path),
            None => Ok(()),
        };
        if let Err(e) = restored {
            warn!(path = %path.display(), error = %e, "failed to restore output manifest");
        }
    }

    fn ensure_running(&self) -> NativeResult<()> {
        if self.lock_state().aborted {
            Err(NativeError::Aborted)
        } else {
            Ok(())
        }
    }

    /// Poison the run on error, removing everything emitted so far and
    /// putting the output manifest back the way the run found it
    fn or_abort<T>(&self, result: NativeResult<T>) -> NativeResult<T> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(NativeError::Aborted) => return Err(NativeError::Aborted),
            Err(err) => err,
        };
        error!(error = %err, "native addon pipeline aborted");
        let mut state = self.lock_state();
        if !state.aborted {
            state.aborted = true;
            for path in std::mem::take(&mut state.emitted) {
                if let Err(e) = self.fs.remove(&path) {
                    warn!(path = %path.display(), error = %e, "failed to remove emitted addon");
                }
            }
            if let Some(before) = state.manifest_before.take() {
                self.restore_manifest(before);
            }
        }
        Err(err)
    }

    fn lock_state(&self) -> MutexGuard<'_, RunState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn absolute_source(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize(path)
        } else {
            normalize(&self.project_root.join(path))
        }
    }
}

fn absolute(path: &Path) -> NativeResult<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}
