//! Manifest Synchronizer
//!
//! Records every dependency package that contributed a bundled binary in the
//! output manifest, so the packaging step installs it into the final app.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::domain::entities::{HostIdentity, OutputManifest, PackageDescriptor};
use crate::domain::policies::{choose_version, VersionChoice};
use crate::domain::ports::{ContentReader, ManifestRepository};
use crate::domain::value_objects::path::relative_module_path;
use crate::error::{NativeError, NativeResult};

/// Warning emitted when a binary has no package to record
pub const MANIFEST_SKIPPED: &str =
    "manifest step skipped; native addons may need to be recompiled to fit the target environment";

/// The host project as the manifest sees it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostProject {
    pub identity: HostIdentity,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl HostProject {
    /// Build from the host descriptor
    ///
    /// `main` is recorded relative to `manifest_dir`, resolved the way the
    /// runtime would (`main`, `main.js`, `main/index.js`).
    pub fn from_descriptor(
        descriptor: &PackageDescriptor,
        project_root: &Path,
        manifest_dir: &Path,
        reader: &dyn ContentReader,
    ) -> Self {
        let main = descriptor.main_entry_path.as_ref().map(|_| {
            let declared = descriptor.main_path(project_root);
            let resolved = resolve_entry(&declared, reader);
            relative_module_path(manifest_dir, &resolved)
        });
        Self {
            identity: HostIdentity {
                name: descriptor.name.clone(),
                version: descriptor.version.clone(),
                description: descriptor.description.clone(),
                main,
                author: descriptor.author.clone(),
            },
            dependencies: descriptor.dependencies.clone(),
            dev_dependencies: descriptor.dev_dependencies.clone(),
        }
    }
}

fn resolve_entry(declared: &Path, reader: &dyn ContentReader) -> PathBuf {
    if reader.is_file(declared) {
        return declared.to_path_buf();
    }
    let mut with_js = declared.as_os_str().to_owned();
    with_js.push(".js");
    let with_js = PathBuf::from(with_js);
    if reader.is_file(&with_js) {
        return with_js;
    }
    let index = declared.join("index.js");
    if reader.is_file(&index) {
        return index;
    }
    declared.to_path_buf()
}

/// Result of one synchronization request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The manifest now records `version` for `name`
    Recorded {
        name: String,
        version: String,
        warning: Option<String>,
    },
    /// Nothing to record; carries the warning to surface
    Skipped { warning: String },
    /// Manifest maintenance is turned off
    Disabled,
}

impl SyncOutcome {
    pub fn warning(&self) -> Option<&str> {
        match self {
            SyncOutcome::Recorded { warning, .. } => warning.as_deref(),
            SyncOutcome::Skipped { warning } => Some(warning),
            SyncOutcome::Disabled => None,
        }
    }
}

pub struct ManifestSynchronizer {
    repo: Arc<dyn ManifestRepository>,
    manifest_path: PathBuf,
    enabled: bool,
    /// Choices made during this run, by dependency name
    choices: Mutex<HashMap<String, VersionChoice>>,
}

impl ManifestSynchronizer {
    pub fn new(repo: Arc<dyn ManifestRepository>, manifest_path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            repo,
            manifest_path: manifest_path.into(),
            enabled,
            choices: Mutex::new(HashMap::new()),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Report a binary that has no package descriptor
    pub fn skip(&self) -> SyncOutcome {
        if !self.enabled {
            return SyncOutcome::Disabled;
        }
        warn!("{}", MANIFEST_SKIPPED);
        SyncOutcome::Skipped {
            warning: MANIFEST_SKIPPED.to_string(),
        }
    }

    /// Record dependency `name` (whose own version is `own_version`)
    ///
    /// Without a host project there is nothing to reconcile against and the
    /// step is skipped with a warning.
    pub fn synchronize(
        &self,
        host: Option<&HostProject>,
        name: &str,
        own_version: &str,
    ) -> NativeResult<SyncOutcome> {
        if !self.enabled {
            return Ok(SyncOutcome::Disabled);
        }
        let Some(host) = host else {
            return Ok(self.skip());
        };

        let choice = choose_version(name, own_version, &host.dependencies, &host.dev_dependencies);
        let warning = choice.is_misclassified().then(|| {
            let message = format!(
                "dependency '{}' is declared in devDependencies; move it to dependencies so the packaged app installs it",
                name
            );
            warn!("{}", message);
            message
        });

        // Held across the write so concurrent requests persist in choice order.
        let mut choices = self.choices.lock().map_err(|_| NativeError::Aborted)?;
        let effective = match choices.get(name) {
            Some(current) if !choice.supersedes(current) => current.clone(),
            _ => {
                choices.insert(name.to_string(), choice.clone());
                choice
            }
        };

        let identity = &host.identity;
        let version = effective.version.clone();
        self.repo.update(&self.manifest_path, &mut |existing| {
            let mut manifest = OutputManifest::reconcile(existing, identity);
            manifest.record(name, version.clone());
            manifest
        })?;
        debug!(dependency = %name, version = %effective.version, "recorded in output manifest");

        Ok(SyncOutcome::Recorded {
            name: name.to_string(),
            version: effective.version,
            warning,
        })
    }
}
