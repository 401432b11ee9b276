//! Artifact Path Planner
//!
//! Decides where a native binary goes in the output tree and how each process
//! class refers to it. Pure: no file is read or written here.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::entities::PackageDescriptor;
use crate::domain::services::package_inspector::main_resolves_to;
use crate::domain::value_objects::path::{diff_paths, relative_module_path, to_slash};
use crate::domain::value_objects::{BuildMode, ContentHash};

/// Output name pattern for development builds
pub const DEVELOPMENT_NAME_PATTERN: &str = "[path][name].[ext]";

/// Output name pattern for production builds
pub const PRODUCTION_NAME_PATTERN: &str = "[contenthash:16].[ext]";

/// Where a binary comes from
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
    /// No package descriptor between the binary and the project root
    ProjectLocal,
    /// Shipped inside a dependency package
    Dependency {
        package_root: &'a Path,
        descriptor: &'a PackageDescriptor,
        /// The package's real path lies outside the project root
        linked: bool,
    },
}

impl Origin<'_> {
    pub fn is_dependency(&self) -> bool {
        matches!(self, Origin::Dependency { .. })
    }
}

/// Planned delivery of one binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Copy the bytes to `absolute`
    Copy {
        absolute: PathBuf,
        from_build_root: String,
        from_app_root: String,
    },
    /// Load the installed dependency by module path; nothing is copied
    Installed { module_path: String },
}

impl Placement {
    pub fn from_build_root(&self) -> &str {
        match self {
            Placement::Copy {
                from_build_root, ..
            } => from_build_root,
            Placement::Installed { module_path } => module_path,
        }
    }

    pub fn from_app_root(&self) -> &str {
        match self {
            Placement::Copy { from_app_root, .. } => from_app_root,
            Placement::Installed { module_path } => module_path,
        }
    }
}

/// Directories and naming rules for one build
#[derive(Debug, Clone)]
pub struct ArtifactPathPlanner {
    project_root: PathBuf,
    build_output_dir: PathBuf,
    app_root: PathBuf,
    addons_output_dir: PathBuf,
    mode: BuildMode,
    name_pattern: Option<String>,
}

impl ArtifactPathPlanner {
    /// `app_root` is the directory the sandboxed process resolves against at
    /// runtime: the packaged app directory in production, the project root in
    /// development.
    pub fn new(
        project_root: impl Into<PathBuf>,
        build_output_dir: impl Into<PathBuf>,
        app_root: impl Into<PathBuf>,
        addons_output_dir: impl Into<PathBuf>,
        mode: BuildMode,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            build_output_dir: build_output_dir.into(),
            app_root: app_root.into(),
            addons_output_dir: addons_output_dir.into(),
            mode,
            name_pattern: None,
        }
    }

    /// Custom output name pattern, honoured in development builds only
    pub fn with_name_pattern(mut self, pattern: Option<String>) -> Self {
        self.name_pattern = pattern.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Plan the delivery of the binary at `source`
    pub fn plan(
        &self,
        source: &Path,
        hash: &ContentHash,
        origin: Origin<'_>,
        load_flags: Option<i64>,
    ) -> Placement {
        match origin {
            Origin::ProjectLocal => {
                let pattern = if self.mode.is_development() {
                    self.name_pattern
                        .as_deref()
                        .unwrap_or(DEVELOPMENT_NAME_PATTERN)
                } else {
                    PRODUCTION_NAME_PATTERN
                };
                self.copy_to(&interpolate_name(pattern, source, &self.project_root, hash))
            }
            Origin::Dependency {
                package_root,
                descriptor,
                linked,
            } => {
                if !linked {
                    if load_flags.is_none() && main_resolves_to(descriptor, package_root, source) {
                        return Placement::Installed {
                            module_path: descriptor.name.clone(),
                        };
                    }
                    if self.mode.is_development() {
                        return Placement::Installed {
                            module_path: package_module_path(&descriptor.name, package_root, source),
                        };
                    }
                }
                self.copy_to(&interpolate_name(
                    PRODUCTION_NAME_PATTERN,
                    source,
                    &self.project_root,
                    hash,
                ))
            }
        }
    }

    fn copy_to(&self, file_name: &str) -> Placement {
        let absolute = self.addons_output_dir.join(file_name);
        Placement::Copy {
            from_build_root: relative_module_path(&self.build_output_dir, &absolute),
            from_app_root: relative_module_path(&self.app_root, &absolute),
            absolute,
        }
    }
}

/// `<package-name>/<path inside the package>`
pub fn package_module_path(name: &str, package_root: &Path, source: &Path) -> String {
    let inner = to_slash(&diff_paths(source, package_root));
    if inner.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", name, inner)
    }
}

fn hash_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(?:content)?hash(?::(\d+))?\]").expect("hash token pattern is valid")
    })
}

/// Interpolate an output name pattern
///
/// `[path]` is the source directory relative to `context` with a trailing
/// slash (parent segments become `_`), `[name]` the file stem, `[ext]` the
/// extension, `[hash]`/`[contenthash]` the content hash, optionally
/// truncated with `:N`.
pub fn interpolate_name(pattern: &str, source: &Path, context: &Path, hash: &ContentHash) -> String {
    let name = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = source
        .parent()
        .map(|parent| to_slash(&diff_paths(parent, context)))
        .unwrap_or_default();
    let path_token = if dir.is_empty() {
        String::new()
    } else {
        let safe: Vec<&str> = dir
            .split('/')
            .map(|seg| if seg == ".." { "_" } else { seg })
            .collect();
        format!("{}/", safe.join("/"))
    };

    let replaced = pattern
        .replace("[path]", &path_token)
        .replace("[name]", &name)
        .replace("[ext]", &ext);
    hash_token_pattern()
        .replace_all(&replaced, |caps: &Captures<'_>| {
            match caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) {
                Some(len) => hash.short(len).to_string(),
                None => hash.hex().to_string(),
            }
        })
        .into_owned()
}
