//! Binary Discovery
//!
//! Finds the compiled binaries of a package that declares native build targets
//! in `binding.gyp`. The search order matches the runtime `bindings` locator so
//! that build-time and run-time resolution agree.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::domain::entities::{target_file_name, DEFAULT_TARGET};
use crate::domain::ports::ContentReader;
use crate::domain::value_objects::RuntimeInfo;
use crate::error::{NativeError, NativeResult};

/// File name of the native build descriptor
pub const BUILD_DESCRIPTOR: &str = "binding.gyp";

/// A binary located for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredBinary {
    /// Target file name, always with the `.node` extension
    pub name: String,
    /// Absolute path of the compiled binary
    pub path: PathBuf,
    /// Package directory holding the build descriptor
    pub package_root: PathBuf,
    pub bytes: Vec<u8>,
}

fn target_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:'target_name'|"target_name")\s*:\s*(?:'([^']*)'|"([^"]*)")"#)
            .expect("target_name pattern is valid")
    })
}

/// Declared target names, in declaration order
///
/// This is a tolerant token scan, not a parse: comments and conditions in the
/// descriptor are not interpreted.
pub fn declared_targets(descriptor: &str) -> Vec<String> {
    let mut names = Vec::new();
    for caps in target_name_pattern().captures_iter(descriptor) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            let name = name.as_str().to_string();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Candidate locations for `file_name` under `root`, in lookup order
pub fn search_paths(root: &Path, file_name: &str, runtime: &RuntimeInfo) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = vec![
        root.join("build").join(file_name),
        root.join("build").join("Debug").join(file_name),
        root.join("build").join("Release").join(file_name),
        root.join("out").join("Debug").join(file_name),
        root.join("Debug").join(file_name),
        root.join("out").join("Release").join(file_name),
        root.join("Release").join(file_name),
        root.join("build").join("default").join(file_name),
    ];
    if let Some(version) = &runtime.version {
        candidates.push(
            root.join("compiled")
                .join(version)
                .join(&runtime.platform)
                .join(&runtime.arch)
                .join(file_name),
        );
    }
    for flavor in ["release", "debug", "default"] {
        candidates.push(
            root.join("addon-build")
                .join(flavor)
                .join("install-root")
                .join(file_name),
        );
    }
    if let Some(abi) = &runtime.abi {
        candidates.push(
            root.join("lib")
                .join("binding")
                .join(format!("node-v{}-{}-{}", abi, runtime.platform, runtime.arch))
                .join(file_name),
        );
    }
    candidates
}

/// Locates compiled binaries inside packages
pub struct BinaryDiscovery<'a> {
    reader: &'a dyn ContentReader,
    runtime: &'a RuntimeInfo,
}

impl<'a> BinaryDiscovery<'a> {
    pub fn new(reader: &'a dyn ContentReader, runtime: &'a RuntimeInfo) -> Self {
        Self { reader, runtime }
    }

    /// Whether `package_root` declares native targets at all
    pub fn has_build_descriptor(&self, package_root: &Path) -> bool {
        self.reader.is_file(&package_root.join(BUILD_DESCRIPTOR))
    }

    /// First existing candidate for target `name`
    pub fn locate(&self, package_root: &Path, name: &str) -> Option<PathBuf> {
        let file_name = target_file_name(name);
        search_paths(package_root, &file_name, self.runtime)
            .into_iter()
            .find(|p| self.reader.is_file(p))
    }

    /// Discover all binaries of the package at `package_root`
    ///
    /// The default `bindings` target is only consulted when the descriptor
    /// declares no targets. Fails when targets were declared and none was compiled.
    pub fn discover(&self, package_root: &Path) -> NativeResult<Vec<DiscoveredBinary>> {
        if !self.has_build_descriptor(package_root) {
            return Ok(Vec::new());
        }
        let descriptor = self
            .reader
            .read_to_string(&package_root.join(BUILD_DESCRIPTOR))?;
        let declared = declared_targets(&descriptor);

        let candidates = if declared.is_empty() {
            vec![DEFAULT_TARGET.to_string()]
        } else {
            declared.clone()
        };

        let mut found: Vec<DiscoveredBinary> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();
        for name in &candidates {
            let Some(path) = self.locate(package_root, name) else {
                debug!(package = %package_root.display(), target = %name, "no compiled binary for target");
                if declared.contains(name) {
                    missing.push(name);
                }
                continue;
            };
            match self.reader.read(&path) {
                Ok(bytes) => found.push(DiscoveredBinary {
                    name: target_file_name(name),
                    path,
                    package_root: package_root.to_path_buf(),
                    bytes,
                }),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "failed to read compiled binary");
                    if declared.contains(name) {
                        missing.push(name);
                    }
                }
            }
        }

        if found.is_empty() {
            if !declared.is_empty() {
                return Err(NativeError::TargetsMissing {
                    package: package_root.to_path_buf(),
                });
            }
            return Ok(found);
        }

        if !missing.is_empty() {
            warn!(
                package = %package_root.display(),
                missing = ?missing,
                "some declared native targets were not compiled"
            );
        }
        Ok(found)
    }
}
