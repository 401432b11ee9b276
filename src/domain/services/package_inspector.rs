//! Package Inspector
//!
//! Finds the package a native binary belongs to. A binary with no enclosing
//! package below the project root is project-local.

use std::path::{Path, PathBuf};

use crate::domain::entities::{PackageDescriptor, BINARY_EXTENSION, PACKAGE_DESCRIPTOR};
use crate::domain::ports::ContentReader;
use crate::domain::value_objects::path::normalize;
use crate::error::{NativeError, NativeResult};

/// Walks directories upward looking for package descriptors
pub struct PackageInspector<'a> {
    reader: &'a dyn ContentReader,
    project_root: PathBuf,
}

impl<'a> PackageInspector<'a> {
    pub fn new(reader: &'a dyn ContentReader, project_root: impl AsRef<Path>) -> Self {
        Self {
            reader,
            project_root: normalize(project_root.as_ref()),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Nearest directory at or above `dir` holding a package descriptor
    ///
    /// The project root is the stop boundary: it is never returned and the
    /// walk never continues past it. `None` means "project-local".
    pub fn find_package_root(&self, dir: &Path) -> Option<PathBuf> {
        let mut current = Some(normalize(dir));
        while let Some(candidate) = current {
            if candidate == self.project_root {
                return None;
            }
            if self.reader.is_file(&candidate.join(PACKAGE_DESCRIPTOR)) {
                return Some(candidate);
            }
            current = candidate.parent().map(Path::to_path_buf);
        }
        None
    }

    /// Read the descriptor in `package_dir`
    pub fn read_descriptor(&self, package_dir: &Path) -> NativeResult<PackageDescriptor> {
        let path = package_dir.join(PACKAGE_DESCRIPTOR);
        let content = self.reader.read_to_string(&path)?;
        PackageDescriptor::from_json(&content).map_err(|e| NativeError::InvalidDescriptor {
            path,
            message: e.to_string(),
        })
    }

    /// Read the host project's own descriptor
    pub fn read_project_descriptor(&self) -> NativeResult<PackageDescriptor> {
        self.read_descriptor(&self.project_root)
    }

    /// Locate and read the package owning the file at `source`
    pub fn owning_package(
        &self,
        source: &Path,
    ) -> NativeResult<Option<(PathBuf, PackageDescriptor)>> {
        let dir = source.parent().unwrap_or(source);
        match self.find_package_root(dir) {
            Some(root) => {
                let descriptor = self.read_descriptor(&root)?;
                Ok(Some((root, descriptor)))
            }
            None => Ok(None),
        }
    }
}

/// Whether importing the package by name loads exactly `binary`
///
/// The runtime appends the binary extension when `main` omits it.
pub fn main_resolves_to(descriptor: &PackageDescriptor, package_dir: &Path, binary: &Path) -> bool {
    let main = normalize(&descriptor.main_path(package_dir));
    let binary = normalize(binary);
    if main == binary {
        return true;
    }
    let mut with_ext = main.into_os_string();
    with_ext.push(".");
    with_ext.push(BINARY_EXTENSION);
    PathBuf::from(with_ext) == binary
}
