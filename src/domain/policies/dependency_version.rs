//! Dependency Version Policy
//!
//! Decides which version of a native dependency the output manifest records.
//! This is a pure policy - the synchronizer applies it and persists the result.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Where a recorded version came from, in increasing precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VersionSource {
    /// The dependency's own `version` field
    Own,
    /// The host's `devDependencies` (misclassified, warned about)
    DevDeclared,
    /// The host's `dependencies`
    Declared,
}

/// A version decision for one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChoice {
    pub version: String,
    pub source: VersionSource,
}

impl VersionChoice {
    /// Whether the host declared the dependency as development-only
    pub fn is_misclassified(&self) -> bool {
        self.source == VersionSource::DevDeclared
    }

    /// Whether `self` should replace `current` in the manifest
    ///
    /// Higher precedence wins; on equal precedence the higher version wins,
    /// so the outcome does not depend on the order artifacts were seen in.
    pub fn supersedes(&self, current: &VersionChoice) -> bool {
        match self.source.cmp(&current.source) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => compare_versions(&self.version, &current.version) == Ordering::Greater,
        }
    }
}

/// Pick the version to record for dependency `name`
pub fn choose_version(
    name: &str,
    own_version: &str,
    host_dependencies: &BTreeMap<String, String>,
    host_dev_dependencies: &BTreeMap<String, String>,
) -> VersionChoice {
    if let Some(v) = host_dependencies.get(name).filter(|v| !v.is_empty()) {
        return VersionChoice {
            version: v.clone(),
            source: VersionSource::Declared,
        };
    }
    if let Some(v) = host_dev_dependencies.get(name).filter(|v| !v.is_empty()) {
        return VersionChoice {
            version: v.clone(),
            source: VersionSource::DevDeclared,
        };
    }
    VersionChoice {
        version: own_version.to_string(),
        source: VersionSource::Own,
    }
}

/// Order two version strings
///
/// Exact versions are compared semantically; ranges (`^1.0.0`) by their
/// lower bound; anything unparseable falls back to string order.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (lower_bound(a), lower_bound(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn lower_bound(v: &str) -> Option<semver::Version> {
    let trimmed = v.trim().trim_start_matches(['^', '~', '=', 'v', '>']);
    semver::Version::parse(trimmed.trim()).ok()
}
