//! OutputManifest entity - dependency list of the bundled native binaries
//!
//! The manifest is written next to the copied binaries so the packaging step
//! can install the dependency packages they came from. It is a pure data
//! structure; persistence lives in `ManifestRepository`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identity of the host project, as recorded in the manifest header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostIdentity {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    /// Host entry point, relative to the manifest directory
    pub main: Option<String>,
    pub author: Option<serde_json::Value>,
}

/// The persisted output manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<serde_json::Value>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

impl OutputManifest {
    /// A fresh manifest for `host` with no dependencies
    pub fn for_host(host: &HostIdentity) -> Self {
        Self {
            name: host.name.clone(),
            version: host.version.clone(),
            description: host.description.clone(),
            main: host.main.clone(),
            author: host.author.clone(),
            dependencies: BTreeMap::new(),
        }
    }

    /// A manifest left behind by a different project or release
    pub fn is_stale_for(&self, host: &HostIdentity) -> bool {
        self.name != host.name || self.version != host.version || self.main != host.main
    }

    /// Keep `existing` if it still belongs to `host`, otherwise start over
    pub fn reconcile(existing: Option<OutputManifest>, host: &HostIdentity) -> OutputManifest {
        match existing {
            Some(manifest) if !manifest.is_stale_for(host) => manifest,
            _ => OutputManifest::for_host(host),
        }
    }

    /// Set the recorded version for `name`
    pub fn record(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.dependencies.insert(name.into(), version.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.dependencies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}
