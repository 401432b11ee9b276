//! PackageDescriptor entity - a read-only snapshot of a `package.json`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name of a package descriptor
pub const PACKAGE_DESCRIPTOR: &str = "package.json";

/// A package's manifest, as far as native resolution needs it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "main")]
    pub main_entry_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Either a string or a `{ name, email, url }` object
    #[serde(default)]
    pub author: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageDescriptor {
    /// Parse descriptor JSON
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Absolute path of the declared main entry, resolved against `package_dir`
    ///
    /// Mirrors the runtime's defaulting: no `main` means `index.js`.
    pub fn main_path(&self, package_dir: &Path) -> PathBuf {
        let main = self
            .main_entry_path
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("index.js");
        package_dir.join(main)
    }
}

/// Accept dependency maps whose values are not all strings (workspace tooling
/// sometimes writes objects); non-string values are dropped.
fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
        .collect())
}
