//! Build target value objects - which process a bundle runs in, and how it is built

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Process class the generated code will execute in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessClass {
    /// Desktop host process with unrestricted native loading
    #[serde(alias = "electron-main", alias = "main")]
    #[value(alias = "electron-main", alias = "main")]
    Privileged,
    /// UI process, loads native code through the host bridge
    #[serde(alias = "electron-renderer", alias = "renderer")]
    #[value(alias = "electron-renderer", alias = "renderer")]
    Sandboxed,
}

impl ProcessClass {
    /// Bundler target string for this process
    pub fn target_name(&self) -> &'static str {
        match self {
            ProcessClass::Privileged => "electron-main",
            ProcessClass::Sandboxed => "electron-renderer",
        }
    }

    /// Directory under the app build directory the bundle is written to
    pub fn default_output_dir(&self) -> &'static str {
        match self {
            ProcessClass::Privileged => "main",
            ProcessClass::Sandboxed => "renderer",
        }
    }

    pub fn is_privileged(&self) -> bool {
        matches!(self, ProcessClass::Privileged)
    }
}

impl FromStr for ProcessClass {
    type Err = String;

    /// Accepts bundler target names (`electron-main`, `electron-renderer`)
    /// as well as the plain class names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electron-main" | "main" | "privileged" => Ok(ProcessClass::Privileged),
            "electron-renderer" | "renderer" | "sandboxed" => Ok(ProcessClass::Sandboxed),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for ProcessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.target_name())
    }
}

/// Build mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[value(alias = "dev")]
    Development,
    #[default]
    #[value(alias = "prod")]
    Production,
}

impl BuildMode {
    pub fn is_development(&self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}
