//! Runtime description used by the binary search convention

use serde::{Deserialize, Serialize};

/// The runtime the application ships with
///
/// `platform` and `arch` use the runtime's own naming (`darwin`, `win32`,
/// `x64`, ...), not Rust's target triple names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// Runtime version, e.g. `28.2.0`; enables the `compiled/` search entry
    #[serde(default)]
    pub version: Option<String>,
    /// Module ABI number, e.g. `119`; enables the prebuilt `lib/binding` entry
    #[serde(default)]
    pub abi: Option<String>,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_arch")]
    pub arch: String,
}

impl Default for RuntimeInfo {
    fn default() -> Self {
        Self {
            version: None,
            abi: None,
            platform: default_platform(),
            arch: default_arch(),
        }
    }
}

fn default_platform() -> String {
    runtime_platform(std::env::consts::OS).to_string()
}

fn default_arch() -> String {
    runtime_arch(std::env::consts::ARCH).to_string()
}

/// Map a Rust OS name to the runtime's platform name
pub fn runtime_platform(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

/// Map a Rust arch name to the runtime's arch name
pub fn runtime_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        other => other,
    }
}
