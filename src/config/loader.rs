//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::BuildMode;
use crate::error::{NativeError, NativeResult};

use super::types::BuildConfig;

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = "nativepack.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> NativeResult<(BuildConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: BuildConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| NativeError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `nativepack.toml` from `project_root`, or defaults
///
/// The returned config always has `project_root` set.
pub fn load_or_default(project_root: &Path) -> NativeResult<(BuildConfig, Vec<ConfigWarning>)> {
    let path = project_root.join(CONFIG_FILE_NAME);
    let (mut config, warnings) = if path.is_file() {
        load_with_warnings(&path)?
    } else {
        (BuildConfig::default(), Vec::new())
    };
    if config.project_root.is_none() {
        config.project_root = Some(project_root.to_path_buf());
    }
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (NATIVEPACK_* prefix)
pub fn with_env_overrides(config: BuildConfig) -> BuildConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(mut config: BuildConfig, var: impl Fn(&str) -> Option<String>) -> BuildConfig {
    // NATIVEPACK_MODE
    if let Some(mode) = var("NATIVEPACK_MODE") {
        if let Ok(mode) = mode.parse::<BuildMode>() {
            config.mode = mode;
        }
    }

    // NATIVEPACK_TARGET
    if let Some(target) = var("NATIVEPACK_TARGET") {
        if !target.trim().is_empty() {
            config.target = target.trim().to_string();
        }
    }

    // NATIVEPACK_RUNTIME
    if let Some(runtime) = var("NATIVEPACK_RUNTIME") {
        if !runtime.trim().is_empty() {
            config.probe.runtime = PathBuf::from(runtime.trim());
        }
    }

    // NATIVEPACK_MAKE_MANIFEST
    if let Some(val) = var("NATIVEPACK_MAKE_MANIFEST") {
        config.make_manifest = val.to_lowercase() != "false" && val != "0";
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "target",
        "mode",
        "project_root",
        "build_output_dir",
        "app_build_dir",
        "addons_output_dir",
        "output_name_pattern",
        "load_flags",
        "make_manifest",
        "probe",
        "enabled",
        "in_development",
        "runtime",
        "args",
        "timeout_secs",
        "version",
        "abi",
        "platform",
        "arch",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
