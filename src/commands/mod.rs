//! Command handlers for the nativepack CLI

pub mod bindings;
pub mod discover;
pub mod probe;
pub mod resolve;

use std::path::{Path, PathBuf};

use anyhow::Result;
use nativepack::config::{load_or_default, load_with_warnings, with_env_overrides};
use nativepack::{BuildConfig, BuildMode, NativePipeline, ProcessClass};

use crate::cli::Cli;
use crate::ui::output::print_config_warnings;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub project_root: Option<PathBuf>,
    pub target: Option<ProcessClass>,
    pub mode: Option<BuildMode>,
    pub json: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config: cli.config.clone(),
            project_root: cli.project_root.clone(),
            target: cli.target,
            mode: cli.mode,
            json: cli.json,
        }
    }

    /// Resolve configuration: CLI flags, then `NATIVEPACK_*`, then file, then defaults
    pub fn load_config(&self) -> Result<BuildConfig> {
        let project_root = self
            .project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let (config, warnings, source) = match &self.config {
            Some(path) => {
                let (mut config, warnings) = load_with_warnings(path)?;
                if self.project_root.is_some() || config.project_root.is_none() {
                    config.project_root = Some(project_root.clone());
                }
                (with_env_overrides(config), warnings, path.clone())
            }
            None => {
                let (config, warnings) = load_or_default(&project_root)?;
                let source = project_root.join(nativepack::config::CONFIG_FILE_NAME);
                (config, warnings, source)
            }
        };

        if !warnings.is_empty() && !self.json {
            print_config_warnings(&source, &warnings);
        }
        for w in &warnings {
            tracing::warn!("{}", w);
        }

        Ok(self.apply_flags(config))
    }

    fn apply_flags(&self, mut config: BuildConfig) -> BuildConfig {
        if let Some(target) = self.target {
            config.target = target.target_name().to_string();
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        config
    }

    pub fn pipeline(&self) -> Result<NativePipeline> {
        Ok(NativePipeline::on_disk(self.load_config()?)?)
    }
}

/// Display form of `path` relative to `base` when possible
pub(crate) fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
