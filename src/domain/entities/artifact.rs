//! BinaryArtifact entity - a resolved native binary ready for loader generation
//!
//! Artifacts are created by the pipeline once discovery or a direct reference
//! has identified a binary. They are immutable once emitted.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::ContentHash;

/// Default binding target name, used when a build descriptor declares none
pub const DEFAULT_TARGET: &str = "bindings";

/// File extension of native binaries
pub const BINARY_EXTENSION: &str = "node";

/// Append `.node` to a target name unless it already ends with it
pub fn target_file_name(name: &str) -> String {
    let suffix = format!(".{}", BINARY_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// How the binary reaches the running application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    /// Bytes were copied into the output tree at `emitted_path` (absolute)
    Copied { emitted_path: PathBuf },
    /// Loaded from the installed dependency by module name; nothing copied
    Installed,
}

/// A resolved native binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryArtifact {
    source_path: PathBuf,
    content_hash: ContentHash,
    output_path_from_build_root: String,
    output_path_from_app_root: String,
    is_from_dependency_package: bool,
    load_flags: Option<i64>,
    target_name: String,
    module_label: String,
    delivery: Delivery,
}

impl BinaryArtifact {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source_path: impl Into<PathBuf>,
        content_hash: ContentHash,
        output_path_from_build_root: impl Into<String>,
        output_path_from_app_root: impl Into<String>,
        is_from_dependency_package: bool,
        load_flags: Option<i64>,
        target_name: impl Into<String>,
        delivery: Delivery,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            content_hash,
            output_path_from_build_root: output_path_from_build_root.into(),
            output_path_from_app_root: output_path_from_app_root.into(),
            is_from_dependency_package,
            load_flags,
            target_name: target_name.into(),
            module_label: String::new(),
            delivery,
        }
    }

    /// Attach the display label shown in generated comments
    pub fn with_module_label(mut self, label: impl Into<String>) -> Self {
        self.module_label = label.into();
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    /// Path used by the privileged process, relative to the bundle output directory
    pub fn output_path_from_build_root(&self) -> &str {
        &self.output_path_from_build_root
    }

    /// Path used by the sandboxed process, relative to the installed app root
    pub fn output_path_from_app_root(&self) -> &str {
        &self.output_path_from_app_root
    }

    pub fn is_from_dependency_package(&self) -> bool {
        self.is_from_dependency_package
    }

    pub fn load_flags(&self) -> Option<i64> {
        self.load_flags
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn module_label(&self) -> &str {
        if self.module_label.is_empty() {
            &self.target_name
        } else {
            &self.module_label
        }
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    /// Whether bytes were written to the output tree
    pub fn is_copied(&self) -> bool {
        matches!(self.delivery, Delivery::Copied { .. })
    }

    /// Whether this artifact answers a locator request for `name`
    ///
    /// Accepts both `engine` and `engine.node`.
    pub fn matches_binding_name(&self, name: &str) -> bool {
        self.target_name == name || self.target_name == target_file_name(name)
    }
}
