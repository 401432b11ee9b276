//! Loader Shim Generator
//!
//! Emits the JavaScript that loads a resolved binary at application runtime.
//! The process class is fixed when the shim is generated, so only one load
//! branch ever appears in the output.

use crate::domain::entities::{BinaryArtifact, Delivery};
use crate::domain::value_objects::ProcessClass;

/// Prefix of every error raised by generated code
pub const TOOL_NAME: &str = "nativepack";

/// Error thrown by sandboxed shims when the remote bridge is disabled
pub const REMOTE_UNAVAILABLE: &str =
    "Can not get remote module from electron. (enableRemoteModule)";

/// How the runtime links the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Regular module loading
    Plain,
    /// Low-level dynamic open with explicit flags
    Flagged(i64),
}

/// Load strategy resolved at generation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    Privileged(Linkage),
    Sandboxed(Linkage),
}

impl LoadStrategy {
    pub fn resolve(class: ProcessClass, load_flags: Option<i64>) -> Self {
        let linkage = match load_flags {
            Some(flags) => Linkage::Flagged(flags),
            None => Linkage::Plain,
        };
        match class {
            ProcessClass::Privileged => LoadStrategy::Privileged(linkage),
            ProcessClass::Sandboxed => LoadStrategy::Sandboxed(linkage),
        }
    }

    pub fn linkage(&self) -> Linkage {
        match self {
            LoadStrategy::Privileged(l) | LoadStrategy::Sandboxed(l) => *l,
        }
    }
}

/// Quote `s` as a JavaScript string literal
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Generates loader code for one process class
#[derive(Debug, Clone, Copy)]
pub struct ShimGenerator {
    class: ProcessClass,
}

impl ShimGenerator {
    pub fn new(class: ProcessClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> ProcessClass {
        self.class
    }

    pub fn strategy(&self, artifact: &BinaryArtifact) -> LoadStrategy {
        LoadStrategy::resolve(self.class, artifact.load_flags())
    }

    /// Module-level bindings used by every load statement
    pub fn imports(&self) -> String {
        match self.class {
            ProcessClass::Privileged => [
                "const path = require('path');",
                "const nativeRequire = typeof __non_webpack_require__ === 'function' ? __non_webpack_require__ : require;",
            ]
            .join("\n"),
            ProcessClass::Sandboxed => [
                "const path = require('path');",
                "const remote = require('electron').remote;",
            ]
            .join("\n"),
        }
    }

    /// Guard against a disabled remote bridge, sandboxed class only
    pub fn remote_check(&self) -> Option<String> {
        match self.class {
            ProcessClass::Privileged => None,
            ProcessClass::Sandboxed => Some(format!(
                "if (!remote) {{\n  throw new Error({});\n}}",
                js_string(&prefixed(REMOTE_UNAVAILABLE))
            )),
        }
    }

    /// Module-level setup for a shim that loads its binary immediately
    pub fn preamble(&self) -> String {
        match self.remote_check() {
            Some(check) => format!("{}\n{}", self.imports(), check),
            None => self.imports(),
        }
    }

    /// JavaScript expression evaluating to the binary's runtime location
    pub fn path_expression(&self, artifact: &BinaryArtifact) -> String {
        let strategy = self.strategy(artifact);
        match (artifact.delivery(), strategy) {
            (Delivery::Installed, LoadStrategy::Privileged(Linkage::Plain))
            | (Delivery::Installed, LoadStrategy::Sandboxed(Linkage::Plain)) => {
                js_string(artifact.output_path_from_build_root())
            }
            // dlopen needs a file, so resolve the installed module first
            (Delivery::Installed, LoadStrategy::Privileged(Linkage::Flagged(_))) => format!(
                "nativeRequire.resolve({})",
                js_string(artifact.output_path_from_build_root())
            ),
            (Delivery::Installed, LoadStrategy::Sandboxed(Linkage::Flagged(_))) => format!(
                "remote.require('module').createRequire(path.join(remote.app.getAppPath(), 'package.json')).resolve({})",
                js_string(artifact.output_path_from_app_root())
            ),
            (Delivery::Copied { .. }, LoadStrategy::Privileged(_)) => format!(
                "path.join(__dirname, {})",
                js_string(artifact.output_path_from_build_root())
            ),
            (Delivery::Copied { .. }, LoadStrategy::Sandboxed(_)) => format!(
                "path.join(remote.app.getAppPath(), {})",
                js_string(artifact.output_path_from_app_root())
            ),
        }
    }

    /// Statement loading the binary into the module object named `target`
    pub fn load_statement(&self, artifact: &BinaryArtifact, target: &str) -> String {
        let path = self.path_expression(artifact);
        match self.strategy(artifact) {
            LoadStrategy::Privileged(Linkage::Plain) => {
                format!("{}.exports = nativeRequire({});", target, path)
            }
            LoadStrategy::Privileged(Linkage::Flagged(flags)) => {
                format!("process.dlopen({}, {}, {});", target, path, flags)
            }
            LoadStrategy::Sandboxed(Linkage::Plain) => {
                format!("{}.exports = remote.require({});", target, path)
            }
            LoadStrategy::Sandboxed(Linkage::Flagged(flags)) => {
                format!("remote.process.dlopen({}, {}, {});", target, path, flags)
            }
        }
    }

    /// Complete replacement module for a direct binary reference
    pub fn direct_shim(&self, artifact: &BinaryArtifact) -> String {
        format!(
            "// {tool}: {label}\n{preamble}\ntry {{\n  {load}\n}} catch (error) {{\n  error.message = {prefix} + error.message;\n  throw error;\n}}\n",
            tool = TOOL_NAME,
            label = artifact.module_label(),
            preamble = self.preamble(),
            load = self.load_statement(artifact, "module"),
            prefix = js_string(&format!("{}: ", TOOL_NAME)),
        )
    }
}

/// `message` with the tool name prefix used by generated code
pub fn prefixed(message: &str) -> String {
    format!("{}: {}", TOOL_NAME, message)
}
