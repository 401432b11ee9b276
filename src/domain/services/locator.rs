//! Binding-Locator Interceptor code generation
//!
//! Replaces the runtime `bindings` helper with a module that dispatches over
//! the binaries discovered at build time. No file system search happens at
//! runtime.

use crate::domain::entities::{target_file_name, BinaryArtifact, DEFAULT_TARGET};
use crate::domain::services::shim::{js_string, prefixed, ShimGenerator, TOOL_NAME};

/// Runtime error raised when no artifact matches the requested name
pub const LOCATE_FAILED: &str = "Could not locate the bindings file.";

/// Emit the dispatch module for `artifacts`
///
/// The lookup table keeps the given order; the first matching entry wins.
pub fn locator_module(shims: &ShimGenerator, artifacts: &[BinaryArtifact]) -> String {
    let mut out = String::new();
    out.push_str(&format!("// {}: bindings locator\n", TOOL_NAME));
    out.push_str(&shims.imports());
    out.push('\n');

    out.push_str("const addons = [\n");
    for artifact in artifacts {
        out.push_str(&format!(
            "  // {}\n  {{\n    name: {},\n    path: () => {},\n    load: () => {{\n      const loaded = {{ exports: {{}} }};\n      {}\n      return loaded.exports;\n    }},\n  }},\n",
            artifact.module_label(),
            js_string(artifact.target_name()),
            shims.path_expression(artifact),
            shims.load_statement(artifact, "loaded"),
        ));
    }
    out.push_str("];\n\n");

    // Sandboxed: the remote bridge is checked per call, not at module load.
    let remote_check = shims
        .remote_check()
        .map(|check| format!("  {}\n", check.replace('\n', "\n  ")))
        .unwrap_or_default();
    out.push_str(&format!(
        r#"function bindings(opts) {{
{remote_check}  if (typeof opts === 'string') {{
    opts = {{ bindings: opts }};
  }} else if (!opts) {{
    opts = {{}};
  }}
  const name = opts.bindings || {default_name};
  const addon = addons.find((a) => a.name === name || a.name === name + '.node');
  if (!addon) {{
    throw new Error({miss});
  }}
  try {{
    return opts.path ? addon.path() : addon.load();
  }} catch (error) {{
    error.message = {prefix} + error.message;
    throw error;
  }}
}}

bindings.getRoot = () => '';
bindings.getFileName = () => '';

module.exports = bindings;
"#,
        default_name = js_string(&target_file_name(DEFAULT_TARGET)),
        miss = js_string(&prefixed(LOCATE_FAILED)),
        prefix = js_string(&format!("{}: ", TOOL_NAME)),
        remote_check = remote_check,
    ));
    out
}

/// Build-time mirror of the runtime lookup
pub fn find_binding<'a>(artifacts: &'a [BinaryArtifact], name: Option<&str>) -> Option<&'a BinaryArtifact> {
    let default_name = target_file_name(DEFAULT_TARGET);
    let name = name.unwrap_or(&default_name);
    artifacts.iter().find(|a| a.matches_binding_name(name))
}
