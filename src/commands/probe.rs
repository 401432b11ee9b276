use std::path::Path;

use anyhow::{bail, Result};

use super::GlobalOptions;

/// Exits non-zero when the runtime cannot load the binary
pub fn cmd_probe(options: &GlobalOptions, binary: &Path) -> Result<()> {
    let pipeline = options.pipeline()?;
    let compatible = pipeline.probe(binary)?;
    let runtime = pipeline.config().probe.runtime.display().to_string();

    if options.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "probe",
            "data": {
                "binary": binary.display().to_string(),
                "runtime": runtime,
                "compatible": compatible,
            },
        }))?;
    } else if compatible {
        println!("✓ {} loads in {}", binary.display(), runtime);
    }

    if !compatible {
        bail!(
            "{} can not be loaded by {}; rebuild it against the installed runtime",
            binary.display(),
            runtime
        );
    }
    Ok(())
}
