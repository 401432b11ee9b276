use std::path::Path;

use anyhow::Result;

use super::{display_path, GlobalOptions};

pub fn cmd_discover(options: &GlobalOptions, package_dir: &Path) -> Result<()> {
    let pipeline = options.pipeline()?;
    let found = pipeline.discover(package_dir)?;

    if options.json {
        let binaries: Vec<_> = found
            .iter()
            .map(|b| {
                serde_json::json!({
                    "name": b.name,
                    "path": b.path.display().to_string(),
                    "package_root": b.package_root.display().to_string(),
                    "size": b.bytes.len(),
                })
            })
            .collect();
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "discover",
            "data": { "binaries": binaries },
        }))?;
        return Ok(());
    }

    if found.is_empty() {
        println!("No native build targets declared in {}", package_dir.display());
        return Ok(());
    }
    for binary in &found {
        println!(
            "  {:<24} {}",
            binary.name,
            display_path(&binary.path, pipeline.project_root())
        );
    }
    Ok(())
}
