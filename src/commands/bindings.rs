use std::path::PathBuf;

use anyhow::Result;

use super::GlobalOptions;
use crate::ui::output::print_warnings;

pub fn cmd_bindings(options: &GlobalOptions, contexts: &[PathBuf]) -> Result<()> {
    let pipeline = options.pipeline()?;

    if options.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "bindings",
            "contexts": contexts.iter().map(|c| c.display().to_string()).collect::<Vec<_>>(),
        }))?;
    }

    let resolution = pipeline.resolve_bindings(contexts)?;

    if options.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "bindings",
            "data": resolution,
        }))?;
    } else {
        print_warnings(&resolution.warnings);
        print!("{}", resolution.code);
    }
    Ok(())
}
