use std::path::Path;

use anyhow::Result;

use super::GlobalOptions;
use crate::ui::output::print_warnings;

pub fn cmd_resolve(options: &GlobalOptions, binary: &Path, load_flags: Option<i64>) -> Result<()> {
    let mut config = options.load_config()?;
    if load_flags.is_some() {
        config.load_flags = load_flags;
    }
    let pipeline = nativepack::NativePipeline::on_disk(config)?;

    if options.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "resolve",
            "binary": binary.display().to_string(),
            "target": pipeline.process_class().target_name(),
            "mode": pipeline.config().mode.to_string(),
        }))?;
    }

    let resolution = pipeline.resolve_direct(binary)?;

    if options.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "resolve",
            "data": resolution,
        }))?;
    } else {
        print_warnings(&resolution.warnings);
        print!("{}", resolution.code);
    }
    Ok(())
}
