use std::path::Path;

use anyhow::{Context, Result};

/// Writes to a sibling `.csv.partial` file, then renames it over `target`.
pub fn write_export_file(target: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }
    let staging = target.with_extension("csv.partial");
    std::fs::write(&staging, bytes)
        .with_context(|| format!("failed to write export: {}", staging.display()))?;
    std::fs::rename(&staging, target)
        .with_context(|| format!("failed to move export into place: {}", target.display()))?;
    log::info!("wrote {} bytes to {}", bytes.len(), target.display());
    Ok(())
}
