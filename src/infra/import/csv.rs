use std::path::Path;

use anyhow::{Context, Result};

/// Raw bytes of a picked input file plus the name it is exported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub fn read_source_file(csv_path: &Path) -> Result<SourceFile> {
    let bytes = std::fs::read(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("csv file is empty: {}", csv_path.display())
    }

    let name = csv_path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("listings.csv")
        .to_string();

    Ok(SourceFile { name, bytes })
}
