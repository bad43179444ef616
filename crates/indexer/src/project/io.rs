use crate::errors::{IndexerError, Result};
use std::path::{Path, PathBuf};

/// One input file, read once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// File name; qualifies the unit's method identifiers
    pub unit_id: String,
    pub path: PathBuf,
    pub text: String,
}

/// Reads a source file as UTF-8 text. Unreadable or non UTF-8 files are errors.
pub fn read_source_unit(path: &Path) -> Result<SourceUnit> {
    let unit_id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| IndexerError::Config(format!("{} is not a file", path.display())))?;
    let text = std::fs::read_to_string(path).map_err(|e| IndexerError::io(path, e))?;

    Ok(SourceUnit {
        unit_id,
        path: path.to_path_buf(),
        text,
    })
}
