//! Loading candidate and historical schemas from disk

use std::fs;
use std::path::{Path, PathBuf};

use apache_avro::Schema;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SchemaError};
use crate::version::SchemaVersion;

/// Parse one `.avsc` file
pub fn parse_schema_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    Schema::parse_str(&content).map_err(|e| {
        SchemaError::InvalidFormat(format!("{}: {}", path.display(), e))
    })
}

/// Parse schema files in the given order (oldest first)
pub fn load_history<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Schema>> {
    paths.iter().map(parse_schema_file).collect()
}

/// Schema files directly inside `dir`, ordered by the version in their names
pub fn history_files(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<(SchemaVersion, PathBuf)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| SchemaError::Io(e.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(extension)
        {
            continue;
        }

        let version = SchemaVersion::from_path(path, extension)?;
        files.push((version, path.to_path_buf()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    if let Some(window) = files.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(SchemaError::InvalidFormat(format!(
            "Duplicate schema version {} in {} and {}",
            window[0].0,
            window[0].1.display(),
            window[1].1.display()
        )));
    }

    debug!(dir = %dir.as_ref().display(), count = files.len(), "found schema history");
    Ok(files)
}

/// Parse every schema in `dir`, oldest version first
pub fn load_history_dir(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<Schema>> {
    history_files(dir, extension)?
        .iter()
        .map(|(_, path)| parse_schema_file(path))
        .collect()
}
