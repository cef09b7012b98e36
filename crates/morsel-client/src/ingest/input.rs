use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

/// Every `*.csv` directly under `data_dir`, sorted by path so the merge
/// order (and therefore the output bytes) does not depend on directory
/// iteration order.
pub(crate) fn discover_sources(data_dir: &Path) -> ClientResult<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(ClientError::source_not_found(
            data_dir,
            "directory does not exist",
        ));
    }

    let escaped_dir = glob::Pattern::escape(&data_dir.display().to_string());
    let pattern = Path::new(&escaped_dir).join("*.csv");
    let entries = glob::glob(&pattern.display().to_string())
        .map_err(|error| ClientError::source_not_found(data_dir, &error.to_string()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|error| {
            ClientError::source_not_found(error.path(), &error.error().to_string())
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(ClientError::no_source_files(data_dir));
    }

    tracing::debug!(count = paths.len(), dir = %data_dir.display(), "discovered source files");
    Ok(paths)
}

/// A file that exists but is not UTF-8 text is a `parse_error`, not a
/// missing source.
pub(crate) fn read_source(path: &Path) -> ClientResult<String> {
    fs::read_to_string(path).map_err(|error| match error.kind() {
        io::ErrorKind::InvalidData => ClientError::malformed_csv(path, 0, "file is not valid UTF-8"),
        _ => ClientError::source_not_found(path, &error.to_string()),
    })
}
