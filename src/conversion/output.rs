//! Writing converted output to disk

use crate::conversion::ConversionResult;
use crate::error::ConversionError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path`, replacing any existing file.
///
/// With `atomic`, the bytes go to a temporary file in the destination
/// directory which is renamed over `path` only after a complete write, so a
/// failure never leaves a truncated file behind.
pub fn write_output(path: &Path, contents: &[u8], atomic: bool) -> ConversionResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    if !atomic {
        return std::fs::write(path, contents).map_err(|e| ConversionError::io(e, path));
    }

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ConversionError::io(e, dir))?;
    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ConversionError::io(e, tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| ConversionError::io(e.error, path))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
