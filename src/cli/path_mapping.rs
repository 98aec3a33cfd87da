use std::path::{Path, PathBuf};

/// Same directory and base name as `input`, with the extension replaced.
/// `maps/config.xml` becomes `maps/config.toml`.
pub fn sibling_output_path(input: &Path, extension: &str) -> PathBuf {
    let mut out = input.to_path_buf();
    out.set_extension(extension);
    out
}
