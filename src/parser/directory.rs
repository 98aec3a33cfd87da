use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find regular files in a directory, sorted by path. If recursive is true,
/// use walkdir; otherwise list direct children only.
pub fn find_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Find XML files in a directory
pub fn find_xml_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, std::io::Error> {
    let files = find_files(dir, recursive)?;
    Ok(files
        .into_iter()
        .filter(|path| crate::parser::filter::is_xml_file(path))
        .collect())
}
