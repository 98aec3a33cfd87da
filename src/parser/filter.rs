use std::path::Path;

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Return true if the file has a .xml extension and exists
pub fn is_xml_file(path: &Path) -> bool {
    path.is_file() && has_extension(path, "xml")
}

/// Return true if the path carries a .png extension
pub fn is_png_path(path: &Path) -> bool {
    has_extension(path, "png")
}
