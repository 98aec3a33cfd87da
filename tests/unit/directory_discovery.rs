use retroconv::parser::directory::{find_files, find_xml_files};
use retroconv::parser::filter::{is_png_path, is_xml_file};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "<config/>").unwrap();
}

#[test]
fn test_find_xml_files_flat_and_recursive() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("b.xml"));
    touch(&dir.path().join("a.XML"));
    touch(&dir.path().join("notes.txt"));
    touch(&dir.path().join("nested/c.xml"));

    let flat = find_xml_files(dir.path(), false).unwrap();
    assert_eq!(flat, vec![dir.path().join("a.XML"), dir.path().join("b.xml")]);

    let recursive = find_xml_files(dir.path(), true).unwrap();
    assert_eq!(recursive.len(), 3);
    assert!(recursive.contains(&dir.path().join("nested/c.xml")));
}

#[test]
fn test_find_files_returns_sorted_files_only() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("map2.bmp"));
    touch(&dir.path().join("map1.bmp"));
    fs::create_dir(dir.path().join("sub")).unwrap();

    let files = find_files(dir.path(), false).unwrap();
    assert_eq!(files, vec![dir.path().join("map1.bmp"), dir.path().join("map2.bmp")]);
}

#[test]
fn test_missing_directory_is_error() {
    let dir = tempdir().unwrap();
    assert!(find_xml_files(&dir.path().join("absent"), false).is_err());
}

#[test]
fn test_filters() {
    let dir = tempdir().unwrap();
    let xml = dir.path().join("game.xml");
    touch(&xml);
    assert!(is_xml_file(&xml));
    assert!(!is_xml_file(&dir.path().join("missing.xml")));

    assert!(is_png_path(Path::new("done.png")));
    assert!(is_png_path(Path::new("DONE.PNG")));
    assert!(!is_png_path(Path::new("map1.bmp")));
}
