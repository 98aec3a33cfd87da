//! Integration tests for folder-to-PNG conversion

use image::{ImageFormat, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use retroconv::raster::{convert_image_folder, ImageBatchOptions};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_bmp(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 200]));
    img.save_with_format(path, ImageFormat::Bmp).unwrap();
}

#[test]
fn test_bitmap_folder_becomes_png() {
    let dir = tempdir().unwrap();
    write_bmp(&dir.path().join("map1.bmp"), 16, 8);
    write_bmp(&dir.path().join("map2.bmp"), 5, 7);

    let report = convert_image_folder(dir.path(), &ImageBatchOptions::default()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.converted.len(), 2);

    for (name, width, height) in [("map1", 16, 8), ("map2", 5, 7)] {
        let png_path = dir.path().join(format!("{}.png", name));
        let decoded = image::open(&png_path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (width, height));
        assert!(dir.path().join(format!("{}.bmp", name)).exists());
    }
}

#[test]
fn test_pixels_survive_conversion() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tile.bmp");
    write_bmp(&input, 3, 3);

    convert_image_folder(dir.path(), &ImageBatchOptions::default()).unwrap();

    let original = image::open(&input).unwrap().to_rgb8();
    let converted = image::open(dir.path().join("tile.png")).unwrap().to_rgb8();
    assert_eq!(original.as_raw(), converted.as_raw());
}

#[test]
fn test_recursive_option() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_bmp(&dir.path().join("sub/deep.bmp"), 2, 2);

    let flat = convert_image_folder(dir.path(), &ImageBatchOptions::default()).unwrap();
    assert!(flat.converted.is_empty());

    let options = ImageBatchOptions {
        recursive: true,
        ..ImageBatchOptions::default()
    };
    let deep = convert_image_folder(dir.path(), &options).unwrap();
    assert_eq!(deep.converted.len(), 1);
    assert!(dir.path().join("sub/deep.png").exists());
}

#[test]
fn test_non_image_aborts_or_continues() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_readme.txt"), "hello").unwrap();
    write_bmp(&dir.path().join("b_map.bmp"), 2, 2);

    assert!(convert_image_folder(dir.path(), &ImageBatchOptions::default()).is_err());
    assert!(!dir.path().join("b_map.png").exists());

    let options = ImageBatchOptions {
        continue_on_error: true,
        ..ImageBatchOptions::default()
    };
    let report = convert_image_folder(dir.path(), &options).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert!(dir.path().join("b_map.png").exists());
}

#[test]
fn test_images_command() {
    let dir = tempdir().unwrap();
    write_bmp(&dir.path().join("map1.bmp"), 4, 4);
    write_bmp(&dir.path().join("map2.bmp"), 4, 2);

    let output = Command::new(env!("CARGO_BIN_EXE_retroconv"))
        .args(["images", dir.path().to_str().unwrap(), "--quiet"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("map1.png").exists());
    assert!(dir.path().join("map2.png").exists());
}

#[test]
fn test_same_stem_sources_fail_the_batch() {
    let dir = tempdir().unwrap();
    write_bmp(&dir.path().join("map.bmp"), 4, 4);
    RgbImage::new(9, 2)
        .save_with_format(dir.path().join("map.gif"), ImageFormat::Gif)
        .unwrap();
    write_bmp(&dir.path().join("other.bmp"), 2, 2);

    let output = Command::new(env!("CARGO_BIN_EXE_retroconv"))
        .args(["images", dir.path().to_str().unwrap(), "--continue-on-error"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is also the output of"), "stderr: {}", stderr);
    assert!(dir.path().join("other.png").exists());
    assert!(!dir.path().join("map.png").exists());
}
