//! Folder-to-PNG image batch conversion
//!
//! Every file in a folder is decoded with the `image` crate, which sniffs the
//! format from the file content, and re-encoded as a sibling `.png`. Source
//! files are left in place.

use crate::cli::path_mapping::sibling_output_path;
use crate::conversion::output::write_output;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::directory::find_files;
use crate::parser::filter::is_png_path;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Progress callback: (1-based index, total, current file)
pub type ImageProgressCallback<'a> = &'a dyn Fn(usize, usize, &Path);

/// Options for folder conversion
#[derive(Debug, Clone)]
pub struct ImageBatchOptions {
    /// Also convert files in sub-folders
    pub recursive: bool,
    /// Record failures and keep going instead of aborting
    pub continue_on_error: bool,
    /// Write through a temporary file and rename on success
    pub atomic_write: bool,
}

impl Default for ImageBatchOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            continue_on_error: false,
            atomic_write: true,
        }
    }
}

/// One image written as PNG
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedImage {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a folder conversion
#[derive(Debug, Default)]
pub struct ImageBatchReport {
    pub converted: Vec<ConvertedImage>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl ImageBatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Decode one image and write it as a sibling `.png`
pub fn convert_image_to_png(
    path: &Path,
    options: &ImageBatchOptions,
) -> ConversionResult<ConvertedImage> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConversionError::io(e, path))?;

    let image = reader.decode().map_err(|e| {
        ConversionError::conversion_with_source(
            ConversionErrorKind::ImageDecode {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
            e.into(),
        )
    })?;
    let image = png_compatible(image);

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| {
            ConversionError::conversion_with_source(
                ConversionErrorKind::ImageEncode {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                },
                e.into(),
            )
        })?;

    let output_path = sibling_output_path(path, "png");
    write_output(&output_path, &bytes, options.atomic_write)?;

    tracing::info!(
        input = %path.display(),
        output = %output_path.display(),
        width = image.width(),
        height = image.height(),
        "converted image"
    );

    Ok(ConvertedImage {
        input_path: path.to_path_buf(),
        output_path,
        width: image.width(),
        height: image.height(),
    })
}

/// PNG has no floating point samples; widen those to 16-bit integers
fn png_compatible(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::Rgb32F => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba32F => DynamicImage::ImageRgba16(image.to_rgba16()),
        _ => image,
    }
}

/// Convert every image in a folder to PNG
pub fn convert_image_folder(
    folder: &Path,
    options: &ImageBatchOptions,
) -> ConversionResult<ImageBatchReport> {
    convert_image_folder_with_progress(folder, options, &|_, _, _| {})
}

/// Inputs that share their PNG output with another input, mapped to the
/// first other input claiming the same output
fn output_conflicts(inputs: &[PathBuf]) -> HashMap<PathBuf, (PathBuf, PathBuf)> {
    let mut by_output: HashMap<PathBuf, Vec<&PathBuf>> = HashMap::new();
    for input in inputs {
        by_output
            .entry(sibling_output_path(input, "png"))
            .or_default()
            .push(input);
    }

    let mut conflicts = HashMap::new();
    for (output, claimants) in by_output {
        if claimants.len() < 2 {
            continue;
        }
        for (i, input) in claimants.iter().enumerate() {
            let other = if i == 0 { claimants[1] } else { claimants[0] };
            conflicts.insert((*input).clone(), (output.clone(), other.clone()));
        }
    }
    conflicts
}

/// Convert every image in a folder to PNG, reporting each file to `progress`.
///
/// Inputs that would write the same PNG (`map.bmp` and `map.gif`) all fail
/// with [`ConversionErrorKind::OutputConflict`]; none of them is written.
pub fn convert_image_folder_with_progress(
    folder: &Path,
    options: &ImageBatchOptions,
    progress: ImageProgressCallback<'_>,
) -> ConversionResult<ImageBatchReport> {
    let files =
        find_files(folder, options.recursive).map_err(|e| ConversionError::io(e, folder))?;
    let mut report = ImageBatchReport::default();

    let (skipped, inputs): (Vec<PathBuf>, Vec<PathBuf>) =
        files.into_iter().partition(|path| is_png_path(path));
    for path in &skipped {
        tracing::debug!(path = %path.display(), "skipping file that is already PNG");
    }
    report.skipped = skipped;

    let conflicts = output_conflicts(&inputs);
    let total = inputs.len();
    for (index, input) in inputs.into_iter().enumerate() {
        progress(index + 1, total, &input);
        let result = match conflicts.get(&input) {
            Some((output, other)) => Err(ConversionError::conversion(
                ConversionErrorKind::OutputConflict {
                    path: input.clone(),
                    output: output.clone(),
                    other: other.clone(),
                },
            )),
            None => convert_image_to_png(&input, options),
        };
        match result {
            Ok(converted) => report.converted.push(converted),
            Err(e) if options.continue_on_error => {
                tracing::error!(input = %input.display(), "{}", e.user_message());
                report.failed.push((input, e));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
