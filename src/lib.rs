//! Legacy configuration and asset converter
//!
//! Converts XML configuration files (sections under a `<config>` root) into
//! TOML with snake_case keys and inferred value types, and converts folders
//! of bitmap images into PNG files.

pub mod cli;
pub mod conversion;
pub mod document;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod raster;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert_config_file, convert_xml_to_toml, ConfigData, ConversionConfig, ConversionEngine,
    ConversionResult,
};
pub use document::{SourceDocument, TargetDocument, TypedValue};
pub use error::{ConversionError, ConversionErrorKind, ParseError};
pub use formatter::{infer_value, normalize_key, TomlFormatter};
pub use parser::ConfigSource;
pub use raster::{convert_image_folder, ImageBatchOptions, ImageBatchReport};

/// Convert XML configuration text to TOML with default configuration
pub fn convert_xml(xml: &str) -> Result<String, ConversionError> {
    let config = ConversionConfig::default();
    convert_xml_with_config(xml, &config)
}

/// Convert XML configuration text to TOML with custom configuration
pub fn convert_xml_with_config(
    xml: &str,
    config: &ConversionConfig,
) -> Result<String, ConversionError> {
    let result = convert_xml_to_toml(xml, config)?;
    Ok(result.content)
}
