//! XML to TOML conversion module
//!
//! This module contains the core conversion logic, configuration, output
//! writing and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;
pub mod output;
pub mod stats;

pub use config::ConversionConfig;

pub use engine::{
    convert_config_file, convert_xml_to_toml, ConfigData, ConversionEngine, ConvertedFile,
};

use crate::error::ConversionError;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
