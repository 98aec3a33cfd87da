//! TOML output formatting: key normalization, value typing and serialization

pub mod keys;
pub mod values;

use crate::conversion::{ConversionConfig, ConversionResult};
use crate::document::TargetDocument;
use crate::error::{ConversionError, ConversionErrorKind};

pub use keys::normalize_key;
pub use values::infer_value;

/// Main TOML formatter
pub struct TomlFormatter {
    config: ConversionConfig,
}

impl TomlFormatter {
    /// Create a new formatter with configuration
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Serialize a target document, one `[section]` table per section
    pub fn format(&self, document: &TargetDocument) -> ConversionResult<String> {
        let mut output = String::new();
        if let Some(header) = &self.config.header_comment {
            for line in header.lines() {
                output.push_str("# ");
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        let body = toml::to_string(document).map_err(|e| {
            ConversionError::conversion_with_source(
                ConversionErrorKind::serialization(e.to_string()),
                e.into(),
            )
        })?;
        output.push_str(&body);
        Ok(output)
    }
}

/// Format a target document as TOML text
pub fn format_to_toml(
    document: &TargetDocument,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    TomlFormatter::new(config.clone()).format(document)
}
