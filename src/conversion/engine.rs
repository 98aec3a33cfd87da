//! Core conversion engine for XML to TOML transformation

use crate::cli::path_mapping::sibling_output_path;
use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::output::write_output;
use crate::conversion::stats::ConversionMetadata;
use crate::conversion::ConversionResult;
use crate::document::{SourceDocument, TargetDocument, TargetSection, TargetSetting};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::formatter::format_to_toml;
use crate::formatter::keys::normalize_key;
use crate::formatter::values::convert_value;
use crate::parser::{parse_config_str, ConfigSource};
use crate::validation::StructureValidator;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct ConfigData {
    pub content: String,
    pub document: TargetDocument,
    pub metadata: ConversionMetadata,
}

impl ConfigData {
    /// Get the formatted TOML output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A conversion that was written to disk
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub data: ConfigData,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Normalize keys and infer value types
    pub fn convert_document(&self, source: &SourceDocument) -> ConversionResult<TargetDocument> {
        let mut section_keys = HashMap::with_capacity(source.sections.len());
        let mut sections = Vec::with_capacity(source.sections.len());

        for section in &source.sections {
            let key = normalize_key(&section.name);
            check_collision(&mut section_keys, &key, &section.name, "the document root")?;

            let mut setting_keys = HashMap::with_capacity(section.settings.len());
            let mut settings = Vec::with_capacity(section.settings.len());
            for setting in &section.settings {
                let setting_key = normalize_key(&setting.name);
                check_collision(
                    &mut setting_keys,
                    &setting_key,
                    &setting.name,
                    &format!("section '{}'", section.name),
                )?;

                let value = convert_value(&setting.value, self.config.infer_types);
                tracing::trace!(
                    section = %key,
                    key = %setting_key,
                    kind = %value.kind(),
                    "converted setting"
                );
                settings.push(TargetSetting {
                    key: setting_key,
                    value,
                });
            }

            sections.push(TargetSection { key, settings });
        }

        Ok(TargetDocument { sections })
    }

    /// Convert XML text to TOML
    pub fn convert_str(&self, xml: &str) -> ConversionResult<ConfigData> {
        let start_time = Instant::now();
        limits::check_size(xml.len() as u64, &self.config)?;

        let source = parse_config_str(xml)?;
        let document = self.convert_document(&source)?;
        let content = format_to_toml(&document, &self.config)?;

        if self.config.validate_output {
            let validator = StructureValidator::new(true, self.config.infer_types);
            let report = validator.validate(&content, &source)?;
            for warning in report.warnings() {
                tracing::warn!("{}", warning.message);
            }
        }

        let metadata = ConversionMetadata::new(
            xml.len() as u64,
            content.len() as u64,
            &document,
            start_time.elapsed(),
        );

        Ok(ConfigData {
            content,
            document,
            metadata,
        })
    }

    /// Convert XML from a source to TOML
    pub fn convert_from_source(&self, source: &ConfigSource) -> ConversionResult<ConfigData> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;

        let content = source.read_content().map_err(|e| match source.path() {
            Some(path) => ConversionError::io(e, path),
            None => ConversionError::conversion_with_source(
                ConversionErrorKind::io(
                    format!("Failed to read {}: {}", source.description(), e),
                    None,
                ),
                e.into(),
            ),
        })?;

        self.convert_str(&content)
    }

    /// Convert a file and write the result to `output_path`
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> ConversionResult<ConvertedFile> {
        let data = self.convert_from_source(&ConfigSource::File(input_path.to_path_buf()))?;
        write_output(output_path, data.content.as_bytes(), self.config.atomic_write)?;

        tracing::info!(
            input = %input_path.display(),
            output = %output_path.display(),
            sections = data.metadata.section_count,
            settings = data.metadata.setting_count,
            "converted configuration"
        );

        Ok(ConvertedFile {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            data,
        })
    }

    /// Convert a file into its sibling `.toml` file
    pub fn convert_file_to_sibling(&self, input_path: &Path) -> ConversionResult<ConvertedFile> {
        let output_path = sibling_output_path(input_path, &self.config.output_extension);
        self.convert_file(input_path, &output_path)
    }
}

/// Record `key` as produced by `original`, failing if another name already
/// normalized to it
fn check_collision(
    seen: &mut HashMap<String, String>,
    key: &str,
    original: &str,
    scope: &str,
) -> ConversionResult<()> {
    if let Some(first) = seen.get(key) {
        return Err(ConversionError::conversion(ConversionErrorKind::KeyCollision {
            scope: scope.to_string(),
            key: key.to_string(),
            first: first.clone(),
            second: original.to_string(),
        }));
    }
    seen.insert(key.to_string(), original.to_string());
    Ok(())
}

/// Convert XML text to TOML with the given configuration
pub fn convert_xml_to_toml(xml: &str, config: &ConversionConfig) -> ConversionResult<ConfigData> {
    ConversionEngine::new(config.clone()).convert_str(xml)
}

/// Convert a configuration file into its sibling `.toml` file with default
/// configuration, returning the output path
pub fn convert_config_file(path: &Path) -> ConversionResult<PathBuf> {
    let converted =
        ConversionEngine::new(ConversionConfig::default()).convert_file_to_sibling(path)?;
    Ok(converted.output_path)
}
