//! Structural fidelity check of emitted TOML
//!
//! Re-parses the generated output and verifies that it holds exactly the
//! sections and settings of the source document, under their normalized
//! keys, with the values type inference produced.

use crate::document::{SourceDocument, ValueKind};
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::formatter::keys::normalize_key;
use crate::formatter::values::{convert_value, is_integer_literal};

/// Output fidelity validator
pub struct StructureValidator {
    /// Fail with an error instead of returning an invalid report
    strict: bool,
    /// Whether values were type-inferred during conversion
    infer_types: bool,
}

impl StructureValidator {
    pub fn new(strict: bool, infer_types: bool) -> Self {
        Self {
            strict,
            infer_types,
        }
    }

    /// Validate TOML output against the source it was produced from
    pub fn validate(
        &self,
        toml_output: &str,
        source: &SourceDocument,
    ) -> ConversionResult<ValidationReport> {
        let mut report = ValidationReport::new();

        match toml::from_str::<toml::Table>(toml_output) {
            Ok(table) => self.compare(&table, source, &mut report),
            Err(e) => report.add_error(&format!("Output is not valid TOML: {}", e)),
        }

        if self.strict && !report.is_valid() {
            let messages: Vec<&str> = report.errors().map(|i| i.message.as_str()).collect();
            return Err(ConversionError::conversion(
                ConversionErrorKind::validation_failed(messages.join("; ")),
            ));
        }

        Ok(report)
    }

    fn compare(&self, table: &toml::Table, source: &SourceDocument, report: &mut ValidationReport) {
        if table.len() != source.sections.len() {
            report.add_error(&format!(
                "Expected {} sections, found {}",
                source.sections.len(),
                table.len()
            ));
        }

        for section in &source.sections {
            let key = normalize_key(&section.name);
            let Some(entries) = table.get(&key).and_then(|v| v.as_table()) else {
                report.add_error(&format!(
                    "Section '{}' is missing as table [{}]",
                    section.name, key
                ));
                continue;
            };

            if entries.len() != section.settings.len() {
                report.add_error(&format!(
                    "Section [{}] has {} settings, expected {}",
                    key,
                    entries.len(),
                    section.settings.len()
                ));
            }

            for setting in &section.settings {
                let setting_key = normalize_key(&setting.name);
                let expected: toml::Value = convert_value(&setting.value, self.infer_types).into();
                match entries.get(&setting_key) {
                    None => report.add_error(&format!(
                        "Setting '{}' is missing as [{}].{}",
                        setting.name, key, setting_key
                    )),
                    Some(actual) if *actual != expected => report.add_error(&format!(
                        "Setting [{}].{} is {}, expected {}",
                        key, setting_key, actual, expected
                    )),
                    Some(actual) => {
                        if self.infer_types
                            && ValueKind::of_toml(actual) == Some(ValueKind::String)
                            && is_integer_literal(&setting.value)
                        {
                            report.add_warning(&format!(
                                "Setting [{}].{} kept as string: '{}' is out of numeric range",
                                key, setting_key, setting.value
                            ));
                        }
                    }
                }
            }
        }
    }
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
}

/// Outcome of validating one output
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.issues.push(ValidationIssue {
            severity: IssueSeverity::Error,
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, message: &str) {
        self.issues.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            message: message.to_string(),
        });
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
    }
}
