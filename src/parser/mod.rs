//! XML configuration parsing and input discovery

pub mod directory;
pub mod filter;
pub mod namespace;
pub mod xml;

use crate::document::SourceDocument;
use crate::error::{ParseError, ParseResult};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source for parsing operations
#[derive(Debug, Clone)]
pub enum ConfigSource {
    String(String),
    File(PathBuf),
    Stdin,
}

impl ConfigSource {
    /// Parse a source document from this source
    pub fn parse(&self) -> ParseResult<SourceDocument> {
        let content = self.read_content().map_err(|e| {
            ParseError::new(format!("Failed to read {}: {}", self.description(), e), None)
        })?;
        parse_config_str(&content)
    }

    /// Read content as string
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            ConfigSource::String(content) => Ok(content.clone()),
            ConfigSource::File(path) => std::fs::read_to_string(path),
            ConfigSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            ConfigSource::String(_) => "string input".to_string(),
            ConfigSource::File(path) => format!("file: {}", path.display()),
            ConfigSource::Stdin => "standard input".to_string(),
        }
    }

    /// Size in bytes when it can be known without reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            ConfigSource::String(s) => Some(s.len() as u64),
            ConfigSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            ConfigSource::Stdin => None,
        }
    }

    /// Path of the file behind this source
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Parse XML configuration text
pub fn parse_config_str(content: &str) -> ParseResult<SourceDocument> {
    // A leading BOM is not part of the document
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let document = xml::parse_document(content)?;
    tracing::debug!(
        sections = document.sections.len(),
        settings = document.setting_count(),
        "parsed configuration document"
    );
    Ok(document)
}
