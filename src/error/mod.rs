//! Error types and handling infrastructure for XML to TOML and image conversion

use anyhow::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Source too large: {size} bytes (limit: {limit} bytes)")]
    SourceTooLarge { size: u64, limit: usize },

    #[error("Key collision in {scope}: '{first}' and '{second}' both normalize to '{key}'")]
    KeyCollision {
        scope: String,
        key: String,
        first: String,
        second: String,
    },

    #[error("TOML serialization error: {message}")]
    Serialization { message: String },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Output validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Cannot decode image {}: {message}", .path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("Cannot encode PNG for {}: {message}", .path.display())]
    ImageEncode { path: PathBuf, message: String },

    #[error(
        "Cannot convert {}: {} is also the output of {}",
        .path.display(),
        .output.display(),
        .other.display()
    )]
    OutputConflict {
        path: PathBuf,
        output: PathBuf,
        other: PathBuf,
    },

    #[error("{failed} of {total} files failed to convert")]
    BatchFailed { failed: usize, total: usize },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn serialization(message: String) -> Self {
        Self::Serialization { message }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn validation_failed(message: String) -> Self {
        Self::ValidationFailed { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    /// Wrap an IO failure together with the path it happened on
    pub fn io(error: std::io::Error, path: &Path) -> Self {
        Self::conversion_with_source(
            ConversionErrorKind::io(error.to_string(), Some(path.to_path_buf())),
            error.into(),
        )
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Returns the kind for `Conversion` errors
    pub fn kind(&self) -> Option<&ConversionErrorKind> {
        match self {
            Self::Conversion { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "XML parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("XML parse error: {}", err.message)
                }
            }
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => format!("{}: {}", path.display(), message),
                ConversionErrorKind::SourceTooLarge { size, limit } => {
                    format!(
                        "Source file too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// XML parsing and structure errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self { message, location }
    }

    /// Build an error located at a byte offset of `input`
    pub fn at_offset(message: String, input: &str, offset: usize) -> Self {
        Self::new(message, Some(line_column(input, offset)))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// 1-based line and column of a byte offset
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let before = &input[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
