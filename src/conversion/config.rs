//! Configuration options for XML to TOML conversion

/// Default extension of converted configuration files
pub const DEFAULT_OUTPUT_EXTENSION: &str = "toml";

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Maximum source size in bytes
    pub memory_limit: usize,
    /// Infer booleans and numbers from raw strings
    pub infer_types: bool,
    /// Re-parse the emitted TOML and check it against the source
    pub validate_output: bool,
    /// Write through a temporary file and rename on success
    pub atomic_write: bool,
    /// Extension of the sibling output file
    pub output_extension: String,
    /// Comment emitted at the top of the output
    pub header_comment: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            memory_limit: 100 * 1024 * 1024, // 100MB
            infer_types: true,
            validate_output: true,
            atomic_write: true,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            header_comment: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration that keeps every value as a string
    pub fn strings_only() -> Self {
        Self {
            infer_types: false,
            ..Default::default()
        }
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Enable/disable type inference
    pub fn with_type_inference(mut self, enabled: bool) -> Self {
        self.infer_types = enabled;
        self
    }

    /// Enable/disable output validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    /// Set the output file extension (without the dot)
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    /// Set the header comment
    pub fn with_header_comment(mut self, comment: Option<String>) -> Self {
        self.header_comment = comment;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        let ext = self.output_extension.as_str();
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(format!(
                "Output extension '{}' must be a bare extension such as 'toml'",
                ext
            ));
        }

        Ok(())
    }
}

/// Parse a size string (e.g., "100MB", "1GB", "500KB", "2048")
pub fn parse_size(limit: &str) -> Result<usize, String> {
    let limit_str = limit.trim().to_uppercase();
    let invalid = || format!("Invalid memory limit: {}", limit);

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}
