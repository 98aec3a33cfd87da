use crate::conversion::config::ConversionConfig;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::ConfigSource;

/// Check the source size before attempting to read or parse the XML.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &ConfigSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    if let Some(size) = source.estimated_size() {
        check_size(size, config)?;
    }
    Ok(())
}

/// Check a content length against the configured limit
pub fn check_size(size: u64, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit as u64 {
        return Err(ConversionError::conversion(
            ConversionErrorKind::SourceTooLarge {
                size,
                limit: config.memory_limit,
            },
        ));
    }
    Ok(())
}
