use crate::conversion::engine::{ConversionEngine, ConvertedFile};
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::ConversionError;
use std::path::PathBuf;

/// Outcome of a batch of configuration conversions
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertedFile>,
    pub failed: Vec<(PathBuf, ConversionError)>,
    pub statistics: ConversionStatistics,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Batch convert configuration files into their sibling outputs. Optionally
/// continue on errors; otherwise the first failure aborts the batch.
pub fn convert_batch_files(
    inputs: &[PathBuf],
    config: &ConversionConfig,
    continue_on_error: bool,
) -> ConversionResult<BatchReport> {
    let engine = ConversionEngine::new(config.clone());
    let mut report = BatchReport::default();

    for input in inputs {
        match engine.convert_file_to_sibling(input) {
            Ok(converted) => {
                report.statistics.record(&converted.data.metadata);
                report.converted.push(converted);
            }
            Err(e) => {
                if continue_on_error {
                    tracing::error!(input = %input.display(), "{}", e.user_message());
                    report.statistics.record_failure();
                    report.failed.push((input.clone(), e));
                } else {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}
