//! Statistics for conversion operations

use crate::document::{TargetDocument, ValueKind};
use std::time::Duration;

/// Counts of inferred value types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueKindCounts {
    pub booleans: usize,
    pub integers: usize,
    pub floats: usize,
    pub strings: usize,
}

impl ValueKindCounts {
    pub fn of_document(document: &TargetDocument) -> Self {
        let mut counts = Self::default();
        for setting in document.sections.iter().flat_map(|s| &s.settings) {
            counts.record(setting.value.kind());
        }
        counts
    }

    pub fn record(&mut self, kind: ValueKind) {
        match kind {
            ValueKind::Boolean => self.booleans += 1,
            ValueKind::Integer => self.integers += 1,
            ValueKind::Float => self.floats += 1,
            ValueKind::String => self.strings += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.booleans + self.integers + self.floats + self.strings
    }

    fn combine(&mut self, other: &Self) {
        self.booleans += other.booleans;
        self.integers += other.integers;
        self.floats += other.floats;
        self.strings += other.strings;
    }
}

/// Metadata about a single conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionMetadata {
    pub input_size: u64,
    pub output_size: u64,
    pub section_count: usize,
    pub setting_count: usize,
    pub value_kinds: ValueKindCounts,
    pub processing_time_ms: u64,
}

impl ConversionMetadata {
    pub fn new(
        input_size: u64,
        output_size: u64,
        document: &TargetDocument,
        processing_time: Duration,
    ) -> Self {
        Self {
            input_size,
            output_size,
            section_count: document.sections.len(),
            setting_count: document.setting_count(),
            value_kinds: ValueKindCounts::of_document(document),
            processing_time_ms: processing_time.as_millis() as u64,
        }
    }
}

/// Aggregated statistics across several conversions
#[derive(Debug, Clone, Default)]
pub struct ConversionStatistics {
    pub file_count: usize,
    pub failed_count: usize,
    pub input_size_bytes: u64,
    pub output_size_bytes: u64,
    pub section_count: usize,
    pub setting_count: usize,
    pub value_kinds: ValueKindCounts,
    pub processing_time_ms: u64,
}

impl ConversionStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one successful conversion
    pub fn record(&mut self, metadata: &ConversionMetadata) {
        self.file_count += 1;
        self.input_size_bytes += metadata.input_size;
        self.output_size_bytes += metadata.output_size;
        self.section_count += metadata.section_count;
        self.setting_count += metadata.setting_count;
        self.value_kinds.combine(&metadata.value_kinds);
        self.processing_time_ms += metadata.processing_time_ms;
    }

    pub fn record_failure(&mut self) {
        self.failed_count += 1;
    }

    /// Share of settings that got a non-string type, in percent
    pub fn typed_percentage(&self) -> f32 {
        let total = self.value_kinds.total();
        if total == 0 {
            return 0.0;
        }
        let typed = total - self.value_kinds.strings;
        typed as f32 / total as f32 * 100.0
    }

    /// Human-readable summary lines
    pub fn summary_lines(&self) -> Vec<String> {
        let kinds = &self.value_kinds;
        let mut lines = vec![
            format!("Files converted: {}", self.file_count),
            format!(
                "Sections: {}, settings: {}",
                self.section_count, self.setting_count
            ),
            format!(
                "Types: {} boolean, {} integer, {} float, {} string ({:.1}% typed)",
                kinds.booleans,
                kinds.integers,
                kinds.floats,
                kinds.strings,
                self.typed_percentage()
            ),
            format!(
                "Input size: {} bytes, output size: {} bytes",
                self.input_size_bytes, self.output_size_bytes
            ),
            format!("Processing time: {}ms", self.processing_time_ms),
        ];
        if self.failed_count > 0 {
            lines.push(format!("Files failed: {}", self.failed_count));
        }
        lines
    }
}
