// ============================================================
// COLUMN PIPELINE
// ============================================================
// Two-phase per-column processing: detect the format, then coerce
// every cell under it. Columns are independent; each run is
// wholesale, so edits to raw values re-run both phases.

use tracing::{debug, info};

use super::format_classifier::FormatClassifier;
use crate::domain::column::{
    CellValue, ChangedBy, DetectionConfig, ImportColumn, SemanticType,
};
use crate::domain::error::{ImportError, Result};
use crate::infrastructure::formats::coerce_value;

/// Classification-and-coercion use case
pub struct ColumnPipeline {
    config: DetectionConfig,
    classifier: FormatClassifier,
}

impl ColumnPipeline {
    /// Create a pipeline, rejecting invalid settings up front
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ImportError::ValidationError(format!("Invalid detection config: {}", e)))?;
        Ok(Self {
            classifier: FormatClassifier::new(config.clone()),
            config,
        })
    }

    /// Build and fully process a column in one call
    pub fn process_column(&self, header: impl Into<String>, values: Vec<CellValue>) -> ImportColumn {
        let mut column = ImportColumn::new(header, values);
        self.process(&mut column);
        column
    }

    /// Detect the column's format, then coerce every cell under it
    pub fn process(&self, column: &mut ImportColumn) {
        let detected = self.classifier.classify(&column.header, &column.values);
        column.change_format(detected, ChangedBy::Auto);
        self.coerce_cells(column);

        info!(
            header = %column.header,
            format = %column.detected,
            rows = column.len(),
            flagged = column.valid.iter().filter(|v| !**v).count(),
            "column processed"
        );
    }

    /// Re-coerce under a caller-chosen format without re-classifying.
    /// This is the user-override path of the mapping screen.
    pub fn apply_format(
        &self,
        column: &mut ImportColumn,
        format: SemanticType,
        changed_by: ChangedBy,
    ) {
        column.change_format(format, changed_by);
        self.coerce_cells(column);
        debug!(header = %column.header, format = %format, "format override applied");
    }

    fn coerce_cells(&self, column: &mut ImportColumn) {
        let format = column.detected;
        let mut canonical = Vec::with_capacity(column.values.len());
        let mut valid = Vec::with_capacity(column.values.len());

        for raw in &column.values {
            let cell = coerce_value(raw, format, &self.config);
            // Polygon extraction is best-effort: a cell that fails to
            // re-parse keeps its raw value and is not greyed out, so
            // already-accepted geometry stays visible.
            if format == SemanticType::Polygon && !cell.valid {
                canonical.push(raw.clone());
                valid.push(true);
            } else {
                canonical.push(cell.canonical);
                valid.push(cell.valid);
            }
        }

        column.canonical = canonical;
        column.valid = valid;
        debug_assert!(column.is_aligned());
    }
}

impl Default for ColumnPipeline {
    fn default() -> Self {
        let config = DetectionConfig::default();
        Self {
            classifier: FormatClassifier::new(config.clone()),
            config,
        }
    }
}
